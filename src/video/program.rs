use std::collections::HashMap;

use crate::errors::*;

use super::assets::{ProgramHandle, ShaderStage};
use super::backends::Visitor;

/// The name of the position input in the vertex shader.
pub const POSITION_ATTRIBUTE: &str = "a_position";
/// The symbolic key the position location is recorded under.
pub const VERTEX_POSITION: &str = "vertexPosition";

/// A linked program and the locations of its input attributes. It can only be
/// built from a `ProgramHandle`, which backends hand out after a successful
/// link.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramInfo {
    program: ProgramHandle,
    attributes: HashMap<&'static str, u32>,
}

impl ProgramInfo {
    /// Queries the locations of `attributes`, given as pairs of symbolic key
    /// and shader input name.
    pub fn new(
        visitor: &mut dyn Visitor,
        program: ProgramHandle,
        attributes: &[(&'static str, &str)],
    ) -> Result<Self> {
        let mut locations = HashMap::new();
        for &(key, name) in attributes {
            let location = unsafe { visitor.attribute_location(program, name)? };
            debug!("Attribute `{}` is bound at location {}.", name, location);
            locations.insert(key, location);
        }

        Ok(ProgramInfo {
            program,
            attributes: locations,
        })
    }

    #[inline]
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Returns the location recorded under the symbolic `key`.
    #[inline]
    pub fn attribute(&self, key: &str) -> Option<u32> {
        self.attributes.get(key).cloned()
    }
}

/// Compiles both stages independently, then links them into one program.
pub fn init_shader_program(visitor: &mut dyn Visitor, vs: &str, fs: &str) -> Result<ProgramHandle> {
    let vs = unsafe { visitor.create_shader(ShaderStage::Vertex, vs)? };
    let fs = unsafe { visitor.create_shader(ShaderStage::Fragment, fs)? };
    let program = unsafe { visitor.create_program(vs, fs)? };

    debug!("Linked {} from {} and {}.", program, vs, fs);
    Ok(program)
}
