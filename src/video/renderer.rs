use std::fmt;

use crate::errors::*;
use crate::utils::prelude::Color;

use super::assets::{Primitive, VertexAttribute};
use super::backends::Visitor;
use super::buffer::{self, Buffers, TRIANGLE};
use super::program::{self, ProgramInfo, POSITION_ATTRIBUTE, VERTEX_POSITION};

/// The progress of the pipeline. Stages are only ever entered in declaration
/// order, and `Drawn` is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    ContextAcquired,
    ProgramLinked,
    BuffersUploaded,
    AttributesBound,
    Drawn,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Drives a `Visitor` through the stages of the single frame.
pub struct Renderer {
    visitor: Box<dyn Visitor>,
    stage: Stage,
    info: Option<ProgramInfo>,
    buffers: Option<Buffers>,
}

impl Renderer {
    /// Wraps the visitor of an acquired context.
    pub fn new(visitor: Box<dyn Visitor>) -> Self {
        info!("Entering stage {}.", Stage::ContextAcquired);

        Renderer {
            visitor,
            stage: Stage::ContextAcquired,
            info: None,
            buffers: None,
        }
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn program_info(&self) -> Option<&ProgramInfo> {
        self.info.as_ref()
    }

    #[inline]
    pub fn buffers(&self) -> Option<Buffers> {
        self.buffers
    }

    /// Runs every stage with the built-in shaders and clears to
    /// `clear_color`.
    pub fn run(mut self, clear_color: Color) -> Result<Self> {
        self.link_program(super::VERTEX_SHADER, super::FRAGMENT_SHADER)?;
        self.upload_buffers()?;
        self.bind_attributes()?;
        self.draw(clear_color)?;
        Ok(self)
    }

    /// Compiles and links the shader pair, then resolves the location of the
    /// position input on the linked program.
    pub fn link_program(&mut self, vs: &str, fs: &str) -> Result<&ProgramInfo> {
        self.check(Stage::ContextAcquired, Stage::ProgramLinked)?;

        let program = program::init_shader_program(&mut *self.visitor, vs, fs)?;
        let info = ProgramInfo::new(
            &mut *self.visitor,
            program,
            &[(VERTEX_POSITION, POSITION_ATTRIBUTE)],
        )?;

        self.enter(Stage::ProgramLinked);
        Ok(self.info.get_or_insert(info))
    }

    pub fn upload_buffers(&mut self) -> Result<Buffers> {
        self.check(Stage::ProgramLinked, Stage::BuffersUploaded)?;

        let buffers = buffer::init_buffers(&mut *self.visitor)?;
        self.buffers = Some(buffers);
        self.enter(Stage::BuffersUploaded);
        Ok(buffers)
    }

    /// Describes the position buffer as 3 tightly packed floats per vertex.
    pub fn bind_attributes(&mut self) -> Result<()> {
        self.check(Stage::BuffersUploaded, Stage::AttributesBound)?;

        let (info, buffers) = self.resources()?;
        let location = info
            .attribute(VERTEX_POSITION)
            .ok_or_else(|| Error::AttributeUndefined(POSITION_ATTRIBUTE.into()))?;

        unsafe {
            self.visitor.bind_vertex_attribute(
                buffers.position,
                location,
                VertexAttribute::floats(3),
            )?;
        }

        self.enter(Stage::AttributesBound);
        Ok(())
    }

    /// Clears the color buffer, makes the program current and draws the
    /// triangle. Components of `clear_color` are clipped to `[0, 1]`.
    /// Returns the number of assembled triangles.
    pub fn draw(&mut self, clear_color: Color) -> Result<u32> {
        self.check(Stage::AttributesBound, Stage::Drawn)?;

        let (info, _) = self.resources()?;
        let count = TRIANGLE.len() as u32;

        let triangles = unsafe {
            self.visitor.clear(clear_color.clip())?;
            self.visitor.use_program(info.program())?;
            let triangles = self.visitor.draw(Primitive::TriangleStrip, 0, count)?;
            self.visitor.flush()?;
            triangles
        };

        info!("Drew {} triangle(s) from {} vertices.", triangles, count);
        self.enter(Stage::Drawn);
        Ok(triangles)
    }

    fn resources(&self) -> Result<(ProgramInfo, Buffers)> {
        match (self.info.as_ref(), self.buffers) {
            (Some(info), Some(buffers)) => Ok((info.clone(), buffers)),
            (None, _) => Err(Error::HandleInvalid("ProgramInfo".into())),
            (_, None) => Err(Error::HandleInvalid("Buffers".into())),
        }
    }

    fn check(&self, expected: Stage, to: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(Error::StageMismatch {
                to: to.to_string(),
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            })
        }
    }

    fn enter(&mut self, stage: Stage) {
        info!("Entering stage {}.", stage);
        self.stage = stage;
    }
}
