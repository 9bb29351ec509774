//! The backend of renderer, which should be responsible for only one thing:
//! submitting draw-calls using low-level video APIs.

pub mod headless;

use crate::errors::*;
use crate::utils::prelude::Color;

use super::assets::*;

pub trait Visitor {
    /// Compiles `src` as a shader of `stage`. The shader object is released
    /// before returning if the compilation fails.
    unsafe fn create_shader(&mut self, stage: ShaderStage, src: &str) -> Result<ShaderHandle>;

    /// Links a vertex and a fragment shader into an executable program.
    unsafe fn create_program(&mut self, vs: ShaderHandle, fs: ShaderHandle)
        -> Result<ProgramHandle>;

    /// Queries the location of a named input attribute of a linked program.
    unsafe fn attribute_location(&mut self, program: ProgramHandle, name: &str) -> Result<u32>;

    /// Allocates a vertex buffer, binds it as the active array buffer and
    /// uploads `bytes`.
    unsafe fn create_vertex_buffer(&mut self, hint: BufferHint, bytes: &[u8])
        -> Result<BufferHandle>;

    /// Uses `buffer` as the data source of the attribute at `location`.
    unsafe fn bind_vertex_attribute(
        &mut self,
        buffer: BufferHandle,
        location: u32,
        attribute: VertexAttribute,
    ) -> Result<()>;

    /// Clears the color buffer.
    unsafe fn clear(&mut self, color: Color) -> Result<()>;

    unsafe fn use_program(&mut self, program: ProgramHandle) -> Result<()>;

    /// Draws `count` vertices starting at `first`, returns the number of
    /// assembled primitives.
    unsafe fn draw(&mut self, primitive: Primitive, first: u32, count: u32) -> Result<u32>;

    /// Blocks until all execution is complete and presents the frame if the
    /// surface needs it.
    unsafe fn flush(&mut self) -> Result<()>;
}

#[cfg(not(target_arch = "wasm32"))]
pub mod gl;

#[cfg(target_arch = "wasm32")]
pub mod webgl;

#[cfg(target_arch = "wasm32")]
pub fn new(settings: &crate::settings::Settings) -> Result<Box<dyn Visitor>> {
    let visitor = unsafe { webgl::visitor::WebGLVisitor::new(settings)? };
    Ok(Box::new(visitor))
}
