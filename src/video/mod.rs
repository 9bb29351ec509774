//! The rendering pipeline: compiles the shader pair, uploads the triangle and
//! issues the draw call through a backend `Visitor`.
//!
//! Every step runs exactly once and in a fixed order,
//!
//! ```text
//! ContextAcquired -> ProgramLinked -> BuffersUploaded -> AttributesBound -> Drawn
//! ```
//!
//! and any failure aborts the whole sequence. GPU objects are never released,
//! they live as long as the context does.

pub mod assets;
pub mod backends;
pub mod buffer;
pub mod program;
pub mod renderer;

pub use self::buffer::{Buffers, TRIANGLE};
pub use self::program::ProgramInfo;
pub use self::renderer::{Renderer, Stage};

/// Body of the vertex stage, without any version directive.
pub const VERTEX_SHADER: &str = include_str!("../shaders/triangle.vert");
/// Body of the fragment stage, without any version directive.
pub const FRAGMENT_SHADER: &str = include_str!("../shaders/triangle.frag");
