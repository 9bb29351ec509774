//! Represents an OpenGL context and the window around it. Browsers own their
//! canvas, so this only exists for native targets.

mod glutin;

pub use self::glutin::GlutinWindow;
