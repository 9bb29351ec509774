//! Commonly used utilities like handles and colors.

#[macro_use]
pub mod handle;
pub mod color;

pub mod prelude {
    pub use super::color::Color;
    pub use super::handle::{Handle, HandleIndex, ObjectVec};
}
