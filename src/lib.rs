//! # Tristrip
//!
//! Draws one static triangle with a programmable pipeline. The program
//! acquires a rendering context, compiles and links a shader pair, uploads
//! the vertex positions, binds them to the position attribute and issues a
//! single `TRIANGLE_STRIP` draw call. Nothing is animated or redrawn.
//!
//! Browsers get a WebGL2 context on the canvas `#canvas` once the page has
//! loaded, native targets get an OpenGL 3.3 core context in a glutin window.
//! A headless backend records the same sequence of commands without a GPU.
//!
//! ```rust,ignore
//! tristrip::init();
//! tristrip::run(&tristrip::Settings::default())?;
//! ```

#[macro_use]
extern crate log;

#[macro_use]
pub mod errors;
#[macro_use]
pub mod utils;

pub mod settings;
pub mod video;

#[cfg(not(target_arch = "wasm32"))]
pub mod window;

mod sys;

pub use crate::errors::{Error, Result};
pub use crate::settings::Settings;

pub mod prelude {
    pub use crate::errors::{Error, Result};
    pub use crate::settings::{Settings, Version, WindowParams};
    pub use crate::utils::prelude::*;
    pub use crate::video::backends::headless::{Command, HeadlessEnvironment};
    pub use crate::video::backends::Visitor;
    pub use crate::video::{Buffers, ProgramInfo, Renderer, Stage, TRIANGLE};
}

/// Installs the logger of the current platform. Calling it more than once is
/// harmless.
pub fn init() {
    sys::init();
}

/// Acquires the context described by `settings` and draws the triangle on
/// it. The first failure aborts the sequence.
pub fn run(settings: &Settings) -> Result<()> {
    sys::run(settings)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::prelude::*;

    use super::{sys, Settings};

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        sys::init();

        sys::on_load(|| {
            if let Err(err) = super::run(&Settings::default()) {
                error!("{}", err);
                wasm_bindgen::throw_str(&err.to_string());
            }
        })
        .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
