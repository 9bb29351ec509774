use crate::errors::*;
use crate::settings::Settings;
use crate::video::backends::gl::visitor::GLVisitor;
use crate::video::Renderer;
use crate::window::GlutinWindow;

/// Logs go to stderr, filtered with `RUST_LOG`.
pub(crate) fn init() {
    let _ = env_logger::try_init();
}

pub(crate) fn run(settings: &Settings) -> Result<()> {
    let mut window = GlutinWindow::new(settings)?;
    let visitor = unsafe { GLVisitor::new()? };

    Renderer::new(Box::new(visitor)).run(settings.clear_color)?;
    window.swap_buffers()?;

    window.wait_until_closed();
    Ok(())
}
