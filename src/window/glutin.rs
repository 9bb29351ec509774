use glutin::GlContext;

use crate::errors::*;
use crate::settings::{Settings, Version};
use crate::video::backends::gl::capabilities;

pub struct GlutinWindow {
    window: glutin::GlWindow,
    events_loop: glutin::EventsLoop,
}

impl GlutinWindow {
    /// Creates the window and a context of exactly `settings.version`, makes
    /// it current and loads the GL functions from it.
    pub fn new(settings: &Settings) -> Result<Self> {
        let params = &settings.window;
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ));

        let context = match settings.version {
            Version::GL(major, minor) => glutin::ContextBuilder::new()
                .with_gl(glutin::GlRequest::Specific(
                    glutin::Api::OpenGl,
                    (major, minor),
                ))
                .with_gl_profile(glutin::GlProfile::Core),
            Version::ES(major, minor) => glutin::ContextBuilder::new().with_gl(
                glutin::GlRequest::Specific(glutin::Api::OpenGlEs, (major, minor)),
            ),
        };

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop).map_err(|err| {
            Error::ContextUnsupported(settings.version.to_string(), format!("{}", err))
        })?;

        unsafe {
            window.make_current()?;
            gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);

            let version = capabilities::check_version(settings.version)?;
            info!("Acquired {} context on window `{}`.", version, params.title);
        }

        Ok(GlutinWindow {
            window,
            events_loop,
        })
    }

    #[inline]
    pub fn swap_buffers(&self) -> Result<()> {
        self.window.swap_buffers()?;
        Ok(())
    }

    /// Blocks until the user closes the window. Nothing is redrawn meanwhile.
    pub fn wait_until_closed(&mut self) {
        self.events_loop.run_forever(|event| match event {
            glutin::Event::WindowEvent {
                event: glutin::WindowEvent::CloseRequested,
                ..
            } => glutin::ControlFlow::Break,
            _ => glutin::ControlFlow::Continue,
        });
    }
}
