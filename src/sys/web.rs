use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::errors::*;
use crate::settings::Settings;
use crate::video::{backends, Renderer};

static LOGGER: WebBrowserLogger = WebBrowserLogger;

/// Forwards panics and logs to the browser console.
pub(crate) fn init() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));

    if ::log::set_logger(&LOGGER).is_ok() {
        ::log::set_max_level(::log::LevelFilter::Info);
    }
}

pub(crate) fn run(settings: &Settings) -> Result<()> {
    let visitor = backends::new(settings)?;
    Renderer::new(visitor).run(settings.clear_color)?;
    Ok(())
}

/// Calls `f` once the page has loaded, right away if that already happened.
pub(crate) fn on_load<F>(f: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let window =
        web_sys::window().ok_or_else(|| Error::Backend("No global `window` exists.".into()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Backend("Should have a document on window.".into()))?;

    if document.ready_state() == "complete" {
        f();
        return Ok(());
    }

    let mut f = Some(f);
    let closure = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(f) = f.take() {
            f();
        }
    }) as Box<dyn FnMut(_)>);

    window
        .add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())
        .map_err(|_| Error::Backend("Failed to listen to `load`.".into()))?;

    // The listener lives as long as the page.
    closure.forget();
    Ok(())
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

struct WebBrowserLogger;

impl ::log::Log for WebBrowserLogger {
    fn enabled(&self, metadata: &::log::Metadata) -> bool {
        metadata.level() <= ::log::Level::Info
    }

    fn log(&self, record: &::log::Record) {
        if self.enabled(record.metadata()) {
            let filename = record.file().unwrap_or("Unknown");

            log(&format!(
                "{}: {} ({}:{})",
                record.level(),
                record.args(),
                filename,
                record.line().unwrap_or(0)
            ));
        }
    }

    fn flush(&self) {}
}
