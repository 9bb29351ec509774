#[cfg(not(target_arch = "wasm32"))]
#[macro_use]
extern crate log;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    tristrip::init();

    if let Err(err) = tristrip::run(&tristrip::Settings::default()) {
        error!("{}", err);
        std::process::exit(1);
    }
}

// Browsers start from the `wasm_bindgen(start)` hook of the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
