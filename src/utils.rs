pub fn set_panic_hook() {
    // Routes Rust panics to `console.error` so they show up in the browser devtools
    // instead of as an opaque "unreachable executed".
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}
