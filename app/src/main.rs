mod api;
mod app;
mod components;
mod pages;
mod session;
mod types;
mod utils;

use dioxus_logger::tracing::Level;

fn main() {
    let level = if cfg!(debug_assertions) { Level::DEBUG } else { Level::INFO };
    if let Err(err) = dioxus_logger::init(level) {
        eprintln!("logger already initialized: {err}");
    }
    dioxus::launch(app::App);
}
