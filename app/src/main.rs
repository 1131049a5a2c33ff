#![allow(non_snake_case)]

use dioxus_logger::tracing::Level;

mod api;
mod app;
mod components;
mod dom;
mod speech;
mod theme;

use app::App;

fn main() {
    dioxus_logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}
