use dioxus::prelude::*;

mod components;
mod error;
mod services;

use components::GalleryScreen;

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Debug),
    );

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            div { style: "flex: 1; overflow-y: auto;", GalleryScreen {} }
        }
    }
}
