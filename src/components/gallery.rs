use crate::services;
use dioxus::prelude::*;
use photo_gallery::{PhotoGrid, PhotoRecord};

#[component]
pub fn GalleryScreen() -> Element {
    let mut photos = use_signal(Vec::<PhotoRecord>::new);
    let mut status = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    // Subscribe first so nothing committed during the load is missed
    use_future(move || async move {
        let mut changes = match services::subscribe().await {
            Ok(changes) => changes,
            Err(e) => {
                log::error!("Opening gallery failed: {}", e);
                status.set(Some(e.user_message()));
                return;
            }
        };

        match services::load_gallery().await {
            Ok(loaded) => photos.set(loaded),
            Err(e) => {
                log::error!("Loading gallery failed: {}", e);
                status.set(Some(e.user_message()));
            }
        }

        while changes.changed().await.is_ok() {
            let latest = changes.borrow_and_update().clone();
            photos.set(latest);
        }
    });

    let take_photo = move |_: Event<MouseData>| {
        if busy() {
            return;
        }
        busy.set(true);
        status.set(None);
        spawn(async move {
            if let Err(e) = services::take_photo().await {
                log::warn!("Capture failed: {}", e);
                status.set(Some(e.user_message()));
            }
            busy.set(false);
        });
    };

    let delete = EventHandler::new(move |file_path: String| {
        spawn(async move {
            if let Err(e) = services::delete_photo(&file_path).await {
                log::warn!("Delete failed: {}", e);
                status.set(Some(e.user_message()));
            }
        });
    });

    rsx! {
        div { style: "padding: 16px; max-width: 600px; margin: 0 auto; min-height: 100vh; background: #f5f5f5;",
            h1 { style: "color: #0066cc; text-align: center; margin: 48px 0 24px 0; font-size: 28px; font-weight: 700;",
                "📷 Photo Gallery"
            }
            if let Some(msg) = status() {
                div { class: "card-header",
                    p { style: "font-size: 14px; color: #b00020; margin: 0;", "{msg}" }
                }
            }
            div { class: "card", style: "margin-bottom: 96px;",
                PhotoGrid { photos: photos(), on_delete: delete }
            }
            button {
                class: "btn-primary",
                style: "position: fixed; bottom: 24px; right: 24px; width: 64px; height: 64px; border-radius: 50%; font-size: 28px;",
                disabled: busy(),
                onclick: take_photo,
                "📸"
            }
        }
    }
}
