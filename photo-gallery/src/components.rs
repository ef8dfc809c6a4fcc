//! Dioxus UI components for the photo gallery
//!
//! Components only render what they are given; loading and capturing stays
//! with the [`crate::GalleryStore`] owned by the application.

use crate::models::PhotoRecord;
use dioxus::prelude::*;

/// Grid of gallery photos, newest first
///
/// `on_delete` receives the `file_path` of the tapped photo.
#[component]
pub fn PhotoGrid(photos: Vec<PhotoRecord>, on_delete: Option<EventHandler<String>>) -> Element {
    if photos.is_empty() {
        return rsx! {
            div { style: "padding: 32px; text-align: center; color: #888;", "📷 No photos yet" }
        };
    }

    rsx! {
        div { style: "display: grid; grid-template-columns: repeat(3, 1fr); gap: 4px; padding: 4px;",
            for photo in photos {
                PhotoTile { key: "{photo.file_path}", photo, on_delete }
            }
        }
    }
}

/// Single square thumbnail
#[component]
pub fn PhotoTile(
    photo: PhotoRecord,
    #[props(!optional)] on_delete: Option<EventHandler<String>>,
) -> Element {
    let src = photo.display_src().to_string();
    let file_path = photo.file_path.clone();

    rsx! {
        div { style: "position: relative; aspect-ratio: 1 / 1; overflow: hidden; background: #eee;",
            img {
                src: "{src}",
                alt: "{photo.file_name()}",
                style: "width: 100%; height: 100%; object-fit: cover;",
            }
            if let Some(handler) = on_delete {
                button {
                    style: "position: absolute; top: 4px; right: 4px; border: none; border-radius: 50%; background: rgba(0,0,0,0.5); color: white; width: 28px; height: 28px;",
                    onclick: move |_| handler.call(file_path.clone()),
                    "✕"
                }
            }
        }
    }
}
