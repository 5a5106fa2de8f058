use crate::seo::PageMetadata;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn not_found_page(meta: &PageMetadata, detail: &str) -> Markup {
    desktop_layout(
        meta,
        html! {
            main class="container error" {
                h1 { "404 - Not Found" }
                p { "The page you are looking for does not exist." }
                @if !detail.is_empty() {
                    p class="detail" { (detail) }
                }
                a href="/used-cars" { "Go back to Used Cars" }
            }
        },
    )
}

pub fn error_page(status: u16, message: &str, site_name: &str) -> Markup {
    let title = format!("Error {status}");
    let mut meta = PageMetadata::basic(&title, message, site_name);
    meta.indexable = false;

    if status == 404 {
        let detail = if message == "Not Found" { "" } else { message };
        return not_found_page(&meta, detail);
    }

    desktop_layout(
        &meta,
        html! {
            main class="container error" {
                h1 { (title) }
                p { (message) }
                p { a href="/used-cars" { "Go back to Used Cars" } }
            }
        },
    )
}
