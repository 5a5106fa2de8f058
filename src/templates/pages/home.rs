// templates/pages/home.rs

use crate::seo::PageMetadata;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

pub fn home_page(site_name: &str) -> Markup {
    let meta = PageMetadata::basic("Home", "Welcome to the home page", site_name);

    desktop_layout(
        &meta,
        html! {
            main class="container" {
                h1 { "Welcome to " (site_name) }

                (card("Used cars", html! {
                    p { "Browse pre-owned vehicles from trusted dealers." }
                    a href="/used-cars" { "Browse Used Cars" }
                }))
            }
        },
    )
}
