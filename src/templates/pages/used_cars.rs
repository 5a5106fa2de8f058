// templates/pages/used_cars.rs

use crate::api::CarsList;
use crate::seo::PageMetadata;
use crate::templates::{car_card, desktop_layout, pagination_nav};
use maud::{html, Markup};

pub fn used_cars_page(list: &CarsList<'_>, meta: &PageMetadata) -> Markup {
    let page = &list.page;
    let heading = if list.query.featured {
        "Featured Used Cars"
    } else {
        "Used Cars for Sale"
    };

    desktop_layout(
        meta,
        html! {
            main class="container" {
                h1 { (heading) }

                @if page.items.is_empty() {
                    p class="empty" { "No cars found." }
                } @else {
                    h4 class="showing" {
                        "Showing " (page.meta.start_index) " - " (page.meta.end_index)
                        " of " (page.meta.total_items) " Used Cars"
                    }
                    section class="car-list" {
                        @for listing in &page.items {
                            (car_card(listing))
                        }
                    }
                }

                (pagination_nav(&page.meta, &list.query))
            }
        },
    )
}
