use crate::domain::format::{format_mileage, format_price, strip_html_tags, truncate_chars};
use crate::domain::listing::Listing;
use maud::{html, Markup};

const CARD_DESCRIPTION_MAX: usize = 150;

/// Plain-text teaser of a seller description.
pub fn card_description(listing: &Listing) -> String {
    match listing.description.as_deref() {
        Some(html) if !html.is_empty() => {
            let plain = strip_html_tags(html);
            if plain.chars().count() <= CARD_DESCRIPTION_MAX {
                plain
            } else {
                format!("{}...", truncate_chars(&plain, CARD_DESCRIPTION_MAX))
            }
        }
        _ => "No description available".to_string(),
    }
}

pub fn car_card(listing: &Listing) -> Markup {
    let href = format!("/used-cars/{}", listing.id);
    let title = listing
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| listing.headline());

    html! {
        article class="car-card" data-id=(listing.id) data-slug=(listing.slug()) {
            div class="car-card-media" {
                a href=(href) {
                    img
                        src=(listing.main_image())
                        alt=(format!("{} - {}", listing.headline(), title))
                        loading="lazy";
                }
                @if listing.is_featured {
                    span class="badge badge-featured" { "FEATURED" }
                }
                span class="picture-count" { (listing.pictures.len()) " photos" }
            }

            div class="car-card-body" {
                p class="price" { (format_price(listing.price, listing.currency())) }
                a href=(href) class="title" { (title) }
                p class="description" { (card_description(listing)) }

                ul class="facts" {
                    li { (format_mileage(listing.km_driven)) }
                    @if let Some(year) = listing.year {
                        li { (year) }
                    }
                    @if !listing.display_city().is_empty() {
                        li { (listing.display_city()) }
                    }
                    @if let Some(fuel) = &listing.fuel_type {
                        li { (fuel) }
                    }
                    @if let Some(transmission) = &listing.transmission_type {
                        li { (transmission) }
                    }
                    @if let Some(cc) = listing.engine_cc {
                        li { (cc) "cc" }
                    }
                }

                @if !listing.seller_display_name().is_empty() {
                    p class="seller" { "Seller: " (listing.seller_display_name()) }
                }
            }

            div class="car-card-actions" {
                @if listing.has_whatsapp() {
                    a class="btn btn-green" href=(format!("https://wa.me/{}", listing.whatsapp_number.as_deref().unwrap_or_default())) target="_blank" rel="noopener" {
                        "WhatsApp"
                    }
                }
                a href=(href) class="details-link" { "View Details" }
            }
        }
    }
}
