// templates/pages/car_detail.rs

use crate::api::CarDetail;
use crate::domain::format::{format_mileage, format_price, strip_html_tags};
use crate::domain::listing::Listing;
use crate::domain::relevance::ListingStats;
use crate::seo::PageMetadata;
use crate::templates::{car_card, card, desktop_layout};
use maud::{html, Markup};

/// Label/value rows of the specification grid. Empty values are left out.
pub fn specifications(car: &Listing, current_year: i64) -> Vec<(&'static str, String)> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let specs_origin = if car.regional_specs.unwrap_or(0) != 0 {
        "GCC"
    } else {
        "Imported"
    };

    vec![
        ("Year", car.year.map(|y| y.to_string()).unwrap_or_default()),
        (
            "Age",
            car.age(current_year)
                .filter(|age| *age >= 0)
                .map(|age| format!("{age} years"))
                .unwrap_or_default(),
        ),
        ("Mileage", format_mileage(car.km_driven)),
        ("Fuel Type", text(&car.fuel_type)),
        ("Transmission", text(&car.transmission_type)),
        ("Engine", car.engine_cc.map(|cc| format!("{cc}cc")).unwrap_or_default()),
        ("Body Style", text(&car.body_style)),
        ("Color", text(&car.exterior_color)),
        ("Doors", text(&car.doors)),
        ("Seats", car.seats.map(|s| s.to_string()).unwrap_or_default()),
        ("Specs", specs_origin.to_string()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .collect()
}

fn gallery(car: &Listing) -> Markup {
    html! {
        section class="gallery" {
            @if car.pictures.is_empty() {
                img class="gallery-main" src=(car.primary_image()) alt=(car.headline());
            } @else {
                @for (idx, pic) in car.pictures.iter().enumerate() {
                    img
                        class=(if idx == 0 { "gallery-main" } else { "gallery-thumb" })
                        src=(pic)
                        alt=(format!("{} - photo {}", car.headline(), idx + 1))
                        loading=(if idx == 0 { "eager" } else { "lazy" });
                }
            }
        }
    }
}

fn contact_card(car: &Listing) -> Markup {
    html! {
        aside class="contact-card" {
            p class="price" { (format_price(car.price, car.currency())) }
            p class="price-label" { "Final Price" }

            @if let Some(logo) = car.auto_company_logo.as_deref().filter(|l| !l.is_empty()) {
                img class="dealer-logo" src=(logo) alt=(car.seller_display_name()) loading="lazy";
            }
            p class="dealer" { (car.seller_display_name()) }
            p class="city" { (car.display_city()) }

            @if car.has_whatsapp() {
                a class="btn btn-green" href=(format!("https://wa.me/{}", car.whatsapp_number.as_deref().unwrap_or_default())) target="_blank" rel="noopener" {
                    "WhatsApp"
                }
            }

            ul class="badges" {
                @if car.warranty.unwrap_or(0) != 0 {
                    li class="badge-warranty" { "Warranty Available" }
                }
                @if car.is_featured {
                    li class="badge-featured" { "Featured Listing" }
                }
                li class="badge-verified" { "Verified Dealer" }
            }
        }
    }
}

fn market_comparison(car: &Listing, stats: &ListingStats) -> Markup {
    html! {
        @if stats.has_similar_cars {
            p {
                "Compared with " (stats.similar_cars_count) " similar "
                (car.display_make()) " " (car.display_model()) " listings:"
            }
        } @else {
            p { "No similar listings to compare with yet." }
        }
        dl class="market" {
            dt { "Average price" }
            dd {
                (format_price(stats.average_price, car.currency()))
                " (" (stats.price_comparison.label()) ")"
            }
            dt { "Average mileage" }
            dd {
                (format_mileage(stats.average_mileage))
                " (" (stats.mileage_comparison.label()) ")"
            }
        }
    }
}

pub fn car_detail_page(detail: &CarDetail<'_>, meta: &PageMetadata, current_year: i64) -> Markup {
    let car = detail.car;
    let description = car
        .description
        .as_deref()
        .map(strip_html_tags)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    desktop_layout(
        meta,
        html! {
            main class="container car-detail" {
                div class="detail-main" {
                    h1 { (car.headline()) }
                    p class="subtitle" {
                        span class="city" { (car.display_city()) }
                        span class="id" { "ID: " (car.id) }
                    }

                    (gallery(car))

                    (card("Description", html! {
                        p class="description" { (description) }
                    }))

                    (card("Vehicle Highlights", html! {
                        dl class="specs" {
                            @for (label, value) in specifications(car, current_year) {
                                div class="spec" {
                                    dt { (label) }
                                    dd { (value) }
                                }
                            }
                        }
                    }))

                    (card("Market Comparison", market_comparison(car, &detail.stats)))
                }

                (contact_card(car))

                @if !detail.related.is_empty() {
                    section class="related" {
                        h2 { "Related Cars" }
                        @for listing in &detail.related {
                            (car_card(listing))
                        }
                    }
                }

                @if !detail.same_dealer.is_empty() {
                    section class="same-dealer" {
                        h2 { "More from " (car.seller_display_name()) }
                        @for listing in &detail.same_dealer {
                            (car_card(listing))
                        }
                    }
                }
            }
        },
    )
}
