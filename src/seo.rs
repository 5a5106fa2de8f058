// src/seo.rs

use crate::config::SiteConfig;
use crate::domain::format::{ellipsize, format_price, group_thousands, strip_html_tags, truncate_chars};
use crate::domain::listing::Listing;
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};

const TITLE_MAX: usize = 60;
const DESCRIPTION_MAX: usize = 160;
const TWITTER_DESCRIPTION_MAX: usize = 120;
const DESCRIPTION_EXCERPT: usize = 100;
const OFFER_VALID_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Everything that ends up in a page's `<head>` besides the stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical: Option<String>,
    pub indexable: bool,
    pub og_title: String,
    pub og_description: String,
    pub og_url: Option<String>,
    pub og_images: Vec<OgImage>,
    pub twitter_description: String,
    pub site_name: String,
    pub structured_data: Option<Value>,
}

impl PageMetadata {
    /// Bare metadata for pages that have nothing to advertise.
    pub fn basic(title: &str, description: &str, site_name: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            keywords: String::new(),
            canonical: None,
            indexable: true,
            og_title: title.to_string(),
            og_description: description.to_string(),
            og_url: None,
            og_images: Vec::new(),
            twitter_description: description.to_string(),
            site_name: site_name.to_string(),
            structured_data: None,
        }
    }

    pub fn robots(&self) -> &'static str {
        if self.indexable {
            "index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1"
        } else {
            "noindex, nofollow"
        }
    }
}

pub fn car_not_found(site: &SiteConfig) -> PageMetadata {
    let mut meta = PageMetadata::basic(
        "Car Not Found",
        "The requested car listing could not be found.",
        &site.site_name,
    );
    meta.indexable = false;
    meta
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

fn year_text(car: &Listing) -> String {
    car.year.map(|y| y.to_string()).unwrap_or_default()
}

/// "2019 Toyota Camry for Sale in Dubai"
pub fn car_title(car: &Listing) -> String {
    format!(
        "{} {} {} for Sale in {}",
        year_text(car),
        car.display_make(),
        car.display_model(),
        car.display_city()
    )
}

pub fn car_description(car: &Listing) -> String {
    let plain = car
        .description
        .as_deref()
        .map(strip_html_tags)
        .unwrap_or_default();

    format!(
        "{} {} {} for sale in {}. {} km, {}, {}. Price: {}. {}...",
        year_text(car),
        car.display_make(),
        car.display_model(),
        car.display_city(),
        group_thousands(car.km_driven),
        or_empty(&car.fuel_type),
        or_empty(&car.transmission_type),
        format_price(car.price, car.currency()),
        truncate_chars(&plain, DESCRIPTION_EXCERPT)
    )
}

pub fn car_keywords(car: &Listing) -> String {
    let year = year_text(car);
    let make = car.display_make();
    let model = car.display_model();
    let city = car.display_city();

    [
        format!("{year} {make} {model}"),
        format!("used {make} {model}"),
        format!("{make} {model} {city}"),
        format!("{make} for sale"),
        format!("used cars {city}"),
        format!("{} cars", or_empty(&car.fuel_type)),
        format!("{} cars", or_empty(&car.transmission_type)),
        or_empty(&car.body_style).to_string(),
        if car.regional_specs.unwrap_or(0) != 0 {
            "GCC specs".to_string()
        } else {
            "imported".to_string()
        },
        format!("{} {make}", or_empty(&car.exterior_color)),
    ]
    .join(", ")
}

pub fn car_url(site: &SiteConfig, car: &Listing) -> String {
    format!("{}/used-cars/{}", site.base_url, car.id)
}

/// Metadata for a listing detail page. `today` anchors the offer expiry.
pub fn car_detail(site: &SiteConfig, car: &Listing, today: NaiveDate) -> PageMetadata {
    let title = car_title(car);
    let description = car_description(car);
    let url = car_url(site, car);
    let name = format!(
        "{} {} {}",
        year_text(car),
        car.display_make(),
        car.display_model()
    );

    let mut og_images = vec![OgImage {
        url: car.main_image().to_string(),
        width: 800,
        height: 600,
        alt: format!("{name} - {}", or_empty(&car.exterior_color)),
    }];
    og_images.extend(car.pictures.iter().skip(1).take(3).map(|pic| OgImage {
        url: pic.clone(),
        width: 800,
        height: 600,
        alt: name.clone(),
    }));

    PageMetadata {
        title: ellipsize(&title, TITLE_MAX),
        description: ellipsize(&description, DESCRIPTION_MAX),
        keywords: car_keywords(car),
        canonical: Some(url.clone()),
        indexable: true,
        og_title: title,
        og_description: description.clone(),
        og_url: Some(url),
        og_images,
        twitter_description: ellipsize(&description, TWITTER_DESCRIPTION_MAX),
        site_name: site.site_name.clone(),
        structured_data: Some(car_structured_data(site, car, &description, today)),
    }
}

/// JSON-LD graph with the product offer and its breadcrumb trail.
pub fn car_structured_data(
    site: &SiteConfig,
    car: &Listing,
    description: &str,
    today: NaiveDate,
) -> Value {
    let base = &site.base_url;
    let url = car_url(site, car);
    let year = year_text(car);
    let make = car.display_make();
    let model = car.display_model();
    let name = format!("{year} {make} {model}");
    let valid_until = today + Duration::days(OFFER_VALID_DAYS);

    let seller = if car.seller_name.as_deref().is_some_and(|s| !s.is_empty()) {
        or_empty(&car.seller_name)
    } else {
        or_empty(&car.auto_company_name)
    };

    let property = |label: &str, value: String| {
        json!({ "@type": "PropertyValue", "name": label, "value": value })
    };

    json!({
        "@context": base,
        "@graph": [
            {
                "@type": "Product",
                "@id": format!("{url}#product"),
                "name": name,
                "description": description,
                "sku": car.id.to_string(),
                "brand": { "@type": "Brand", "name": make },
                "category": "Automotive > Used Vehicles",
                "image": car.pictures.iter().map(|pic| json!({
                    "@type": "ImageObject",
                    "url": pic,
                    "caption": name,
                })).collect::<Vec<_>>(),
                "offers": {
                    "@type": "Offer",
                    "price": car.price,
                    "priceCurrency": car.currency(),
                    "availability": format!("{base}/InStock"),
                    "seller": { "@type": "Organization", "name": seller },
                    "priceValidUntil": valid_until.format("%Y-%m-%d").to_string(),
                },
                "additionalProperty": [
                    property("Year", year.clone()),
                    property("Mileage", format!("{} km", car.km_driven)),
                    property("Fuel Type", or_empty(&car.fuel_type).to_string()),
                    property("Transmission", or_empty(&car.transmission_type).to_string()),
                    property("Location", car.display_city().to_string()),
                    property("Body Style", or_empty(&car.body_style).to_string()),
                    property("Engine", format!("{}cc", car.engine_cc.unwrap_or(0))),
                    property("Color", or_empty(&car.exterior_color).to_string()),
                ],
            },
            {
                "@type": "BreadcrumbList",
                "itemListElement": [
                    crumb(1, "Home", base.to_string()),
                    crumb(2, "Used Cars", format!("{base}/used-cars")),
                    crumb(3, make, format!("{base}/used-cars?make={}", or_empty(&car.make))),
                    crumb(
                        4,
                        &format!("{make} {model}"),
                        format!(
                            "{base}/used-cars?make={}&model={}",
                            or_empty(&car.make),
                            or_empty(&car.model)
                        ),
                    ),
                    crumb(5, &name, url.clone()),
                ],
            },
        ],
    })
}

fn crumb(position: u32, name: &str, item: String) -> Value {
    json!({
        "@type": "ListItem",
        "position": position,
        "name": name,
        "item": item,
    })
}

const LISTING_TITLE: &str = "Used Cars for Sale in UAE | Buy Pre-Owned Vehicles";
const LISTING_DESCRIPTION: &str = "Find the best used cars for sale in UAE. Browse certified pre-owned vehicles from trusted dealers in Dubai, Abu Dhabi & Sharjah. Best prices guaranteed.";
const LISTING_KEYWORDS: &[&str] = &[
    "used cars UAE",
    "pre-owned vehicles Dubai",
    "second hand cars Abu Dhabi",
    "certified used cars Sharjah",
    "car dealerships UAE",
    "luxury used cars Dubai",
    "affordable cars UAE",
    "GCC specs cars",
    "imported cars UAE",
    "car financing UAE",
];

/// Metadata for the listing index. `total` is the number of matching cars.
pub fn used_cars_index(site: &SiteConfig, total: usize) -> PageMetadata {
    let base = &site.base_url;
    let url = format!("{base}/used-cars");
    let title = format!("{LISTING_TITLE} | {}", site.site_name);

    let structured = json!({
        "@context": base,
        "@graph": [
            {
                "@type": "WebPage",
                "@id": url,
                "url": url,
                "name": LISTING_TITLE,
                "description": LISTING_DESCRIPTION,
                "inLanguage": "en-US",
                "breadcrumb": { "@id": format!("{url}#breadcrumb") },
            },
            {
                "@type": "BreadcrumbList",
                "@id": format!("{url}#breadcrumb"),
                "itemListElement": [
                    crumb(1, "Home", format!("{base}/")),
                    crumb(2, "Used Cars", url.clone()),
                ],
            },
            {
                "@type": "ItemList",
                "name": "Used Cars for Sale in UAE",
                "numberOfItems": total,
            },
        ],
    });

    PageMetadata {
        title: title.clone(),
        description: LISTING_DESCRIPTION.to_string(),
        keywords: LISTING_KEYWORDS.join(", "),
        canonical: Some(url.clone()),
        indexable: true,
        og_title: title,
        og_description: LISTING_DESCRIPTION.to_string(),
        og_url: Some(url),
        og_images: Vec::new(),
        twitter_description: ellipsize(LISTING_DESCRIPTION, TWITTER_DESCRIPTION_MAX),
        site_name: site.site_name.clone(),
        structured_data: Some(structured),
    }
}
