// src/domain/listing.rs

use crate::domain::format::slugify;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

const PLACEHOLDER_IMAGE: &str = "/placeholder-car.jpg";

/// A used-car listing as it appears in the dataset.
///
/// The upstream feed carries two naming schemes for make, model and city
/// (`make` / `make_title`, ...). Real records may populate only one of them,
/// so both are kept and compared independently.
///
/// Keys not modelled here are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub id: i64,

    // === Classification ===
    pub make: Option<String>,
    pub make_title: Option<String>,
    pub model: Option<String>,
    pub model_title: Option<String>,
    pub body_style: Option<String>,

    // === Numbers used by scoring and sorting ===
    #[serde(deserialize_with = "null_as_default", serialize_with = "whole_number")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default", serialize_with = "whole_number")]
    pub km_driven: f64,
    pub year: Option<i64>,
    pub updated: Option<i64>,

    // === Location ===
    pub city: Option<String>,
    pub city_name: Option<String>,

    // === Seller ===
    pub seller_name: Option<String>,
    pub auto_company_name: Option<String>,
    pub auto_company_logo: Option<String>,

    // === Presentation ===
    pub title: Option<String>,
    pub description: Option<String>,
    pub currency: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission_type: Option<String>,
    pub engine_cc: Option<i64>,
    pub exterior_color: Option<String>,
    pub doors: Option<String>,
    pub seats: Option<i64>,
    pub regional_specs: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub pictures: Vec<String>,
    pub thumb_picture: Option<String>,
    pub slideshow_picture: Option<String>,
    pub mobile_listing_main: Option<String>,
    pub whatsapp_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub whatsapp_access: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_featured: bool,
    pub warranty: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Feeds send `null` for numbers and flags as often as they omit them.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// 2^53: above this an f64 no longer holds every integer exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Writes whole amounts as JSON integers (`60000`, not `60000.0`).
pub fn whole_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// Equality over optional fields where an absent value never matches,
/// not even another absent value.
pub fn same_value(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Listing {
    pub fn same_model(&self, other: &Listing) -> bool {
        same_value(&self.model, &other.model) || same_value(&self.model_title, &other.model_title)
    }

    pub fn same_make(&self, other: &Listing) -> bool {
        same_value(&self.make, &other.make) || same_value(&self.make_title, &other.make_title)
    }

    pub fn same_city(&self, other: &Listing) -> bool {
        same_value(&self.city, &other.city) || same_value(&self.city_name, &other.city_name)
    }

    pub fn same_body_style(&self, other: &Listing) -> bool {
        same_value(&self.body_style, &other.body_style)
    }

    pub fn same_seller(&self, other: &Listing) -> bool {
        same_value(&self.seller_name, &other.seller_name)
            || same_value(&self.auto_company_name, &other.auto_company_name)
    }

    pub fn display_make(&self) -> &str {
        non_empty(&self.make_title)
            .or(non_empty(&self.make))
            .unwrap_or_default()
    }

    pub fn display_model(&self) -> &str {
        non_empty(&self.model_title)
            .or(non_empty(&self.model))
            .unwrap_or_default()
    }

    pub fn display_city(&self) -> &str {
        non_empty(&self.city)
            .or(non_empty(&self.city_name))
            .unwrap_or_default()
    }

    pub fn seller_display_name(&self) -> &str {
        non_empty(&self.auto_company_name)
            .or(non_empty(&self.seller_name))
            .unwrap_or_default()
    }

    pub fn currency(&self) -> &str {
        non_empty(&self.currency).unwrap_or("AED")
    }

    /// "2019 Toyota Camry", skipping whatever is missing.
    pub fn headline(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [year.as_deref(), Some(self.display_make()), Some(self.display_model())]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn primary_image(&self) -> &str {
        non_empty(&self.thumb_picture)
            .or(non_empty(&self.slideshow_picture))
            .or(non_empty(&self.mobile_listing_main))
            .or(self.pictures.first().map(String::as_str))
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Image used for cards and social previews. Prefers the large listing shot.
    pub fn main_image(&self) -> &str {
        non_empty(&self.mobile_listing_main)
            .or(self.pictures.first().map(String::as_str))
            .unwrap_or_else(|| self.primary_image())
    }

    pub fn has_whatsapp(&self) -> bool {
        self.whatsapp_access && non_empty(&self.whatsapp_number).is_some()
    }

    pub fn age(&self, current_year: i64) -> Option<i64> {
        self.year.map(|y| current_year - y)
    }

    /// URL slug such as `toyota-camry-2019-42`.
    pub fn slug(&self) -> String {
        slugify(&format!(
            "{}-{}-{}-{}",
            self.make_title.as_deref().unwrap_or_default(),
            self.model_title.as_deref().unwrap_or_default(),
            self.year.map(|y| y.to_string()).unwrap_or_default(),
            self.id
        ))
    }

    /// Looks up any top-level key, including the pass-through ones.
    pub fn field(&self, key: &str) -> Option<Value> {
        if let Some(v) = self.extra.get(key) {
            return Some(v.clone());
        }
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => map.remove(key),
            _ => None,
        }
    }
}
