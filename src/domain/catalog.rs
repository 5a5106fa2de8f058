// src/domain/catalog.rs

use crate::domain::listing::{whole_number, Listing};
use crate::domain::pagination::{PageRequest, DEFAULT_LIMIT};
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortBy {
    Price,
    Year,
    KmDriven,
    Updated,
    /// Any other listing key, pass-through fields included.
    Field(String),
}

impl SortBy {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "price" => SortBy::Price,
            "year" => SortBy::Year,
            "km_driven" => SortBy::KmDriven,
            "updated" => SortBy::Updated,
            other => SortBy::Field(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortBy::Price => "price",
            SortBy::Year => "year",
            SortBy::KmDriven => "km_driven",
            SortBy::Updated => "updated",
            SortBy::Field(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything but "asc" sorts descending.
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A value a listing is sorted on.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn from_json(value: Option<Value>) -> Self {
        match value {
            Some(Value::String(s)) if !s.is_empty() => SortKey::Text(s.to_lowercase()),
            Some(Value::Number(n)) => SortKey::Number(n.as_f64().unwrap_or(0.0)),
            Some(Value::Bool(true)) => SortKey::Number(1.0),
            _ => SortKey::Number(0.0),
        }
    }

    // Text and numbers are not comparable; such pairs are treated as equal.
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn sort_key(listing: &Listing, sort_by: &SortBy) -> SortKey {
    match sort_by {
        SortBy::Price => SortKey::Number(listing.price),
        SortBy::Year => SortKey::Number(listing.year.unwrap_or(0) as f64),
        SortBy::KmDriven => SortKey::Number(listing.km_driven),
        SortBy::Updated => SortKey::Number(listing.updated.unwrap_or(0) as f64),
        SortBy::Field(name) => SortKey::from_json(listing.field(name)),
    }
}

/// Stable sort in either direction: equal keys keep their input order.
pub fn sort_listings(listings: &mut Vec<&Listing>, sort_by: &SortBy, order: SortOrder) {
    let mut keyed: Vec<(SortKey, &Listing)> = listings
        .drain(..)
        .map(|l| (sort_key(l, sort_by), l))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Asc => a.compare(b),
        SortOrder::Desc => b.compare(a),
    });

    listings.extend(keyed.into_iter().map(|(_, l)| l));
}

/// Optional narrowing of the listing pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i64>,
}

fn eq_ignore_case(value: &Option<String>, wanted: &str) -> bool {
    value
        .as_deref()
        .is_some_and(|v| v.to_lowercase() == wanted.to_lowercase())
}

impl ListingFilters {
    fn from_query(params: &HashMap<String, String>) -> Self {
        let text = |key: &str| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let number = |key: &str| text(key).and_then(|v| v.parse::<f64>().ok());
        let int = |key: &str| text(key).and_then(|v| v.parse::<i64>().ok());

        Self {
            make: text("make"),
            model: text("model"),
            city: text("city"),
            body_style: text("bodyStyle"),
            fuel_type: text("fuelType"),
            transmission_type: text("transmissionType"),
            min_price: number("minPrice"),
            max_price: number("maxPrice"),
            min_year: int("minYear"),
            max_year: int("maxYear"),
        }
    }

    pub fn active_count(&self) -> usize {
        [
            self.make.is_some(),
            self.model.is_some(),
            self.city.is_some(),
            self.body_style.is_some(),
            self.fuel_type.is_some(),
            self.transmission_type.is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
            self.min_year.is_some(),
            self.max_year.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(make) = &self.make {
            if !eq_ignore_case(&listing.make, make) && !eq_ignore_case(&listing.make_title, make) {
                return false;
            }
        }
        if let Some(model) = &self.model {
            if !eq_ignore_case(&listing.model, model) && !eq_ignore_case(&listing.model_title, model)
            {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if !eq_ignore_case(&listing.city, city) && !eq_ignore_case(&listing.city_name, city) {
                return false;
            }
        }
        if let Some(body_style) = &self.body_style {
            if !eq_ignore_case(&listing.body_style, body_style) {
                return false;
            }
        }
        if let Some(fuel_type) = &self.fuel_type {
            if !eq_ignore_case(&listing.fuel_type, fuel_type) {
                return false;
            }
        }
        if let Some(transmission) = &self.transmission_type {
            if !eq_ignore_case(&listing.transmission_type, transmission) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        let year = listing.year.unwrap_or(0);
        if self.min_year.is_some_and(|min| year < min) {
            return false;
        }
        if self.max_year.is_some_and(|max| year > max) {
            return false;
        }
        true
    }
}

/// Everything the listing endpoints read from the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub page: PageRequest,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
    pub featured: bool,
    pub filters: ListingFilters,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            page: PageRequest::default(),
            sort_by: SortBy::Updated,
            sort_order: SortOrder::Desc,
            featured: false,
            filters: ListingFilters::default(),
        }
    }
}

impl ListingQuery {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            page: PageRequest::from_query(params),
            sort_by: params
                .get("sortBy")
                .filter(|v| !v.is_empty())
                .map(|v| SortBy::parse(v))
                .unwrap_or(SortBy::Updated),
            sort_order: params
                .get("sortOrder")
                .filter(|v| !v.is_empty())
                .map(|v| SortOrder::parse(v))
                .unwrap_or(SortOrder::Desc),
            featured: params.get("featured").is_some_and(|v| v == "true"),
            filters: ListingFilters::from_query(params),
        }
    }

    /// Filters in effect, counting the featured flag.
    pub fn filters_applied(&self) -> usize {
        self.filters.active_count() + usize::from(self.featured)
    }

    pub fn sort_applied(&self) -> bool {
        self.sort_by != SortBy::Updated || self.sort_order != SortOrder::Desc
    }

    /// Picks the pool, drops what the filters reject, and sorts the rest.
    pub fn select<'a>(&self, used: &'a [Listing], featured: &'a [Listing]) -> Vec<&'a Listing> {
        let pool = if self.featured { featured } else { used };

        let mut selected: Vec<&Listing> = pool.iter().filter(|l| self.filters.matches(l)).collect();
        sort_listings(&mut selected, &self.sort_by, self.sort_order);
        selected
    }

    /// Query string for the same selection on another page.
    pub fn to_query_string(&self, page: usize) -> String {
        let mut qs = url::form_urlencoded::Serializer::new(String::new());
        qs.append_pair("page", &page.to_string());
        if self.page.limit != DEFAULT_LIMIT {
            qs.append_pair("limit", &self.page.limit.to_string());
        }
        if self.sort_by != SortBy::Updated {
            qs.append_pair("sortBy", self.sort_by.as_str());
        }
        if self.sort_order != SortOrder::Desc {
            qs.append_pair("sortOrder", self.sort_order.as_str());
        }
        if self.featured {
            qs.append_pair("featured", "true");
        }

        let f = &self.filters;
        let texts = [
            ("make", &f.make),
            ("model", &f.model),
            ("city", &f.city),
            ("bodyStyle", &f.body_style),
            ("fuelType", &f.fuel_type),
            ("transmissionType", &f.transmission_type),
        ];
        for (key, value) in texts {
            if let Some(v) = value {
                qs.append_pair(key, v);
            }
        }
        if let Some(v) = f.min_price {
            qs.append_pair("minPrice", &v.to_string());
        }
        if let Some(v) = f.max_price {
            qs.append_pair("maxPrice", &v.to_string());
        }
        if let Some(v) = f.min_year {
            qs.append_pair("minYear", &v.to_string());
        }
        if let Some(v) = f.max_year {
            qs.append_pair("maxYear", &v.to_string());
        }
        qs.finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceRange {
    #[serde(serialize_with = "whole_number")]
    pub min: f64,
    #[serde(serialize_with = "whole_number")]
    pub max: f64,
    #[serde(serialize_with = "whole_number")]
    pub average: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct YearRange {
    pub min: i64,
    pub max: i64,
}

/// Facets of a listing selection, for filter controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStats {
    pub total_cars: usize,
    pub makes: Vec<String>,
    pub cities: Vec<String>,
    pub fuel_types: Vec<String>,
    pub body_styles: Vec<String>,
    pub price_range: PriceRange,
    pub year_range: YearRange,
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn filter_stats(listings: &[&Listing]) -> FilterStats {
    if listings.is_empty() {
        return FilterStats::default();
    }

    let prices = listings.iter().map(|l| l.price);
    let min_price = prices.clone().fold(f64::INFINITY, f64::min);
    let max_price = prices.clone().fold(f64::NEG_INFINITY, f64::max);
    let average = (prices.sum::<f64>() / listings.len() as f64).round();

    let years: Vec<i64> = listings.iter().filter_map(|l| l.year).collect();

    FilterStats {
        total_cars: listings.len(),
        makes: distinct(listings.iter().map(|l| l.display_make())),
        cities: distinct(listings.iter().map(|l| l.display_city())),
        fuel_types: distinct(listings.iter().filter_map(|l| l.fuel_type.as_deref())),
        body_styles: distinct(listings.iter().filter_map(|l| l.body_style.as_deref())),
        price_range: PriceRange {
            min: min_price,
            max: max_price,
            average,
        },
        year_range: YearRange {
            min: years.iter().copied().min().unwrap_or(0),
            max: years.iter().copied().max().unwrap_or(0),
        },
    }
}
