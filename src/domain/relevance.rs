// src/domain/relevance.rs

use crate::domain::listing::{same_value, whole_number, Listing};
use serde::Serialize;

pub const DEFAULT_RELATED_LIMIT: usize = 4;
pub const DEFAULT_SAME_SELLER_LIMIT: usize = 6;

/// Minimum qualification score for a listing to count as related.
pub const RELATED_THRESHOLD: u32 = 5;

const MODEL_WEIGHT: u32 = 10;
const MAKE_WEIGHT: u32 = 5;
const BODY_STYLE_WEIGHT: u32 = 3;
const PRICE_WEIGHT: u32 = 2;
const CITY_WEIGHT: u32 = 1;

/// Candidates priced within this fraction of the reference count as similar.
const PRICE_TOLERANCE: f64 = 0.3;

fn similar_price(reference: &Listing, candidate: &Listing) -> bool {
    (candidate.price - reference.price).abs() <= reference.price * PRICE_TOLERANCE
}

/// Broad similarity: decides whether a candidate is related at all.
pub fn qualification_score(reference: &Listing, candidate: &Listing) -> u32 {
    let mut score = 0;
    if candidate.same_model(reference) {
        score += MODEL_WEIGHT;
    }
    if candidate.same_make(reference) {
        score += MAKE_WEIGHT;
    }
    if candidate.same_body_style(reference) {
        score += BODY_STYLE_WEIGHT;
    }
    if similar_price(reference, candidate) {
        score += PRICE_WEIGHT;
    }
    if candidate.same_city(reference) {
        score += CITY_WEIGHT;
    }
    score
}

/// Narrow similarity: orders the qualified candidates. Only model and make
/// count here; body style, price and city never affect the order.
pub fn ranking_score(reference: &Listing, candidate: &Listing) -> u32 {
    let mut score = 0;
    if candidate.same_model(reference) {
        score += MODEL_WEIGHT;
    }
    if candidate.same_make(reference) {
        score += MAKE_WEIGHT;
    }
    score
}

/// Listings related to `reference`, best first, at most `limit`.
/// Ties keep their input order.
pub fn find_related<'a>(
    reference: &Listing,
    candidates: impl IntoIterator<Item = &'a Listing>,
    limit: usize,
) -> Vec<&'a Listing> {
    let mut related: Vec<(u32, &'a Listing)> = candidates
        .into_iter()
        .filter(|c| c.id != reference.id)
        .filter(|c| qualification_score(reference, c) >= RELATED_THRESHOLD)
        .map(|c| (ranking_score(reference, c), c))
        .collect();

    // sort_by is stable
    related.sort_by(|(a, _), (b, _)| b.cmp(a));

    related.into_iter().take(limit).map(|(_, c)| c).collect()
}

/// Other listings from the same seller or dealer, in input order.
pub fn find_same_seller<'a>(
    reference: &Listing,
    candidates: impl IntoIterator<Item = &'a Listing>,
    limit: usize,
) -> Vec<&'a Listing> {
    candidates
        .into_iter()
        .filter(|c| c.id != reference.id && c.same_seller(reference))
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    BelowAverage,
    Average,
    AboveAverage,
}

impl Comparison {
    pub fn of(value: f64, average: f64) -> Self {
        if value < average {
            Comparison::BelowAverage
        } else if value > average {
            Comparison::AboveAverage
        } else {
            Comparison::Average
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Comparison::BelowAverage => "Below average",
            Comparison::Average => "Average",
            Comparison::AboveAverage => "Above average",
        }
    }
}

/// How a listing compares to others of the same make and model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub similar_cars_count: usize,
    #[serde(serialize_with = "whole_number")]
    pub average_price: f64,
    #[serde(serialize_with = "whole_number")]
    pub average_mileage: f64,
    pub price_comparison: Comparison,
    pub mileage_comparison: Comparison,
    #[serde(skip)]
    pub has_similar_cars: bool,
}

fn rounded_mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    (values.sum::<f64>() / count as f64).round()
}

/// Averages over listings with exactly the same make and model. With no
/// such listing the reference's own price and mileage stand in.
pub fn compute_stats<'a>(
    reference: &Listing,
    candidates: impl IntoIterator<Item = &'a Listing>,
) -> ListingStats {
    let similar: Vec<&Listing> = candidates
        .into_iter()
        .filter(|c| {
            c.id != reference.id
                && same_value(&c.make, &reference.make)
                && same_value(&c.model, &reference.model)
        })
        .collect();

    let (average_price, average_mileage) = if similar.is_empty() {
        (reference.price, reference.km_driven)
    } else {
        (
            rounded_mean(similar.iter().map(|c| c.price), similar.len()),
            rounded_mean(similar.iter().map(|c| c.km_driven), similar.len()),
        )
    };

    ListingStats {
        similar_cars_count: similar.len(),
        average_price,
        average_mileage,
        price_comparison: Comparison::of(reference.price, average_price),
        mileage_comparison: Comparison::of(reference.km_driven, average_mileage),
        has_similar_cars: !similar.is_empty(),
    }
}
