// src/api/cars.rs

use crate::data::Snapshot;
use crate::domain::catalog::{filter_stats, FilterStats, ListingFilters, ListingQuery};
use crate::domain::listing::Listing;
use crate::domain::pagination::{paginate, parse_int_prefix, Page, PageMeta, DEFAULT_LIMIT};
use crate::domain::relevance::{
    compute_stats, find_related, find_same_seller, ListingStats, DEFAULT_RELATED_LIMIT,
    DEFAULT_SAME_SELLER_LIMIT,
};
use crate::errors::{ResultResp, ServerError};
use crate::responses::json::{json_response, Envelope};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

pub const LIST_FAILURE: &str = "Failed to fetch used cars";
pub const DETAIL_FAILURE: &str = "Failed to fetch car details";

/// One page of the listing index plus what is needed to describe it.
#[derive(Debug)]
pub struct CarsList<'a> {
    pub query: ListingQuery,
    pub page: Page<&'a Listing>,
    pub stats: FilterStats,
    /// True when the general pool itself is empty.
    pub no_data: bool,
}

/// Selects, sorts and paginates listings for `query`.
pub fn list_cars<'a>(snapshot: &'a Snapshot, query: ListingQuery) -> CarsList<'a> {
    if snapshot.used.is_empty() {
        return CarsList {
            page: Page {
                items: Vec::new(),
                meta: PageMeta::empty(DEFAULT_LIMIT as usize),
                items_on_current_page: 0,
            },
            query,
            stats: FilterStats::default(),
            no_data: true,
        };
    }

    let selected = query.select(&snapshot.used, &snapshot.featured);
    let stats = filter_stats(&selected);
    let page = paginate(&selected, query.page);

    CarsList {
        query,
        page,
        stats,
        no_data: false,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppliedFilters<'a> {
    sort_by: &'a str,
    sort_order: &'static str,
    featured: bool,
    #[serde(flatten)]
    filters: &'a ListingFilters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListMeta {
    filters_applied: usize,
    sort_applied: bool,
}

#[derive(Debug, Serialize)]
struct ListData<'a> {
    used_cars: &'a [&'a Listing],
    pagination: PageMeta,
    page_total: usize,
    per_page: usize,
    total_entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<AppliedFilters<'a>>,
    #[serde(rename = "filterStats", skip_serializing_if = "Option::is_none")]
    filter_stats: Option<&'a FilterStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<ListMeta>,
}

impl<'a> CarsList<'a> {
    fn to_data(&self) -> ListData<'_> {
        let meta = self.page.meta;
        let base = ListData {
            used_cars: &self.page.items,
            pagination: meta,
            page_total: meta.total_pages,
            per_page: meta.items_per_page,
            total_entries: meta.total_items,
            message: None,
            filters: None,
            filter_stats: None,
            meta: None,
        };

        if self.no_data {
            return ListData {
                message: Some("No cars found in database"),
                ..base
            };
        }

        ListData {
            filters: Some(AppliedFilters {
                sort_by: self.query.sort_by.as_str(),
                sort_order: self.query.sort_order.as_str(),
                featured: self.query.featured,
                filters: &self.query.filters,
            }),
            filter_stats: Some(&self.stats),
            meta: Some(ListMeta {
                filters_applied: self.query.filters_applied(),
                sort_applied: self.query.sort_applied(),
            }),
            ..base
        }
    }
}

/// GET /api/cars
pub fn get_cars(snapshot: &Snapshot, query: ListingQuery) -> ResultResp {
    let list = list_cars(snapshot, query);
    info!(
        event_name = "api.cars.listed",
        total = list.page.meta.total_items,
        page = list.page.meta.current_page,
        returned = list.page.items_on_current_page,
        "listed cars"
    );
    json_response(200, &Envelope::ok(list.to_data()))
}

/// Everything shown about a single listing.
#[derive(Debug)]
pub struct CarDetail<'a> {
    pub car: &'a Listing,
    pub related: Vec<&'a Listing>,
    pub same_dealer: Vec<&'a Listing>,
    pub stats: ListingStats,
}

/// Parses the id path segment by its leading integer. A segment with no
/// leading digits is rejected.
pub fn parse_car_id(raw: &str) -> Result<i64, ServerError> {
    parse_int_prefix(raw).ok_or(ServerError::InvalidId)
}

/// Looks `id` up across both pools and gathers related listings and stats.
pub fn car_detail<'a>(all: &[&'a Listing], id: i64) -> Result<CarDetail<'a>, ServerError> {
    if all.is_empty() {
        return Err(ServerError::NoCarsFound);
    }

    let car = all
        .iter()
        .copied()
        .find(|c| c.id == id)
        .ok_or(ServerError::CarNotFound(id))?;

    Ok(CarDetail {
        car,
        related: find_related(car, all.iter().copied(), DEFAULT_RELATED_LIMIT),
        same_dealer: find_same_seller(car, all.iter().copied(), DEFAULT_SAME_SELLER_LIMIT),
        stats: compute_stats(car, all.iter().copied()),
    })
}

#[derive(Debug, Serialize)]
struct DetailMeta {
    retrieved_at: String,
    related_cars_count: usize,
    same_dealer_cars_count: usize,
    has_similar_cars: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailData<'a> {
    car: &'a Listing,
    related_cars: &'a [&'a Listing],
    same_dealer_cars: &'a [&'a Listing],
    stats: &'a ListingStats,
    meta: DetailMeta,
}

/// GET /api/cars/{id}
pub fn get_car(snapshot: &Snapshot, raw_id: &str, now: DateTime<Utc>) -> ResultResp {
    let id = parse_car_id(raw_id)?;
    let all = snapshot.all();
    let detail = car_detail(&all, id)?;

    info!(
        event_name = "api.car.fetched",
        car_id = id,
        related = detail.related.len(),
        same_dealer = detail.same_dealer.len(),
        "fetched car details"
    );

    let data = DetailData {
        car: detail.car,
        related_cars: &detail.related,
        same_dealer_cars: &detail.same_dealer,
        stats: &detail.stats,
        meta: DetailMeta {
            retrieved_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            related_cars_count: detail.related.len(),
            same_dealer_cars_count: detail.same_dealer.len(),
            has_similar_cars: detail.stats.has_similar_cars,
        },
    };
    json_response(200, &Envelope::ok(data))
}
