use crate::api::{self, cars::parse_car_id, cars::DETAIL_FAILURE, cars::LIST_FAILURE};
use crate::config::SiteConfig;
use crate::data::ListingSource;
use crate::domain::catalog::ListingQuery;
use crate::errors::{ResultResp, ServerError};
use crate::responses::html::html_with_status;
use crate::responses::{html_error_response, html_response, json_error_response};
use crate::seo;
use crate::templates::pages;
use astra::{Request, Response};
use chrono::{Datelike, Utc};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// What every request handler gets: the listing store and the site identity.
pub struct AppState {
    pub source: Box<dyn ListingSource>,
    pub site: SiteConfig,
}

impl AppState {
    pub fn new(source: impl ListingSource + 'static, site: SiteConfig) -> Self {
        Self {
            source: Box::new(source),
            site,
        }
    }
}

pub fn handle(req: Request, state: &AppState) -> Response {
    let started = Instant::now();
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let params = parse_query(&req);

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let resp = match (method.as_str(), segments.as_slice()) {
        ("GET", ["api", "cars"]) => {
            let snapshot = state.source.snapshot();
            api::get_cars(&snapshot, ListingQuery::from_query(&params))
                .unwrap_or_else(|e| json_error_response(e, LIST_FAILURE))
        }
        ("GET", ["api", "cars", id]) => {
            let snapshot = state.source.snapshot();
            api::get_car(&snapshot, id, Utc::now())
                .unwrap_or_else(|e| json_error_response(e, DETAIL_FAILURE))
        }
        ("GET", [""]) => page(state, html_response(pages::home_page(&state.site.site_name))),
        ("GET", ["used-cars"]) => page(state, used_cars_page(state, &params)),
        ("GET", ["used-cars", id]) => page(state, car_detail_page(state, id)),
        _ => html_error_response(ServerError::NotFound, &state.site.site_name),
    };

    info!(
        event_name = "http.request",
        method = %method,
        path = %path,
        status = resp.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
    resp
}

fn page(state: &AppState, result: ResultResp) -> Response {
    result.unwrap_or_else(|e| html_error_response(e, &state.site.site_name))
}

fn used_cars_page(state: &AppState, params: &HashMap<String, String>) -> ResultResp {
    let snapshot = state.source.snapshot();
    let list = api::list_cars(&snapshot, ListingQuery::from_query(params));
    let meta = seo::used_cars_index(&state.site, list.page.meta.total_items);
    html_response(pages::used_cars_page(&list, &meta))
}

fn car_detail_page(state: &AppState, raw_id: &str) -> ResultResp {
    let id = parse_car_id(raw_id)?;
    let snapshot = state.source.snapshot();
    let all = snapshot.all();

    let detail = match api::car_detail(&all, id) {
        Ok(detail) => detail,
        Err(ServerError::NoCarsFound) | Err(ServerError::CarNotFound(_)) => {
            return not_found_page(state, id);
        }
        Err(e) => return Err(e),
    };

    let today = Utc::now().date_naive();
    let meta = seo::car_detail(&state.site, detail.car, today);
    html_response(pages::car_detail_page(&detail, &meta, i64::from(today.year())))
}

fn not_found_page(state: &AppState, id: i64) -> ResultResp {
    let meta = seo::car_not_found(&state.site);
    html_with_status(
        404,
        pages::not_found_page(&meta, &format!("Car with ID {id} not found")),
    )
}

/// Decoded query parameters. When a key repeats, the first value wins.
pub fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();

    if let Some(q) = req.uri().query() {
        for (k, v) in url::form_urlencoded::parse(q.as_bytes()) {
            map.entry(k.into_owned()).or_insert_with(|| v.into_owned());
        }
    }

    map
}
