use crate::config::SiteConfig;
use crate::data::StaticSource;
use crate::domain::listing::Listing;
use crate::router::AppState;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;

/// Listing with only an id; tests fill in what they care about.
pub fn car(id: i64) -> Listing {
    Listing {
        id,
        ..Listing::default()
    }
}

pub fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// A fully described listing, for tests that render pages.
pub fn camry(id: i64) -> Listing {
    Listing {
        id,
        make: s("toyota"),
        make_title: s("Toyota"),
        model: s("camry"),
        model_title: s("Camry"),
        body_style: s("Sedan"),
        price: 60_000.0,
        km_driven: 45_000.0,
        year: Some(2019),
        updated: Some(1_700_000_000 + id),
        city: s("Dubai"),
        city_name: s("dubai"),
        seller_name: s("Ali Motors"),
        auto_company_name: s("Ali Motors LLC"),
        title: s("Toyota Camry 2019"),
        description: s("<p>Clean&nbsp;car, <b>single owner</b></p>"),
        currency: s("AED"),
        fuel_type: s("Petrol"),
        transmission_type: s("Automatic"),
        engine_cc: Some(2500),
        exterior_color: s("White"),
        pictures: vec![
            format!("https://img.example.com/{id}/1.jpg"),
            format!("https://img.example.com/{id}/2.jpg"),
        ],
        ..Listing::default()
    }
}

pub fn test_site() -> SiteConfig {
    SiteConfig {
        base_url: "https://cars.example.com".to_string(),
        site_name: "TestMotors".to_string(),
    }
}

pub fn test_state(used: Vec<Listing>, featured: Vec<Listing>) -> AppState {
    AppState::new(StaticSource::new(used, featured), test_site())
}

pub fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).expect("response body is JSON")
}
