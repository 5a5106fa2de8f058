// src/tests/router_tests/pages_tests.rs
use crate::domain::listing::Listing;
use crate::router::{handle, parse_query};
use crate::templates::pages::car_detail::specifications;
use crate::tests::utils::{body_string, camry, car, get, test_state};

fn content_type(resp: &astra::Response) -> Option<&str> {
    resp.headers().get("Content-Type").and_then(|v| v.to_str().ok())
}

#[test]
fn home_page_links_to_listings() {
    let state = test_state(vec![], vec![]);

    let resp = handle(get("/"), &state);
    assert_eq!(resp.status(), 200);
    assert_eq!(content_type(&resp), Some("text/html; charset=utf-8"));

    let body = body_string(resp);
    assert!(body.contains("Welcome to TestMotors"));
    assert!(body.contains(r#"href="/used-cars""#));
}

#[test]
fn used_cars_page_shows_range_and_pagination() {
    let used: Vec<Listing> = (1..=30)
        .map(|id| Listing {
            updated: Some(id),
            ..camry(id)
        })
        .collect();
    let state = test_state(used, vec![]);

    let resp = handle(get("/used-cars?page=2"), &state);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Showing 13 - 24 of 30 Used Cars"));
    assert!(body.contains(r#"href="/used-cars?page=1""#));
    assert!(body.contains(r#"href="/used-cars?page=3""#));
    assert!(body.contains(r#"aria-current="page""#));
    assert!(body.contains(r#"<link rel="canonical" href="https://cars.example.com/used-cars">"#));
    assert!(body.contains("application/ld+json"));
    // Newest first: page 2 starts at id 18.
    assert!(body.contains(r#"data-id="18""#));
    assert!(!body.contains(r#"data-id="30""#));
}

#[test]
fn pagination_links_keep_the_selection() {
    let used: Vec<Listing> = (1..=30).map(camry).collect();
    let state = test_state(used, vec![]);

    let body = body_string(handle(get("/used-cars?limit=5&sortBy=price&make=Toyota"), &state));
    assert!(body.contains("page=2&amp;limit=5&amp;sortBy=price&amp;make=Toyota"));
}

#[test]
fn used_cars_page_without_data() {
    let state = test_state(vec![], vec![]);

    let resp = handle(get("/used-cars"), &state);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("No cars found."));
    assert!(!body.contains("page-next"));
}

#[test]
fn featured_page_heading() {
    let state = test_state(vec![camry(1)], vec![camry(2)]);

    let body = body_string(handle(get("/used-cars?featured=true"), &state));
    assert!(body.contains("Featured Used Cars"));
    assert!(body.contains(r#"data-id="2""#));
}

#[test]
fn car_detail_page_renders_everything() {
    let state = test_state(vec![camry(1), camry(2)], vec![]);

    let resp = handle(get("/used-cars/1"), &state);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<h1>2019 Toyota Camry</h1>"));
    assert!(body.contains("AED 60,000"));
    assert!(body.contains("Clean car, single owner"));
    assert!(body.contains("Vehicle Highlights"));
    assert!(body.contains("45,000 km"));
    assert!(body.contains("Related Cars"));
    assert!(body.contains("More from Ali Motors LLC"));
    assert!(body.contains(r#"href="/used-cars/2""#));
    assert!(body.contains("2019 Toyota Camry for Sale in Dubai"));
    assert!(body.contains("index, follow"));
}

#[test]
fn car_detail_page_invalid_id_is_bad_request() {
    let state = test_state(vec![camry(1)], vec![]);

    let resp = handle(get("/used-cars/abc"), &state);
    assert_eq!(resp.status(), 400);
    assert!(body_string(resp).contains("Invalid car ID. Must be a number."));
}

#[test]
fn car_detail_page_unknown_id_is_not_found() {
    let state = test_state(vec![camry(1)], vec![]);

    let resp = handle(get("/used-cars/77"), &state);
    assert_eq!(resp.status(), 404);

    let body = body_string(resp);
    assert!(body.contains("404 - Not Found"));
    assert!(body.contains("Car with ID 77 not found"));
    assert!(body.contains("Car Not Found"));
    assert!(body.contains("noindex, nofollow"));
}

#[test]
fn sparse_listing_detail_still_renders() {
    let state = test_state(vec![car(5)], vec![]);

    let resp = handle(get("/used-cars/5"), &state);
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("No description available"));
    assert!(body.contains("/placeholder-car.jpg"));
}

#[test]
fn unknown_route_is_html_not_found() {
    let state = test_state(vec![], vec![]);

    let resp = handle(get("/nowhere"), &state);
    assert_eq!(resp.status(), 404);
    assert_eq!(content_type(&resp), Some("text/html; charset=utf-8"));
    assert!(body_string(resp).contains("404 - Not Found"));
}

#[test]
fn query_parsing_decodes_and_keeps_first_value() {
    let params = parse_query(&get("/used-cars?make=Land+Rover&city=Abu%20Dhabi&make=BMW"));

    assert_eq!(params.get("make").map(String::as_str), Some("Land Rover"));
    assert_eq!(params.get("city").map(String::as_str), Some("Abu Dhabi"));
    assert!(parse_query(&get("/used-cars")).is_empty());
}

#[test]
fn specification_rows_skip_missing_values() {
    let rows = specifications(&camry(1), 2024);

    assert!(rows.contains(&("Age", "5 years".to_string())));
    assert!(rows.contains(&("Engine", "2500cc".to_string())));
    assert!(rows.contains(&("Specs", "Imported".to_string())));
    assert!(!rows.iter().any(|(label, _)| *label == "Doors"));

    let sparse = specifications(&car(2), 2024);
    assert!(!sparse.iter().any(|(label, _)| *label == "Age" || *label == "Year"));
}

#[test]
fn cards_carry_the_listing_slug() {
    let state = test_state(vec![camry(8)], vec![]);

    let body = body_string(handle(get("/used-cars"), &state));
    assert!(body.contains(r#"data-slug="toyota-camry-2019-8""#));
}
