// src/tests/router_tests/cars_api_tests.rs
use crate::api::{car_detail, get_car};
use crate::data::Snapshot;
use crate::domain::listing::Listing;
use crate::router::handle;
use crate::tests::utils::{body_json, camry, car, get, s, test_state};
use chrono::{TimeZone, Utc};

fn priced(id: i64, price: f64) -> Listing {
    Listing {
        price,
        updated: Some(id),
        ..car(id)
    }
}

#[test]
fn list_envelope_has_pagination_and_filters() {
    let used: Vec<Listing> = (1..=25).map(|id| priced(id, id as f64 * 1000.0)).collect();
    let state = test_state(used, vec![]);

    let resp = handle(get("/api/cars?page=3&limit=10&sortBy=price&sortOrder=asc"), &state);
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let json = body_json(resp);
    assert_eq!(json["status"], 200);
    assert!(json["message"].is_null());
    assert!(json.get("error").is_none());

    let data = &json["data"];
    let ids: Vec<i64> = data["used_cars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![21, 22, 23, 24, 25]);

    assert_eq!(data["pagination"]["currentPage"], 3);
    assert_eq!(data["pagination"]["startIndex"], 21);
    assert_eq!(data["pagination"]["endIndex"], 25);
    assert_eq!(data["pagination"]["hasPrevPage"], true);
    assert_eq!(data["page_total"], 3);
    assert_eq!(data["per_page"], 10);
    assert_eq!(data["total_entries"], 25);

    assert_eq!(data["filters"]["sortBy"], "price");
    assert_eq!(data["filters"]["sortOrder"], "asc");
    assert_eq!(data["filters"]["featured"], false);
    assert_eq!(data["meta"]["filtersApplied"], 0);
    assert_eq!(data["meta"]["sortApplied"], true);
    assert_eq!(data["filterStats"]["totalCars"], 25);
}

#[test]
fn list_defaults_to_most_recently_updated() {
    let used: Vec<Listing> = (1..=3).map(|id| priced(id, 1.0)).collect();
    let state = test_state(used, vec![]);

    let json = body_json(handle(get("/api/cars"), &state));
    let ids: Vec<i64> = json["data"]["used_cars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(json["data"]["per_page"], 12);
}

#[test]
fn list_filters_and_featured_pool() {
    let used = vec![camry(1), priced(2, 10.0)];
    let featured = vec![priced(50, 5.0)];
    let state = test_state(used, featured);

    let json = body_json(handle(get("/api/cars?make=TOYOTA&minPrice=1000"), &state));
    assert_eq!(json["data"]["total_entries"], 1);
    assert_eq!(json["data"]["used_cars"][0]["id"], 1);
    assert_eq!(json["data"]["filters"]["make"], "TOYOTA");
    assert_eq!(json["data"]["filters"]["minPrice"], 1000.0);
    assert_eq!(json["data"]["meta"]["filtersApplied"], 2);

    let json = body_json(handle(get("/api/cars?featured=true"), &state));
    assert_eq!(json["data"]["total_entries"], 1);
    assert_eq!(json["data"]["used_cars"][0]["id"], 50);
    assert_eq!(json["data"]["meta"]["filtersApplied"], 1);
}

#[test]
fn filter_that_matches_nothing_is_still_ok() {
    let state = test_state(vec![camry(1)], vec![]);

    let resp = handle(get("/api/cars?make=Lada"), &state);
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    assert_eq!(json["data"]["total_entries"], 0);
    assert_eq!(json["data"]["pagination"]["currentPage"], 1);
    assert_eq!(json["data"]["used_cars"].as_array().map(Vec::len), Some(0));
}

#[test]
fn empty_dataset_gives_empty_envelope() {
    let state = test_state(vec![], vec![camry(1)]);

    let resp = handle(get("/api/cars?page=4"), &state);
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    let data = &json["data"];
    assert_eq!(data["message"], "No cars found in database");
    assert_eq!(data["used_cars"].as_array().map(Vec::len), Some(0));
    assert_eq!(data["pagination"]["currentPage"], 1);
    assert_eq!(data["pagination"]["totalPages"], 0);
    assert_eq!(data["pagination"]["startIndex"], 0);
    assert_eq!(data["pagination"]["endIndex"], 0);
    assert_eq!(data["pagination"]["itemsPerPage"], 12);
    assert!(data.get("filters").is_none());
}

#[test]
fn detail_includes_related_dealer_and_stats() {
    let mut reference = camry(1);
    reference.price = 50_000.0;
    let mut same_model = camry(2);
    same_model.seller_name = s("Someone Else");
    same_model.auto_company_name = None;
    same_model.price = 70_000.0;
    let state = test_state(vec![reference, same_model], vec![camry(3)]);

    let resp = handle(get("/api/cars/1"), &state);
    assert_eq!(resp.status(), 200);

    let json = body_json(resp);
    let data = &json["data"];
    assert_eq!(data["car"]["id"], 1);
    assert_eq!(data["relatedCars"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["sameDealerCars"][0]["id"], 3);
    assert_eq!(data["stats"]["similarCarsCount"], 2);
    assert_eq!(data["stats"]["averagePrice"], 65_000.0);
    assert_eq!(data["stats"]["priceComparison"], "below_average");
    assert_eq!(data["meta"]["related_cars_count"], 2);
    assert_eq!(data["meta"]["same_dealer_cars_count"], 1);
    assert_eq!(data["meta"]["has_similar_cars"], true);
}

#[test]
fn detail_finds_featured_listings() {
    let state = test_state(vec![camry(1)], vec![camry(99)]);

    let json = body_json(handle(get("/api/cars/99"), &state));
    assert_eq!(json["status"], 200);
    assert_eq!(json["data"]["car"]["id"], 99);
}

#[test]
fn detail_rejects_non_numeric_id() {
    let state = test_state(vec![camry(1)], vec![]);

    let resp = handle(get("/api/cars/abc"), &state);
    assert_eq!(resp.status(), 400);

    let json = body_json(resp);
    assert_eq!(json["status"], 400);
    assert_eq!(json["error"], "INVALID_ID");
    assert_eq!(json["message"], "Invalid car ID. Must be a number.");
    assert!(json["data"].is_null());
}

#[test]
fn detail_id_reads_the_leading_integer() {
    let state = test_state(vec![camry(12), camry(20)], vec![]);

    let resp = handle(get("/api/cars/12abc"), &state);
    assert_eq!(resp.status(), 200);
    assert_eq!(body_json(resp)["data"]["car"]["id"], 12);

    let json = body_json(handle(get("/api/cars/20.5"), &state));
    assert_eq!(json["data"]["car"]["id"], 20);
}

#[test]
fn list_ignores_an_empty_sort_by() {
    let used: Vec<Listing> = (1..=2).map(|id| priced(id, 1.0)).collect();
    let state = test_state(used, vec![]);

    let json = body_json(handle(get("/api/cars?sortBy=&sortOrder="), &state));
    let ids: Vec<i64> = json["data"]["used_cars"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(json["data"]["filters"]["sortBy"], "updated");
    assert_eq!(json["data"]["meta"]["sortApplied"], false);
}

#[test]
fn list_reads_leading_integers_for_paging() {
    let used: Vec<Listing> = (1..=45).map(|id| priced(id, 1.0)).collect();
    let state = test_state(used, vec![]);

    let json = body_json(handle(get("/api/cars?page=2abc&limit=20.5"), &state));
    assert_eq!(json["data"]["pagination"]["currentPage"], 2);
    assert_eq!(json["data"]["per_page"], 20);
}

#[test]
fn detail_unknown_id_is_not_found() {
    let state = test_state(vec![camry(1)], vec![]);

    let resp = handle(get("/api/cars/404"), &state);
    assert_eq!(resp.status(), 404);

    let json = body_json(resp);
    assert_eq!(json["error"], "CAR_NOT_FOUND");
    assert_eq!(json["message"], "Car with ID 404 not found");
}

#[test]
fn detail_on_empty_dataset() {
    let state = test_state(vec![], vec![]);

    let json = body_json(handle(get("/api/cars/1"), &state));
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "NO_CARS_FOUND");
}

#[test]
fn retrieved_at_uses_the_given_clock() {
    let snapshot = Snapshot::new(vec![camry(1)], vec![]);
    let now = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

    let json = body_json(get_car(&snapshot, "1", now).unwrap());
    assert_eq!(json["data"]["meta"]["retrieved_at"], "2024-05-06T07:08:09.000Z");
}

#[test]
fn unknown_api_path_is_not_found() {
    let state = test_state(vec![camry(1)], vec![]);
    assert_eq!(handle(get("/api/trucks"), &state).status(), 404);
    assert_eq!(handle(get("/api/cars/1/extra"), &state).status(), 404);
}

#[test]
fn detail_borrows_listings_from_the_snapshot() {
    let snapshot = Snapshot::new(vec![camry(1), camry(2)], vec![camry(3)]);
    let all = snapshot.all();

    let detail = car_detail(&all, 3).unwrap();
    assert!(std::ptr::eq(detail.car, &snapshot.featured[0]));
    assert!(std::ptr::eq(detail.related[0], &snapshot.used[0]));
    assert!(std::ptr::eq(detail.same_dealer[1], &snapshot.used[1]));
}
