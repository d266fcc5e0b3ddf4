//! Integration tests for the catalog pages: home, product detail and
//! artist profile.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use sketchshop_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let mut app = TestApp::new();
    let resp = app.get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_lists_catalog_with_display_prices() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Whispering Pines"));
    assert!(resp.body.contains("Urban Lines"));
    assert!(resp.body.contains("Portrait of a Doubter"));
    // 35.00 * 83
    assert!(resp.body.contains("₹2905"));
    assert!(resp.body.contains(r#"href="/art/sk-001""#));
}

#[tokio::test]
async fn test_home_tag_sidebar_in_first_appearance_order() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    let positions: Vec<usize> = ["All", "landscape", "pencil", "urban", "ink", "portrait", "charcoal"]
        .iter()
        .map(|tag| {
            resp.body
                .find(&format!(">{tag}</a>"))
                .unwrap_or_else(|| panic!("missing tag {tag}"))
        })
        .collect();

    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(resp.body.contains(r#"class="tag tag-selected">All</a>"#));
}

#[tokio::test]
async fn test_home_filters_by_tag() {
    let mut app = TestApp::new();
    let resp = app.get("/?tag=ink").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Urban Lines"));
    assert!(!resp.body.contains("Whispering Pines"));
    assert!(!resp.body.contains("Portrait of a Doubter"));
    assert!(resp.body.contains(r#"class="tag tag-selected">ink</a>"#));
}

#[tokio::test]
async fn test_home_search_is_case_insensitive_and_covers_artist() {
    let mut app = TestApp::new();

    let resp = app.get("/?q=CHARCOAL").await;
    assert!(resp.body.contains("Portrait of a Doubter"));
    assert!(!resp.body.contains("Urban Lines"));

    let resp = app.get("/?q=kapoor").await;
    assert!(resp.body.contains("Urban Lines"));
    assert!(!resp.body.contains("Whispering Pines"));
}

#[tokio::test]
async fn test_home_search_and_tag_are_conjunctive() {
    let mut app = TestApp::new();
    let resp = app.get("/?q=pine&tag=ink").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("No sketches match your search."));
    // Tag links keep the search text
    assert!(resp.body.contains("/?tag=pencil&amp;q=pine"));
}

#[tokio::test]
async fn test_product_detail() {
    let mut app = TestApp::new();
    let resp = app.get("/art/sk-002").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Urban Lines"));
    assert!(resp.body.contains("12 x 16 in"));
    // 45.00 * 83
    assert!(resp.body.contains("₹3735"));
    assert!(resp.body.contains("About the Artist"));
    assert!(resp.body.contains(r#"href="/artist/R.%20Kapoor""#));
    assert!(resp.body.contains(r#"action="/art/sk-002/add""#));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/art/unknown-id").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Product not found");
}

#[tokio::test]
async fn test_artist_profile_lists_only_their_works() {
    let mut app = TestApp::new();
    let resp = app.get("/artist/M.%20Iyer").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Meera Iyer works with charcoal"));
    assert!(resp.body.contains("Portrait of a Doubter"));
    assert!(resp.body.contains(r#"href="https://instagram.com/meera.iyer.charcoal""#));
    assert!(resp.body.contains(">Instagram</a>"));
    assert!(!resp.body.contains("Urban Lines"));
    assert!(!resp.body.contains("Whispering Pines"));
}

#[tokio::test]
async fn test_unknown_artist_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/artist/Nobody").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Artist not found");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let mut app = TestApp::new();
    let resp = app.get("/collections").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pages_carry_security_headers_and_request_id() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    let csp = resp
        .headers
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(csp.contains("https://picsum.photos"));
    assert!(csp.contains("https://i.pravatar.cc"));
    assert_eq!(resp.headers.get("x-frame-options").unwrap(), "DENY");
    assert!(resp.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_first_visit_sets_session_cookie() {
    let mut app = TestApp::new();
    let resp = app.get("/").await;

    let cookie = resp
        .headers
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cookie.starts_with("sketchshop_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
}
