//! Integration tests for SketchShop.
//!
//! Tests drive the complete storefront router in-process; no server or
//! network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sketchshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Home, product and artist pages
//! - `storefront_checkout` - Cart, checkout flow and simulated payment

use std::path::Path;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, Response, StatusCode, header},
};
use sketchshop_storefront::{
    catalog::Catalog,
    config::{CartStorageConfig, StorefrontConfig},
    routes,
    state::AppState,
};
use tower::ServiceExt;

/// Payment delay used by the test configuration.
pub const PAYMENT_DELAY: Duration = Duration::from_millis(1500);

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Target of a redirect response.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }
}

/// The storefront router plus one visitor's session cookie.
///
/// Each `TestApp` acts as a single browser: the session cookie issued on the
/// first response is sent with every following request.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Storefront with in-memory cart storage.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(CartStorageConfig::Memory)
    }

    /// Storefront with file-backed carts under `data_dir`.
    #[must_use]
    pub fn with_data_dir(data_dir: &Path) -> Self {
        Self::with_storage(CartStorageConfig::File {
            data_dir: data_dir.to_path_buf(),
        })
    }

    fn with_storage(cart_storage: CartStorageConfig) -> Self {
        let config = StorefrontConfig {
            cart_storage,
            payment_delay: PAYMENT_DELAY,
            ..StorefrontConfig::default()
        };
        let state = AppState::new(config, Catalog::demo());

        Self {
            router: routes::app(state),
            cookie: None,
        }
    }

    /// A second browser on the same server, without this one's cookie.
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a urlencoded form POST.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built or the body cannot be read.
    pub async fn post_form(&mut self, uri: &str, form: &str) -> TestResponse {
        self.send(Method::POST, uri, Some(form.to_string())).await
    }

    /// Send a GET request and return the unbuffered response.
    ///
    /// Used for streaming endpoints whose body never ends.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be built.
    #[allow(clippy::unwrap_used)]
    pub async fn open(&mut self, uri: &str) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let response = self
            .router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        self.remember_cookie(&response);
        response
    }

    fn remember_cookie(&mut self, response: &Response<Body>) {
        let pair = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next());
        if let Some(pair) = pair {
            self.cookie = Some(pair.to_string());
        }
    }

    #[allow(clippy::unwrap_used)]
    async fn send(&mut self, method: Method, uri: &str, form: Option<String>) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                request = request.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        self.remember_cookie(&response);

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
