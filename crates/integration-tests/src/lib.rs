//! Integration tests for ProScience.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p proscience-integration-tests
//! ```
//!
//! Each test starts its own storefront or admin app on `127.0.0.1:0` with
//! seeded in-memory data, then talks to it through a cookie-aware client
//! that does not follow redirects.
//!
//! # Test Categories
//!
//! - `storefront` - Catalog pages, cart session flow, checkout, contact form
//! - `admin` - Login, access control, listings, review moderation

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::Router;
use proscience_admin::config::AdminConfig;
use proscience_admin::data::ReviewBook;
use proscience_admin::services::AdminAuthService;
use proscience_core::{Catalog, Email};
use proscience_storefront::cart::PricingPolicy;
use proscience_storefront::config::StorefrontConfig;
use reqwest::Client;
use secrecy::SecretString;
use tokio::net::TcpListener;

/// Admin account every admin test signs in with.
pub const ADMIN_EMAIL: &str = "ops@proscience.com";

/// Password for [`ADMIN_EMAIL`].
pub const ADMIN_PASSWORD: &str = "Vq7#tR2!mZ9@kL4$";

/// A running app and a client bound to it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestServer {
    /// Serve `router` on an ephemeral port for the rest of the test.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server crashed");
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self { addr, client }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// GET `path` and return the status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }

    /// POST a urlencoded form to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails at the transport level.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }
}

/// `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &reqwest::Response) -> Option<String> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Storefront configuration for tests: default pricing, bundled content.
#[must_use]
pub fn storefront_config() -> StorefrontConfig {
    StorefrontConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        content_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/content"),
        pricing: PricingPolicy::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Start the storefront with the seeded catalog.
///
/// # Panics
///
/// Panics if the content pages cannot be loaded.
pub async fn spawn_storefront() -> TestServer {
    let state = proscience_storefront::state::AppState::new(storefront_config(), Catalog::seeded())
        .expect("Failed to load storefront content");
    TestServer::start(proscience_storefront::app(state)).await
}

/// Admin configuration for tests.
///
/// # Panics
///
/// Panics if [`ADMIN_EMAIL`] does not parse.
#[must_use]
pub fn admin_config() -> AdminConfig {
    AdminConfig {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        admin_email: Email::parse(ADMIN_EMAIL).expect("Invalid test admin email"),
        admin_password: SecretString::from(ADMIN_PASSWORD),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    }
}

/// Start the admin panel with seeded back-office data.
///
/// # Panics
///
/// Panics if the admin password cannot be hashed.
pub async fn spawn_admin() -> TestServer {
    let config = admin_config();
    let auth = AdminAuthService::new(config.admin_email.clone(), &config.admin_password)
        .expect("Failed to hash admin password");
    let state = proscience_admin::state::AppState::new(
        config,
        auth,
        Catalog::seeded(),
        ReviewBook::seeded(),
    );
    TestServer::start(proscience_admin::app(state)).await
}

/// Start the admin panel and sign in.
///
/// # Panics
///
/// Panics if the login is not accepted.
pub async fn signed_in_admin() -> TestServer {
    let server = spawn_admin().await;
    let resp = server
        .post_form(
            "/auth/login",
            &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)],
        )
        .await;
    assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/"));
    server
}
