// Hand-crafted async HTTP client for the UniFi Network Integration API.
//
// Base path: /proxy/network/integration/v1/
// Auth: X-API-KEY header

use std::future::Future;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types;
use crate::Error;
use crate::response;
use crate::transport::{TransportConfig, api_key_headers};

/// Async client for the UniFi Network Integration API.
///
/// Uses API-key authentication and communicates via JSON REST endpoints
/// under `/proxy/network/integration/v1/`.
pub struct NetworkClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NetworkClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a console URL, an API key, and transport config.
    ///
    /// Injects `X-API-KEY` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = api_key_headers(api_key)?;
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL with the UniFi OS proxy prefix.
    ///
    /// `https://host` becomes `https://host/proxy/network/integration/`.
    /// A URL already ending in `/integration` is taken as-is.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/integration") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/proxy/network/integration/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v1/sites"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/integration/`, so joining `v1/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        response::decode(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        response::decode(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        response::decode(resp).await
    }

    async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        response::expect_success(resp).await
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect all pages into a single `Vec<T>`.
    pub async fn paginate_all<T, F, Fut>(&self, limit: i32, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(i64, i32) -> Fut,
        Fut: Future<Output = Result<types::Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut offset: i64 = 0;

        loop {
            let page = fetch(offset, limit).await?;
            let received = page.data.len();
            all.extend(page.data);

            let limit_usize = usize::try_from(limit).unwrap_or(0);
            if received < limit_usize
                || i64::try_from(all.len()).unwrap_or(i64::MAX) >= page.total_count
            {
                break;
            }

            offset += i64::try_from(received).unwrap_or(i64::MAX);
        }

        Ok(all)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── System Info ──────────────────────────────────────────────────

    pub async fn get_info(&self) -> Result<types::ApplicationInfoResponse, Error> {
        self.get("v1/info").await
    }

    // ── Sites ────────────────────────────────────────────────────────

    pub async fn list_sites(
        &self,
        offset: i64,
        limit: i32,
    ) -> Result<types::Page<types::SiteResponse>, Error> {
        self.get_with_params(
            "v1/sites",
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(
        &self,
        site_id: &str,
        offset: i64,
        limit: i32,
    ) -> Result<types::Page<types::DeviceResponse>, Error> {
        self.get_with_params(
            &format!("v1/sites/{site_id}/devices"),
            &[("offset", offset.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn get_device(
        &self,
        site_id: &str,
        device_id: &str,
    ) -> Result<types::DeviceDetailsResponse, Error> {
        self.get(&format!("v1/sites/{site_id}/devices/{device_id}"))
            .await
    }

    // ── Device actions ───────────────────────────────────────────────

    /// Ask the controller to restart a device.
    ///
    /// Returns `Ok(true)` when the controller acknowledged with
    /// `status: "OK"`, `Ok(false)` when it answered successfully but did
    /// not accept the action.
    pub async fn restart_device(&self, site_id: &str, device_id: &str) -> Result<bool, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            action: &'a str,
        }

        let ack: types::ActionResponse = self
            .post(
                &format!("v1/sites/{site_id}/devices/{device_id}/actions"),
                &Body { action: "RESTART" },
            )
            .await?;

        Ok(ack.status.as_deref() == Some("OK"))
    }

    /// Power-cycle a PoE port. Success is any 2xx answer.
    pub async fn power_cycle_port(
        &self,
        site_id: &str,
        device_id: &str,
        port_idx: u32,
    ) -> Result<(), Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            action: &'a str,
        }

        self.post_no_response(
            &format!("v1/sites/{site_id}/devices/{device_id}/interfaces/ports/{port_idx}/actions"),
            &Body {
                action: "POWER_CYCLE",
            },
        )
        .await
    }
}
