// Hand-crafted async HTTP client for the UniFi Protect Integration API.
//
// Base path: /proxy/protect/integration/v1/
// Auth: X-API-KEY header (same key as the Network API)

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types;
use crate::Error;
use crate::response;
use crate::transport::{TransportConfig, api_key_headers};

/// List responses arrive either as a bare JSON array or wrapped in a
/// `{"data": […]}` envelope, depending on the Protect release.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Wrapped { data: Vec<T> },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Async client for the UniFi Protect Integration API.
///
/// Not every console runs Protect; callers probe with
/// [`ProtectClient::get_meta_info`] before relying on the rest of the
/// surface.
pub struct ProtectClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProtectClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a console URL, an API key, and transport config.
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
    /// `https://host` becomes `https://host/proxy/protect/integration/`.
    /// A URL already ending in `/integration` is taken as-is.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/integration") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/proxy/protect/integration/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

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

    /// POST with no request body; some Protect action endpoints reject
    /// even an empty JSON object.
    async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        response::expect_success(resp).await
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Meta ─────────────────────────────────────────────────────────

    /// Probe the Protect application. A console without Protect answers
    /// 404 here, which callers treat as "not installed".
    pub async fn get_meta_info(&self) -> Result<types::MetaInfoResponse, Error> {
        self.get("v1/meta/info").await
    }

    // ── Cameras ──────────────────────────────────────────────────────

    pub async fn list_cameras(&self) -> Result<Vec<types::CameraResponse>, Error> {
        let payload: ListPayload<types::CameraResponse> = self.get("v1/cameras").await?;
        Ok(payload.into_items())
    }

    /// Start a camera's PTZ patrol from the given preset slot.
    pub async fn ptz_patrol_start(&self, camera_id: &str, slot: u32) -> Result<(), Error> {
        self.post_empty(&format!("v1/cameras/{camera_id}/ptz/patrol/start/{slot}"))
            .await
    }

    /// Stop a camera's running PTZ patrol.
    pub async fn ptz_patrol_stop(&self, camera_id: &str) -> Result<(), Error> {
        self.post_empty(&format!("v1/cameras/{camera_id}/ptz/patrol/stop"))
            .await
    }

    // ── Chimes ───────────────────────────────────────────────────────

    pub async fn list_chimes(&self) -> Result<Vec<types::ChimeResponse>, Error> {
        let payload: ListPayload<types::ChimeResponse> = self.get("v1/chimes").await?;
        Ok(payload.into_items())
    }

    /// Play a chime's speaker, optionally with an explicit ringtone.
    ///
    /// With `None` the request carries no body and the chime falls back
    /// to its configured ringtone.
    pub async fn play_chime(
        &self,
        chime_id: &str,
        ringtone_id: Option<&str>,
    ) -> Result<(), Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            ringtone_id: &'a str,
        }

        let path = format!("v1/chimes/{chime_id}/play-speaker");
        match ringtone_id {
            Some(ringtone) => {
                self.post_no_response(
                    &path,
                    &Body {
                        ringtone_id: ringtone,
                    },
                )
                .await
            }
            None => self.post_empty(&path).await,
        }
    }
}
