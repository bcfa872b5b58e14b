// Wire types for the UniFi Protect Integration API.
//
// Field names follow the camelCase JSON served under
// /proxy/protect/integration/v1/. Every non-id field is optional or
// defaulted: Protect payloads gain and lose fields across releases, and
// a sparse record should still parse.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `GET /v1/meta/info`. Doubles as the availability probe
/// for the Protect application on a console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInfoResponse {
    #[serde(default)]
    pub application_version: Option<String>,
}

/// Response item from `GET /v1/cameras`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// `CONNECTED` or `DISCONNECTED`.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub feature_flags: CameraFeatureFlags,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Capability flags inside a camera payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraFeatureFlags {
    #[serde(default)]
    pub has_ptz: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Response item from `GET /v1/chimes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChimeResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    /// Per-doorbell ring configuration; the first entry carries the
    /// ringtone the chime currently plays.
    #[serde(default)]
    pub ring_settings: Vec<RingSettingResponse>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Entry in a chime's `ringSettings` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RingSettingResponse {
    #[serde(default)]
    pub ringtone_id: Option<String>,
    #[serde(default)]
    pub camera_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
