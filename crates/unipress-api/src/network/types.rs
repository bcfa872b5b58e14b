// Wire types for the UniFi Network Integration API.
//
// Field names follow the camelCase JSON served under
// /proxy/network/integration/v1/. The embedded port table is the one
// exception: the controller emits it with snake_case keys, and its
// entries are kept as opaque JSON for tolerant parsing downstream.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic pagination envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub offset: i64,
    pub limit: i32,
    pub count: i32,
    pub total_count: i64,
    pub data: Vec<T>,
}

/// Response from `GET /v1/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfoResponse {
    pub application_version: String,
}

/// Response item from `GET /v1/sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Host-facing site name, e.g. `default`.
    #[serde(default)]
    pub internal_reference: Option<String>,
}

/// Response item from `GET /v1/sites/{siteId}/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    /// Device state: one of `ONLINE`, `OFFLINE`, `PENDING_ADOPTION`,
    /// `UPDATING`, `GETTING_READY`, `ADOPTING`, `DELETING`,
    /// `CONNECTION_INTERRUPTED`, `ISOLATED`.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
}

/// Response from `GET /v1/sites/{siteId}/devices/{deviceId}`.
///
/// Extends the overview with the physical port table and whatever other
/// detail fields the controller version serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetailsResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    /// Physical port descriptors. Served with snake_case keys
    /// (`port_idx`, `poe_enable`) unlike the rest of the payload, and
    /// with a shape that varies across controller versions -- kept as
    /// opaque JSON so one odd entry never sinks the whole device.
    #[serde(rename = "port_table", default)]
    pub port_table: Vec<Value>,
    /// Detail fields not modeled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Acknowledgment payload from device and port action posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    /// `OK` when the controller accepted the action.
    #[serde(default)]
    pub status: Option<String>,
}
