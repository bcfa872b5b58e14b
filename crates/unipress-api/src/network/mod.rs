// UniFi Network Integration API surface.
//
// JSON REST endpoints served by the console under
// /proxy/network/integration/v1/, authenticated with an API key.

pub mod client;
pub mod types;

pub use client::NetworkClient;
