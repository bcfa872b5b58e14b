// UniFi Protect Integration API surface.
//
// JSON REST endpoints served by the console under
// /proxy/protect/integration/v1/. Optional: consoles without the
// Protect application answer 404 on the meta probe.

pub mod client;
pub mod types;

pub use client::ProtectClient;
