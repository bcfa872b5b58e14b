// unipress-api: Async Rust clients for the UniFi Integration APIs (Network + Protect)

pub mod error;
pub mod network;
pub mod protect;
mod response;
pub mod transport;

pub use error::Error;
pub use network::NetworkClient;
pub use protect::ProtectClient;
pub use transport::{TlsMode, TransportConfig};
