// owlet-api: Async Rust client for the Owlet baby monitor cloud (Ayla Networks)

pub mod error;
pub mod models;
pub mod session;
pub mod transport;

mod devices;
mod properties;

pub use error::Error;
pub use models::{Device, PropertySnapshot};
pub use session::{Session, SessionConfig};
pub use transport::TransportConfig;
