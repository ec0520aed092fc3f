// skyfare-api: Async client for the skyfare location-suggestion API

pub mod de;
pub mod error;
pub mod locations;
pub mod models;
pub mod transport;

pub use error::Error;
pub use locations::LocationsClient;
pub use models::{GroupData, LocationGroup, LocationSearchResponse, SimpleAirport};
pub use transport::{TlsMode, TransportConfig};
