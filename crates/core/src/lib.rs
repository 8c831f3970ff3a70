pub mod config;
pub mod coordinator;
pub mod error;
pub mod locator;
pub mod map;
pub mod models;
pub mod query;
pub mod resolver;
pub mod sequencer;
pub mod session;
pub mod stores;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use config::{Credentials, IndexFields, SearchServiceConfig, DEFAULT_INDEX};
pub use coordinator::{MarkerCoordinator, FOCUS_ZOOM};
pub use error::{ConfigError, MapError, NotFoundReason, ResolveError, SearchError};
pub use locator::{decompose_street, normalize_field};
pub use map::{CameraMove, MapSurface, Marker, MarkerId, Popup};
pub use models::{GeoPoint, HouseNumberEntry, Locator, StreetDocument};
pub use query::build_search_body;
pub use resolver::AddressResolver;
pub use sequencer::{RequestSequencer, RequestToken};
pub use session::{AddressForm, SearchOutcome, SearchSession};
pub use stores::ElasticsearchStore;
pub use traits::AddressIndex;
