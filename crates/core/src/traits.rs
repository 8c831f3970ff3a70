use crate::{Locator, SearchError, StreetDocument};
use async_trait::async_trait;

/// A street index that can be queried with a [`Locator`].
///
/// Documents come back in rank order. An empty vector means no hits.
#[async_trait]
pub trait AddressIndex {
    async fn search_streets(&self, locator: &Locator) -> Result<Vec<StreetDocument>, SearchError>;
}
