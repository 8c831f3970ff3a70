use crate::traits::AddressIndex;
use crate::{GeoPoint, Locator, NotFoundReason, ResolveError};
use tracing::{debug, error, warn};

/// Turns free-text address input into a single door coordinate.
///
/// The resolver only talks to the index; moving the map is left to
/// [`crate::MarkerCoordinator`].
pub struct AddressResolver<I>
where
    I: AddressIndex,
{
    index: I,
}

impl<I> AddressResolver<I>
where
    I: AddressIndex + Send + Sync,
{
    pub fn new(index: I) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub async fn resolve_by_fields(
        &self,
        department: &str,
        province: &str,
        district: &str,
        street: &str,
    ) -> Result<GeoPoint, ResolveError> {
        let locator = Locator::from_fields(department, province, district, street);
        self.resolve(&locator).await
    }

    /// Resolves `"<department>, <province>, <district>, <street> [<number>]"`.
    ///
    /// Input with fewer than four comma-separated segments is rejected
    /// before the index is queried.
    pub async fn resolve_by_full_address(&self, text: &str) -> Result<GeoPoint, ResolveError> {
        let locator = Locator::parse_full_address(text).map_err(|error| {
            warn!(input = %text, %error, "rejected full address");
            error
        })?;
        self.resolve(&locator).await
    }

    pub async fn resolve(&self, locator: &Locator) -> Result<GeoPoint, ResolveError> {
        debug!(?locator, "resolving locator");

        // Only an explicit door number can pick a coordinate out of a street.
        let Some(house_number) = locator.house_number.as_deref() else {
            warn!(street = %locator.street_name, "street text has no house number");
            return Err(ResolveError::NotFound(NotFoundReason::MissingHouseNumber));
        };

        let documents = self.index.search_streets(locator).await.map_err(|source| {
            error!(error = %source, "street index query failed");
            ResolveError::Service(source)
        })?;

        let Some(top) = documents.first() else {
            warn!(?locator, "street index returned no documents");
            return Err(ResolveError::NotFound(NotFoundReason::NoDocuments));
        };

        match top.find_house_number(house_number) {
            Some(entry) => {
                debug!(street_id = %top.id, number = %entry.number, location = %entry.location, "door matched");
                Ok(entry.location)
            }
            None => {
                warn!(street_id = %top.id, number = %house_number, "no matching house number");
                Err(ResolveError::NotFound(NotFoundReason::NoMatchingHouseNumber))
            }
        }
    }
}
