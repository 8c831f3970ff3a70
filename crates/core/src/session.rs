//! Form state and submit handlers a presentation shell binds to.
//!
//! Every resolution failure ends here as an observable message; nothing
//! reaches the shell as an error value.

use crate::coordinator::MarkerCoordinator;
use crate::map::{MapSurface, MarkerId};
use crate::resolver::AddressResolver;
use crate::sequencer::{RequestSequencer, RequestToken};
use crate::traits::AddressIndex;
use crate::{GeoPoint, MapError, ResolveError};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressForm {
    department: String,
    province: String,
    district: String,
    street: String,
    complete_address: String,
}

impl AddressForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn set_department(&mut self, value: impl Into<String>) {
        self.department = value.into();
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    pub fn set_province(&mut self, value: impl Into<String>) {
        self.province = value.into();
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn set_district(&mut self, value: impl Into<String>) {
        self.district = value.into();
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn set_street(&mut self, value: impl Into<String>) {
        self.street = value.into();
    }

    pub fn complete_address(&self) -> &str {
        &self.complete_address
    }

    pub fn set_complete_address(&mut self, value: impl Into<String>) {
        self.complete_address = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// Camera moved and the marker now sits at this location.
    Focused(GeoPoint),
    /// The complete address could not be split into its parts.
    Invalid,
    NotFound,
    /// The search service could not be reached or answered with an error.
    Failed,
    /// Resolution worked but the map surface rejected the update.
    MapFault,
    /// A newer submission was issued while this one was in flight.
    Superseded,
}

pub struct SearchSession<I, M>
where
    I: AddressIndex,
    M: MapSurface,
{
    resolver: AddressResolver<I>,
    coordinator: Mutex<MarkerCoordinator<M>>,
    error: Mutex<Option<String>>,
    sequencer: RequestSequencer,
}

impl<I, M> SearchSession<I, M>
where
    I: AddressIndex + Send + Sync,
    M: MapSurface,
{
    pub fn new(resolver: AddressResolver<I>, map: M) -> Self {
        Self {
            resolver,
            coordinator: Mutex::new(MarkerCoordinator::new(map)),
            error: Mutex::new(None),
            sequencer: RequestSequencer::new(),
        }
    }

    /// Message for the last applied submission, if it did not succeed.
    pub fn error(&self) -> Option<String> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_marker(&self) -> Option<MarkerId> {
        self.coordinator
            .lock()
            .ok()
            .and_then(|coordinator| coordinator.current_marker())
    }

    pub fn with_map<R>(&self, inspect: impl FnOnce(&M) -> R) -> Option<R> {
        self.coordinator
            .lock()
            .ok()
            .map(|coordinator| inspect(coordinator.map()))
    }

    pub async fn search_address(&self, form: &AddressForm) -> SearchOutcome {
        let token = self.sequencer.issue();
        let result = self
            .resolver
            .resolve_by_fields(form.department(), form.province(), form.district(), form.street())
            .await;
        self.apply(token, result)
    }

    pub async fn search_complete_address(&self, form: &AddressForm) -> SearchOutcome {
        let token = self.sequencer.issue();
        let result = self
            .resolver
            .resolve_by_full_address(form.complete_address())
            .await;
        self.apply(token, result)
    }

    fn apply(&self, token: RequestToken, result: Result<GeoPoint, ResolveError>) -> SearchOutcome {
        // The freshness check and the map update happen under one lock.
        let Ok(mut coordinator) = self.coordinator.lock() else {
            error!("map coordinator lock poisoned");
            self.set_error(Some(MapError::Unavailable.to_string()));
            return SearchOutcome::MapFault;
        };

        if !self.sequencer.is_latest(token) {
            warn!(request = token.value(), "dropping stale address search result");
            return SearchOutcome::Superseded;
        }

        match result {
            Ok(location) => match coordinator.focus_on(location) {
                Ok(marker) => {
                    debug!(request = token.value(), %marker, "address search applied");
                    self.set_error(None);
                    SearchOutcome::Focused(location)
                }
                Err(map_error) => {
                    error!(error = %map_error, "map update failed");
                    self.set_error(Some(format!("map update failed: {map_error}")));
                    SearchOutcome::MapFault
                }
            },
            Err(resolve_error) => {
                let outcome = match resolve_error {
                    ResolveError::Validation(_) => SearchOutcome::Invalid,
                    ResolveError::NotFound(_) => SearchOutcome::NotFound,
                    ResolveError::Service(_) => SearchOutcome::Failed,
                };
                self.set_error(Some(resolve_error.to_string()));
                outcome
            }
        }
    }

    fn set_error(&self, message: Option<String>) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }
}
