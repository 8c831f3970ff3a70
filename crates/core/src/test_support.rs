use crate::map::{CameraMove, MapSurface, Marker, MarkerId};
use crate::traits::AddressIndex;
use crate::{GeoPoint, HouseNumberEntry, Locator, MapError, SearchError, StreetDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn door(number: &str, lon: f64, lat: f64) -> HouseNumberEntry {
    HouseNumberEntry {
        number: number.to_string(),
        location: GeoPoint::new(lon, lat),
    }
}

pub fn street(id: &str, house_numbers: Vec<HouseNumberEntry>) -> StreetDocument {
    StreetDocument {
        id: id.to_string(),
        score: 1.0,
        name: None,
        house_numbers,
    }
}

struct Gate {
    house_number: String,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[derive(Default)]
pub struct FakeIndex {
    documents: Vec<StreetDocument>,
    failure: Option<fn() -> SearchError>,
    gate: Option<Gate>,
    seen: Mutex<Vec<Locator>>,
}

impl FakeIndex {
    pub fn with_documents(documents: Vec<StreetDocument>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }

    pub fn failing(failure: fn() -> SearchError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    /// Holds queries for `house_number` until `release` is notified.
    pub fn gated_on(mut self, house_number: &str, entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.gate = Some(Gate {
            house_number: house_number.to_string(),
            entered,
            release,
        });
        self
    }

    pub fn seen_locators(&self) -> Vec<Locator> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl AddressIndex for FakeIndex {
    async fn search_streets(&self, locator: &Locator) -> Result<Vec<StreetDocument>, SearchError> {
        self.seen.lock().unwrap().push(locator.clone());

        if let Some(gate) = &self.gate {
            if locator.house_number.as_deref() == Some(gate.house_number.as_str()) {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
        }

        match self.failure {
            Some(failure) => Err(failure()),
            None => Ok(self.documents.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    FlyTo(CameraMove),
    Added(MarkerId),
    Removed(MarkerId),
}

#[derive(Debug, Default)]
pub struct FakeMap {
    pub events: Vec<MapEvent>,
    pub markers: HashMap<MarkerId, Marker>,
    pub fail_fly_to: bool,
    pub fail_next_add: bool,
    pub fail_next_remove: bool,
    next_id: u64,
}

impl FakeMap {
    pub fn rejecting_camera() -> Self {
        Self {
            fail_fly_to: true,
            ..Self::default()
        }
    }
}

impl MapSurface for FakeMap {
    fn fly_to(&mut self, camera: &CameraMove) -> Result<(), MapError> {
        if self.fail_fly_to {
            return Err(MapError::Surface("camera is locked".to_string()));
        }
        self.events.push(MapEvent::FlyTo(*camera));
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> Result<MarkerId, MapError> {
        if std::mem::take(&mut self.fail_next_add) {
            return Err(MapError::Surface("marker layer busy".to_string()));
        }
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.insert(id, marker);
        self.events.push(MapEvent::Added(id));
        Ok(id)
    }

    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), MapError> {
        if std::mem::take(&mut self.fail_next_remove) {
            return Err(MapError::Surface("marker layer busy".to_string()));
        }
        self.markers
            .remove(&marker)
            .ok_or(MapError::UnknownMarker(marker))?;
        self.events.push(MapEvent::Removed(marker));
        Ok(())
    }
}
