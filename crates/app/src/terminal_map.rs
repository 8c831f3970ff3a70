use address_locator_core::{CameraMove, MapError, MapSurface, Marker, MarkerId};
use std::collections::BTreeMap;
use tracing::info;

/// Headless map surface that prints every command it receives.
#[derive(Debug, Default)]
pub struct TerminalMap {
    camera: Option<CameraMove>,
    markers: BTreeMap<MarkerId, Marker>,
    next_id: u64,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> Option<&CameraMove> {
        self.camera.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl MapSurface for TerminalMap {
    fn fly_to(&mut self, camera: &CameraMove) -> Result<(), MapError> {
        info!(center = %camera.center, zoom = camera.zoom, essential = camera.essential, "fly_to");
        println!(
            "camera -> [{}] zoom={} essential={}",
            camera.center, camera.zoom, camera.essential
        );
        self.camera = Some(*camera);
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> Result<MarkerId, MapError> {
        let Some(position) = marker.position else {
            return Err(MapError::Surface("marker has no position".to_string()));
        };

        self.next_id += 1;
        let id = MarkerId(self.next_id);
        let popup = marker
            .popup
            .as_ref()
            .map(|popup| popup.text.as_str())
            .unwrap_or_default();
        println!("marker {id} placed at [{position}] popup=\"{popup}\"");
        self.markers.insert(id, marker);
        Ok(id)
    }

    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), MapError> {
        self.markers
            .remove(&marker)
            .ok_or(MapError::UnknownMarker(marker))?;
        println!("marker {marker} removed");
        Ok(())
    }
}
