use crate::map::{CameraMove, MapSurface, Marker, MarkerId, Popup};
use crate::{GeoPoint, MapError};
use tracing::{info, warn};

pub const FOCUS_ZOOM: f64 = 18.0;

/// Moves the camera to resolved locations and keeps a single marker on the
/// map.
pub struct MarkerCoordinator<M>
where
    M: MapSurface,
{
    map: M,
    current: Option<(MarkerId, Marker)>,
}

impl<M> MarkerCoordinator<M>
where
    M: MapSurface,
{
    pub fn new(map: M) -> Self {
        Self { map, current: None }
    }

    pub fn current_marker(&self) -> Option<MarkerId> {
        self.current.as_ref().map(|(id, _)| *id)
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    /// Flies to `location`, then swaps the tracked marker for a new one there.
    ///
    /// A failed camera move or removal leaves the previous marker in place.
    /// If the new marker cannot be added, the previous one is put back.
    pub fn focus_on(&mut self, location: GeoPoint) -> Result<MarkerId, MapError> {
        self.map.fly_to(&CameraMove {
            center: location,
            zoom: FOCUS_ZOOM,
            essential: true,
        })?;

        let previous = match self.current.take() {
            Some((id, marker)) => match self.map.remove_marker(id) {
                Ok(()) => Some(marker),
                Err(error) => {
                    self.current = Some((id, marker));
                    return Err(error);
                }
            },
            None => None,
        };

        let marker = Marker::new()
            .set_lng_lat(location)
            .set_popup(Popup::new().set_text(location.to_string()));
        match self.map.add_marker(marker.clone()) {
            Ok(id) => {
                self.current = Some((id, marker));
                info!(marker = %id, %location, "map focused on location");
                Ok(id)
            }
            Err(error) => {
                if let Some(previous) = previous {
                    self.restore(previous);
                }
                Err(error)
            }
        }
    }

    /// Removes the tracked marker, if any.
    ///
    /// The marker stays tracked when the surface refuses to remove it.
    pub fn clear(&mut self) -> Result<(), MapError> {
        if let Some((previous, _)) = &self.current {
            self.map.remove_marker(*previous)?;
            self.current = None;
        }
        Ok(())
    }

    fn restore(&mut self, marker: Marker) {
        match self.map.add_marker(marker.clone()) {
            Ok(id) => self.current = Some((id, marker)),
            Err(error) => warn!(%error, "previous marker could not be restored"),
        }
    }
}
