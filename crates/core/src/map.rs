use crate::{GeoPoint, MapError};
use serde::{Deserialize, Serialize};

/// Identifier a map surface hands out for each marker it attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Camera animation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMove {
    pub center: GeoPoint,
    pub zoom: f64,
    /// Must be played even when the viewer prefers reduced motion.
    pub essential: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popup {
    pub text: String,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: Option<GeoPoint>,
    pub popup: Option<Popup>,
}

impl Marker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_lng_lat(mut self, position: GeoPoint) -> Self {
        self.position = Some(position);
        self
    }

    pub fn set_popup(mut self, popup: Popup) -> Self {
        self.popup = Some(popup);
        self
    }
}

/// The renderable map the coordinator drives.
///
/// Implementations own viewport and marker state; callers only issue
/// commands and keep the returned [`MarkerId`].
pub trait MapSurface {
    fn fly_to(&mut self, camera: &CameraMove) -> Result<(), MapError>;

    fn add_marker(&mut self, marker: Marker) -> Result<MarkerId, MapError>;

    fn remove_marker(&mut self, marker: MarkerId) -> Result<(), MapError>;
}
