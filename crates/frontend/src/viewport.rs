use cropmap_shared::geo;
use cropmap_shared::models::Location;

/// Marker plus radius circle drawn at the user's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub position: Location,
    pub radius_m: f64,
}

/// What the map shows: a center, an integer zoom, and the position overlay
/// once geolocation has resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub center: Location,
    pub zoom: u8,
    pub overlay: Option<Overlay>,
}

impl Default for MapViewport {
    fn default() -> Self {
        MapViewport {
            center: geo::WORLD_CENTER,
            zoom: geo::DEFAULT_ZOOM,
            overlay: None,
        }
    }
}

impl MapViewport {
    /// Add the position overlay and focus the view on it.
    pub fn locate(&mut self, position: Location, radius_m: f64) {
        self.overlay = Some(Overlay { position, radius_m });
        self.center = position;
        self.zoom = geo::LOCATED_ZOOM;
    }

    /// Pan relative to a drag that started at `start_center`.
    pub fn drag_from(&mut self, start_center: Location, dx: f64, dy: f64) {
        self.center = geo::pan_center(start_center, self.zoom, dx, dy);
    }

    /// Step the zoom by `steps` levels keeping the point at `offset` (screen
    /// pixels from the viewport center) fixed. Returns false at the limits.
    pub fn zoom_by(&mut self, steps: i8, offset: (f64, f64)) -> bool {
        let target = (self.zoom as i16 + steps as i16)
            .clamp(geo::MIN_ZOOM as i16, geo::MAX_ZOOM as i16) as u8;
        if target == self.zoom {
            return false;
        }
        self.center = geo::zoom_around(self.center, self.zoom, target, offset);
        self.zoom = target;
        true
    }

    /// Back to the located view, or the world view when unlocated.
    pub fn reset(&mut self) {
        match self.overlay {
            Some(overlay) => {
                self.center = overlay.position;
                self.zoom = geo::LOCATED_ZOOM;
            }
            None => {
                self.center = geo::WORLD_CENTER;
                self.zoom = geo::DEFAULT_ZOOM;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_world_view() {
        let view = MapViewport::default();
        assert_eq!(view.center, Location::new(0.0, 0.0));
        assert_eq!(view.zoom, 2);
        assert!(view.overlay.is_none());
    }

    #[test]
    fn test_locate_sets_overlay_and_focus() {
        let mut view = MapViewport::default();
        let here = Location::new(12.97, 77.59);
        view.locate(here, 500.0);
        assert_eq!(view.center, here);
        assert_eq!(view.zoom, 15);
        assert_eq!(
            view.overlay,
            Some(Overlay { position: here, radius_m: 500.0 })
        );
    }

    #[test]
    fn test_zoom_by_clamps() {
        let mut view = MapViewport::default();
        assert!(view.zoom_by(-1, (0.0, 0.0)));
        assert_eq!(view.zoom, 1);
        assert!(!view.zoom_by(-1, (0.0, 0.0)));
        assert_eq!(view.zoom, 1);

        view.zoom = 19;
        assert!(!view.zoom_by(3, (0.0, 0.0)));
        assert_eq!(view.zoom, 19);
    }

    #[test]
    fn test_zoom_by_at_center_keeps_center() {
        let mut view = MapViewport::default();
        view.locate(Location::new(40.0, -74.0), 500.0);
        view.zoom_by(1, (0.0, 0.0));
        assert_eq!(view.zoom, 16);
        assert!((view.center.lat - 40.0).abs() < 1e-9);
        assert!((view.center.lon + 74.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_from_is_relative_to_start() {
        let mut view = MapViewport::default();
        let start = view.center;
        view.drag_from(start, 100.0, 0.0);
        view.drag_from(start, 256.0, 0.0);
        // Only the latest total drag counts
        assert!((view.center.lon + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_returns_to_located_view() {
        let mut view = MapViewport::default();
        let here = Location::new(51.5, -0.12);
        view.locate(here, 500.0);
        view.zoom_by(-5, (200.0, 100.0));
        view.reset();
        assert_eq!(view.center, here);
        assert_eq!(view.zoom, 15);
    }

    #[test]
    fn test_reset_without_location_is_world_view() {
        let mut view = MapViewport::default();
        view.zoom_by(4, (50.0, 50.0));
        view.reset();
        assert_eq!(view, MapViewport::default());
    }
}
