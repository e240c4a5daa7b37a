/// Web Mercator math for 256 px raster tiles.
///
/// World pixel space at zoom `z` is a square of `256 * 2^z` pixels with the
/// origin at lon -180 / lat +85.0511 (top-left). Tile `(x, y)` covers world
/// pixels `[x*256, (x+1)*256) x [y*256, (y+1)*256)`.
use crate::models::Location;

pub const TILE_SIZE: f64 = 256.0;

/// Latitude where the Mercator square ends.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// WGS84 equatorial radius, as used by spherical Mercator.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 19;

/// Zoom of the initial world view.
pub const DEFAULT_ZOOM: u8 = 2;

/// Zoom applied once the device position is known.
pub const LOCATED_ZOOM: u8 = 15;

/// Center of the initial world view.
pub const WORLD_CENTER: Location = Location { lat: 0.0, lon: 0.0 };

/// Side length of the world square in pixels at `zoom`.
pub fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(zoom as i32)
}

/// Number of tiles along one axis at `zoom`.
pub fn tile_count(zoom: u8) -> i64 {
    1i64 << zoom
}

/// Wrap a longitude into [-180, 180).
pub fn normalize_lon(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Project a position to world pixels at `zoom`.
pub fn to_world_px(loc: Location, zoom: u8) -> (f64, f64) {
    let size = world_size(zoom);
    let lat = loc.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (loc.lon + 180.0) / 360.0 * size;
    let sin = lat.sin();
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI)) * size;
    (x, y)
}

/// Inverse of [`to_world_px`]. `y` is clamped to the world square.
pub fn from_world_px(x: f64, y: f64, zoom: u8) -> Location {
    let size = world_size(zoom);
    let y = y.clamp(0.0, size);
    let lon = normalize_lon(x / size * 360.0 - 180.0);
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / size;
    let lat = n.sinh().atan().to_degrees();
    Location { lat, lon }
}

/// Ground resolution at `lat`: meters covered by one screen pixel.
pub fn meters_per_px(lat: f64, zoom: u8) -> f64 {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    lat.cos() * 2.0 * std::f64::consts::PI * EARTH_RADIUS_M / world_size(zoom)
}

/// Convert a ground distance at `lat` to a screen distance at `zoom`.
pub fn meters_to_px(meters: f64, lat: f64, zoom: u8) -> f64 {
    meters / meters_per_px(lat, zoom)
}

/// Move the view center by a screen drag of `(dx, dy)` pixels.
/// Dragging right moves the map content right, so the center moves left.
pub fn pan_center(center: Location, zoom: u8, dx: f64, dy: f64) -> Location {
    let (cx, cy) = to_world_px(center, zoom);
    from_world_px(cx - dx, cy - dy, zoom)
}

/// New view center after zooming from `zoom` to `new_zoom` so that the point
/// at `offset` (screen pixels from the viewport center) stays under the cursor.
pub fn zoom_around(center: Location, zoom: u8, new_zoom: u8, offset: (f64, f64)) -> Location {
    let (cx, cy) = to_world_px(center, zoom);
    let anchor = from_world_px(cx + offset.0, cy + offset.1, zoom);
    let (ax, ay) = to_world_px(anchor, new_zoom);
    from_world_px(ax - offset.0, ay - offset.1, new_zoom)
}

/// A tile placed in the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    pub zoom: u8,
    /// Tile column, already wrapped into `[0, 2^zoom)`.
    pub x: i64,
    pub y: i64,
    /// Offset of the tile's top-left corner from the viewport's top-left.
    pub left: f64,
    pub top: f64,
}

impl PlacedTile {
    /// Expand a `{z}/{x}/{y}` URL template.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// Tiles needed to cover a `width` x `height` viewport centered on `center`.
/// Columns repeat across the antimeridian; rows outside the world are skipped.
pub fn visible_tiles(center: Location, zoom: u8, width: f64, height: f64) -> Vec<PlacedTile> {
    if width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }
    let (cx, cy) = to_world_px(center, zoom);
    let origin_x = cx - width / 2.0;
    let origin_y = cy - height / 2.0;
    let n = tile_count(zoom);

    let first_col = (origin_x / TILE_SIZE).floor() as i64;
    let last_col = ((origin_x + width) / TILE_SIZE).ceil() as i64 - 1;
    let first_row = ((origin_y / TILE_SIZE).floor() as i64).max(0);
    let last_row = (((origin_y + height) / TILE_SIZE).ceil() as i64 - 1).min(n - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for col in first_col..=last_col {
            tiles.push(PlacedTile {
                zoom,
                x: col.rem_euclid(n),
                y: row,
                left: col as f64 * TILE_SIZE - origin_x,
                top: row as f64 * TILE_SIZE - origin_y,
            });
        }
    }
    tiles
}

/// Screen position of `loc` relative to the viewport's top-left corner.
pub fn screen_px(loc: Location, center: Location, zoom: u8, width: f64, height: f64) -> (f64, f64) {
    let (cx, cy) = to_world_px(center, zoom);
    let (px, py) = to_world_px(loc, zoom);
    let size = world_size(zoom);
    // Pick the world copy nearest to the center
    let mut dx = px - cx;
    if dx > size / 2.0 {
        dx -= size;
    } else if dx < -size / 2.0 {
        dx += size;
    }
    (width / 2.0 + dx, height / 2.0 + (py - cy))
}
