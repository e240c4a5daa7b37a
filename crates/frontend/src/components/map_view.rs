use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use cropmap_shared::geo;
use cropmap_shared::models::Location;

use crate::viewport::MapViewport;

const MAP_CONTAINER_ID: &str = "crop-map-container";

/// Drag threshold in pixels. Movement below this is not a pan.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold, larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

/// Viewport size assumed until the container has been measured.
const FALLBACK_SIZE: (f64, f64) = (1024.0, 768.0);

const MARKER_FILL: &str = "#e02424";
const CIRCLE_STROKE: &str = "green";
const CIRCLE_FILL: &str = "rgba(0, 255, 0, 0.2)";

const ATTRIBUTION: &str = "\u{00a9} OpenStreetMap contributors";

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Offset of a client point from the container's center.
fn offset_from_center(client_x: f64, client_y: f64, rect: &web_sys::DomRect) -> (f64, f64) {
    (
        client_x - rect.left() - rect.width() / 2.0,
        client_y - rect.top() - rect.height() / 2.0,
    )
}

/// Distance between two client-coordinate points (for touch threshold checks).
fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Whole zoom levels covered by a pinch. Each doubling of the finger
/// distance is one level in.
fn pinch_steps(start_distance: f64, distance: f64) -> i8 {
    if start_distance < 1.0 || distance < 1.0 {
        return 0;
    }
    (distance / start_distance)
        .log2()
        .round()
        .clamp(i8::MIN as f64, i8::MAX as f64) as i8
}

// ---------------------------------------------------------------------------
// Render helpers
// ---------------------------------------------------------------------------

/// A tile image ready to place: stable key, source URL and CSS offset.
#[derive(Debug, Clone, PartialEq)]
struct TileImage {
    key: String,
    src: String,
    left: f64,
    top: f64,
}

fn tile_images(view: &MapViewport, tile_url: &str, width: f64, height: f64) -> Vec<TileImage> {
    geo::visible_tiles(view.center, view.zoom, width, height)
        .into_iter()
        .map(|t| TileImage {
            // Wrapped copies of one tile share x, so include the offset
            key: format!("{}/{}/{}@{:.0}", t.zoom, t.x, t.y, t.left),
            src: t.url(tile_url),
            left: t.left,
            top: t.top,
        })
        .collect()
}

/// Build the overlay SVG for the current view: the radius circle first, the
/// position marker on top.
fn build_overlay_svg(view: &MapViewport, width: f64, height: f64) -> String {
    let mut svg = String::with_capacity(512);
    if let Some(overlay) = view.overlay {
        build_radius_circle(&mut svg, view, overlay.position, overlay.radius_m, width, height);
        build_marker(&mut svg, view, overlay.position, width, height);
    }
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" style="position:absolute;top:0;left:0;pointer-events:none;z-index:5;">{svg}</svg>"#
    )
}

fn build_radius_circle(
    svg: &mut String,
    view: &MapViewport,
    position: Location,
    radius_m: f64,
    width: f64,
    height: f64,
) {
    let (cx, cy) = geo::screen_px(position, view.center, view.zoom, width, height);
    let r = geo::meters_to_px(radius_m, position.lat, view.zoom);
    svg.push_str(&format!(
        r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{CIRCLE_FILL}" stroke="{CIRCLE_STROKE}" stroke-width="2"/>"#
    ));
}

fn build_marker(svg: &mut String, view: &MapViewport, position: Location, width: f64, height: f64) {
    let (cx, cy) = geo::screen_px(position, view.center, view.zoom, width, height);
    svg.push_str(&format!(
        r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="7" fill="{MARKER_FILL}" stroke="white" stroke-width="2"/>"#
    ));
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(mut view: Signal<MapViewport>, tile_url: String) -> Element {
    let mut size = use_signal(|| FALLBACK_SIZE);

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_center = use_signal(|| geo::WORLD_CENTER);

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);
    let mut touch_start_center = use_signal(|| geo::WORLD_CENTER);
    let mut is_pinching = use_signal(|| false);
    let mut pinch_start_distance = use_signal(|| 0.0_f64);
    let mut pinch_start_zoom = use_signal(|| geo::DEFAULT_ZOOM);
    let mut pinch_midpoint = use_signal(|| (0.0_f64, 0.0_f64));

    let mut sync_size = move || {
        if let Some(rect) = container_rect() {
            if rect.width() > 0.0 && rect.height() > 0.0 {
                size.set((rect.width(), rect.height()));
            }
        }
    };

    let svg_html = use_memo(move || {
        let (w, h) = *size.read();
        build_overlay_svg(&view.read(), w, h)
    });

    let (width, height) = *size.read();
    let tiles = tile_images(&view.read(), &tile_url, width, height);
    let container_class = if *is_dragging.read() && *did_drag.read() {
        "map-container dragging"
    } else {
        "map-container"
    };

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onmounted: move |_| sync_size(),
            onresize: move |_| sync_size(),

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                if delta_y == 0.0 {
                    return;
                }
                let Some(rect) = container_rect() else { return };
                let client = evt.data().client_coordinates();
                let offset = offset_from_center(client.x, client.y, &rect);
                let steps = if delta_y < 0.0 { 1 } else { -1 };
                view.write().zoom_by(steps, offset);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start.set((client.x, client.y));
                drag_start_center.set(view.read().center);
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let (sx, sy) = *drag_start.read();
                let dx = client.x - sx;
                let dy = client.y - sy;

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let start_center = *drag_start_center.read();
                    view.write().drag_from(start_center, dx, dy);
                }
            },

            onmouseup: move |_| {
                is_dragging.set(false);
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                view.write().reset();
            },

            // --- Touch event handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    let t = &touches[0];
                    touch_start_pos.set(Some((t.client_coordinates().x, t.client_coordinates().y)));
                    touch_did_pan.set(false);
                    touch_start_center.set(view.read().center);
                } else if touches.len() >= 2 {
                    let t0 = &touches[0];
                    let t1 = &touches[1];
                    let p0 = (t0.client_coordinates().x, t0.client_coordinates().y);
                    let p1 = (t1.client_coordinates().x, t1.client_coordinates().y);
                    is_pinching.set(true);
                    pinch_start_distance.set(point_distance(p0, p1));
                    pinch_start_zoom.set(view.read().zoom);
                    pinch_midpoint.set(((p0.0 + p1.0) / 2.0, (p0.1 + p1.1) / 2.0));
                    touch_start_pos.set(None);
                    touch_did_pan.set(true);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();

                if *is_pinching.read() && touches.len() >= 2 {
                    let t0 = &touches[0];
                    let t1 = &touches[1];
                    let p0 = (t0.client_coordinates().x, t0.client_coordinates().y);
                    let p1 = (t1.client_coordinates().x, t1.client_coordinates().y);
                    let steps = pinch_steps(*pinch_start_distance.read(), point_distance(p0, p1));
                    let target = *pinch_start_zoom.read() as i16 + steps as i16;
                    let delta = (target - view.read().zoom as i16).clamp(-127, 127) as i8;
                    if delta == 0 {
                        return;
                    }
                    let Some(rect) = container_rect() else { return };
                    let (mx, my) = *pinch_midpoint.read();
                    let offset = offset_from_center(mx, my, &rect);
                    view.write().zoom_by(delta, offset);
                } else if touches.len() == 1 {
                    let t = &touches[0];
                    let cur = (t.client_coordinates().x, t.client_coordinates().y);
                    if let Some(start) = *touch_start_pos.read() {
                        if !*touch_did_pan.read() && point_distance(start, cur) > TOUCH_DRAG_THRESHOLD {
                            touch_did_pan.set(true);
                        }
                        if *touch_did_pan.read() {
                            let start_center = *touch_start_center.read();
                            view.write().drag_from(start_center, cur.0 - start.0, cur.1 - start.1);
                        }
                    }
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                // Wait for all fingers to lift before resetting
                if evt.data().touches().is_empty() {
                    is_pinching.set(false);
                    touch_start_pos.set(None);
                }
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                touch_start_pos.set(None);
                touch_did_pan.set(false);
                is_pinching.set(false);
            },

            for tile in tiles {
                img {
                    key: "{tile.key}",
                    class: "map-tile",
                    src: "{tile.src}",
                    alt: "",
                    draggable: "false",
                    style: "left: {tile.left}px; top: {tile.top}px;",
                }
            }

            div {
                dangerous_inner_html: "{svg_html}",
                style: "position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;",
            }

            div { class: "map-attribution", "{ATTRIBUTION}" }
        }
    }
}
