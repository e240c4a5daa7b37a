use std::future::Future;

use cropmap_shared::models::Location;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("geolocation is not available in this browser")]
    Unsupported,
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("{0}")]
    Other(String),
}

impl GeoError {
    /// Map a `PositionError.code` to a variant.
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            1 => GeoError::PermissionDenied(message),
            2 => GeoError::Unavailable(message),
            3 => GeoError::Timeout(message),
            _ => GeoError::Other(message),
        }
    }

    fn from_js(value: &JsValue) -> Self {
        match value.dyn_ref::<web_sys::PositionError>() {
            Some(err) => GeoError::from_code(err.code(), err.message()),
            None => GeoError::Other(format!("{:?}", value)),
        }
    }
}

/// Start a one-shot position request and return its promise.
fn start_request() -> Result<js_sys::Promise, GeoError> {
    let geolocation = web_sys::window()
        .ok_or(GeoError::Unsupported)?
        .navigator()
        .geolocation()
        .map_err(|_| GeoError::Unsupported)?;

    Ok(js_sys::Promise::new(&mut |resolve, reject| {
        if let Err(e) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    }))
}

fn to_location(position: &web_sys::Position) -> Location {
    let coords = position.coords();
    Location::new(coords.latitude(), coords.longitude())
}

/// Ask the browser for the device position once.
///
/// The request (and the permission prompt) starts when this is called, not
/// when the returned future is first polled.
pub fn current_position() -> impl Future<Output = Result<Location, GeoError>> {
    let started = start_request();
    async move {
        let value = JsFuture::from(started?)
            .await
            .map_err(|e| GeoError::from_js(&e))?;
        Ok(to_location(value.unchecked_ref::<web_sys::Position>()))
    }
}
