//! One-shot device location lookup for issue reports.
//!
//! A location is a nicety: denial, timeout and missing API support all come
//! back as `None` and never block the report.

#[cfg(test)]
#[path = "geolocation_test.rs"]
mod geolocation_test;

use crate::net::types::GeoPoint;

/// Current position, or `None` when unavailable.
pub async fn current_position() -> Option<GeoPoint> {
    #[cfg(feature = "csr")]
    {
        browser_position().await
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

#[cfg(feature = "csr")]
async fn browser_position() -> Option<GeoPoint> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;

    let geolocation = web_sys::window()?.navigator().geolocation().ok()?;
    let (tx, rx) = oneshot::channel::<Option<GeoPoint>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let deliver = |sender: &Rc<RefCell<Option<oneshot::Sender<Option<GeoPoint>>>>>, point: Option<GeoPoint>| {
        let Some(tx) = sender.borrow_mut().take() else {
            return;
        };
        if tx.send(point).is_err() {
            log::debug!("geolocation answered after the lookup was dropped");
        }
    };

    let success_sender = Rc::clone(&sender);
    let on_success = Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
        deliver(&success_sender, read_position(&position));
    });
    let error_sender = Rc::clone(&sender);
    let on_error = Closure::<dyn FnMut(JsValue)>::new(move |_err: JsValue| {
        log::info!("geolocation unavailable; reporting without location");
        deliver(&error_sender, None);
    });

    if let Err(err) = geolocation.get_current_position_with_error_callback(
        on_success.as_ref().unchecked_ref(),
        Some(on_error.as_ref().unchecked_ref()),
    ) {
        log::warn!("geolocation request rejected: {err:?}");
        return None;
    }

    // A cancelled sender means neither callback fired.
    let position = rx.await.unwrap_or_default();
    drop(on_success);
    drop(on_error);
    position
}

#[cfg(feature = "csr")]
fn read_position(position: &wasm_bindgen::JsValue) -> Option<GeoPoint> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(GeoPoint { lat, lng })
}
