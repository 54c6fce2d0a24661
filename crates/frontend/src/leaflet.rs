//! Thin bindings to the subset of Leaflet the dashboard uses.
//!
//! Leaflet itself is loaded as a page script (see `Dioxus.toml`); this module
//! only declares the JS surface and builds option objects from serde structs.

use civic_shared::geo::{self, LatLng as GeoPoint};
use civic_shared::score;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

#[wasm_bindgen]
extern "C" {
    #[derive(Debug, Clone)]
    pub type Map;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(element_id: &str, options: &JsValue) -> Result<Map, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, center: &LatLng, zoom: f64);

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &Map, center: &LatLng, zoom: f64, options: &JsValue);

    #[derive(Debug, Clone)]
    pub type Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, map: &Map);

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type TileLayer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str) -> TileLayer;

    #[wasm_bindgen(extends = Layer)]
    #[derive(Debug, Clone)]
    pub type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(center: &LatLng, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = getLatLng)]
    fn get_lat_lng(this: &CircleMarker) -> LatLng;

    #[wasm_bindgen(method)]
    fn on(this: &CircleMarker, event: &str, handler: &js_sys::Function);

    #[derive(Debug, Clone)]
    pub type LatLng;

    #[wasm_bindgen(js_namespace = L, js_name = latLng)]
    fn lat_lng(lat: f64, lng: f64) -> LatLng;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub zoom_control: bool,
    pub attribution_control: bool,
}

impl MapOptions {
    /// Bare map: no zoom buttons, no attribution box.
    pub fn bare() -> Self {
        MapOptions {
            zoom_control: false,
            attribution_control: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarkerOptions {
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl CircleMarkerOptions {
    /// City marker filled with the tier color of `total_score`.
    pub fn for_score(total_score: u32) -> Self {
        CircleMarkerOptions {
            radius: 6.0,
            fill_color: score::score_color(total_score),
            color: "#141418",
            weight: 2.0,
            opacity: 1.0,
            fill_opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyToOptions {
    pub duration: f64,
    pub ease_linearity: f64,
}

impl Default for FlyToOptions {
    fn default() -> Self {
        FlyToOptions {
            duration: 1.5,
            ease_linearity: 0.25,
        }
    }
}

/// Convert a serde value into a plain JS object via JSON.
fn to_js_object<T: Serialize>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::UNDEFINED)
}

/// Whether the Leaflet global `L` has been loaded.
pub fn is_loaded() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("L")).unwrap_or(false)
}

/// Create the map in `element_id`, centered on the region with an OSM tile layer.
pub fn init_map(element_id: &str) -> Result<Map, String> {
    if !is_loaded() {
        return Err("Leaflet is not loaded".to_string());
    }
    let map = create_map(element_id, &to_js_object(&MapOptions::bare()))
        .map_err(|e| format!("{:?}", e))?;
    let center = geo::REGION_CENTER;
    map.set_view(&lat_lng(center.lat, center.lng), geo::INITIAL_ZOOM);
    tile_layer(OSM_TILE_URL).add_to(&map);
    Ok(map)
}

pub fn add_circle_marker(map: &Map, at: GeoPoint, options: &CircleMarkerOptions) -> CircleMarker {
    let marker = circle_marker(&lat_lng(at.lat, at.lng), &to_js_object(options));
    marker.add_to(map);
    marker
}

/// Register a click handler for the lifetime of the page.
pub fn on_click(marker: &CircleMarker, handler: impl FnMut() + 'static) {
    let callback = Closure::<dyn FnMut()>::new(handler);
    marker.on("click", callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Pan and zoom the map onto a marker.
pub fn fly_to_marker(map: &Map, marker: &CircleMarker) {
    map.fly_to(
        &marker.get_lat_lng(),
        geo::FOCUS_ZOOM,
        &to_js_object(&FlyToOptions::default()),
    );
}
