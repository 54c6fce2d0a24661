use std::collections::HashMap;

use civic_shared::geo::{self, LatLng};
use civic_shared::models::City;
use dioxus::prelude::*;

use crate::leaflet::{self, CircleMarkerOptions};

pub const MAP_CONTAINER_ID: &str = "map";

/// Container Leaflet renders into. The map itself is created once the element is mounted.
#[component]
pub fn MapView() -> Element {
    rsx! {
        div { id: MAP_CONTAINER_ID, class: "map-container" }
    }
}

/// Where a city's marker goes.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerTarget {
    pub city: City,
    pub position: LatLng,
}

/// One target per city with a numeric id. Cities without one have no position.
pub fn marker_targets(cities: &[City]) -> Vec<MarkerTarget> {
    cities
        .iter()
        .filter_map(|city| {
            let Some(seed) = city.numeric_id() else {
                tracing::warn!(slug = %city.slug, id = %city.id, "Skipping marker for non-numeric id");
                return None;
            };
            Some(MarkerTarget {
                city: city.clone(),
                position: geo::synthetic_position(seed),
            })
        })
        .collect()
}

/// The marker to focus when `city` is selected, if it has one.
pub fn marker_for<'a, M>(markers: &'a HashMap<String, M>, city: &City) -> Option<&'a M> {
    markers.get(&city.slug)
}

/// Place one marker per target and return them keyed by slug.
pub fn add_map_markers(
    map: &leaflet::Map,
    cities: &[City],
    on_select: impl Fn(City) + Clone + 'static,
) -> HashMap<String, leaflet::CircleMarker> {
    let targets = marker_targets(cities);
    let mut markers = HashMap::with_capacity(targets.len());
    for MarkerTarget { city, position } in targets {
        let marker = leaflet::add_circle_marker(
            map,
            position,
            &CircleMarkerOptions::for_score(city.total_score),
        );
        let slug = city.slug.clone();
        let on_select = on_select.clone();
        leaflet::on_click(&marker, move || on_select(city.clone()));
        markers.insert(slug, marker);
    }
    markers
}
