use std::collections::HashMap;
use std::rc::Rc;

use civic_shared::models::City;
use dioxus::prelude::*;
use futures_util::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::city_list::CityList;
use crate::components::detail_panel::DetailPanel;
use crate::components::map_view::{add_map_markers, marker_for, MapView, MAP_CONTAINER_ID};
use crate::dashboard::Dashboard;
use crate::leaflet;

/// Events raised from outside the component tree (Leaflet callbacks, window keys).
#[derive(Debug, Clone, PartialEq)]
enum DashboardEvent {
    Select(City),
    HideDetail,
}

/// Signals shared by every dashboard operation. All fields are `Copy` handles.
#[derive(Clone, Copy)]
struct DashboardHandles {
    state: Signal<Dashboard>,
    map: Signal<Option<leaflet::Map>>,
    markers: Signal<HashMap<String, leaflet::CircleMarker>>,
}

impl DashboardHandles {
    /// Open the detail panel and fly to the city's marker when it has one.
    fn select_city(&mut self, city: City) {
        let selected = self.state.write().select(city).clone();
        self.focus(&selected);
    }

    fn focus(&self, city: &City) {
        let map = self.map.read();
        let markers = self.markers.read();
        if let (Some(map), Some(marker)) = ((*map).as_ref(), marker_for(&*markers, city)) {
            leaflet::fly_to_marker(map, marker);
        }
    }

    fn hide_detail(&mut self) {
        self.state.write().hide_detail();
    }

    /// Fetch the dataset once, then render markers. No retry on failure.
    async fn load_data(mut self, events: Coroutine<DashboardEvent>, initial_slug: Option<String>) {
        self.state.write().begin_load();
        let result = api::fetch_cities().await;
        if let Err(e) = &result {
            tracing::error!("Fetch error: {}", e);
        }
        self.state.write().finish_load(result);

        let cities = self.state.read().cities().to_vec();
        let map = self.map.read().clone();
        if let Some(map) = map {
            let tx = events.tx();
            let placed = add_map_markers(&map, &cities, move |city| {
                let _ = tx.unbounded_send(DashboardEvent::Select(city));
            });
            self.markers.set(placed);
        }

        if let Some(slug) = initial_slug {
            let selected = self.state.write().select_slug(&slug).cloned();
            if let Some(city) = selected {
                self.focus(&city);
            }
        }
    }
}

fn is_close_key(key: &str) -> bool {
    key == "Escape"
}

/// Window `keydown` listener that hides the detail panel. Removed again on drop.
struct EscapeListener {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl EscapeListener {
    fn register(events: Coroutine<DashboardEvent>) -> Option<Self> {
        let window = web_sys::window()?;
        let tx = events.tx();
        let callback = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |evt: web_sys::KeyboardEvent| {
                if is_close_key(&evt.key()) {
                    let _ = tx.unbounded_send(DashboardEvent::HideDetail);
                }
            },
        );
        if let Err(e) =
            window.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())
        {
            tracing::warn!("Could not register key listener: {:?}", e);
            return None;
        }
        Some(EscapeListener { window, callback })
    }
}

impl Drop for EscapeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref());
    }
}

#[component]
pub fn DashboardPage(initial_slug: Option<String>) -> Element {
    let mut handles = DashboardHandles {
        state: use_signal(Dashboard::default),
        map: use_signal(|| None::<leaflet::Map>),
        markers: use_signal(HashMap::new),
    };

    let events = use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| async move {
        while let Some(event) = rx.next().await {
            match event {
                DashboardEvent::Select(city) => handles.select_city(city),
                DashboardEvent::HideDetail => handles.hide_detail(),
            }
        }
    });

    // Held for the lifetime of the page; dropping it unregisters the listener.
    use_hook(move || Rc::new(EscapeListener::register(events)));

    // Runs once after mount: the map container exists by now.
    use_effect(move || {
        match leaflet::init_map(MAP_CONTAINER_ID) {
            Ok(map) => {
                handles.map.set(Some(map));
                handles.state.write().map_ready();
            }
            Err(e) => tracing::warn!("Map disabled: {}", e),
        }
        spawn(handles.load_data(events, initial_slug.clone()));
    });

    let state = handles.state.read();
    let visible = state.visible().to_vec();
    let query = state.query().to_string();
    let status = state.status().to_string();
    let selected = state.selected().cloned();
    let placeholder = state.list_placeholder();
    drop(state);

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "CIVIC AUDITOR ", span { class: "accent", "LITE" } }
                span { class: "region", "VALE DO PARA\u{00cd}BA" }
            }

            CityList {
                cities: visible,
                query,
                placeholder,
                on_search: move |q: String| handles.state.write().filter(&q),
                on_select: move |city: City| handles.select_city(city),
            }

            div { class: "map-panel",
                MapView {}
                DetailPanel {
                    city: selected,
                    on_close: move |_| handles.hide_detail(),
                }
            }

            div { class: "terminal",
                span { class: "prompt", ">" }
                span { id: "terminalMsg", "{status}" }
            }
        }
    }
}
