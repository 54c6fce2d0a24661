use civic_shared::models::City;
use civic_shared::score;
use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

/// Delay between consecutive rows fading in.
const REVEAL_STAGGER_MS: u32 = 40;

fn reveal_delay_ms(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or(u32::MAX)
        .saturating_mul(REVEAL_STAGGER_MS)
}

#[component]
pub fn CityList(
    cities: Vec<City>,
    query: String,
    placeholder: Option<&'static str>,
    on_search: EventHandler<String>,
    on_select: EventHandler<City>,
) -> Element {
    let count = cities.len();

    rsx! {
        div { class: "sidebar",
            div { class: "search-box",
                input {
                    id: "citySearch",
                    r#type: "search",
                    placeholder: "SEARCH MUNICIPALITY...",
                    "aria-label": "Search cities",
                    value: "{query}",
                    oninput: move |evt: Event<FormData>| on_search.call(evt.value()),
                }
            }
            div { class: "list-header",
                span { "MUNICIPALITIES" }
                span { id: "cityCount", class: "count", "{count}" }
            }
            div { id: "cityList", class: "city-list",
                if let Some(text) = placeholder {
                    div { class: "list-placeholder", "{text}" }
                }
                for (index, city) in cities.iter().enumerate() {
                    CityRow {
                        key: "{index}-{city.slug}",
                        city: city.clone(),
                        index,
                        on_select,
                    }
                }
            }
        }
    }
}

#[component]
fn CityRow(city: City, index: usize, on_select: EventHandler<City>) -> Element {
    let mut revealed = use_signal(|| false);

    use_future(move || async move {
        TimeoutFuture::new(reveal_delay_ms(index)).await;
        revealed.set(true);
    });

    let color = score::score_color(city.total_score);
    let class = if *revealed.read() {
        "city-item revealed"
    } else {
        "city-item"
    };
    let clicked = city.clone();

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| on_select.call(clicked.clone()),
            div { class: "city-info",
                h3 { "{city.name.to_uppercase()}" }
                p { "ID: {city.id} | AUDIT: {city.last_audit}" }
            }
            div { class: "city-score",
                div { class: "score-value", style: "color: {color}", "{city.total_score}" }
                div { class: "score-rank", "SCORE" }
            }
        }
    }
}
