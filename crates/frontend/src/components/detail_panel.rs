use civic_shared::models::City;
use civic_shared::score;
use dioxus::prelude::*;

const DATA_SOURCE: &str = "IBGE/TCESP PROXY";

#[component]
pub fn DetailPanel(city: Option<City>, on_close: EventHandler<()>) -> Element {
    let Some(city) = city else {
        return rsx! {
            div { id: "cityDetail", class: "city-detail hidden" }
        };
    };

    let color = score::score_color(city.total_score);
    let metrics = score::breakdown(city.total_score);

    rsx! {
        div { id: "cityDetail", class: "city-detail",
            div { class: "detail-header",
                h2 { "{city.name.to_uppercase()}" }
                button {
                    class: "close-btn",
                    "aria-label": "Close detail",
                    onclick: move |_| on_close.call(()),
                    "\u{00d7}"
                }
            }
            div { class: "detail-body",
                div { class: "score-hero",
                    div { class: "label", "COMPLIANCE SCORE" }
                    div { class: "large-score", style: "color: {color}", "{city.total_score}" }
                    div { class: "status-tag", style: "border-color: {color}",
                        "{city.status.as_str().to_uppercase()}"
                    }
                }
                div { class: "metrics-grid",
                    for metric in metrics {
                        div { class: "metric-card",
                            span { class: "label", "{metric.label}" }
                            span { class: "value", "{metric.value}/{metric.max}" }
                        }
                    }
                }
                div { class: "audit-info",
                    p { "LAST UPDATED: {city.last_audit}" }
                    p { "DATA SOURCE: {DATA_SOURCE}" }
                }
            }
        }
    }
}
