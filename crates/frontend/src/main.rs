mod api;
mod components;
mod dashboard;
mod leaflet;
mod pages;

use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
    #[route("/city/:slug")]
    CityView { slug: String },
}

#[component]
fn Home() -> Element {
    rsx! {
        pages::dashboard::DashboardPage { initial_slug: None::<String> }
    }
}

/// Deep link: same dashboard, with `slug` selected once the dataset arrives.
#[component]
fn CityView(slug: String) -> Element {
    rsx! {
        pages::dashboard::DashboardPage { initial_slug: Some(slug) }
    }
}

const CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

#[allow(non_snake_case)]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }
        document::Stylesheet { href: CSS }
        Router::<Route> {}
    }
}

fn main() {
    launch(App);
}
