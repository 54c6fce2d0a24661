use civic_shared::models::City;

/// Join an API path onto a base origin: `("http://host", "/cities")` -> `http://host/api/cities`.
pub fn build_api_url(base: &str, path: &str) -> String {
    format!("{}/api{}", base.trim_end_matches('/'), path)
}

fn api_base() -> String {
    // Same origin unless a base was baked in at build time.
    if let Some(base) = option_env!("CIVIC_API_BASE") {
        return base.to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Parse the `/api/cities` body. Anything other than an array of cities is an error.
pub fn parse_cities(body: &str) -> Result<Vec<City>, String> {
    serde_json::from_str(body).map_err(|e| e.to_string())
}

/// The dashboard's single network request.
pub async fn fetch_cities() -> Result<Vec<City>, String> {
    let url = build_api_url(&api_base(), "/cities");
    let body = reqwest::get(&url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?
        .text()
        .await
        .map_err(|e| e.to_string())?;
    parse_cities(&body)
}
