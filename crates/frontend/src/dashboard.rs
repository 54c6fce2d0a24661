//! Dashboard state: the loaded city set, the search view derived from it, the
//! selection, and the status line. Pure data, no DOM or map access.

use civic_shared::geo;
use civic_shared::models::{City, CityStatus};
use civic_shared::search;

pub const FETCHING_MESSAGE: &str = "FETCHING REGIONAL DATASET...";
pub const LOAD_FAILED_MESSAGE: &str = "CRITICAL ERROR: FAILED TO FETCH API DATA";

const AWAITING_PLACEHOLDER: &str = "AWAITING DATASET...";
const UNAVAILABLE_PLACEHOLDER: &str = "DATASET UNAVAILABLE";

pub fn map_ready_message() -> String {
    format!(
        "MAP ENGINE INITIALIZED at {}",
        geo::format_lat_lng(geo::REGION_CENTER)
    )
}

pub fn loaded_message(count: usize) -> String {
    format!("DATASET LOADED: {} NODES IDENTIFIED", count)
}

pub fn search_message(count: usize) -> String {
    format!("SEARCH: {} RESULTS FOUND", count)
}

pub fn select_message(city: &City) -> String {
    format!(
        "SELECT NODE: {} | SCORE: {}",
        city.name.to_uppercase(),
        city.total_score
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    cities: Vec<City>,
    visible: Vec<City>,
    query: String,
    status: String,
    selected: Option<City>,
    load_state: LoadState,
}

impl Dashboard {
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Rows currently shown in the list.
    pub fn visible(&self) -> &[City] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected(&self) -> Option<&City> {
        self.selected.as_ref()
    }

    /// Text shown in place of the list while there is nothing to list yet.
    pub fn list_placeholder(&self) -> Option<&'static str> {
        match self.load_state {
            LoadState::Idle | LoadState::Loading => Some(AWAITING_PLACEHOLDER),
            LoadState::Failed => Some(UNAVAILABLE_PLACEHOLDER),
            LoadState::Loaded => None,
        }
    }

    pub fn map_ready(&mut self) {
        self.status = map_ready_message();
    }

    pub fn begin_load(&mut self) {
        self.load_state = LoadState::Loading;
        self.status = FETCHING_MESSAGE.to_string();
    }

    /// Store the fetched set, or report the failure. Failures leave the list empty.
    ///
    /// A query typed while the request was in flight is applied to the new set,
    /// so the list already matches the search box. The status still reports
    /// the full dataset size.
    pub fn finish_load(&mut self, result: Result<Vec<City>, String>) {
        match result {
            Ok(cities) => {
                self.status = loaded_message(cities.len());
                self.cities = cities;
                self.visible = self.matching(&self.query);
                self.load_state = LoadState::Loaded;
            }
            Err(_) => {
                self.status = LOAD_FAILED_MESSAGE.to_string();
                self.load_state = LoadState::Failed;
            }
        }
    }

    /// Re-derive the visible rows from the full set. Markers are not affected.
    pub fn filter(&mut self, query: &str) {
        self.query = query.to_string();
        self.visible = self.matching(query);
        self.status = search_message(self.visible.len());
    }

    fn matching(&self, query: &str) -> Vec<City> {
        search::filter_cities(&self.cities, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Open the detail panel for the clicked city.
    pub fn select(&mut self, city: City) -> &City {
        self.status = select_message(&city);
        self.selected.insert(city)
    }

    /// Deep-link selection: the first loaded city with `slug`. Unknown slugs change nothing.
    pub fn select_slug(&mut self, slug: &str) -> Option<&City> {
        let city = self.cities.iter().find(|c| c.slug == slug)?.clone();
        Some(self.select(city))
    }

    pub fn hide_detail(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: &str, name: &str, slug: &str, score: u32) -> City {
        City {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            ibge: id.to_string(),
            total_score: score,
            population: 0,
            last_audit: "2026-10-19".to_string(),
            status: CityStatus::Published,
        }
    }

    fn loaded() -> Dashboard {
        let mut d = Dashboard::default();
        d.begin_load();
        d.finish_load(Ok(vec![
            city("3549904", "São José dos Campos", "sao-jose-dos-campos", 854),
            city("3554102", "Taubaté", "taubate", 752),
            city("3554805", "Tremembé", "tremembe", 655),
        ]));
        d
    }

    #[test]
    fn test_map_ready_message() {
        assert_eq!(map_ready_message(), "MAP ENGINE INITIALIZED at 23.02S, 45.55W");
    }

    #[test]
    fn test_begin_load_reports_fetching() {
        let mut d = Dashboard::default();
        d.begin_load();
        assert_eq!(d.status(), FETCHING_MESSAGE);
        assert_eq!(d.load_state, LoadState::Loading);
        assert_eq!(d.list_placeholder(), Some("AWAITING DATASET..."));
    }

    #[test]
    fn test_load_success_shows_everything() {
        let d = loaded();
        assert_eq!(d.status(), "DATASET LOADED: 3 NODES IDENTIFIED");
        assert_eq!(d.visible().len(), 3);
        assert_eq!(d.cities(), d.visible());
        assert_eq!(d.list_placeholder(), None);
    }

    #[test]
    fn test_load_failure_reports_fixed_message() {
        let mut d = Dashboard::default();
        d.begin_load();
        d.finish_load(Err("error decoding response body".to_string()));
        assert_eq!(d.status(), LOAD_FAILED_MESSAGE);
        assert!(d.visible().is_empty());
        assert_eq!(d.list_placeholder(), Some("DATASET UNAVAILABLE"));
    }

    #[test]
    fn test_search_tau_reports_count() {
        let mut d = loaded();
        d.filter("tau");
        assert_eq!(d.visible().len(), 1);
        assert_eq!(d.visible()[0].slug, "taubate");
        assert_eq!(d.status(), "SEARCH: 1 RESULTS FOUND");
        assert_eq!(d.query(), "tau");
    }

    #[test]
    fn test_empty_search_restores_full_list() {
        let mut d = loaded();
        d.filter("tre");
        assert_eq!(d.visible().len(), 1);
        d.filter("");
        assert_eq!(d.visible(), d.cities());
        assert_eq!(d.status(), "SEARCH: 3 RESULTS FOUND");
    }

    #[test]
    fn test_search_never_mutates_source() {
        let mut d = loaded();
        let before = d.cities().to_vec();
        d.filter("xyz");
        assert!(d.visible().is_empty());
        assert_eq!(d.cities(), before.as_slice());
    }

    #[test]
    fn test_query_typed_before_load_is_applied() {
        let mut d = Dashboard::default();
        d.filter("campos");
        d.finish_load(Ok(vec![
            city("1", "Campos do Jordão", "campos-do-jordao", 700),
            city("2", "Lorena", "lorena", 640),
        ]));
        assert_eq!(d.visible().len(), 1);
    }

    #[test]
    fn test_default_dashboard_awaits_data() {
        let d = Dashboard::default();
        assert_eq!(d.list_placeholder(), Some("AWAITING DATASET..."));
    }

    #[test]
    fn test_empty_dataset_has_no_placeholder() {
        let mut d = Dashboard::default();
        d.finish_load(Ok(Vec::new()));
        assert_eq!(d.status(), "DATASET LOADED: 0 NODES IDENTIFIED");
        assert_eq!(d.list_placeholder(), None);
    }

    #[test]
    fn test_select_opens_detail() {
        let mut d = loaded();
        let row = d.visible()[1].clone();
        assert_eq!(d.select(row).name, "Taubaté");
        assert_eq!(d.selected().unwrap().slug, "taubate");
        assert_eq!(d.status(), "SELECT NODE: TAUBATÉ | SCORE: 752");
    }

    #[test]
    fn test_select_shows_clicked_city_when_slugs_collide() {
        let mut d = Dashboard::default();
        d.finish_load(Ok(vec![
            city("1", "Alpha", "dup", 810),
            city("2", "Beta", "dup", 640),
        ]));
        let clicked = d.visible()[1].clone();
        d.select(clicked);
        assert_eq!(d.selected().map(|c| c.name.as_str()), Some("Beta"));
        assert_eq!(d.status(), "SELECT NODE: BETA | SCORE: 640");
    }

    #[test]
    fn test_select_works_for_filtered_out_city() {
        // Markers stay on the map while the list is filtered.
        let mut d = loaded();
        d.filter("tau");
        assert!(d.select_slug("tremembe").is_some());
    }

    #[test]
    fn test_select_slug_picks_first_match() {
        let mut d = loaded();
        let name = d.select_slug("sao-jose-dos-campos").map(|c| c.name.clone());
        assert_eq!(name.as_deref(), Some("São José dos Campos"));
    }

    #[test]
    fn test_select_unknown_slug_is_noop() {
        let mut d = loaded();
        let status = d.status().to_string();
        assert!(d.select_slug("campinas").is_none());
        assert!(d.selected().is_none());
        assert_eq!(d.status(), status);
    }

    #[test]
    fn test_hide_detail() {
        let mut d = loaded();
        d.select_slug("tremembe");
        d.hide_detail();
        assert!(d.selected().is_none());
    }
}
