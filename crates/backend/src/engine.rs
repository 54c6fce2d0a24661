use std::time::Duration;

use chrono::NaiveDate;
use civic_shared::models::{City, CityStatus};
use civic_shared::score;
use serde::Deserialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::EngineError;

pub const DEFAULT_IBGE_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1";

/// IBGE code for the state of São Paulo.
const SAO_PAULO_STATE_CODE: u32 = 35;

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Core municipalities of the Vale do Paraíba metropolitan region (RMVale).
pub const VALE_CITY_NAMES: [&str; 39] = [
    "Aparecida",
    "Arapeí",
    "Areias",
    "Bananal",
    "Caçapava",
    "Cachoeira Paulista",
    "Campos do Jordão",
    "Canas",
    "Caraguatatuba",
    "Cruzeiro",
    "Cunha",
    "Guaratinguetá",
    "Igaratá",
    "Ilhabela",
    "Jacareí",
    "Jambeiro",
    "Lagoinha",
    "Lavrinhas",
    "Lorena",
    "Monteiro Lobato",
    "Natividade da Serra",
    "Paraibuna",
    "Pindamonhangaba",
    "Piquete",
    "Potim",
    "Queluz",
    "Redenção da Serra",
    "Roseira",
    "Santa Branca",
    "Santo Antônio do Pinhal",
    "São Bento do Sapucaí",
    "São José do Barreiro",
    "São José dos Campos",
    "São Luiz do Paraitinga",
    "São Sebastião",
    "Silveiras",
    "Taubaté",
    "Tremembé",
    "Ubatuba",
];

/// A municipality record from the IBGE localities API. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Municipality {
    pub id: u64,
    pub nome: String,
}

/// Strip accents and lowercase: "São José" -> "sao jose".
pub fn normalize_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

pub fn generate_slug(name: &str) -> String {
    normalize_name(name).replace(' ', "-")
}

/// Build the regional city list from the full state municipality list.
///
/// Only municipalities named in [`VALE_CITY_NAMES`] are kept. The result is
/// sorted by score, highest first; ties keep registry order.
pub fn build_regional_cities(municipalities: &[Municipality], audit_date: NaiveDate) -> Vec<City> {
    let wanted: Vec<String> = VALE_CITY_NAMES.iter().map(|n| normalize_name(n)).collect();
    let last_audit = audit_date.format("%Y-%m-%d").to_string();

    let mut cities: Vec<City> = municipalities
        .iter()
        .filter(|m| wanted.contains(&normalize_name(&m.nome)))
        .map(|m| {
            let total_score = score::compliance_score(m.id);
            City {
                id: m.id.to_string(),
                name: m.nome.clone(),
                slug: generate_slug(&m.nome),
                ibge: m.id.to_string(),
                total_score,
                population: 0,
                last_audit: last_audit.clone(),
                status: CityStatus::for_score(total_score),
            }
        })
        .collect();

    cities.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    cities
}

/// Produces the regional dataset from the upstream registry on every call.
pub struct CivicEngine {
    client: reqwest::Client,
    base_url: String,
}

impl CivicEngine {
    pub fn new(base_url: impl Into<String>) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(CivicEngine {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_state_municipalities(&self) -> Result<Vec<Municipality>, EngineError> {
        let url = format!(
            "{}/localidades/estados/{}/municipios",
            self.base_url, SAO_PAULO_STATE_CODE
        );
        let municipalities: Vec<Municipality> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::debug!(count = municipalities.len(), %url, "Fetched state municipalities");
        Ok(municipalities)
    }

    /// Fetch and build today's regional dataset. An empty result is an error.
    pub async fn regional_cities(&self) -> Result<Vec<City>, EngineError> {
        let municipalities = self.fetch_state_municipalities().await?;
        let today = chrono::Local::now().date_naive();
        let cities = build_regional_cities(&municipalities, today);
        if cities.is_empty() {
            return Err(EngineError::NoRegionalData);
        }
        tracing::info!(cities = cities.len(), "Built regional dataset");
        Ok(cities)
    }

    pub async fn find_city(&self, slug: &str) -> Result<Option<City>, EngineError> {
        let cities = self.regional_cities().await?;
        Ok(cities.into_iter().find(|c| c.slug == slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn municipality(id: u64, nome: &str) -> Municipality {
        Municipality {
            id,
            nome: nome.to_string(),
        }
    }

    fn audit_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize_name("São José dos Campos"), "sao jose dos campos");
        assert_eq!(normalize_name("Caçapava"), "cacapava");
        assert_eq!(normalize_name("Arapeí"), "arapei");
        assert_eq!(normalize_name("TAUBATÉ"), "taubate");
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Santo Antônio do Pinhal"), "santo-antonio-do-pinhal");
        assert_eq!(generate_slug("Lorena"), "lorena");
    }

    #[test]
    fn test_every_listed_name_has_distinct_slug() {
        let mut slugs: Vec<String> = VALE_CITY_NAMES.iter().map(|n| generate_slug(n)).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), VALE_CITY_NAMES.len());
    }

    #[test]
    fn test_build_keeps_only_regional_cities() {
        let all = vec![
            municipality(3550308, "São Paulo"),
            municipality(3554102, "Taubaté"),
            municipality(3509502, "Campinas"),
            municipality(3549904, "São José dos Campos"),
        ];
        let cities = build_regional_cities(&all, audit_date());
        let names: Vec<&str> = cities.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(cities.len(), 2);
        assert!(names.contains(&"Taubaté"));
        assert!(names.contains(&"São José dos Campos"));
    }

    #[test]
    fn test_build_matches_names_without_accents() {
        // Registry spellings may differ in accents from the configured list.
        let all = vec![municipality(3554805, "Tremembe")];
        let cities = build_regional_cities(&all, audit_date());
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].slug, "tremembe");
    }

    #[test]
    fn test_build_fills_record_fields() {
        let all = vec![municipality(3554102, "Taubaté")];
        let city = &build_regional_cities(&all, audit_date())[0];
        let expected_score = 650 + (3554102 % 300) as u32;
        assert_eq!(city.id, "3554102");
        assert_eq!(city.ibge, "3554102");
        assert_eq!(city.slug, "taubate");
        assert_eq!(city.total_score, expected_score);
        assert_eq!(city.population, 0);
        assert_eq!(city.last_audit, "2026-10-19");
        assert_eq!(city.status, CityStatus::for_score(expected_score));
    }

    #[test]
    fn test_build_sorts_by_score_descending() {
        // Scores: 650 + id % 300
        let all = vec![
            municipality(300, "Lorena"),  // 650
            municipality(299, "Cunha"),   // 949
            municipality(150, "Canas"),   // 800
            municipality(600, "Potim"),   // 650, tie with Lorena
        ];
        let cities = build_regional_cities(&all, audit_date());
        let order: Vec<&str> = cities.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(order, vec!["cunha", "canas", "lorena", "potim"]);
        assert_eq!(cities[0].status, CityStatus::Published);
        assert_eq!(cities[2].status, CityStatus::Review);
    }

    #[test]
    fn test_build_empty_input() {
        assert!(build_regional_cities(&[], audit_date()).is_empty());
    }

    #[test]
    fn test_engine_trims_trailing_slash() {
        let engine = CivicEngine::new("http://localhost:9999/api/v1/").unwrap();
        assert_eq!(engine.base_url(), "http://localhost:9999/api/v1");
    }

    #[test]
    fn test_municipality_ignores_extra_fields() {
        let json = r#"[{"id":3554102,"nome":"Taubaté","microrregiao":{"id":35051,"nome":"São José dos Campos"}}]"#;
        let parsed: Vec<Municipality> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].id, 3554102);
        assert_eq!(parsed[0].nome, "Taubaté");
    }
}
