use serde::{Deserialize, Serialize};

/// Review state of an audited city. Unrecognised wire values are kept as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CityStatus {
    Published,
    #[default]
    Review,
    Other(String),
}

/// Scores strictly above this are published without review.
pub const PUBLISH_THRESHOLD: u32 = 700;

impl CityStatus {
    pub fn for_score(total_score: u32) -> Self {
        if total_score > PUBLISH_THRESHOLD {
            CityStatus::Published
        } else {
            CityStatus::Review
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CityStatus::Published => "published",
            CityStatus::Review => "review",
            CityStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for CityStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "published" => CityStatus::Published,
            "review" => CityStatus::Review,
            _ => CityStatus::Other(raw),
        }
    }
}

impl From<CityStatus> for String {
    fn from(status: CityStatus) -> Self {
        match status {
            CityStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for CityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audited municipality as served by `/api/cities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub ibge: String,
    pub total_score: u32,
    #[serde(default)]
    pub population: u64,
    pub last_audit: String,
    #[serde(default)]
    pub status: CityStatus,
}

impl City {
    /// Numeric form of the id, if it has one.
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }
}
