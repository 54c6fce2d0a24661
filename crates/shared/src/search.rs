use crate::models::City;

/// Case-insensitive substring match on name or slug. `needle` must already be lowercase.
fn matches_lowercase(city: &City, needle: &str) -> bool {
    city.name.to_lowercase().contains(needle) || city.slug.to_lowercase().contains(needle)
}

/// Cities matching `query`, in their original order. An empty query keeps every city.
pub fn filter_cities<'a>(cities: &'a [City], query: &str) -> Vec<&'a City> {
    let needle = query.to_lowercase();
    cities
        .iter()
        .filter(|c| matches_lowercase(c, &needle))
        .collect()
}
