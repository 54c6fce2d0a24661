//! Map geometry for the regional dashboard.
//!
//! Marker positions are synthesized from the numeric city id, spread on a
//! circle around the region center. They are not real coordinates.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Taubaté, the center of the audited region.
pub const REGION_CENTER: LatLng = LatLng {
    lat: -23.0204,
    lng: -45.5540,
};

pub const INITIAL_ZOOM: f64 = 9.0;
pub const FOCUS_ZOOM: f64 = 11.0;

// Circle the synthetic markers are spread on.
const SPREAD_CENTER: LatLng = LatLng {
    lat: -23.02,
    lng: -45.55,
};
const SPREAD_RADIUS_DEG: f64 = 0.4;
const SPREAD_ANGLE_STEP: f64 = 0.1;

/// Deterministic placeholder position for a city id.
pub fn synthetic_position(seed: i64) -> LatLng {
    let angle = seed as f64 * SPREAD_ANGLE_STEP;
    LatLng {
        lat: SPREAD_CENTER.lat + angle.sin() * SPREAD_RADIUS_DEG,
        lng: SPREAD_CENTER.lng + angle.cos() * SPREAD_RADIUS_DEG,
    }
}

/// Human-readable hemisphere form, e.g. `23.02S, 45.55W`.
pub fn format_lat_lng(pos: LatLng) -> String {
    let ns = if pos.lat < 0.0 { 'S' } else { 'N' };
    let ew = if pos.lng < 0.0 { 'W' } else { 'E' };
    format!("{:.2}{}, {:.2}{}", pos.lat.abs(), ns, pos.lng.abs(), ew)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_zero_sits_east_of_center() {
        let p = synthetic_position(0);
        assert!((p.lat - -23.02).abs() < 1e-12);
        assert!((p.lng - (-45.55 + 0.4)).abs() < 1e-12);
    }

    #[test]
    fn test_positions_stay_on_spread_circle() {
        for seed in [1, 17, 3502507, 3554102, -42] {
            let p = synthetic_position(seed);
            let dlat = p.lat - SPREAD_CENTER.lat;
            let dlng = p.lng - SPREAD_CENTER.lng;
            let r = (dlat * dlat + dlng * dlng).sqrt();
            assert!((r - SPREAD_RADIUS_DEG).abs() < 1e-9, "seed {seed} radius {r}");
        }
    }

    #[test]
    fn test_positions_are_deterministic() {
        assert_eq!(synthetic_position(3554102), synthetic_position(3554102));
        assert_ne!(synthetic_position(3554102), synthetic_position(3554103));
    }

    #[test]
    fn test_format_region_center() {
        assert_eq!(format_lat_lng(REGION_CENTER), "23.02S, 45.55W");
    }

    #[test]
    fn test_format_northern_eastern() {
        let p = LatLng { lat: 51.5074, lng: 0.1278 };
        assert_eq!(format_lat_lng(p), "51.51N, 0.13E");
    }
}
