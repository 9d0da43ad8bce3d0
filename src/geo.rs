//! Great-circle geometry backing the proximity gate.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters used by the haversine formula.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in decimal degrees.
///
/// Out-of-range values are accepted as-is and merely produce large or odd
/// distances; client positions are claims, and the submission flow measures
/// them rather than validating them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Result of measuring a claimed position against a quiz point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proximity {
    /// Whether the measured distance falls within the radius (inclusive).
    pub within: bool,
    /// Measured great-circle distance in meters.
    pub distance_m: f64,
}

/// Great-circle distance in meters between two coordinates (haversine).
///
/// Pure function with no error conditions: identical points yield `0.0` and
/// antipodal points yield half the Earth's circumference.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push `h` a hair past 1.0 near the antipode; asin needs [0, 1].
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Measure `position` against `target` and compare with `radius_m`.
///
/// The boundary is inclusive: a submission exactly at the radius passes. The
/// radius comes from the caller's configuration, never from this module.
pub fn proximity(position: Coordinate, target: Coordinate, radius_m: f64) -> Proximity {
    let distance_m = distance_meters(position, target);
    Proximity {
        within: distance_m <= radius_m,
        distance_m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    #[test]
    fn identical_points_have_zero_distance() {
        let p = coord(30.3539, 76.3683);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_meters(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 111_194.93).abs() < 1.0, "got {d}");
    }

    #[test]
    fn known_city_pair_matches_reference_distance() {
        // Paris (Notre-Dame) to London (Westminster), reference ~343.07 km.
        let d = distance_meters(coord(48.8530, 2.3499), coord(51.5007, -0.1246));
        assert!((d - 343_069.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn adjacent_street_positions_measure_in_single_meters() {
        // One ten-thousandth of a degree apart on both axes: ~14.7 m, the kind
        // of offset a player standing next to a quiz point reports.
        let d = distance_meters(coord(30.3539, 76.3683), coord(30.3540, 76.3684));
        assert!((d - 14.687).abs() < 0.01, "got {d}");
    }

    #[test]
    fn distance_is_reported_in_meters_not_kilometers() {
        // 0.0045 degrees of latitude is almost exactly half a kilometer.
        let d = distance_meters(coord(30.3539, 76.3683), coord(30.3584, 76.3683));
        assert!((495.0..506.0).contains(&d), "got {d}");
    }

    #[test]
    fn antipodal_points_yield_half_circumference() {
        let d = distance_meters(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!((d - 20_015_086.8).abs() < 1.0, "got {d}");
    }

    #[test]
    fn out_of_range_latitude_still_produces_a_finite_distance() {
        let d = distance_meters(coord(135.0, 0.0), coord(0.0, 0.0));
        assert!(d.is_finite());
        assert!(d > 0.0);
    }

    #[test]
    fn proximity_boundary_is_inclusive() {
        let a = coord(30.3539, 76.3683);
        let b = coord(30.3540, 76.3684);
        let exact = distance_meters(a, b);

        let at_radius = proximity(a, b, exact);
        assert!(at_radius.within);
        assert_eq!(at_radius.distance_m, exact);

        let just_outside = proximity(a, b, exact - 0.001);
        assert!(!just_outside.within);
    }

    #[test]
    fn proximity_rejects_beyond_radius_and_carries_distance() {
        let check = proximity(coord(30.3539, 76.3683), coord(30.3584, 76.3683), 50.0);
        assert!(!check.within);
        assert!(check.distance_m > 450.0);
    }
}
