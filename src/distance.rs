//! Distance functions used to refine candidate sets into exact results.
//!
//! Both indexes produce coarse candidate sets; the functions here perform
//! the exact-distance refinement. Geographic (lon/lat) coordinates use the
//! haversine great-circle distance; projected planar coordinates use
//! Euclidean distance. Which one applies is an explicit choice at each
//! component boundary via [`DistanceMetric`], never hard-coded.

use geo::Point;

/// Earth radius in meters for haversine distance calculations.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Distance metrics for spatial calculations.
///
/// - **Haversine**: spherical great-circle distance, for lon/lat
///   coordinates; result in meters.
/// - **Euclidean**: planar distance, only for projected coordinates;
///   result in the coordinates' units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Haversine formula - assumes a spherical Earth, accurate enough for
    /// proximity search
    #[default]
    Haversine,
    /// Euclidean distance - for planar/projected coordinates only
    Euclidean,
}

/// Calculate the distance between two points using the specified metric.
///
/// Points follow the crate convention: `x` = longitude, `y` = latitude
/// for geographic coordinates.
///
/// # Examples
///
/// ```rust
/// use geo::Point;
/// use geonear::distance::{DistanceMetric, distance_between};
///
/// let nyc = Point::new(-74.0060, 40.7128);
/// let la = Point::new(-118.2437, 34.0522);
///
/// let dist = distance_between(&nyc, &la, DistanceMetric::Haversine);
/// assert!(dist > 3_900_000.0); // ~3,936 km
/// ```
pub fn distance_between(point1: &Point, point2: &Point, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => haversine(point1.y(), point1.x(), point2.y(), point2.x()),
        DistanceMetric::Euclidean => euclidean(point1.x(), point1.y(), point2.x(), point2.y()),
    }
}

/// Great-circle distance between two lat/lon pairs, in meters.
///
/// Uses the haversine half-angle form (`2 * atan2(sqrt(a), sqrt(1 - a))`)
/// rather than the spherical law of cosines, which keeps the result
/// numerically stable for antipodal and near-zero distances.
///
/// # Examples
///
/// ```rust
/// use geonear::distance::haversine;
///
/// // Same point
/// assert_eq!(haversine(40.7128, -74.0060, 40.7128, -74.0060), 0.0);
/// ```
#[inline]
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Planar Euclidean distance between two points, in coordinate units.
#[inline]
pub fn euclidean(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x2 - x1).hypot(y2 - y1)
}
