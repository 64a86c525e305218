//! Fail-fast validation for query inputs.
//!
//! The core never clamps or normalizes coordinates: finite out-of-range
//! values are the caller's bug and produce garbage-in/garbage-out results
//! (documented on the affected operations). What the core does reject is
//! input no computation can make sense of: NaN or infinite coordinates,
//! zero precision, and negative radii.
//!
//! [`validate_geographic_point`] performs the full range check and exists
//! for the HTTP/persistence layers sitting above this crate, which own
//! coordinate-range validation.

use crate::error::{GeonearError, Result};
use geo::Point;

/// Validates that a lat/lon pair is finite (NaN and infinities rejected).
pub fn validate_finite_coords(lat: f64, lon: f64) -> Result<()> {
    if !lat.is_finite() {
        return Err(GeonearError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lon.is_finite() {
        return Err(GeonearError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    Ok(())
}

/// Validates that a planar x/y pair is finite (NaN and infinities
/// rejected).
pub fn validate_finite_xy(x: f64, y: f64) -> Result<()> {
    if !x.is_finite() {
        return Err(GeonearError::InvalidInput(format!(
            "x coordinate must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(GeonearError::InvalidInput(format!(
            "y coordinate must be finite, got: {}",
            y
        )));
    }

    Ok(())
}

/// Validates a search radius: finite and non-negative.
pub fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(GeonearError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius
        )));
    }

    if radius < 0.0 {
        return Err(GeonearError::InvalidInput(format!(
            "Radius must be non-negative, got: {}",
            radius
        )));
    }

    Ok(())
}

/// Validates a geohash precision: at least one symbol.
pub fn validate_precision(precision: usize) -> Result<()> {
    if precision == 0 {
        return Err(GeonearError::InvalidInput(
            "Geohash precision must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates that a point has in-range longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use geonear::validation::validate_geographic_point;
/// use geo::Point;
///
/// // Valid point
/// let nyc = Point::new(-74.0060, 40.7128);
/// assert!(validate_geographic_point(&nyc).is_ok());
///
/// // Invalid longitude
/// let invalid = Point::new(200.0, 40.0);
/// assert!(validate_geographic_point(&invalid).is_err());
///
/// // Invalid latitude
/// let invalid = Point::new(-74.0, 95.0);
/// assert!(validate_geographic_point(&invalid).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    validate_finite_coords(y, x)?;

    if !(-180.0..=180.0).contains(&x) {
        return Err(GeonearError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(GeonearError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}
