//! Geohash codec: bit-interleaved base-32 spatial keys.
//!
//! A geohash encodes a lat/lon pair by bisecting the longitude and
//! latitude ranges alternately (longitude first) and packing the
//! resulting bits, five at a time, into base-32 symbols. Two points
//! sharing an N-character prefix lie in the same or an adjacent cell at
//! that precision level. Points near a cell boundary may share no prefix
//! despite being geographically close; that artifact belongs to the
//! encoding itself and is handled at the index layer (see
//! [`BucketIndex::query_near`](crate::BucketIndex::query_near)).

use crate::error::{GeonearError, Result};
use crate::validation::{validate_finite_coords, validate_precision};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The 32-symbol geohash alphabet: digits and lowercase letters
/// excluding `a`, `i`, `l`, `o`.
pub const BASE32_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Bit weights of the five bits packed into one base-32 symbol, in
/// emission order.
const BIT_WEIGHTS: [u8; 5] = [16, 8, 4, 2, 1];

/// Reverse lookup: byte value of a base-32 symbol to its 5-bit value,
/// -1 for bytes outside the alphabet.
static BASE32_INDEX: Lazy<[i8; 256]> = Lazy::new(|| {
    let mut table = [-1i8; 256];
    for (value, &symbol) in BASE32_ALPHABET.iter().enumerate() {
        table[symbol as usize] = value as i8;
    }
    table
});

/// A decoded geohash: the bounding cell's midpoint and half extents.
///
/// The midpoint is the best-estimate coordinate; `lat_error` and
/// `lon_error` bound the true position (the encoded point lies within
/// `midpoint ± error` on each axis).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecodedHash {
    /// Latitude of the cell midpoint.
    pub lat: f64,
    /// Longitude of the cell midpoint.
    pub lon: f64,
    /// Half-height of the cell, in degrees of latitude.
    pub lat_error: f64,
    /// Half-width of the cell, in degrees of longitude.
    pub lon_error: f64,
}

/// Encode a lat/lon pair into a geohash of `precision` symbols.
///
/// Deterministic and pure: the same inputs always produce the same
/// string, and `encode(lat, lon, n)` is a prefix of
/// `encode(lat, lon, n + 1)`.
///
/// Coordinates must be finite and `precision` at least 1; both are
/// checked. Finite coordinates outside [-90, 90] / [-180, 180] are *not*
/// rejected: the bisection simply saturates and the resulting hash is
/// garbage-in/garbage-out. Range validation belongs to the caller (see
/// [`crate::validation::validate_geographic_point`]).
///
/// Precision has no enforced upper bound, but double-precision midpoint
/// arithmetic stops refining usefully beyond ~12 symbols.
///
/// # Examples
///
/// ```rust
/// use geonear::geohash::encode;
///
/// let hash = encode(48.8584, 2.2945, 6).unwrap(); // Eiffel Tower
/// assert_eq!(hash, "u09tun");
/// ```
pub fn encode(lat: f64, lon: f64, precision: usize) -> Result<String> {
    validate_precision(precision)?;
    validate_finite_coords(lat, lon)?;

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);

    let mut hash = String::with_capacity(precision);
    let mut symbol: u8 = 0;
    let mut even = true; // longitude on even bit indices
    let mut bit = 0;

    while hash.len() < precision {
        let (range, coord) = if even {
            (&mut lon_range, lon)
        } else {
            (&mut lat_range, lat)
        };

        let mid = (range.0 + range.1) / 2.0;
        if coord >= mid {
            symbol |= BIT_WEIGHTS[bit];
            range.0 = mid;
        } else {
            range.1 = mid;
        }

        even = !even;

        if bit < 4 {
            bit += 1;
        } else {
            hash.push(BASE32_ALPHABET[symbol as usize] as char);
            symbol = 0;
            bit = 0;
        }
    }

    Ok(hash)
}

/// Decode a geohash back into its bounding cell.
///
/// Reverses the bit interleaving to recover the lat/lon ranges the hash
/// narrows to; the returned [`DecodedHash`] holds the cell midpoint and
/// half extents. `decode(encode(lat, lon, n))` always yields a cell
/// containing `(lat, lon)`, with extents shrinking as `n` grows.
///
/// # Examples
///
/// ```rust
/// use geonear::geohash::{decode, encode};
///
/// let cell = decode("u09tun").unwrap();
/// assert!((cell.lat - 48.8584).abs() <= cell.lat_error);
/// assert!((cell.lon - 2.2945).abs() <= cell.lon_error);
/// ```
pub fn decode(hash: &str) -> Result<DecodedHash> {
    if hash.is_empty() {
        return Err(GeonearError::InvalidGeohash(
            "empty geohash string".to_string(),
        ));
    }

    let mut lat_range = (-90.0_f64, 90.0_f64);
    let mut lon_range = (-180.0_f64, 180.0_f64);
    let mut even = true;

    for byte in hash.bytes() {
        let value = BASE32_INDEX[byte as usize];
        if value < 0 {
            return Err(GeonearError::InvalidGeohash(format!(
                "symbol {:?} is not in the geohash alphabet",
                byte as char
            )));
        }

        for &weight in &BIT_WEIGHTS {
            let range = if even { &mut lon_range } else { &mut lat_range };
            let mid = (range.0 + range.1) / 2.0;
            if value as u8 & weight != 0 {
                range.0 = mid;
            } else {
                range.1 = mid;
            }
            even = !even;
        }
    }

    Ok(DecodedHash {
        lat: (lat_range.0 + lat_range.1) / 2.0,
        lon: (lon_range.0 + lon_range.1) / 2.0,
        lat_error: (lat_range.1 - lat_range.0) / 2.0,
        lon_error: (lon_range.1 - lon_range.0) / 2.0,
    })
}

/// Map a search radius in meters to a geohash precision (1..=8).
///
/// A coarse, non-configurable heuristic: each threshold approximates the
/// radius at which a cell of that precision covers the search area.
/// Callers needing finer control should choose precision directly.
/// Non-positive or NaN radii fall through to the finest level.
///
/// # Examples
///
/// ```rust
/// use geonear::geohash::precision_for_radius;
///
/// assert_eq!(precision_for_radius(5000.0), 5); // 5 km
/// assert_eq!(precision_for_radius(300.0), 7);
/// assert_eq!(precision_for_radius(3_000_000.0), 1);
/// ```
pub fn precision_for_radius(radius_meters: f64) -> usize {
    match radius_meters {
        r if r >= 2_500_000.0 => 1,
        r if r >= 630_000.0 => 2,
        r if r >= 78_000.0 => 3,
        r if r >= 20_000.0 => 4,
        r if r >= 2_400.0 => 5,
        r if r >= 610.0 => 6,
        r if r >= 76.0 => 7,
        _ => 8,
    }
}

/// Compute the up-to-8 cells surrounding a geohash, at the same precision.
///
/// Each neighbor is found by offsetting the decoded cell midpoint by one
/// full cell extent per axis and re-encoding. Longitude wraps across the
/// antimeridian; rows past a pole are skipped, so polar cells return
/// fewer than 8 neighbors.
///
/// # Examples
///
/// ```rust
/// use geonear::geohash::neighbors;
///
/// let ring = neighbors("u09tun").unwrap();
/// assert_eq!(ring.len(), 8);
/// ```
pub fn neighbors(hash: &str) -> Result<Vec<String>> {
    let cell = decode(hash)?;
    let cell_height = 2.0 * cell.lat_error;
    let cell_width = 2.0 * cell.lon_error;

    let mut ring = Vec::with_capacity(8);
    for dlat in [1.0, 0.0, -1.0] {
        let lat = cell.lat + dlat * cell_height;
        if !(-90.0..=90.0).contains(&lat) {
            continue;
        }
        for dlon in [-1.0, 0.0, 1.0] {
            if dlat == 0.0 && dlon == 0.0 {
                continue;
            }
            let mut lon = cell.lon + dlon * cell_width;
            if lon > 180.0 {
                lon -= 360.0;
            } else if lon < -180.0 {
                lon += 360.0;
            }

            let neighbor = encode(lat, lon, hash.len())?;
            if neighbor != hash && !ring.contains(&neighbor) {
                ring.push(neighbor);
            }
        }
    }

    Ok(ring)
}
