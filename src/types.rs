//! Core data types and configuration.
//!
//! This module provides the stored-point type shared by both indexes and
//! a serializable configuration that can be loaded from JSON or built
//! programmatically.

use bytes::Bytes;
use geo::Point;
use serde::{Deserialize, Serialize};

/// A point stored in an index: an opaque key, a position, and a payload.
///
/// The key, not a pointer, is the stable handle for a point: copies of an
/// `IndexedPoint` refer to the same logical location as long as they share
/// a key. Points are immutable once inserted.
///
/// For the [`BucketIndex`](crate::BucketIndex) the position is geographic
/// (`x` = longitude, `y` = latitude). For a planar
/// [`Quadtree`](crate::Quadtree) the same structure holds projected `x`/`y`
/// coordinates; the coordinate semantics follow the index, not the type.
///
/// # Examples
///
/// ```rust
/// use geonear::IndexedPoint;
///
/// let nyc = IndexedPoint::new("nyc", -74.0060, 40.7128, "New York");
/// assert_eq!(nyc.lat(), 40.7128);
/// assert_eq!(nyc.lon(), -74.0060);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedPoint {
    /// Opaque identifier supplied by the caller.
    pub key: String,
    /// Position (x = longitude or planar x, y = latitude or planar y).
    pub position: Point<f64>,
    /// Associated data payload.
    pub data: Bytes,
}

impl IndexedPoint {
    /// Create a new indexed point.
    pub fn new<K: Into<String>, D: Into<Bytes>>(key: K, x: f64, y: f64, data: D) -> Self {
        Self {
            key: key.into(),
            position: Point::new(x, y),
            data: data.into(),
        }
    }

    /// Get the x coordinate (longitude for geographic points).
    pub fn x(&self) -> f64 {
        self.position.x()
    }

    /// Get the y coordinate (latitude for geographic points).
    pub fn y(&self) -> f64 {
        self.position.y()
    }

    /// Get the longitude (alias for [`x`](Self::x)).
    pub fn lon(&self) -> f64 {
        self.position.x()
    }

    /// Get the latitude (alias for [`y`](Self::y)).
    pub fn lat(&self) -> f64 {
        self.position.y()
    }
}

/// A refined query result: a matching point and its exact distance from
/// the query center, in meters (or planar units for Euclidean trees).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    /// The matching point.
    pub point: IndexedPoint,
    /// Exact distance from the query center.
    pub distance: f64,
}

/// Index configuration.
///
/// Designed to be easily serializable and loadable from JSON while
/// keeping complexity minimal. All fields have defaults matching the
/// baseline behavior of the indexes.
///
/// # Example
///
/// ```rust
/// use geonear::Config;
///
/// // Programmatic
/// let config = Config::default()
///     .with_geohash_precision(7)
///     .with_neighbor_probing(true);
/// assert_eq!(config.geohash_precision, 7);
///
/// // From JSON
/// let json = r#"{
///     "geohash_precision": 6,
///     "probe_neighbors": true
/// }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.probe_neighbors);
/// assert!(!config.redistribute_on_subdivide);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Geohash precision used when inserting without an explicit one
    /// (1-12, default: 8). Higher values mean smaller cells.
    #[serde(default = "Config::default_geohash_precision")]
    pub geohash_precision: usize,

    /// Probe the up-to-8 neighboring geohash cells during
    /// [`BucketIndex::query_near`](crate::BucketIndex::query_near) to
    /// mitigate the cell-boundary artifact (default: false, matching the
    /// baseline prefix-only behavior).
    #[serde(default)]
    pub probe_neighbors: bool,

    /// Redistribute a node's stored points into its children when a
    /// [`Quadtree`](crate::Quadtree) subdivides (default: false, which
    /// freezes already-stored points at the node).
    #[serde(default)]
    pub redistribute_on_subdivide: bool,
}

impl Config {
    const fn default_geohash_precision() -> usize {
        8
    }

    /// Set the geohash precision.
    ///
    /// # Panics
    ///
    /// Panics if precision is not in range 1-12.
    pub fn with_geohash_precision(mut self, precision: usize) -> Self {
        assert!(
            (1..=12).contains(&precision),
            "Geohash precision must be between 1 and 12"
        );
        self.geohash_precision = precision;
        self
    }

    /// Enable or disable neighbor-cell probing for radius queries.
    pub fn with_neighbor_probing(mut self, probe: bool) -> Self {
        self.probe_neighbors = probe;
        self
    }

    /// Enable or disable point redistribution on quadtree subdivision.
    pub fn with_redistribution(mut self, redistribute: bool) -> Self {
        self.redistribute_on_subdivide = redistribute;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geohash_precision: Self::default_geohash_precision(),
            probe_neighbors: false,
            redistribute_on_subdivide: false,
        }
    }
}
