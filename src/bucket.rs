//! Prefix bucket index: geohash cells as coarse spatial buckets.
//!
//! Points are bucketed under their exact geohash at insertion precision.
//! Radius queries derive a coarser query hash from the radius, gather
//! every bucket whose key carries that hash as a prefix, and refine the
//! resulting candidate set with exact haversine distances.
//!
//! The prefix scan walks all distinct stored hashes: O(distinct-hashes)
//! per query, not a trie lookup. A trie or sorted-key range query is the
//! natural substitution at production scale; the linear scan is kept here
//! deliberately.

use crate::distance::haversine;
use crate::error::Result;
use crate::geohash::{encode, neighbors, precision_for_radius};
use crate::types::{Config, IndexedPoint, QueryMatch};
use crate::validation::{validate_finite_coords, validate_radius};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Statistics about a bucket index.
#[derive(Debug, Clone)]
pub struct BucketIndexStats {
    /// Number of distinct geohash buckets.
    pub bucket_count: usize,
    /// Total number of points across all buckets.
    pub point_count: usize,
    /// Size of the largest bucket.
    pub largest_bucket: usize,
}

/// A mapping from geohash string to the points sharing that exact hash.
///
/// # Examples
///
/// ```rust
/// use geonear::{BucketIndex, IndexedPoint};
///
/// let mut index = BucketIndex::new();
/// let sf = IndexedPoint::new("sf", -122.4194, 37.7749, "San Francisco");
/// index.insert(sf, 8).unwrap();
///
/// let matches = index.query_near(37.7749, -122.4194, 5000.0).unwrap();
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].point.key, "sf");
/// ```
#[derive(Debug, Default)]
pub struct BucketIndex {
    /// Geohash string -> points, in insertion order.
    buckets: FxHashMap<String, Vec<IndexedPoint>>,
    /// Probe neighboring cells during radius queries.
    probe_neighbors: bool,
}

impl BucketIndex {
    /// Create an empty index with baseline behavior (no neighbor probing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty index configured from `config`
    /// (honors `probe_neighbors`).
    pub fn with_config(config: &Config) -> Self {
        Self {
            buckets: FxHashMap::default(),
            probe_neighbors: config.probe_neighbors,
        }
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct geohash buckets in use.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Insert a point under its geohash at `precision`.
    ///
    /// Bucket lists preserve insertion order and are never deduplicated;
    /// inserting the same point twice stores it twice. Fails fast on
    /// non-finite coordinates or zero precision.
    pub fn insert(&mut self, point: IndexedPoint, precision: usize) -> Result<()> {
        let hash = encode(point.lat(), point.lon(), precision)?;
        self.buckets.entry(hash).or_default().push(point);
        Ok(())
    }

    /// Return every stored point whose bucket key starts with `prefix`.
    ///
    /// This is a coarse candidate set: a shared prefix proves only that a
    /// point lies in the same or an adjacent cell at the prefix's
    /// precision, never that it is within any particular distance.
    /// Linear in the number of distinct stored hashes.
    pub fn query_prefix(&self, prefix: &str) -> Vec<&IndexedPoint> {
        let mut found = Vec::new();
        for (hash, points) in &self.buckets {
            if hash.starts_with(prefix) {
                found.extend(points.iter());
            }
        }
        found
    }

    /// Find all points within `radius_meters` of `(lat, lon)`.
    ///
    /// Derives a query precision from the radius
    /// ([`precision_for_radius`]), prefix-scans for candidates, and
    /// refines them with exact haversine distances. Results are sorted
    /// nearest-first, each carrying its distance.
    ///
    /// Known boundary artifact: with the baseline configuration, a point
    /// within `radius_meters` whose geohash falls just across a cell
    /// boundary shares no prefix with the query hash and is missed.
    /// Construct the index via [`Config::with_neighbor_probing`] to also
    /// probe the up-to-8 neighboring cell prefixes, which closes the gap
    /// for radii on the order of one cell.
    ///
    /// Fails fast on non-finite inputs or a negative radius.
    pub fn query_near(&self, lat: f64, lon: f64, radius_meters: f64) -> Result<Vec<QueryMatch>> {
        if let Err(err) = validate_finite_coords(lat, lon).and_then(|_| validate_radius(radius_meters))
        {
            log::warn!("rejecting radius query with invalid input: {}", err);
            return Err(err);
        }

        let precision = precision_for_radius(radius_meters);
        let query_hash = encode(lat, lon, precision)?;

        let mut prefixes = Vec::with_capacity(9);
        if self.probe_neighbors {
            prefixes.extend(neighbors(&query_hash)?);
        }
        prefixes.push(query_hash);

        // Each point lives in exactly one bucket and the probe prefixes
        // share a length, so no candidate can match twice.
        let mut matches: Vec<QueryMatch> = Vec::new();
        let mut candidates = 0usize;
        for prefix in &prefixes {
            for candidate in self.query_prefix(prefix) {
                candidates += 1;
                let distance = haversine(lat, lon, candidate.lat(), candidate.lon());
                if distance <= radius_meters {
                    matches.push(QueryMatch {
                        point: candidate.clone(),
                        distance,
                    });
                }
            }
        }

        log::debug!(
            "query_near refined {} candidates from {} prefix(es) to {} matches",
            candidates,
            prefixes.len(),
            matches.len()
        );

        matches.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(Ordering::Equal));
        Ok(matches)
    }

    /// Summary statistics over the stored buckets.
    pub fn stats(&self) -> BucketIndexStats {
        BucketIndexStats {
            bucket_count: self.buckets.len(),
            point_count: self.len(),
            largest_bucket: self.buckets.values().map(Vec::len).max().unwrap_or(0),
        }
    }
}
