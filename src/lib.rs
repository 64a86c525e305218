//! In-memory geospatial proximity search: which known locations lie
//! within radius R of point P?
//!
//! Two alternative indexing strategies trade precision, locality, and
//! complexity: a geohash codec feeding a prefix [`BucketIndex`], and a
//! [`Quadtree`] over a bounded region. Both answer radius queries by
//! producing a coarse candidate set that exact distance refinement
//! narrows to the true result set.
//!
//! ```rust
//! use geonear::{BucketIndex, IndexedPoint};
//!
//! let mut index = BucketIndex::new();
//! index.insert(IndexedPoint::new("sf", -122.4194, 37.7749, b"San Francisco".as_ref()), 8)?;
//! index.insert(IndexedPoint::new("nyc", -74.0060, 40.7128, b"New York".as_ref()), 8)?;
//!
//! let nearby = index.query_near(37.7749, -122.4194, 5000.0)?;
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(nearby[0].point.key, "sf");
//! # Ok::<(), geonear::GeonearError>(())
//! ```
//!
//! The crate is the algorithmic core only: HTTP handlers, ORM models,
//! and SQL bounding-box queries are external collaborators that call in.
//! Everything here is synchronous, performs no I/O, and mutates only
//! values the caller owns; build an index single-threaded, then share it
//! read-only for concurrent queries.

pub mod bucket;
pub mod distance;
pub mod error;
pub mod geohash;
pub mod quadtree;
pub mod types;
pub mod validation;

pub use error::{GeonearError, Result};

pub use bucket::{BucketIndex, BucketIndexStats};

pub use distance::{DistanceMetric, EARTH_RADIUS_METERS, distance_between, haversine};

pub use self::geohash::{DecodedHash, decode, encode, neighbors, precision_for_radius};

pub use quadtree::{Quadtree, QuadtreeStats, Rect};

pub use types::{Config, IndexedPoint, QueryMatch};

pub use geo::Point;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeonearError, Result};

    pub use crate::{BucketIndex, Config, IndexedPoint, QueryMatch};

    pub use crate::{Quadtree, Rect};

    pub use crate::distance::{DistanceMetric, distance_between, haversine};

    pub use crate::geohash::{decode, encode, precision_for_radius};

    pub use geo::Point;
}
