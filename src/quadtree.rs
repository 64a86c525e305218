//! Quadtree: recursive 2D spatial partition with circular range queries.
//!
//! A node holds up to `capacity` points; the first insert beyond that
//! splits the node's boundary into four equal quadrants (NW, NE, SW, SE)
//! and later points descend into them. Subdivision is one-way; a node
//! never re-merges. Circular queries prune whole subtrees by intersecting
//! the node boundary with the query circle's bounding rectangle, then
//! refine node-local points with the exact distance metric.
//!
//! The tree is a plain owning structure (each node exclusively owns its
//! four children), so it follows normal ownership rules: share it
//! read-only once built, and serialize writers externally if mutation and
//! queries must interleave.

use crate::distance::{DistanceMetric, distance_between};
use crate::error::{GeonearError, Result};
use crate::types::{Config, IndexedPoint};
use crate::validation::{validate_finite_xy, validate_radius};
use geo::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// An axis-aligned rectangle given by its center and half extents.
///
/// # Examples
///
/// ```rust
/// use geonear::Rect;
///
/// let boundary = Rect::new(0.0, 0.0, 100.0, 100.0).unwrap();
/// assert!(boundary.contains(100.0, -100.0)); // edges are inclusive
/// assert!(!boundary.contains(100.1, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Center x coordinate.
    pub center_x: f64,
    /// Center y coordinate.
    pub center_y: f64,
    /// Half of the rectangle's width.
    pub half_width: f64,
    /// Half of the rectangle's height.
    pub half_height: f64,
}

impl Rect {
    /// Create a rectangle, failing fast on non-finite values or negative
    /// half extents.
    pub fn new(center_x: f64, center_y: f64, half_width: f64, half_height: f64) -> Result<Self> {
        if ![center_x, center_y, half_width, half_height]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(GeonearError::InvalidInput(
                "Rectangle coordinates must be finite".to_string(),
            ));
        }

        if half_width < 0.0 || half_height < 0.0 {
            return Err(GeonearError::InvalidInput(format!(
                "Rectangle half extents must be non-negative, got: {} x {}",
                half_width, half_height
            )));
        }

        Ok(Self {
            center_x,
            center_y,
            half_width,
            half_height,
        })
    }

    /// True if the point lies within the rectangle. Both axes use closed
    /// intervals, so edges and corners are inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.center_x - self.half_width
            && x <= self.center_x + self.half_width
            && y >= self.center_y - self.half_height
            && y <= self.center_y + self.half_height
    }

    /// True if this rectangle overlaps `other`. Separating-axis test:
    /// no overlap iff one rectangle lies entirely beyond the other on
    /// some axis. Symmetric.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.center_x - other.half_width > self.center_x + self.half_width
            || other.center_x + other.half_width < self.center_x - self.half_width
            || other.center_y - other.half_height > self.center_y + self.half_height
            || other.center_y + other.half_height < self.center_y - self.half_height)
    }
}

/// Statistics about a quadtree.
#[derive(Debug, Clone)]
pub struct QuadtreeStats {
    /// Total number of nodes, including the root.
    pub node_count: usize,
    /// Total number of stored points.
    pub point_count: usize,
    /// Depth of the deepest node (the root is depth 0).
    pub max_depth: usize,
}

/// A quadtree over points in a bounded 2D region.
///
/// Coordinates are planar by default, with Euclidean distances in
/// coordinate units. For lon/lat points construct the tree with
/// [`DistanceMetric::Haversine`](crate::DistanceMetric::Haversine) via
/// [`with_metric`](Quadtree::with_metric); radii are then in meters.
///
/// # Examples
///
/// ```rust
/// use geonear::{IndexedPoint, Quadtree, Rect};
///
/// let boundary = Rect::new(0.0, 0.0, 100.0, 100.0).unwrap();
/// let mut tree = Quadtree::new(boundary, 4).unwrap();
///
/// assert!(tree.insert(IndexedPoint::new("a", 10.0, 10.0, "")));
/// assert!(tree.insert(IndexedPoint::new("b", -20.0, 35.0, "")));
/// assert!(!tree.insert(IndexedPoint::new("far", 500.0, 0.0, "")));
///
/// let found = tree.query_circle(0.0, 0.0, 25.0).unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].key, "a");
/// ```
#[derive(Debug)]
pub struct Quadtree {
    boundary: Rect,
    capacity: usize,
    metric: DistanceMetric,
    redistribute_on_subdivide: bool,
    points: SmallVec<[IndexedPoint; 4]>,
    /// NW, NE, SW, SE.
    children: Option<Box<[Quadtree; 4]>>,
}

impl Quadtree {
    /// Create an empty leaf covering `boundary`, holding up to `capacity`
    /// points before subdividing. Fails fast on zero capacity.
    pub fn new(boundary: Rect, capacity: usize) -> Result<Self> {
        Self::with_metric(boundary, capacity, DistanceMetric::Euclidean)
    }

    /// Create an empty leaf using the given distance metric for
    /// [`query_circle`](Quadtree::query_circle). Haversine treats `x` as
    /// longitude and `y` as latitude, with radii in meters.
    pub fn with_metric(boundary: Rect, capacity: usize, metric: DistanceMetric) -> Result<Self> {
        if capacity == 0 {
            return Err(GeonearError::InvalidInput(
                "Quadtree capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            boundary,
            capacity,
            metric,
            redistribute_on_subdivide: false,
            points: SmallVec::new(),
            children: None,
        })
    }

    /// Create an empty leaf configured from `config`
    /// (honors `redistribute_on_subdivide`).
    pub fn with_config(boundary: Rect, capacity: usize, config: &Config) -> Result<Self> {
        let mut tree = Self::new(boundary, capacity)?;
        tree.redistribute_on_subdivide = config.redistribute_on_subdivide;
        Ok(tree)
    }

    /// The region this node covers.
    pub fn boundary(&self) -> &Rect {
        &self.boundary
    }

    /// Per-node point capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once this node has subdivided.
    pub fn is_divided(&self) -> bool {
        self.children.is_some()
    }

    /// Total number of points stored in this subtree.
    pub fn len(&self) -> usize {
        let mut count = self.points.len();
        if let Some(children) = &self.children {
            count += children.iter().map(Quadtree::len).sum::<usize>();
        }
        count
    }

    /// True if the subtree stores no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a point, returning `false` (without mutation) if it lies
    /// outside this node's boundary. Never an error: the boolean is the
    /// whole contract, and callers must check it.
    ///
    /// A leaf under capacity stores the point directly. A full leaf
    /// subdivides once and delegates to its children in NW, NE, SW, SE
    /// order; the first child whose (closed) boundary contains the point
    /// takes it, so points on shared quadrant edges land in exactly one
    /// deterministic child and every in-bounds point is accepted.
    pub fn insert(&mut self, point: IndexedPoint) -> bool {
        if !self.boundary.contains(point.x(), point.y()) {
            return false;
        }

        if self.children.is_none() {
            if self.points.len() < self.capacity {
                self.points.push(point);
                return true;
            }
            self.subdivide();
        }

        if let Some(children) = self.children.as_mut() {
            if let Some(child) = children
                .iter_mut()
                .find(|c| c.boundary.contains(point.x(), point.y()))
            {
                return child.insert(point);
            }
        }

        false
    }

    /// Split this node into four equal quadrants inheriting capacity,
    /// metric, and policy. Called at most once per node.
    ///
    /// By default the points already stored here stay frozen at this node
    /// and are never redistributed into the children. With
    /// [`Config::with_redistribution`] they are drained into the children
    /// instead (conventional quadtree semantics). Note that under
    /// redistribution, more than `capacity` points at identical
    /// coordinates subdivide without bound; bounding insert pathology via
    /// capacity and boundary sizing is the caller's concern.
    fn subdivide(&mut self) {
        debug_assert!(self.children.is_none());

        let hw = self.boundary.half_width / 2.0;
        let hh = self.boundary.half_height / 2.0;
        let cx = self.boundary.center_x;
        let cy = self.boundary.center_y;

        let mut children = Box::new([
            self.child_node(cx - hw, cy + hh, hw, hh), // NW
            self.child_node(cx + hw, cy + hh, hw, hh), // NE
            self.child_node(cx - hw, cy - hh, hw, hh), // SW
            self.child_node(cx + hw, cy - hh, hw, hh), // SE
        ]);

        if self.redistribute_on_subdivide {
            for point in self.points.drain(..) {
                if let Some(child) = children
                    .iter_mut()
                    .find(|c| c.boundary.contains(point.x(), point.y()))
                {
                    child.insert(point);
                }
            }
        }

        self.children = Some(children);
    }

    fn child_node(&self, center_x: f64, center_y: f64, half_width: f64, half_height: f64) -> Self {
        Self {
            boundary: Rect {
                center_x,
                center_y,
                half_width,
                half_height,
            },
            capacity: self.capacity,
            metric: self.metric,
            redistribute_on_subdivide: self.redistribute_on_subdivide,
            points: SmallVec::new(),
            children: None,
        }
    }

    /// Find all points within `radius` of `(center_x, center_y)`.
    ///
    /// Results preserve insertion order within each node, with nodes
    /// visited in NW, NE, SW, SE order; sort afterwards for
    /// distance-ordered output. Fails fast on non-finite inputs or a
    /// negative radius.
    pub fn query_circle(
        &self,
        center_x: f64,
        center_y: f64,
        radius: f64,
    ) -> Result<Vec<IndexedPoint>> {
        let mut found = Vec::new();
        self.query_circle_into(center_x, center_y, radius, &mut found)?;
        Ok(found)
    }

    /// Accumulator form of [`query_circle`](Quadtree::query_circle):
    /// appends matches to `found` instead of allocating a fresh vector.
    pub fn query_circle_into(
        &self,
        center_x: f64,
        center_y: f64,
        radius: f64,
        found: &mut Vec<IndexedPoint>,
    ) -> Result<()> {
        validate_finite_xy(center_x, center_y)?;
        validate_radius(radius)?;

        // Bounding rectangle of the query circle, for subtree pruning.
        // Haversine radii are meters, so the extents come from the rough
        // 1 degree ~ 111 km equivalence (longitude scaled by latitude).
        let (half_width, half_height) = match self.metric {
            DistanceMetric::Euclidean => (radius, radius),
            DistanceMetric::Haversine => {
                let lat_offset = radius / 111_000.0;
                let lon_offset = radius / (111_000.0 * center_y.to_radians().cos());
                (lon_offset.abs(), lat_offset)
            }
        };
        let range = Rect {
            center_x,
            center_y,
            half_width,
            half_height,
        };

        self.collect_in_circle(&Point::new(center_x, center_y), radius, &range, found);
        Ok(())
    }

    fn collect_in_circle(
        &self,
        center: &Point<f64>,
        radius: f64,
        range: &Rect,
        found: &mut Vec<IndexedPoint>,
    ) {
        if !self.boundary.intersects(range) {
            return;
        }

        for point in &self.points {
            if distance_between(center, &point.position, self.metric) <= radius {
                found.push(point.clone());
            }
        }

        // No early termination across siblings: every child that
        // survives the prune is visited.
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_in_circle(center, radius, range, found);
            }
        }
    }

    /// Summary statistics over the subtree.
    pub fn stats(&self) -> QuadtreeStats {
        let mut stats = QuadtreeStats {
            node_count: 0,
            point_count: 0,
            max_depth: 0,
        };
        self.collect_stats(0, &mut stats);
        stats
    }

    fn collect_stats(&self, depth: usize, stats: &mut QuadtreeStats) {
        stats.node_count += 1;
        stats.point_count += self.points.len();
        stats.max_depth = stats.max_depth.max(depth);

        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_stats(depth + 1, stats);
            }
        }
    }
}
