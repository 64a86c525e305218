use geonear::geohash::{decode, encode, neighbors};
use geonear::{BucketIndex, DistanceMetric, IndexedPoint, Quadtree, Rect, haversine};

/// Test 1: Large dataset stress test
#[test]
fn test_large_dataset_insertion() {
    let mut index = BucketIndex::new();

    // Insert 10K points (keeping it reasonable for CI)
    for i in 0..10_000 {
        let lat = 40.0 + (i as f64 * 0.00001);
        let lon = -74.0 + (i as f64 * 0.00001);
        index
            .insert(
                IndexedPoint::new(format!("p{}", i), lon, lat, format!("data{}", i)),
                8,
            )
            .unwrap_or_else(|_| panic!("Failed to insert point {}", i));
    }

    assert_eq!(index.len(), 10_000);

    // Query should still come back and stay exact
    let results = index.query_near(40.0, -74.0, 1000.0).expect("Query failed");
    assert!(!results.is_empty());
    for m in &results {
        assert!(m.distance <= 1000.0);
    }
}

/// Test 2: Extreme coordinate values
#[test]
fn test_extreme_coordinates() {
    let north_pole = encode(90.0, 0.0, 8).expect("north pole should encode");
    let south_pole = encode(-90.0, 0.0, 8).expect("south pole should encode");
    let date_line_east = encode(0.0, 180.0, 8).expect("date line should encode");
    let date_line_west = encode(0.0, -180.0, 8).expect("date line should encode");

    // All four are distinct cells and decode back to containing boxes
    for (hash, lat, lon) in [
        (&north_pole, 90.0, 0.0),
        (&south_pole, -90.0, 0.0),
        (&date_line_east, 0.0, 180.0),
        (&date_line_west, 0.0, -180.0),
    ] {
        let cell = decode(hash).expect("valid hash should decode");
        assert!((cell.lat - lat).abs() <= cell.lat_error + 1e-9);
        assert!((cell.lon - lon).abs() <= cell.lon_error + 1e-9);
    }
    assert_ne!(date_line_east, date_line_west);

    // Polar neighbor rings are truncated, not wrong
    assert!(neighbors(&north_pole).expect("ring").len() < 8);
}

/// Test 3: Non-finite inputs are rejected everywhere
#[test]
fn test_non_finite_inputs_fail_fast() {
    let mut index = BucketIndex::new();
    assert!(
        index
            .insert(IndexedPoint::new("bad", f64::NAN, 0.0, ""), 8)
            .is_err()
    );
    assert!(index.query_near(f64::INFINITY, 0.0, 10.0).is_err());
    assert!(index.query_near(0.0, 0.0, f64::NAN).is_err());

    assert!(encode(f64::NAN, 0.0, 6).is_err());
    assert!(encode(0.0, f64::NEG_INFINITY, 6).is_err());
    assert!(Rect::new(0.0, f64::NAN, 1.0, 1.0).is_err());

    let tree = Quadtree::new(Rect::new(0.0, 0.0, 10.0, 10.0).unwrap(), 4).unwrap();
    assert!(tree.query_circle(f64::NAN, 0.0, 1.0).is_err());
}

/// Test 4: Out-of-range finite coordinates are garbage-in/garbage-out,
/// not errors
#[test]
fn test_out_of_range_finite_coordinates_still_encode() {
    // The bisection saturates instead of failing; the result is
    // deterministic garbage the caller asked for.
    let hash = encode(95.0, 200.0, 6).expect("finite out-of-range input encodes");
    assert_eq!(hash.len(), 6);
    assert_eq!(hash, encode(95.0, 200.0, 6).unwrap());
}

/// Test 5: Deep precision still behaves
#[test]
fn test_high_precision_encoding() {
    let hash = encode(48.8584, 2.2945, 20).expect("long hashes are allowed");
    assert_eq!(hash.len(), 20);

    // Still a prefix chain all the way down
    let shorter = encode(48.8584, 2.2945, 12).unwrap();
    assert!(hash.starts_with(&shorter));

    let cell = decode(&hash).unwrap();
    assert!(cell.lat_error < 1e-9);
}

/// Test 6: Quadtree with a degenerate zero-extent boundary
#[test]
fn test_zero_extent_quadtree() {
    let boundary = Rect::new(5.0, 5.0, 0.0, 0.0).unwrap();
    let mut tree = Quadtree::new(boundary, 2).unwrap();

    // Only the exact center is in bounds
    assert!(tree.insert(IndexedPoint::new("center", 5.0, 5.0, "")));
    assert!(!tree.insert(IndexedPoint::new("off", 5.0001, 5.0, "")));

    let found = tree.query_circle(5.0, 5.0, 0.0).unwrap();
    assert_eq!(found.len(), 1);
}

/// Test 7: Query circle far outside the tree boundary prunes to nothing
#[test]
fn test_query_outside_boundary() {
    let mut tree = Quadtree::new(Rect::new(0.0, 0.0, 100.0, 100.0).unwrap(), 4).unwrap();
    for i in 0..20 {
        tree.insert(IndexedPoint::new(
            format!("p{}", i),
            -90.0 + i as f64 * 9.0,
            0.0,
            "",
        ));
    }

    let found = tree.query_circle(10_000.0, 10_000.0, 50.0).unwrap();
    assert!(found.is_empty());
}

/// Test 8: Haversine sanity at the edges
#[test]
fn test_haversine_edges() {
    // Pole to pole
    let pole_to_pole = haversine(90.0, 0.0, -90.0, 0.0);
    let half_circumference = std::f64::consts::PI * geonear::EARTH_RADIUS_METERS;
    assert!((pole_to_pole - half_circumference).abs() < 1.0);

    // Crossing the antimeridian is short, not 360 degrees long
    let across = haversine(0.0, 179.999, 0.0, -179.999);
    assert!(across < 1_000.0);
}

/// Test 9: A planar quadtree and a haversine quadtree disagree on
/// purpose
#[test]
fn test_metric_substitution_is_explicit() {
    let boundary = Rect::new(-122.3, 37.8, 1.0, 1.0).unwrap();
    let points = [("sf", -122.4194, 37.7749), ("oakland", -122.2711, 37.8044)];

    let mut planar = Quadtree::new(boundary, 4).unwrap();
    let mut geographic =
        Quadtree::with_metric(boundary, 4, DistanceMetric::Haversine).unwrap();
    for (key, x, y) in points {
        planar.insert(IndexedPoint::new(key, x, y, ""));
        geographic.insert(IndexedPoint::new(key, x, y, ""));
    }

    // 0.2 "meters" finds nothing geographically, but 0.2 degrees of
    // planar distance spans the bay
    let geo_found = geographic.query_circle(-122.4194, 37.7749, 0.2).unwrap();
    assert_eq!(geo_found.len(), 1); // only the zero-distance self point

    let planar_found = planar.query_circle(-122.4194, 37.7749, 0.2).unwrap();
    assert_eq!(planar_found.len(), 2);
}

/// Test 10: Bucket index with mixed precisions keeps prefix semantics
#[test]
fn test_mixed_precision_buckets() {
    let mut index = BucketIndex::new();
    index
        .insert(IndexedPoint::new("coarse", -122.4194, 37.7749, ""), 5)
        .unwrap();
    index
        .insert(IndexedPoint::new("fine", -122.4194, 37.7749, ""), 9)
        .unwrap();

    assert_eq!(index.bucket_count(), 2);

    // The coarse hash is a prefix of the fine one, so scanning at the
    // coarse precision sees both
    let coarse_hash = encode(37.7749, -122.4194, 5).unwrap();
    assert_eq!(index.query_prefix(&coarse_hash).len(), 2);

    // Scanning at the fine precision sees only the fine bucket
    let fine_hash = encode(37.7749, -122.4194, 9).unwrap();
    assert_eq!(index.query_prefix(&fine_hash).len(), 1);
}
