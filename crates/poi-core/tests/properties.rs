//! Property tests for the normalization invariants.

mod common;

use std::collections::HashSet;

use geo::Geometry;
use poi_core::{GeometryKey, normalize};
use poi_model::{Crs, NormalizeOptions};
use proptest::prelude::{Just, Strategy, prop_assert, prop_assert_eq, prop_oneof, proptest};
use proptest::collection::vec;

use common::{multi_squares, osm_frame, pt, square_geometry};

/// A square, a point strictly inside it and the square's centroid.
fn covered_square_strategy() -> impl Strategy<Value = (Geometry<f64>, Geometry<f64>, Geometry<f64>)> {
    (0i32..8, 0i32..8, 2i32..5)
        .prop_flat_map(|(x, y, size)| (Just(x), Just(y), Just(size), 1..size, 1..size))
        .prop_map(|(x, y, size, dx, dy)| {
            let (x, y, size) = (f64::from(x), f64::from(y), f64::from(size));
            (
                square_geometry(x, y, size),
                pt(x + f64::from(dx), y + f64::from(dy)),
                pt(x + size / 2.0, y + size / 2.0),
            )
        })
}

fn geometry_strategy() -> impl Strategy<Value = Geometry<f64>> {
    // A coarse grid forces coincident points and overlapping polygons.
    let coord = 0i32..8;
    prop_oneof![
        (coord.clone(), coord.clone()).prop_map(|(x, y)| pt(f64::from(x), f64::from(y))),
        (coord.clone(), coord.clone(), 1i32..4).prop_map(|(x, y, size)| {
            square_geometry(f64::from(x), f64::from(y), f64::from(size))
        }),
        (coord.clone(), coord, Just(1.0)).prop_map(|(x, y, size)| {
            let x = f64::from(x);
            let y = f64::from(y);
            multi_squares(&[(x, y), (x + 10.0, y + 10.0)], size)
        }),
    ]
}

proptest! {
    #[test]
    fn output_is_unique_points(geometries in vec(geometry_strategy(), 0..30)) {
        let frame = osm_frame(geometries, vec![], Crs::epsg(3857));

        let result = normalize(&frame, &NormalizeOptions::default()).unwrap();

        let mut seen = HashSet::new();
        for geometry in &result.frame.geometries {
            prop_assert!(matches!(geometry, Geometry::Point(_)));
            prop_assert!(seen.insert(GeometryKey::of(geometry)));
        }
        prop_assert_eq!(result.frame.crs.as_ref(), Some(&Crs::wgs84()));
        prop_assert_eq!(result.report.output_records, result.frame.len());
    }

    #[test]
    fn every_input_point_survives(geometries in vec(geometry_strategy(), 0..30)) {
        let frame = osm_frame(geometries.clone(), vec![], Crs::wgs84());

        let result = normalize(&frame, &NormalizeOptions::default()).unwrap();

        let output: HashSet<GeometryKey> =
            result.frame.geometries.iter().map(GeometryKey::of).collect();
        for geometry in geometries.iter().filter(|g| matches!(g, Geometry::Point(_))) {
            prop_assert!(output.contains(&GeometryKey::of(geometry)));
        }
    }

    #[test]
    fn polygon_covering_a_point_leaves_no_centroid(
        (square, inside, centroid) in covered_square_strategy(),
        extra in vec((0i32..8, 0i32..8), 0..10),
    ) {
        let mut geometries: Vec<Geometry<f64>> = extra
            .iter()
            .map(|&(x, y)| pt(f64::from(x), f64::from(y)))
            .collect();
        geometries.push(square);
        geometries.push(inside);
        let input_points: HashSet<GeometryKey> = geometries
            .iter()
            .filter(|g| matches!(g, Geometry::Point(_)))
            .map(GeometryKey::of)
            .collect();
        let frame = osm_frame(geometries, vec![], Crs::wgs84());

        let result = normalize(&frame, &NormalizeOptions::default()).unwrap();

        prop_assert_eq!(result.report.suppressed_polygons, 1);
        prop_assert_eq!(result.frame.len(), input_points.len());
        let centroid = GeometryKey::of(&centroid);
        if !input_points.contains(&centroid) {
            prop_assert!(
                result.frame.geometries.iter().all(|g| GeometryKey::of(g) != centroid)
            );
        }
    }
}
