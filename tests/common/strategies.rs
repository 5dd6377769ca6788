use proptest::prelude::*;

use gis_analyst::analyst::{Geometry, OverlayOperationType, Point2D};

/// Non-empty dataset identifiers, optionally qualified with a datasource
pub fn dataset_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,30}(@[A-Za-z][A-Za-z0-9]{0,15})?"
}

/// Either a valid dataset identifier or the empty string
pub fn maybe_empty_dataset_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), dataset_name_strategy()]
}

pub fn overlay_operation_strategy() -> impl Strategy<Value = OverlayOperationType> {
    prop_oneof![
        Just(OverlayOperationType::Clip),
        Just(OverlayOperationType::Erase),
        Just(OverlayOperationType::Identity),
        Just(OverlayOperationType::Intersect),
        Just(OverlayOperationType::Union),
        Just(OverlayOperationType::Update),
        Just(OverlayOperationType::Xor),
    ]
}

/// Closed triangle regions with coordinates in a small box
pub fn region_strategy() -> impl Strategy<Value = Geometry> {
    prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 3..6).prop_map(|coords| {
        let mut points: Vec<Point2D> = coords.into_iter().map(|(x, y)| Point2D::new(x, y)).collect();
        points.push(points[0]);
        Geometry::region(points)
    })
}

pub fn maybe_region_strategy() -> impl Strategy<Value = Option<Geometry>> {
    prop::option::of(region_strategy())
}
