use blueprints_core::{Blueprint, Point};

/// Compact seed row: author, name, raw coordinates.
type SeedRow = (&'static str, &'static str, &'static [(f64, f64)]);

const SEED: &[SeedRow] = &[
    (
        "johnconnor",
        "house",
        &[(150.0, 120.0), (215.0, 115.0), (340.0, 240.0), (15.0, 215.0)],
    ),
    ("johnconnor", "gear", &[(340.0, 240.0), (15.0, 215.0), (45.0, 225.0)]),
    ("maryweyland", "house2", &[(140.0, 140.0), (115.0, 115.0), (95.0, 135.0)]),
    (
        "maryweyland",
        "gear2",
        &[(140.0, 140.0), (115.0, 115.0), (200.0, 180.0), (250.0, 190.0)],
    ),
    (
        "john",
        "house_design",
        &[
            (10.0, 10.0),
            (10.0, 100.0),
            (100.0, 100.0),
            (100.0, 10.0),
            (10.0, 10.0),
            (50.0, 10.0),
            (50.0, 50.0),
            (80.0, 50.0),
            (80.0, 80.0),
        ],
    ),
    (
        "john",
        "office_design",
        &[
            (0.0, 0.0),
            (0.0, 80.0),
            (120.0, 80.0),
            (120.0, 0.0),
            (0.0, 0.0),
            (30.0, 20.0),
            (30.0, 60.0),
            (90.0, 60.0),
            (90.0, 20.0),
            (30.0, 20.0),
        ],
    ),
    (
        "maria",
        "park_design",
        &[
            (5.0, 5.0),
            (5.0, 95.0),
            (95.0, 95.0),
            (95.0, 5.0),
            (5.0, 5.0),
            (25.0, 25.0),
            (75.0, 25.0),
            (75.0, 75.0),
            (25.0, 75.0),
            (25.0, 25.0),
        ],
    ),
    (
        "carlos",
        "bridge_design",
        &[
            (0.0, 50.0),
            (20.0, 45.0),
            (40.0, 40.0),
            (60.0, 40.0),
            (80.0, 45.0),
            (100.0, 50.0),
            (80.0, 55.0),
            (60.0, 60.0),
            (40.0, 60.0),
            (20.0, 55.0),
            (0.0, 50.0),
        ],
    ),
];

/// The demo data set, in insertion order.
pub fn seed_blueprints() -> Vec<Blueprint> {
    SEED.iter()
        .map(|(author, name, coords)| {
            Blueprint::new(*author, *name, coords.iter().copied().map(Point::from).collect())
        })
        .collect()
}
