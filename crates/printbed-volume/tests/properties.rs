// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-based tests for build volume invariants using the `proptest` crate.

use proptest::prelude::*;

use printbed_geometry::Polygon;
use printbed_model::{ExtruderId, ExtruderSettings, MachineConfiguration};
use printbed_volume::{
    compute_volume, edge_clearance, BedShape, DisallowedAreaComputer, RectangularBedShape,
    UnreachableBorder, PRIME_CLEARANCE,
};

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Bed side length in mm.
fn arb_bed_side() -> impl Strategy<Value = f64> {
    100.0f64..500.0
}

/// Border width small enough for the strips not to cross.
fn arb_border() -> impl Strategy<Value = f64> {
    0.0f64..40.0
}

fn arb_adhesion() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("skirt"), Just("brim"), Just("raft"), Just("none")]
}

fn skirt_config(line_count: u32, gap: f64, line_width: f64) -> MachineConfiguration {
    let mut config = MachineConfiguration::default();
    config.settings.adhesion_type = "skirt".to_string();
    config.settings.skirt_line_count = line_count;
    config.settings.skirt_gap = gap;
    config.settings.skirt_brim_line_width = line_width;
    let mut extruder = ExtruderSettings::new(0);
    extruder.skirt_brim_line_width = line_width;
    config.extruders = vec![extruder];
    config.used_extruders = vec![ExtruderId(0)];
    config
}

// ---------------------------------------------------------------------------
// 1. Border strips cover b * perimeter - 4 * b^2
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn border_area_matches_perimeter_formula(
        width in arb_bed_side(),
        depth in arb_bed_side(),
        border in arb_border(),
    ) {
        let shape = RectangularBedShape::new(width / 2.0, depth / 2.0);
        let strips = shape.static_border_polygons(border, &UnreachableBorder::default());
        let area: f64 = strips.iter().map(|p| p.area()).sum();
        let expected = border * 2.0 * (width + depth) - 4.0 * border * border;
        prop_assert!((area - expected).abs() < TOL * expected.max(1.0),
            "strip area {} != expected {}", area, expected);
    }
}

// ---------------------------------------------------------------------------
// 2. More skirt lines never shrink the clearance
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn skirt_line_count_is_monotonic(
        count in 0u32..50,
        extra in 0u32..50,
        gap in 0.0f64..20.0,
        line_width in 0.1f64..2.0,
    ) {
        let fewer = edge_clearance(&skirt_config(count, gap, line_width)).unwrap();
        let more = edge_clearance(&skirt_config(count + extra, gap, line_width)).unwrap();
        prop_assert!(
            more >= fewer - TOL,
            "{} lines: {}, {} lines: {}",
            count,
            fewer,
            count + extra,
            more
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Recomputing with unchanged inputs is exact
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn recompute_is_idempotent(
        adhesion in arb_adhesion(),
        offset_x in -30.0f64..30.0,
        offset_y in -30.0f64..30.0,
        prime_x in 1.0f64..199.0,
        tower in any::<bool>(),
    ) {
        let mut config = MachineConfiguration::default();
        config.settings.adhesion_type = adhesion.to_string();
        config.settings.prime_tower.enable = tower;
        let mut first = ExtruderSettings::new(0);
        first.prime_blob_enable = true;
        first.prime_pos_x = prime_x;
        first.prime_pos_y = 5.0;
        let mut second = ExtruderSettings::new(1);
        second.nozzle_offset_x = offset_x;
        second.nozzle_offset_y = offset_y;
        config.extruders = vec![first, second];
        config.used_extruders = vec![ExtruderId(0), ExtruderId(1)];

        let once = compute_volume(&config).unwrap();
        let twice = compute_volume(&config).unwrap();
        prop_assert_eq!(once, twice);
    }
}

// ---------------------------------------------------------------------------
// 4. Prime blobs closer than two clearance radii overlap
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn close_prime_blobs_intersect(
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
        // Stay inside the inradius of the 32-gon approximation
        distance in 0.0f64..12.5,
        angle in -std::f64::consts::PI..std::f64::consts::PI,
    ) {
        let mut config = MachineConfiguration::default();
        config.machine.center_is_zero = true;
        let mut first = ExtruderSettings::new(0);
        first.prime_blob_enable = true;
        first.prime_pos_x = x;
        first.prime_pos_y = y;
        let mut second = ExtruderSettings::new(1);
        second.prime_blob_enable = true;
        second.prime_pos_x = x + distance * angle.cos();
        second.prime_pos_y = y + distance * angle.sin();
        prop_assume!(first.prime_pos_x != 0.0 || first.prime_pos_y != 0.0);
        prop_assume!(second.prime_pos_x != 0.0 || second.prime_pos_y != 0.0);

        let computer = DisallowedAreaComputer::new(&config, 0.0);
        let a = computer.prime_blob_area(&first).unwrap();
        let b = computer.prime_blob_area(&second).unwrap();
        prop_assert!(distance < 2.0 * PRIME_CLEARANCE);
        prop_assert!(a.intersects(&b));
    }
}

// ---------------------------------------------------------------------------
// 5. Dilation grows the bounding rectangle by the radius
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn dilation_grows_bounds_by_radius(
        min_x in -100.0f64..100.0,
        min_y in -100.0f64..100.0,
        w in 0.5f64..50.0,
        h in 0.5f64..50.0,
        radius in 0.0f64..20.0,
    ) {
        let rect = Polygon::rectangle(min_x, min_y, min_x + w, min_y + h);
        let grown = rect.dilate(radius).bounding_rect();
        prop_assert!((grown.min.x - (min_x - radius)).abs() < TOL);
        prop_assert!((grown.max.y - (min_y + h + radius)).abs() < TOL);
        prop_assert!(rect.dilate(radius).area() >= rect.area() - TOL);
    }
}
