//! Debug-only sanity checks, compiled down to nothing in release builds

use crate::core::types::{Number, Point3, Vector3};
use crate::shared::intersect::MeshIntersection;
use crate::shared::interval::Interval;
use std::borrow::Borrow;

macro_rules! debug_assert_only {
    () => {
        if cfg!(not(debug_assertions)) {
            return;
        }
    };
}

#[inline(always)]
#[track_caller]
pub fn number(val: impl Borrow<Number>) {
    debug_assert_only!();

    let val = val.borrow();
    assert!(!val.is_nan(), "should not be nan; val: {val}");
}

#[inline(always)]
#[track_caller]
pub fn point3(v: impl Borrow<Point3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

#[inline(always)]
#[track_caller]
pub fn vector3(v: impl Borrow<Vector3>) {
    debug_assert_only!();
    let v = v.borrow();
    assert!(!v.is_nan(), "should not be nan; vec: {v:?}");
}

/// Asserts that an intersection was valid
#[inline(always)]
#[track_caller]
pub fn intersection(intersect: impl Borrow<MeshIntersection>, interval: impl Borrow<Interval<Number>>) {
    debug_assert_only!();

    let intersect = intersect.borrow();
    let interval = interval.borrow();

    number(intersect.t);
    point3(intersect.pos);
    vector3(intersect.normal);

    assert!(
        interval.contains(&intersect.t),
        "intersect t {} not in interval {}",
        intersect.t,
        interval
    );
}
