//! Galaxy assembly: deterministic ordering and derived system counts.

use std::collections::BTreeMap;

use crate::model::Body;

/// Sort normalized bodies into canonical (system, name) order.
pub fn assemble(mut bodies: Vec<Body>) -> Vec<Body> {
    bodies.sort_by(|a, b| (&a.system, &a.name).cmp(&(&b.system, &b.name)));
    bodies
}

/// Number of bodies per system. Systems are a required foreign-key parent
/// for bodies, so the loader inserts these before any body row.
pub fn system_counts(galaxy: &[Body]) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    for body in galaxy {
        *counts.entry(body.system.clone()).or_insert(0) += 1;
    }
    counts
}
