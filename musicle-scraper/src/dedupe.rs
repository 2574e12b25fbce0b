use std::collections::HashSet;

use musicle_catalog::WorkRecord;

/// Drop repeated works, keeping the first occurrence of each.
///
/// Records are compared by [`WorkRecord`] identity, which ignores the
/// composition year, so arrangements of one work listed under different
/// years collapse to the first one seen.
pub fn dedupe(works: Vec<WorkRecord>) -> Vec<WorkRecord> {
    let mut seen = HashSet::with_capacity(works.len());
    let mut unique = Vec::with_capacity(works.len());
    for work in works {
        if !seen.contains(&work) {
            seen.insert(work.clone());
            unique.push(work);
        }
    }
    unique
}
