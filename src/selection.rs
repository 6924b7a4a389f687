//! Random pair selection

use rand::Rng;

/// Pick the next index into a list of `len` pairs
///
/// Returns `None` for an empty list. A single-entry list always yields 0.
/// Otherwise an index is drawn uniformly and redrawn until it differs from
/// `current`, so the same pair never comes up twice in a row.
pub fn pick_next_index<R: Rng + ?Sized>(len: usize, current: Option<usize>, rng: &mut R) -> Option<usize> {
    match len {
        0 => None,
        1 => Some(0),
        _ => loop {
            let candidate = rng.random_range(0..len);
            if Some(candidate) != current {
                return Some(candidate);
            }
        },
    }
}
