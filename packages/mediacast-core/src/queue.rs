//! Playlist queue algebra.
//!
//! Pure functions that compute a new play order for a playlist when a batch
//! of media ids is queued "next" (right after the active item) or "last"
//! (after everything already in the playlist). Every ordering produced here
//! contains each id at most once, and ids from the requested batch keep
//! their relative order.
//!
//! None of these functions fail. Inputs that reference ids outside the
//! playlist, or an empty batch, fall back to well-defined orderings.

use std::collections::HashSet;
use std::hash::Hash;

use rand::Rng;

// ─────────────────────────────────────────────────────────────────────────────
// Deduplication
// ─────────────────────────────────────────────────────────────────────────────

/// Removes repeated ids, keeping the first occurrence of each.
#[must_use]
pub fn dedup_preserving_order<T>(ids: impl IntoIterator<Item = T>) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Copies the requested batch, dropping the first occurrence of the active id
/// when that id is already positioned in the playlist.
///
/// A batch equal to the playlist's own order (a re-shuffle being pushed back)
/// keeps the active id so the new order is taken as-is.
fn incoming_batch<T>(ids: &[T], active: Option<&T>, requested: &[T]) -> Vec<T>
where
    T: Clone + Eq,
{
    let mut batch = requested.to_vec();
    if let Some(active) = active {
        if ids.contains(active) && requested != ids {
            if let Some(pos) = batch.iter().position(|id| id == active) {
                batch.remove(pos);
            }
        }
    }
    batch
}

// ─────────────────────────────────────────────────────────────────────────────
// Queue Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Inserts `requested` immediately after the active id.
///
/// Ids from the batch that were already in the playlist move to their new
/// position next to the active id; all other pre-existing ids keep their
/// order. When there is no active id (or it is not part of the playlist),
/// the batch is placed in front of the existing order.
///
/// # Example
///
/// ```
/// use mediacast_core::queue::queue_next;
///
/// assert_eq!(queue_next(&[1, 2, 3], Some(&2), &[4, 5]), vec![1, 2, 4, 5, 3]);
/// assert_eq!(queue_next(&[1, 2, 3], None, &[4, 5]), vec![4, 5, 1, 2, 3]);
/// ```
#[must_use]
pub fn queue_next<T>(ids: &[T], active: Option<&T>, requested: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let batch = dedup_preserving_order(incoming_batch(ids, active, requested));
    let batch_set: HashSet<&T> = batch.iter().collect();

    let rest: Vec<T> = dedup_preserving_order(
        ids.iter()
            .filter(|id| !batch_set.contains(id))
            .cloned(),
    );

    let Some(split) = active.and_then(|a| rest.iter().position(|id| id == a)) else {
        return batch.into_iter().chain(rest).collect();
    };

    let mut merged = Vec::with_capacity(rest.len() + batch.len());
    merged.extend_from_slice(&rest[..=split]);
    merged.extend(batch);
    merged.extend_from_slice(&rest[split + 1..]);
    merged
}

/// Appends `requested` after every id already in the playlist.
///
/// Ids already present stay where they are; the active id has no effect on
/// placement beyond never being re-added.
///
/// # Example
///
/// ```
/// use mediacast_core::queue::queue_last;
///
/// assert_eq!(queue_last(&[1, 2, 3], Some(&2), &[4, 1]), vec![1, 2, 3, 4]);
/// ```
#[must_use]
pub fn queue_last<T>(ids: &[T], active: Option<&T>, requested: &[T]) -> Vec<T>
where
    T: Clone + Eq + Hash,
{
    let existing = dedup_preserving_order(ids.iter().cloned());
    let present: HashSet<&T> = existing.iter().collect();

    let appended: Vec<T> = dedup_preserving_order(
        incoming_batch(ids, active, requested)
            .into_iter()
            .filter(|id| !present.contains(id)),
    );

    existing.into_iter().chain(appended).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Shuffle
// ─────────────────────────────────────────────────────────────────────────────

/// Returns the ids in uniformly random order using the supplied RNG.
///
/// Fisher-Yates: walk from the last index down to 1, swapping each slot with
/// a uniformly chosen index in `0..=i`.
#[must_use]
pub fn shuffle<T, R>(ids: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut out = ids.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Returns the ids in uniformly random order using the thread-local RNG.
#[must_use]
pub fn shuffle_ids<T: Clone>(ids: &[T]) -> Vec<T> {
    shuffle(ids, &mut rand::thread_rng())
}
