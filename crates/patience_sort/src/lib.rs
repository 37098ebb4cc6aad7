//! Stable patience sort.
//!
//! Elements are dealt, last to first, into piles that grow at both ends, and
//! the piles are then k-way merged through a winner tree. Nearly sorted input
//! (either direction) deals into very few piles, so the sort adapts to it.
//!
//! Every entry point comes in three result shapes: the sorted index
//! permutation, a sorted copy in a caller buffer, and an in-place sort. The
//! [`raw`] module offers the same over untyped byte buffers with a stride.

mod deal;
mod error;
pub mod raw;
mod tournament;
mod workspace;

use std::cmp::Ordering;

use tracing::trace;

pub use error::{SortError, SortResult};

use workspace::{Arena, DealView, MergeView, STACK_INDICES, Scratch, ensure_arena_fits};

#[derive(Clone, Copy, Debug)]
pub struct TunedParams {
    /// Largest element count whose pile bookkeeping and winner tree live on
    /// the stack.
    pub stack_threshold: usize,
    /// Largest temporary buffer, in bytes, that [`raw::sort_in_place`] keeps
    /// on the stack.
    pub stack_bytes: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    stack_threshold: 128,
    stack_bytes: 4096,
};

/// Sorts positions `0..len` under `compare` and reports them in order as
/// `emit(rank, index)`.
fn sort_positions<C, E>(len: usize, mut compare: C, emit: E)
where
    C: FnMut(usize, usize) -> Ordering,
    E: FnMut(usize, usize),
{
    if len == 0 {
        return;
    }

    let mut arena = Arena::new(len);
    let num_piles = {
        let DealView {
            links,
            heads,
            tails,
        } = arena.deal_view();
        deal::deal(links, heads, tails, &mut compare)
    };

    let MergeView { links, heads, tree } = arena.merge_view(num_piles);
    trace!(len, num_piles, tree_len = tree.len(), "dealt piles");
    tournament::merge(links, heads, tree, &mut compare, emit);
}

/// Writes into `result` the original index of each element of `v`, in stable
/// sorted order.
fn fill_indices<T, F>(v: &[T], result: &mut [usize], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert_eq!(v.len(), result.len());
    sort_positions(
        v.len(),
        |a, b| compare(&v[a], &v[b]),
        |rank, index| result[rank] = index,
    );
}

pub fn sort_indices<T: Ord>(v: &[T]) -> Vec<usize> {
    sort_indices_by(v, |a, b| a.cmp(b))
}

/// Returns the stable sorting permutation of `v`: `v[result[0]]` is the
/// smallest element, and equal elements keep their input order.
pub fn sort_indices_by<T, F>(v: &[T], compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut result = vec![0; v.len()];
    fill_indices(v, &mut result, compare);
    result
}

/// Like [`sort_indices_by`], writing into a caller buffer of length `v.len()`.
pub fn sort_indices_into_by<T, F>(v: &[T], result: &mut [usize], compare: F) -> SortResult<()>
where
    F: FnMut(&T, &T) -> Ordering,
{
    error::ensure_len(v.len(), result.len())?;
    ensure_arena_fits(v.len())?;
    fill_indices(v, result, compare);
    Ok(())
}

pub fn sort_indices_with_context<T, X, F>(v: &[T], context: &mut X, mut compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T, &mut X) -> Ordering,
{
    sort_indices_by(v, |a, b| compare(a, b, context))
}

/// Writes the elements of `v` into `dst` in stable sorted order. `dst` must
/// have the same length as `v`; it is left untouched otherwise.
pub fn sort_to_buffer_by<T, F>(v: &[T], dst: &mut [T], mut compare: F) -> SortResult<()>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    error::ensure_len(v.len(), dst.len())?;
    ensure_arena_fits(v.len())?;
    sort_positions(
        v.len(),
        |a, b| compare(&v[a], &v[b]),
        |rank, index| dst[rank].clone_from(&v[index]),
    );
    Ok(())
}

pub fn sort_to_buffer_with_context<T, X, F>(
    v: &[T],
    dst: &mut [T],
    context: &mut X,
    mut compare: F,
) -> SortResult<()>
where
    T: Clone,
    F: FnMut(&T, &T, &mut X) -> Ordering,
{
    sort_to_buffer_by(v, dst, |a, b| compare(a, b, context))
}

pub fn sort_in_place<T: Ord>(v: &mut [T]) {
    sort_in_place_by(v, |a, b| a.cmp(b));
}

/// Sorts `v` stably. The sorted permutation is computed first and then
/// applied with swaps, so `T` needs no `Clone`.
pub fn sort_in_place_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let mut order = Scratch::<usize, STACK_INDICES>::new(len);
    fill_indices(v, &mut order, compare);
    apply_permutation(v, &mut order);
}

pub fn sort_in_place_with_context<T, X, F>(v: &mut [T], context: &mut X, mut compare: F)
where
    F: FnMut(&T, &T, &mut X) -> Ordering,
{
    sort_in_place_by(v, |a, b| compare(a, b, context));
}

/// Rearranges `v` so that the new `v[k]` is the old `v[order[k]]`, following
/// each cycle once. `order` is consumed: every visited slot is reset to its
/// own position.
fn apply_permutation<T>(v: &mut [T], order: &mut [usize]) {
    debug_assert_eq!(v.len(), order.len());
    for start in 0..v.len() {
        let mut cur = start;
        loop {
            let next = order[cur];
            order[cur] = cur;
            if next == start {
                break;
            }
            v.swap(cur, next);
            cur = next;
        }
    }
}
