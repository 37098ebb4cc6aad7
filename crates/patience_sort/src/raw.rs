//! Type-erased entry points over byte buffers.
//!
//! Element `i` of a buffer is `bytes[i * element_size..(i + 1) * element_size]`.
//! The comparator sees exactly those sub-slices and nothing else. Arguments
//! are validated before any buffer is read or written.

use std::cmp::Ordering;

use crate::error::{SortError, SortResult, ensure_len};
use crate::sort_positions;
use crate::workspace::{STACK_BYTES, Scratch, ensure_arena_fits};

/// Bytes covered by `n` elements, checked against a buffer of `len` bytes.
fn span(len: usize, n: usize, element_size: usize) -> SortResult<usize> {
    let needed = n
        .checked_mul(element_size)
        .ok_or(SortError::SizeOverflow { n, element_size })?;
    if len < needed {
        return Err(SortError::BufferTooShort { needed, len });
    }
    Ok(needed)
}

#[inline(always)]
fn element(bytes: &[u8], element_size: usize, i: usize) -> &[u8] {
    let start = i * element_size;
    &bytes[start..start + element_size]
}

/// Writes into `result` the original index of each of the `n` elements of
/// `base`, in stable sorted order.
pub fn sort_indices<F>(
    base: &[u8],
    n: usize,
    element_size: usize,
    mut compare: F,
    result: &mut [usize],
) -> SortResult<()>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    span(base.len(), n, element_size)?;
    ensure_len(n, result.len())?;
    ensure_arena_fits(n)?;

    sort_positions(
        n,
        |a, b| compare(element(base, element_size, a), element(base, element_size, b)),
        |rank, index| result[rank] = index,
    );
    Ok(())
}

pub fn sort_indices_with_context<X, F>(
    base: &[u8],
    n: usize,
    element_size: usize,
    mut compare: F,
    context: &mut X,
    result: &mut [usize],
) -> SortResult<()>
where
    F: FnMut(&[u8], &[u8], &mut X) -> Ordering,
{
    sort_indices(base, n, element_size, |a, b| compare(a, b, context), result)
}

/// Copies the `n` elements of `base` into `dst` in stable sorted order.
/// `dst` needs room for `n * element_size` bytes; bytes past that are left
/// alone.
pub fn sort_to_buffer<F>(
    base: &[u8],
    n: usize,
    element_size: usize,
    mut compare: F,
    dst: &mut [u8],
) -> SortResult<()>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    span(base.len(), n, element_size)?;
    span(dst.len(), n, element_size)?;
    ensure_arena_fits(n)?;

    sort_positions(
        n,
        |a, b| compare(element(base, element_size, a), element(base, element_size, b)),
        |rank, index| {
            let start = rank * element_size;
            dst[start..start + element_size].copy_from_slice(element(base, element_size, index));
        },
    );
    Ok(())
}

pub fn sort_to_buffer_with_context<X, F>(
    base: &[u8],
    n: usize,
    element_size: usize,
    mut compare: F,
    context: &mut X,
    dst: &mut [u8],
) -> SortResult<()>
where
    F: FnMut(&[u8], &[u8], &mut X) -> Ordering,
{
    sort_to_buffer(base, n, element_size, |a, b| compare(a, b, context), dst)
}

/// Sorts the first `n` elements of `base` stably.
///
/// The elements are sorted into a temporary buffer, on the stack when it
/// fits in `TUNED_PARAMS.stack_bytes`, and then copied back in one go.
pub fn sort_in_place<F>(
    base: &mut [u8],
    n: usize,
    element_size: usize,
    compare: F,
) -> SortResult<()>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    let needed = span(base.len(), n, element_size)?;
    ensure_arena_fits(n)?;
    if n < 2 {
        return Ok(());
    }

    let mut sorted = Scratch::<u8, STACK_BYTES>::new(needed);
    sort_to_buffer(base, n, element_size, compare, &mut sorted)?;
    base[..needed].copy_from_slice(&sorted);
    Ok(())
}

pub fn sort_in_place_with_context<X, F>(
    base: &mut [u8],
    n: usize,
    element_size: usize,
    mut compare: F,
    context: &mut X,
) -> SortResult<()>
where
    F: FnMut(&[u8], &[u8], &mut X) -> Ordering,
{
    sort_in_place(base, n, element_size, |a, b| compare(a, b, context))
}
