use std::cmp::Ordering;

/// 1-based element position. `NIL` ends a pile and marks an empty slot.
pub(crate) type Link = usize;

pub(crate) const NIL: Link = 0;

#[inline(always)]
fn precedes<C>(compare: &mut C, a: Link, b: Link) -> bool
where
    C: FnMut(usize, usize) -> Ordering,
{
    debug_assert!(a != NIL && b != NIL);
    compare(a - 1, b - 1) == Ordering::Less
}

/// Deals `1..=links.len()` into piles and returns the pile count.
///
/// Dealing runs from the last element to the first, so input that is already
/// ascending ends up in one pile built only by consing, and strictly
/// descending input in one pile built only by appending. Each pile, read
/// from its head through `links`, is non-decreasing and keeps equal elements
/// in input order.
///
/// On return `heads[..count]` is non-decreasing and `tails[..count]` is
/// non-increasing by pile position.
pub(crate) fn deal<C>(
    links: &mut [Link],
    heads: &mut [Link],
    tails: &mut [Link],
    compare: &mut C,
) -> usize
where
    C: FnMut(usize, usize) -> Ordering,
{
    let n = links.len();
    debug_assert!(heads.len() >= n && tails.len() >= n);

    links.fill(NIL);
    let mut num_piles = 0usize;

    for q in (1..=n).rev() {
        let i = find_pile(&heads[..num_piles], q, compare);
        if i != num_piles {
            links[q - 1] = heads[i];
            heads[i] = q;
            continue;
        }

        let i = find_tail(&tails[..num_piles], q, compare);
        if i != num_piles {
            links[tails[i] - 1] = q;
            tails[i] = q;
        } else {
            heads[num_piles] = q;
            tails[num_piles] = q;
            num_piles += 1;
        }
    }

    num_piles
}

/// Bottenbruch search for the leftmost pile whose head does not sort before
/// `q`. Returns `heads.len()` when there is none.
fn find_pile<C>(heads: &[Link], q: Link, compare: &mut C) -> usize
where
    C: FnMut(usize, usize) -> Ordering,
{
    let Some(last) = heads.len().checked_sub(1) else {
        return 0;
    };

    let mut j = 0usize;
    let mut k = last;
    while j != k {
        let i = j + ((k - j) >> 1);
        if precedes(compare, heads[i], q) {
            j = i + 1;
        } else {
            k = i;
        }
    }

    if precedes(compare, heads[j], q) {
        heads.len()
    } else {
        j
    }
}

/// Bottenbruch search for the leftmost pile whose tail sorts strictly before
/// `q`. Tails shrink to the right, so every pile from the answer onward
/// qualifies; picking the boundary keeps the tails ordered after the append.
/// Returns `tails.len()` when there is none.
fn find_tail<C>(tails: &[Link], q: Link, compare: &mut C) -> usize
where
    C: FnMut(usize, usize) -> Ordering,
{
    let Some(last) = tails.len().checked_sub(1) else {
        return 0;
    };

    let mut j = 0usize;
    let mut k = last;
    while j != k {
        let i = j + ((k - j) >> 1);
        if precedes(compare, tails[i], q) {
            k = i;
        } else {
            j = i + 1;
        }
    }

    if precedes(compare, tails[j], q) {
        j
    } else {
        tails.len()
    }
}
