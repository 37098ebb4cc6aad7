use std::cmp::Ordering;

use crate::deal::{Link, NIL};

/// Words of scratch a winner tree over `num_piles` piles needs.
#[inline]
pub(crate) const fn tree_len(num_piles: usize) -> usize {
    4 * num_piles.next_power_of_two()
}

/// [`tree_len`] for pile counts that may not fit, `None` on overflow.
#[inline]
pub(crate) const fn checked_tree_len(num_piles: usize) -> Option<usize> {
    match num_piles.checked_next_power_of_two() {
        Some(leaves) => leaves.checked_mul(4),
        None => None,
    }
}

/// Array-encoded winner tree over the pile heads.
///
/// Node 1 is the root, leaves live at `leaves..2 * leaves` and the opponent
/// of any node is found by flipping its lowest bit. Every node records the
/// winning link and the pile it came from. Padding leaves hold `NIL`.
struct WinnerTree<'a> {
    value: &'a mut [Link],
    pile: &'a mut [usize],
    leaves: usize,
}

impl<'a> WinnerTree<'a> {
    fn build<C>(storage: &'a mut [Link], heads: &[Link], compare: &mut C) -> Self
    where
        C: FnMut(usize, usize) -> Ordering,
    {
        let leaves = heads.len().next_power_of_two();
        let (value, pile) = storage[..tree_len(heads.len())].split_at_mut(2 * leaves);
        value.fill(NIL);
        pile.fill(0);

        for (i, &head) in heads.iter().enumerate() {
            value[leaves + i] = head;
            pile[leaves + i] = i;
        }

        let mut tree = Self {
            value,
            pile,
            leaves,
        };
        for node in (1..leaves).rev() {
            tree.play(node, compare);
        }
        tree
    }

    #[inline(always)]
    fn play<C>(&mut self, node: usize, compare: &mut C)
    where
        C: FnMut(usize, usize) -> Ordering,
    {
        let left = node << 1;
        let right = left | 1;
        let winner = if beats(compare, self.value[right], self.value[left]) {
            right
        } else {
            left
        };
        self.value[node] = self.value[winner];
        self.pile[node] = self.pile[winner];
    }

    /// Takes the root winner, refills its leaf from the same pile and replays
    /// only that leaf's path to the root.
    fn pop<C>(&mut self, links: &[Link], compare: &mut C) -> Option<usize>
    where
        C: FnMut(usize, usize) -> Ordering,
    {
        let top = self.value[1];
        if top == NIL {
            return None;
        }

        let leaf = self.leaves + self.pile[1];
        self.value[leaf] = links[top - 1];

        let mut node = leaf >> 1;
        while node != 0 {
            self.play(node, compare);
            node >>= 1;
        }

        Some(top - 1)
    }
}

/// Whether `challenger` takes the node from `holder`. `NIL` never wins, and
/// equal elements go to the earlier input position.
#[inline(always)]
fn beats<C>(compare: &mut C, challenger: Link, holder: Link) -> bool
where
    C: FnMut(usize, usize) -> Ordering,
{
    if challenger == NIL {
        return false;
    }
    if holder == NIL {
        return true;
    }
    match compare(challenger - 1, holder - 1) {
        Ordering::Less => true,
        Ordering::Equal => challenger < holder,
        Ordering::Greater => false,
    }
}

/// k-way merges the dealt piles, calling `emit(rank, index)` once per element
/// in sorted order with 0-based indices.
pub(crate) fn merge<C, E>(
    links: &[Link],
    heads: &[Link],
    storage: &mut [Link],
    compare: &mut C,
    mut emit: E,
) where
    C: FnMut(usize, usize) -> Ordering,
    E: FnMut(usize, usize),
{
    if heads.is_empty() {
        return;
    }

    let mut tree = WinnerTree::build(storage, heads, compare);
    let mut rank = 0usize;
    while let Some(index) = tree.pop(links, compare) {
        emit(rank, index);
        rank += 1;
    }
    debug_assert_eq!(rank, links.len());
}
