use std::alloc::{Layout, handle_alloc_error};
use std::mem;
use std::ops::{Deref, DerefMut};

use tracing::{debug, error, trace};

use crate::TUNED_PARAMS;
use crate::deal::Link;
use crate::error::{SortError, SortResult};
use crate::tournament;

/// Arena words on the stack: links and heads for `stack_threshold` elements
/// plus the largest winner tree that many piles can need.
pub(crate) const STACK_ARENA_LEN: usize = 2 * TUNED_PARAMS.stack_threshold
    + tournament::tree_len(TUNED_PARAMS.stack_threshold);
pub(crate) const STACK_INDICES: usize = TUNED_PARAMS.stack_threshold;
pub(crate) const STACK_BYTES: usize = TUNED_PARAMS.stack_bytes;

/// Call-local scratch buffer: a fixed array while `len <= N`, a `Vec` beyond.
pub(crate) enum Scratch<T, const N: usize> {
    Stack { buf: [T; N], len: usize },
    Heap(Vec<T>),
}

impl<T: Copy + Default, const N: usize> Scratch<T, N> {
    pub(crate) fn new(len: usize) -> Self {
        if len <= N {
            Self::Stack {
                buf: [T::default(); N],
                len,
            }
        } else {
            Self::Heap(heap_alloc(len))
        }
    }

    pub(crate) fn on_heap(len: usize) -> Self {
        Self::Heap(heap_alloc(len))
    }

    pub(crate) fn is_on_stack(&self) -> bool {
        matches!(self, Self::Stack { .. })
    }

    /// Grows to `new_len` keeping the current contents. Added slots are
    /// `T::default()`. Never shrinks.
    pub(crate) fn grow(&mut self, new_len: usize) {
        match self {
            Self::Stack { buf, len } if new_len <= N => {
                if new_len > *len {
                    buf[*len..new_len].fill(T::default());
                    *len = new_len;
                }
            }
            Self::Stack { buf, len } => {
                let mut heap = heap_alloc(new_len);
                heap[..*len].copy_from_slice(&buf[..*len]);
                *self = Self::Heap(heap);
            }
            Self::Heap(v) => {
                if new_len > v.len() {
                    if v.try_reserve_exact(new_len - v.len()).is_err() {
                        alloc_failed::<T>(new_len);
                    }
                    v.resize(new_len, T::default());
                }
            }
        }
    }
}

impl<T, const N: usize> Deref for Scratch<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        match self {
            Self::Stack { buf, len } => &buf[..*len],
            Self::Heap(v) => v,
        }
    }
}

impl<T, const N: usize> DerefMut for Scratch<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        match self {
            Self::Stack { buf, len } => &mut buf[..*len],
            Self::Heap(v) => v,
        }
    }
}

fn heap_alloc<T: Copy + Default>(len: usize) -> Vec<T> {
    let mut v = Vec::new();
    if v.try_reserve_exact(len).is_err() {
        alloc_failed::<T>(len);
    }
    v.resize(len, T::default());
    v
}

#[cold]
fn alloc_failed<T>(len: usize) -> ! {
    let bytes = len.saturating_mul(mem::size_of::<T>());
    error!(len, bytes, "patience sort scratch allocation failed");
    handle_alloc_error(Layout::array::<T>(len).unwrap_or_else(|_| Layout::new::<T>()))
}

/// Arena words once the winner tree over `num_piles` piles is in place:
/// `2 * n` for links and heads plus the larger of the tails and the tree.
/// `None` when that does not fit in `usize`.
pub(crate) fn arena_len(n: usize, num_piles: usize) -> Option<usize> {
    let shared = tournament::checked_tree_len(num_piles)?.max(n);
    n.checked_mul(2)?.checked_add(shared)
}

/// Rejects element counts whose worst-case arena cannot be sized.
pub(crate) fn ensure_arena_fits(n: usize) -> SortResult<()> {
    match arena_len(n, n) {
        Some(_) => Ok(()),
        None => Err(SortError::TooManyElements { n }),
    }
}

/// Per-call arena laid out as `[links: n][heads: n][shared]`.
///
/// `shared` holds the pile tails while dealing and the winner tree while
/// merging. The two views borrow the arena mutably, so one has to be dropped
/// before the other can be taken.
pub(crate) struct Arena {
    words: Scratch<Link, STACK_ARENA_LEN>,
    n: usize,
}

pub(crate) struct DealView<'a> {
    pub(crate) links: &'a mut [Link],
    pub(crate) heads: &'a mut [Link],
    pub(crate) tails: &'a mut [Link],
}

pub(crate) struct MergeView<'a> {
    pub(crate) links: &'a [Link],
    pub(crate) heads: &'a [Link],
    pub(crate) tree: &'a mut [Link],
}

impl Arena {
    pub(crate) fn new(n: usize) -> Self {
        let Some(len) = n.checked_mul(3) else {
            alloc_failed::<Link>(usize::MAX)
        };
        let words = if n <= TUNED_PARAMS.stack_threshold {
            Scratch::new(len)
        } else {
            Scratch::on_heap(len)
        };
        trace!(n, on_stack = words.is_on_stack(), "patience sort arena");
        Self { words, n }
    }

    pub(crate) fn deal_view(&mut self) -> DealView<'_> {
        let n = self.n;
        let (links, rest) = self.words.split_at_mut(n);
        let (heads, shared) = rest.split_at_mut(n);
        DealView {
            links,
            heads,
            tails: &mut shared[..n],
        }
    }

    /// Switches `shared` over to a winner tree over `num_piles` piles,
    /// growing the arena only if the tree does not fit in the tail slots.
    pub(crate) fn merge_view(&mut self, num_piles: usize) -> MergeView<'_> {
        let n = self.n;
        let Some(needed) = arena_len(n, num_piles) else {
            alloc_failed::<Link>(usize::MAX)
        };
        let tree_len = tournament::tree_len(num_piles);
        if needed > self.words.len() {
            debug!(n, num_piles, tree_len, "growing patience sort arena for winner tree");
            self.words.grow(needed);
        }

        let (links, rest) = self.words.split_at_mut(n);
        let (heads, shared) = rest.split_at_mut(n);
        MergeView {
            links,
            heads: &heads[..num_piles],
            tree: &mut shared[..tree_len],
        }
    }
}
