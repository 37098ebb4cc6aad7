use thiserror::Error;

/// Arguments a sort call rejects before touching any buffer.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum SortError {
    #[error("{n} elements of {element_size} bytes overflow usize")]
    SizeOverflow { n: usize, element_size: usize },

    #[error("buffer holds {len} bytes but {needed} are required")]
    BufferTooShort { needed: usize, len: usize },

    #[error("{n} elements exceed the sort's addressable bookkeeping")]
    TooManyElements { n: usize },

    #[error("output holds {actual} elements but the input has {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type SortResult<T> = Result<T, SortError>;

pub(crate) fn ensure_len(expected: usize, actual: usize) -> SortResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SortError::LengthMismatch { expected, actual })
    }
}
