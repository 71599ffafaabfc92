use crate::Cost;
use thiserror::Error;

/// The side of the alignment a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

/// Errors raised at the boundary, before any table is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{op} cost must be non-negative, got {cost}")]
    NegativeCost { op: &'static str, cost: Cost },

    #[error("{side} contains the placeholder {placeholder:?} at position {pos}")]
    PlaceholderInInput {
        placeholder: char,
        side: Side,
        pos: usize,
    },

    #[error("costs of aligning sequences of length {m} and {n} overflow the cost type")]
    CostOverflow { m: usize, n: usize },

    #[error("cannot allocate a cost table of {rows}x{cols} cells")]
    TableAlloc { rows: usize, cols: usize },
}
