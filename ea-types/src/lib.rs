//! Types shared by the edit alignment crates.

pub mod alignment;
pub mod cigar;
pub mod cost_model;
pub mod error;

// Re-export types for convenience of `use ea_types::*;`.
pub use alignment::*;
pub use cigar::*;
pub use cost_model::*;
pub use error::*;

/// Type for storing costs.
///
/// Signed, so that negative user input can be detected and rejected.
pub type Cost = i32;

/// An owned sequence.
pub type Sequence = Vec<u8>;
/// A sequence slice.
pub type Seq<'a> = &'a [u8];

/// The default placeholder marking that no character was consumed on one side.
pub const PLACEHOLDER: u8 = b'*';

pub fn seq_to_string(seq: Seq) -> String {
    String::from_utf8_lossy(seq).into_owned()
}

/// An aligner is a type that finds a minimal cost alignment of two sequences.
///
/// Note that insertions are when `b` has more characters than `a`, and
/// deletions are when `b` has less characters than `a`.
pub trait Aligner: std::fmt::Debug {
    /// Finds the cost and a cigar of an optimal alignment of `a` and `b`.
    fn align(&mut self, a: Seq, b: Seq) -> Result<(Cost, Cigar), Error>;
}
