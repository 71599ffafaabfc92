//! Needleman-Wunsch for linear edit costs: fill the full cost table, then
//! trace back one canonical optimal alignment.

mod table;
mod trace;

pub use table::{CostTable, Fill, TableDisplay};
pub use trace::{alignment_len, traceback};

use ea_types::*;
use serde::{Deserialize, Serialize};

/// Needleman-Wunsch aligner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NW {
    /// The cost model to use.
    pub cm: LinearCost,

    /// Marker written in the source row for insertions and in the target row
    /// for deletions. May not occur in the input.
    pub placeholder: u8,

    /// The order in which the table is filled.
    pub fill: Fill,
}

impl Default for NW {
    fn default() -> Self {
        Self::new(LinearCost::unit())
    }
}

impl NW {
    pub fn new(cm: LinearCost) -> Self {
        NW {
            cm,
            placeholder: PLACEHOLDER,
            fill: Fill::default(),
        }
    }

    /// The tie-break policy used for this cost model.
    pub fn tie_break(&self) -> TieBreak {
        TieBreak::for_costs(&self.cm)
    }

    /// Reject inputs that contain the placeholder.
    fn validate(&self, a: Seq, b: Seq) -> Result<(), Error> {
        for (side, seq) in [(Side::Source, a), (Side::Target, b)] {
            if let Some(pos) = seq.iter().position(|&c| c == self.placeholder) {
                return Err(Error::PlaceholderInInput {
                    placeholder: self.placeholder as char,
                    side,
                    pos,
                });
            }
        }
        Ok(())
    }

    /// Only build the cost table.
    pub fn table(&self, a: Seq, b: Seq) -> Result<CostTable, Error> {
        self.validate(a, b)?;
        log::debug!(
            "building {}x{} table with {:?} fill",
            a.len() + 1,
            b.len() + 1,
            self.fill
        );
        CostTable::build(a, b, &self.cm, self.fill)
    }

    /// Build the cost table and trace an optimal alignment.
    pub fn compute(&self, a: Seq, b: Seq) -> Result<(CostTable, Alignment), Error> {
        let table = self.table(a, b)?;
        let tie = self.tie_break();
        log::debug!("cost {}, tracing back {tie:?}", table.cost());
        let alignment = traceback(&table, a, b, &self.cm, tie, self.placeholder);
        Ok((table, alignment))
    }

    /// The optimal cost only.
    pub fn cost(&self, a: Seq, b: Seq) -> Result<Cost, Error> {
        Ok(self.table(a, b)?.cost())
    }
}

impl Aligner for NW {
    fn align(&mut self, a: Seq, b: Seq) -> Result<(Cost, Cigar), Error> {
        let (table, alignment) = self.compute(a, b)?;
        Ok((table.cost(), alignment.to_cigar()))
    }
}

/// Compute the cost table and the canonical optimal alignment of `source`
/// into `target` with `*` as placeholder.
pub fn compute_alignment(
    source: Seq,
    target: Seq,
    insert_cost: Cost,
    delete_cost: Cost,
    substitute_cost: Cost,
) -> Result<(CostTable, Alignment), Error> {
    let cm = LinearCost::new(insert_cost, delete_cost, substitute_cost)?;
    NW::new(cm).compute(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_placeholder() {
        assert_eq!(
            compute_alignment(b"ab*", b"ab", 1, 1, 1).unwrap_err(),
            Error::PlaceholderInInput {
                placeholder: '*',
                side: Side::Source,
                pos: 2
            }
        );
        let nw = NW {
            placeholder: b'-',
            ..NW::default()
        };
        assert!(nw.compute(b"ab*", b"ab").is_ok());
        assert_eq!(
            nw.compute(b"ab", b"-").unwrap_err(),
            Error::PlaceholderInInput {
                placeholder: '-',
                side: Side::Target,
                pos: 0
            }
        );
    }

    #[test]
    fn rejects_negative_costs() {
        assert!(matches!(
            compute_alignment(b"a", b"b", 1, -1, 1),
            Err(Error::NegativeCost { op: "deletion", .. })
        ));
    }

    #[test]
    fn rejects_overflowing_costs() {
        assert!(matches!(
            compute_alignment(b"aaaa", b"bbbb", Cost::MAX / 4, Cost::MAX / 4, 1),
            Err(Error::CostOverflow { m: 4, n: 4 })
        ));
    }

    #[test]
    fn aligner_trait() {
        let mut nw = NW::default();
        let (cost, cigar) = nw.align(b"kitten", b"sitting").unwrap();
        assert_eq!(cost, 3);
        assert_eq!(cigar.verify(&nw.cm, b"kitten", b"sitting"), 3);
    }
}
