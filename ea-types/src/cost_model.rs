//! This module contains the `LinearCost` cost model.

use crate::{Cost, Error};
use serde::{Deserialize, Serialize};

/// Linear costs for substitutions, insertions and deletions.
///
/// Matches are always free. The fields are private so that every instance has
/// passed the non-negativity check in `LinearCost::new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCosts")]
pub struct LinearCost {
    sub: Cost,
    ins: Cost,
    del: Cost,
}

#[derive(Deserialize)]
struct RawCosts {
    sub: Cost,
    ins: Cost,
    del: Cost,
}

impl TryFrom<RawCosts> for LinearCost {
    type Error = Error;
    fn try_from(RawCosts { sub, ins, del }: RawCosts) -> Result<Self, Error> {
        LinearCost::new(ins, del, sub)
    }
}

impl Default for LinearCost {
    fn default() -> Self {
        Self::unit()
    }
}

impl LinearCost {
    /// Argument order follows `insert, delete, substitute`.
    pub fn new(ins: Cost, del: Cost, sub: Cost) -> Result<Self, Error> {
        for (op, cost) in [("insertion", ins), ("deletion", del), ("substitution", sub)] {
            if cost < 0 {
                return Err(Error::NegativeCost { op, cost });
            }
        }
        Ok(LinearCost { sub, ins, del })
    }

    /// Levenshtein distance: all edits cost 1.
    pub fn unit() -> Self {
        LinearCost {
            sub: 1,
            ins: 1,
            del: 1,
        }
    }

    pub fn linear(sub: Cost, indel: Cost) -> Result<Self, Error> {
        Self::new(indel, indel, sub)
    }

    #[inline]
    pub fn sub(&self) -> Cost {
        self.sub
    }
    #[inline]
    pub fn ins(&self) -> Cost {
        self.ins
    }
    #[inline]
    pub fn del(&self) -> Cost {
        self.del
    }

    /// The cost of aligning character `ca` against `cb` on the diagonal.
    #[inline]
    pub fn diagonal(&self, ca: u8, cb: u8) -> Cost {
        if ca == cb {
            0
        } else {
            self.sub
        }
    }

    /// Swap insertion and deletion costs, the cost model of aligning `b` to `a`.
    pub fn mirror(&self) -> Self {
        LinearCost {
            sub: self.sub,
            ins: self.del,
            del: self.ins,
        }
    }

    /// Check that every cell of an `(m+1)x(n+1)` table, including the
    /// candidates that are compared against each other, fits in `Cost`.
    ///
    /// Cell `(i, j)` is at most `i*del + j*ins`, and candidates exceed their
    /// cell by at most `sub`.
    pub fn check_bounds(&self, m: usize, n: usize) -> Result<(), Error> {
        let overflow = || Error::CostOverflow { m, n };
        let m = i64::try_from(m).map_err(|_| overflow())?;
        let n = i64::try_from(n).map_err(|_| overflow())?;
        let max = m
            .checked_mul(self.del as i64)
            .and_then(|x| x.checked_add(n.checked_mul(self.ins as i64)?))
            .and_then(|x| x.checked_add(self.sub.max(self.ins).max(self.del) as i64))
            .ok_or_else(overflow)?;
        if max > Cost::MAX as i64 {
            return Err(overflow());
        }
        Ok(())
    }
}

/// Which of insertion and deletion is preferred when both reach a cell at
/// equal cost during traceback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    InsertionFirst,
    DeletionFirst,
}

impl TieBreak {
    /// The cheaper gap operation wins ties. Equal costs prefer insertions.
    pub fn for_costs(cm: &LinearCost) -> Self {
        if cm.ins() <= cm.del() {
            TieBreak::InsertionFirst
        } else {
            TieBreak::DeletionFirst
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_costs_are_rejected() {
        assert_eq!(
            LinearCost::new(-1, 1, 1),
            Err(Error::NegativeCost {
                op: "insertion",
                cost: -1
            })
        );
        assert_eq!(
            LinearCost::new(1, 1, -3),
            Err(Error::NegativeCost {
                op: "substitution",
                cost: -3
            })
        );
        assert!(LinearCost::new(0, 0, 0).is_ok());
    }

    #[test]
    fn tie_break_prefers_cheaper_gap() {
        let cm = LinearCost::new(1, 1, 1).unwrap();
        assert_eq!(TieBreak::for_costs(&cm), TieBreak::InsertionFirst);
        let cm = LinearCost::new(2, 3, 1).unwrap();
        assert_eq!(TieBreak::for_costs(&cm), TieBreak::InsertionFirst);
        let cm = LinearCost::new(3, 2, 1).unwrap();
        assert_eq!(TieBreak::for_costs(&cm), TieBreak::DeletionFirst);
    }

    #[test]
    fn bounds() {
        let cm = LinearCost::unit();
        assert!(cm.check_bounds(1000, 1000).is_ok());
        let cm = LinearCost::new(Cost::MAX / 2, Cost::MAX / 2, 1).unwrap();
        assert!(cm.check_bounds(1, 0).is_ok());
        assert_eq!(
            cm.check_bounds(2, 2),
            Err(Error::CostOverflow { m: 2, n: 2 })
        );
    }

    #[test]
    fn deserialize_validates() {
        let cm: LinearCost = serde_json::from_str(r#"{"sub":2,"ins":1,"del":3}"#).unwrap();
        assert_eq!(cm, LinearCost::new(1, 3, 2).unwrap());
        assert!(serde_json::from_str::<LinearCost>(r#"{"sub":2,"ins":-1,"del":3}"#).is_err());
    }
}
