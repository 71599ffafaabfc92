use crate::{Cost, LinearCost, Seq};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single edit operation.
///
/// `Ins` consumes a character of the target `b`, `Del` one of the source `a`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum CigarOp {
    Match,
    Sub,
    Ins,
    Del,
}

impl CigarOp {
    /// The character used in CIGAR strings.
    pub fn to_char(&self) -> char {
        match self {
            CigarOp::Match => '=',
            CigarOp::Sub => 'X',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
        }
    }

    /// The character used in the operation row of a printed alignment.
    pub fn tag(&self) -> u8 {
        match self {
            CigarOp::Match => b'.',
            CigarOp::Sub => b's',
            CigarOp::Ins => b'i',
            CigarOp::Del => b'd',
        }
    }

    pub fn cost(&self, cm: &LinearCost) -> Cost {
        match self {
            CigarOp::Match => 0,
            CigarOp::Sub => cm.sub(),
            CigarOp::Ins => cm.ins(),
            CigarOp::Del => cm.del(),
        }
    }

    /// Number of characters of `a` and `b` this operation consumes.
    pub fn delta(&self) -> (usize, usize) {
        match self {
            CigarOp::Match | CigarOp::Sub => (1, 1),
            CigarOp::Ins => (0, 1),
            CigarOp::Del => (1, 0),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub struct CigarElem {
    pub op: CigarOp,
    pub cnt: usize,
}

/// Run-length encoded operations.
#[derive(Debug, Default, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Cigar {
    pub ops: Vec<CigarElem>,
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for elem in &self.ops {
            write!(f, "{}{}", elem.cnt, elem.op.to_char())?;
        }
        Ok(())
    }
}

impl FromIterator<CigarOp> for Cigar {
    fn from_iter<T: IntoIterator<Item = CigarOp>>(iter: T) -> Self {
        let mut cigar = Cigar::default();
        for op in iter {
            cigar.push(op);
        }
        cigar
    }
}

impl<'a> IntoIterator for &'a Cigar {
    type Item = &'a CigarElem;
    type IntoIter = std::slice::Iter<'a, CigarElem>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl Cigar {
    pub fn push(&mut self, op: CigarOp) {
        if let Some(s) = self.ops.last_mut() {
            if s.op == op {
                s.cnt += 1;
                return;
            }
        }
        self.ops.push(CigarElem { op, cnt: 1 });
    }

    /// Iterate the uncompressed operations.
    pub fn iter_ops(&self) -> impl Iterator<Item = CigarOp> + '_ {
        self.ops
            .iter()
            .flat_map(|elem| std::iter::repeat(elem.op).take(elem.cnt))
    }

    /// Replay the cigar on `a` and `b` and return its cost.
    ///
    /// Panics when the cigar is not a valid alignment of `a` and `b`.
    pub fn verify(&self, cm: &LinearCost, a: Seq, b: Seq) -> Cost {
        let (mut i, mut j) = (0, 0);
        let mut cost = 0;
        for op in self.iter_ops() {
            match op {
                CigarOp::Match => assert_eq!(a.get(i), b.get(j), "Match at ({i}, {j})"),
                CigarOp::Sub => {
                    assert!(i < a.len() && j < b.len(), "Sub out of bounds at ({i}, {j})");
                    assert_ne!(a[i], b[j], "Sub of equal characters at ({i}, {j})");
                }
                CigarOp::Ins => assert!(j < b.len(), "Ins out of bounds at ({i}, {j})"),
                CigarOp::Del => assert!(i < a.len(), "Del out of bounds at ({i}, {j})"),
            }
            let (di, dj) = op.delta();
            i += di;
            j += dj;
            cost += op.cost(cm);
        }
        assert_eq!((i, j), (a.len(), b.len()), "Cigar does not end in the corner");
        cost
    }
}
