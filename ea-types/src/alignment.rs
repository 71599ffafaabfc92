use crate::{Cigar, CigarOp, Cost, LinearCost, Sequence};
use serde::{Deserialize, Serialize};

/// An alignment as three parallel rows of equal length.
///
/// `source` holds the placeholder where a character was inserted, `target`
/// holds it where a character was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub source: Sequence,
    pub ops: Vec<CigarOp>,
    pub target: Sequence,
    pub placeholder: u8,
}

impl Alignment {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The source row with insertion placeholders removed.
    pub fn source_ungapped(&self) -> Sequence {
        strip(&self.source, &self.ops, CigarOp::Ins)
    }

    /// The target row with deletion placeholders removed.
    pub fn target_ungapped(&self) -> Sequence {
        strip(&self.target, &self.ops, CigarOp::Del)
    }

    /// The operation row, one tag character per column.
    pub fn ops_string(&self) -> String {
        self.ops.iter().map(|op| op.tag() as char).collect()
    }

    pub fn cost(&self, cm: &LinearCost) -> Cost {
        self.ops.iter().map(|op| op.cost(cm)).sum()
    }

    pub fn count(&self, op: CigarOp) -> usize {
        self.ops.iter().filter(|&&o| o == op).count()
    }

    /// The run-length encoded operations. A match column pairing two different
    /// characters, which only occurs with free substitutions, becomes `X`.
    pub fn to_cigar(&self) -> Cigar {
        self.ops
            .iter()
            .zip(self.source.iter().zip(&self.target))
            .map(|(&op, (ca, cb))| match op {
                CigarOp::Match if ca != cb => CigarOp::Sub,
                op => op,
            })
            .collect()
    }

    /// Number of cells allocated for the three rows.
    pub fn allocated(&self) -> usize {
        3 * self.len()
    }
}

// Columns of the given gap type carry the placeholder, which may not be unique
// to gaps when the caller picked a placeholder that occurs in the input.
fn strip(row: &[u8], ops: &[CigarOp], gap: CigarOp) -> Sequence {
    row.iter()
        .zip(ops)
        .filter(|&(_, &op)| op != gap)
        .map(|(&c, _)| c)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use CigarOp::*;

    fn example() -> Alignment {
        Alignment {
            source: b"ab*c".to_vec(),
            ops: vec![Match, Del, Ins, Sub],
            target: b"a*xd".to_vec(),
            placeholder: b'*',
        }
    }

    #[test]
    fn ungapped_rows() {
        let aln = example();
        assert_eq!(aln.source_ungapped(), b"abc");
        assert_eq!(aln.target_ungapped(), b"axd");
        assert_eq!(aln.ops_string(), ".dis");
    }

    #[test]
    fn cost_and_counts() {
        let aln = example();
        let cm = LinearCost::new(2, 3, 5).unwrap();
        assert_eq!(aln.cost(&cm), 10);
        assert_eq!(aln.count(Del), 1);
        assert_eq!(aln.allocated(), 12);
        assert_eq!(aln.to_cigar().to_string(), "1=1D1I1X");
    }

    #[test]
    fn free_match_is_a_cigar_substitution() {
        let aln = Alignment {
            source: b"ab".to_vec(),
            ops: vec![Match, Match],
            target: b"xb".to_vec(),
            placeholder: b'*',
        };
        assert_eq!(aln.ops_string(), "..");
        assert_eq!(aln.to_cigar().to_string(), "1X1=");
    }
}
