//! Recover an alignment from a filled `CostTable`.
//!
//! The length of the alignment is computed first by walking the same path
//! that the traceback takes, so that the three rows can be allocated at their
//! exact size and filled back to front. Both walks go through `parent_op`,
//! the single place where the tie-break policy is applied.

use crate::table::CostTable;
use ea_types::*;

/// The operation that leads into cell `(i, j)` on the traced path.
///
/// Gaps are preferred over the diagonal. Among the two gaps, `tie` decides
/// which one is checked first. On the first row only insertions remain, and on
/// the first column only deletions. A diagonal step that leaves the cost
/// unchanged is a match, so with free substitutions differing characters are
/// reported as matches too.
#[inline]
fn parent_op(
    table: &CostTable,
    a: Seq,
    b: Seq,
    cm: &LinearCost,
    tie: TieBreak,
    i: usize,
    j: usize,
) -> CigarOp {
    debug_assert!(i > 0 || j > 0);
    if i == 0 {
        return CigarOp::Ins;
    }
    if j == 0 {
        return CigarOp::Del;
    }
    let c = table[(i, j)];
    let reaches = |op: CigarOp| match op {
        CigarOp::Ins => table[(i, j - 1)] + cm.ins() == c,
        CigarOp::Del => table[(i - 1, j)] + cm.del() == c,
        CigarOp::Match | CigarOp::Sub => unreachable!(),
    };
    let gaps = match tie {
        TieBreak::InsertionFirst => [CigarOp::Ins, CigarOp::Del],
        TieBreak::DeletionFirst => [CigarOp::Del, CigarOp::Ins],
    };
    if let Some(op) = gaps.into_iter().find(|&op| reaches(op)) {
        return op;
    }
    debug_assert_eq!(
        table[(i - 1, j - 1)] + cm.diagonal(a[i - 1], b[j - 1]),
        c,
        "No parent for ({i}, {j})"
    );
    if table[(i - 1, j - 1)] == c {
        CigarOp::Match
    } else {
        CigarOp::Sub
    }
}

/// The number of columns of the alignment traced with `tie`: `|b|` plus the
/// number of deletions on the path.
pub fn alignment_len(
    table: &CostTable,
    a: Seq,
    b: Seq,
    cm: &LinearCost,
    tie: TieBreak,
) -> usize {
    let (mut i, mut j) = (a.len(), b.len());
    let mut deletions = 0;
    while i > 0 || j > 0 {
        let op = parent_op(table, a, b, cm, tie, i, j);
        if op == CigarOp::Del {
            deletions += 1;
        }
        let (di, dj) = op.delta();
        i -= di;
        j -= dj;
    }
    b.len() + deletions
}

/// Trace an optimal alignment from the bottom-right cell back to the origin.
pub fn traceback(
    table: &CostTable,
    a: Seq,
    b: Seq,
    cm: &LinearCost,
    tie: TieBreak,
    placeholder: u8,
) -> Alignment {
    assert_eq!((table.rows(), table.cols()), (a.len() + 1, b.len() + 1));
    let len = alignment_len(table, a, b, cm, tie);
    log::trace!("traceback {tie:?}: {len} columns");

    let mut source = vec![placeholder; len];
    let mut ops = vec![CigarOp::Match; len];
    let mut target = vec![placeholder; len];

    let (mut i, mut j) = (a.len(), b.len());
    let mut k = len;
    while i > 0 || j > 0 {
        assert!(
            k > 0,
            "Traceback at ({i}, {j}) needs more than the {len} precomputed columns"
        );
        k -= 1;
        let op = parent_op(table, a, b, cm, tie, i, j);
        ops[k] = op;
        match op {
            CigarOp::Ins => {
                j -= 1;
                target[k] = b[j];
            }
            CigarOp::Del => {
                i -= 1;
                source[k] = a[i];
            }
            CigarOp::Match | CigarOp::Sub => {
                i -= 1;
                j -= 1;
                source[k] = a[i];
                target[k] = b[j];
            }
        }
    }
    assert_eq!(k, 0, "Traceback used fewer than the {len} precomputed columns");

    Alignment {
        source,
        ops,
        target,
        placeholder,
    }
}
