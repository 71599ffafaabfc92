use ea_nw::CostTable;
use ea_types::*;
use serde::Serialize;

/// The JSON record printed for each pair with `--json`.
#[derive(Serialize, Debug)]
pub struct PairRecord {
    pub source: String,
    pub target: String,
    pub cost: Cost,
    pub cigar: String,
    pub source_view: String,
    pub ops: String,
    pub target_view: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<Vec<Cost>>>,
}

impl PairRecord {
    pub fn new(a: Seq, b: Seq, table: &CostTable, aln: &Alignment, with_table: bool) -> Self {
        PairRecord {
            source: seq_to_string(a),
            target: seq_to_string(b),
            cost: table.cost(),
            cigar: aln.to_cigar().to_string(),
            source_view: seq_to_string(&aln.source),
            ops: aln.ops_string(),
            target_view: seq_to_string(&aln.target),
            table: with_table.then(|| table.to_rows()),
        }
    }
}

/// The three aligned rows followed by the cost.
pub fn format_alignment(table: &CostTable, aln: &Alignment) -> String {
    format!(
        "S {}\nO {}\nT {}\ncost {}\n",
        seq_to_string(&aln.source),
        aln.ops_string(),
        seq_to_string(&aln.target),
        table.cost()
    )
}

/// Totals over all processed pairs.
#[derive(Serialize, Default, Debug, PartialEq, Eq)]
pub struct Summary {
    pub pairs: usize,
    pub total_cost: i64,
    pub columns: usize,
    pub allocated: usize,
}

impl Summary {
    pub fn add(&mut self, table: &CostTable, aln: &Alignment) {
        self.pairs += 1;
        self.total_cost += table.cost() as i64;
        self.columns += aln.len();
        self.allocated += aln.allocated() + table.rows() * table.cols();
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "pairs {:>6} cost {:>10} columns {:>10} allocated {:>12}",
            self.pairs, self.total_cost, self.columns, self.allocated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ea_nw::compute_alignment;
    use ea_test::test_sequences;

    #[test]
    fn alignment_rows() {
        let (table, aln) = compute_alignment(b"ab", b"b", 1, 1, 1).unwrap();
        assert_eq!(
            format_alignment(&table, &aln),
            "S ab\nO d.\nT *b\ncost 1\n"
        );
    }

    #[test]
    fn json_record() {
        let (table, aln) = compute_alignment(b"", b"abc", 1, 1, 1).unwrap();
        let record = PairRecord::new(b"", b"abc", &table, &aln, false);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"source":"","target":"abc","cost":3,"cigar":"3I","source_view":"***","ops":"iii","target_view":"abc"}"#
        );
        let record = PairRecord::new(b"", b"abc", &table, &aln, true);
        assert_eq!(record.table, Some(vec![vec![0, 1, 2, 3]]));
    }

    #[test]
    fn summary_totals() {
        let mut summary = Summary::default();
        for (a, b) in [(&b"kitten"[..], &b"sitting"[..]), (&b""[..], &b"abc"[..])] {
            let (table, aln) = compute_alignment(a, b, 1, 1, 1).unwrap();
            summary.add(&table, &aln);
        }
        assert_eq!(summary.pairs, 2);
        assert_eq!(summary.total_cost, 6);
    }

    #[test]
    fn summary_counts_cells() {
        let mut summary = Summary::default();
        let (mut cost, mut columns, mut cells) = (0, 0, 0);
        for (a, b) in test_sequences() {
            let (table, aln) = compute_alignment(a, b, 1, 2, 3).unwrap();
            summary.add(&table, &aln);
            cost += table.cost() as i64;
            columns += aln.len();
            cells += 3 * aln.len() + (a.len() + 1) * (b.len() + 1);
            assert!(aln.len() >= a.len().max(b.len()));
        }
        assert_eq!(
            summary,
            Summary {
                pairs: test_sequences().len(),
                total_cost: cost,
                columns,
                allocated: cells,
            }
        );
    }
}
