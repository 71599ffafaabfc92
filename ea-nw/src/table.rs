use ea_types::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::min;
use std::fmt;
use std::ops::Index;

/// The order in which cells of the table are computed.
#[derive(
    clap::ValueEnum, Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum Fill {
    /// Left to right, top to bottom.
    #[default]
    RowMajor,
    /// One anti-diagonal at a time, with the cells of a diagonal in parallel.
    Wavefront,
}

/// The `(m+1) x (n+1)` table of minimal costs between prefixes of `a` and `b`.
///
/// Stored row-major in a single allocation. Cell `(i, j)` is the cost of
/// transforming `a[..i]` into `b[..j]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTable {
    rows: usize,
    cols: usize,
    cells: Vec<Cost>,
}

impl Index<(usize, usize)> for CostTable {
    type Output = Cost;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Cost {
        &self.cells[i * self.cols + j]
    }
}

impl CostTable {
    /// Fill the full table for `a` and `b`.
    ///
    /// Fails when the costs can overflow `Cost` or the table cannot be
    /// allocated.
    pub fn build(a: Seq, b: Seq, cm: &LinearCost, fill: Fill) -> Result<Self, Error> {
        cm.check_bounds(a.len(), b.len())?;
        let mut table = Self::alloc(a.len() + 1, b.len() + 1)?;
        for i in 0..table.rows {
            table.cells[i * table.cols] = i as Cost * cm.del();
        }
        for j in 0..table.cols {
            table.cells[j] = j as Cost * cm.ins();
        }
        match fill {
            Fill::RowMajor => table.fill_rows(a, b, cm),
            Fill::Wavefront => table.fill_wavefront(a, b, cm),
        }
        Ok(table)
    }

    fn alloc(rows: usize, cols: usize) -> Result<Self, Error> {
        let err = || Error::TableAlloc { rows, cols };
        let len = rows.checked_mul(cols).ok_or_else(err)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| err())?;
        cells.resize(len, 0);
        Ok(CostTable { rows, cols, cells })
    }

    /// The minimum over the three transitions into `(i, j)`, for `i, j > 0`.
    #[inline]
    fn relax(&self, i: usize, j: usize, ca: u8, cb: u8, cm: &LinearCost) -> Cost {
        min(
            min(self[(i - 1, j)] + cm.del(), self[(i, j - 1)] + cm.ins()),
            self[(i - 1, j - 1)] + cm.diagonal(ca, cb),
        )
    }

    fn fill_rows(&mut self, a: Seq, b: Seq, cm: &LinearCost) {
        for (i0, &ca) in a.iter().enumerate() {
            let i = i0 + 1;
            for (j0, &cb) in b.iter().enumerate() {
                let j = j0 + 1;
                let c = self.relax(i, j, ca, cb, cm);
                self.cells[i * self.cols + j] = c;
            }
        }
    }

    /// Each cell on diagonal `i + j = d` only depends on diagonals `d-1` and
    /// `d-2`, so all cells of a diagonal can be computed independently.
    fn fill_wavefront(&mut self, a: Seq, b: Seq, cm: &LinearCost) {
        let (m, n) = (a.len(), b.len());
        let mut diagonal = Vec::with_capacity(min(m, n));
        for d in 2..=m + n {
            let lo = d.saturating_sub(n).max(1);
            let hi = min(m, d - 1);
            if lo > hi {
                continue;
            }
            let this = &*self;
            (lo..hi + 1)
                .into_par_iter()
                .map(|i| this.relax(i, d - i, a[i - 1], b[d - i - 1], cm))
                .collect_into_vec(&mut diagonal);
            for (i, &c) in (lo..=hi).zip(&diagonal) {
                self.cells[i * self.cols + d - i] = c;
            }
        }
    }

    /// Number of rows, `|a| + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `|b| + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[Cost] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }

    /// The cost of the full alignment, the bottom-right cell.
    pub fn cost(&self) -> Cost {
        self[(self.rows - 1, self.cols - 1)]
    }

    pub fn to_rows(&self) -> Vec<Vec<Cost>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Render the table with the characters of `a` and `b` as row and column
    /// headers.
    pub fn display<'a>(&'a self, a: Seq<'a>, b: Seq<'a>) -> TableDisplay<'a> {
        TableDisplay { table: self, a, b }
    }
}

pub struct TableDisplay<'a> {
    table: &'a CostTable,
    a: Seq<'a>,
    b: Seq<'a>,
}

impl fmt::Display for TableDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .table
            .cells
            .iter()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1);
        write!(f, "  {:>width$}", "")?;
        for &cb in self.b {
            write!(f, " {:>width$}", cb as char)?;
        }
        writeln!(f)?;
        for i in 0..self.table.rows {
            let header = if i == 0 { ' ' } else { self.a[i - 1] as char };
            write!(f, "{header}")?;
            for c in self.table.row(i) {
                write!(f, " {c:>width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
