//! Lower-triangular Romberg table.

use std::fmt;

use nm_core::{Real, Size};

/// The triangular table `R[i][j]`, `0 ≤ j ≤ i`, built by Romberg integration.
///
/// Row `i` holds the trapezoidal estimate with `2^i` subintervals in column
/// 0 followed by its Richardson extrapolations. Rows are appended whole and
/// never modified afterwards. Cells live in one packed buffer; row `i`
/// starts at offset `i (i + 1) / 2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RombergTable {
    cells: Vec<Real>,
    rows: Size,
}

#[inline]
fn offset(row: Size) -> Size {
    row * (row + 1) / 2
}

impl RombergTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table with room for `rows` rows.
    pub fn with_capacity(rows: Size) -> Self {
        Self {
            cells: Vec::with_capacity(offset(rows)),
            rows: 0,
        }
    }

    /// Append the next row. It must hold exactly `self.rows() + 1` cells.
    pub(crate) fn push_row(&mut self, row: &[Real]) {
        debug_assert_eq!(row.len(), self.rows + 1, "row {} has wrong length", self.rows);
        self.cells.extend_from_slice(row);
        self.rows += 1;
    }

    /// Number of rows (refinement levels) built.
    pub fn rows(&self) -> Size {
        self.rows
    }

    /// `true` if no row has been built.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// The cell `R[i][j]`, or `None` outside the lower triangle.
    pub fn get(&self, i: Size, j: Size) -> Option<Real> {
        if i >= self.rows || j > i {
            return None;
        }
        Some(self.cells[offset(i) + j])
    }

    /// Row `i`: `R[i][0..=i]`.
    pub fn row(&self, i: Size) -> Option<&[Real]> {
        if i >= self.rows {
            return None;
        }
        let start = offset(i);
        Some(&self.cells[start..start + i + 1])
    }

    /// Iterate over the rows from coarsest to finest.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Real]> + '_ {
        (0..self.rows).map(move |i| {
            let start = offset(i);
            &self.cells[start..start + i + 1]
        })
    }

    /// The trapezoidal column `R[*][0]`.
    pub fn trapezoids(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.rows).map(move |i| self.cells[offset(i)])
    }

    /// The diagonal `R[0][0], R[1][1], ...`.
    pub fn diagonal(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.rows).map(move |i| self.cells[offset(i) + i])
    }

    /// The last diagonal entry, the table's best estimate.
    pub fn best(&self) -> Option<Real> {
        let last = self.rows.checked_sub(1)?;
        Some(self.cells[offset(last) + last])
    }
}

impl fmt::Display for RombergTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            write!(f, "{i:>3}")?;
            for value in row {
                write!(f, " {value:>20.15}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RombergTable {
        let mut table = RombergTable::with_capacity(3);
        table.push_row(&[1.0]);
        table.push_row(&[2.0, 3.0]);
        table.push_row(&[4.0, 5.0, 6.0]);
        table
    }

    #[test]
    fn empty_table() {
        let table = RombergTable::new();
        assert!(table.is_empty());
        assert_eq!(table.best(), None);
        assert_eq!(table.get(0, 0), None);
        assert_eq!(table.diagonal().count(), 0);
    }

    #[test]
    fn cells_are_packed_by_row() {
        let table = sample();
        assert_eq!(table.rows(), 3);
        assert_eq!(table.get(0, 0), Some(1.0));
        assert_eq!(table.get(1, 1), Some(3.0));
        assert_eq!(table.get(2, 0), Some(4.0));
        assert_eq!(table.row(2), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(table.iter_rows().count(), 3);
    }

    #[test]
    fn upper_triangle_is_not_exposed() {
        let table = sample();
        assert_eq!(table.get(0, 1), None);
        assert_eq!(table.get(1, 2), None);
        assert_eq!(table.get(3, 0), None);
        assert_eq!(table.row(3), None);
    }

    #[test]
    fn columns_and_diagonal() {
        let table = sample();
        assert_eq!(table.trapezoids().collect::<Vec<_>>(), vec![1.0, 2.0, 4.0]);
        assert_eq!(table.diagonal().collect::<Vec<_>>(), vec![1.0, 3.0, 6.0]);
        assert_eq!(table.best(), Some(6.0));
    }

    #[test]
    fn display_prints_one_line_per_row() {
        let text = sample().to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("  1"));
    }
}
