//! Small dense matrices with exact cofactor-based determinant and inverse.
//!
//! The reaction solver only ever builds systems with one row per support, so
//! the matrices here are tiny. Determinants are expanded along the first row
//! and inverses use the classical adjugate, which keeps results exact for
//! integer-valued inputs at the price of factorial cost in the size.

use std::fmt;
use std::ops::{Index, Mul};

use nalgebra::DMatrix;

use crate::errors::MatrixError;

/// Rectangular matrix of real numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    /// Entries; never empty.
    values: DMatrix<f64>,
}

impl Matrix {
    /// Build a matrix from a sequence of equal-length rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when there are no rows, the rows are
    /// empty, or the rows differ in length.
    ///
    /// # Examples
    /// ```
    /// use trussreact::{Matrix, MatrixError};
    ///
    /// let m = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).expect("rectangular");
    /// assert_eq!(m.shape(), (2, 2));
    ///
    /// let ragged = Matrix::new(vec![vec![1.0, 2.0], vec![3.0]]);
    /// assert!(matches!(ragged, Err(MatrixError::ShapeError { .. })));
    /// ```
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);
        if col_count == 0 {
            return Err(MatrixError::ShapeError {
                expected: (row_count.max(1), 1),
                found: (row_count, 0),
            });
        }
        if let Some(ragged) = rows.iter().find(|row| row.len() != col_count) {
            return Err(MatrixError::ShapeError {
                expected: (row_count, col_count),
                found: (row_count, ragged.len()),
            });
        }
        Ok(Self {
            values: DMatrix::from_fn(row_count, col_count, |i, j| rows[i][j]),
        })
    }

    /// Build a single-column matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when `values` is empty.
    pub fn column(values: &[f64]) -> Result<Self, MatrixError> {
        Self::new(values.iter().map(|value| vec![*value]).collect())
    }

    /// The `n` by `n` identity matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when `n` is zero.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        if n == 0 {
            return Err(MatrixError::ShapeError {
                expected: (1, 1),
                found: (0, 0),
            });
        }
        Ok(Self {
            values: DMatrix::identity(n, n),
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.values.ncols()
    }

    /// The (rows, columns) pair.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Entry at a zero-based position, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    /// Rows as plain vectors.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    /// Matrix product `self * other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::DimensionMismatch`] when `self.cols() != other.rows()`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols() != other.rows() {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(Matrix {
            values: &self.values * &other.values,
        })
    }

    /// Multiply every entry by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Matrix {
        Matrix {
            values: &self.values * factor,
        }
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when the shapes differ.
    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(other)?;
        Ok(Matrix {
            values: &self.values + &other.values,
        })
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when the shapes differ.
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.check_same_shape(other)?;
        Ok(Matrix {
            values: &self.values - &other.values,
        })
    }

    /// Swap rows and columns.
    #[must_use]
    pub fn transpose(&self) -> Matrix {
        Matrix {
            values: self.values.transpose(),
        }
    }

    /// The matrix with zero-based `row` and `col` removed.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when the position is out of range or
    /// removing it would leave an empty matrix.
    pub fn minor(&self, row: usize, col: usize) -> Result<Matrix, MatrixError> {
        let (rows, cols) = self.shape();
        if rows < 2 || cols < 2 || row >= rows || col >= cols {
            return Err(MatrixError::ShapeError {
                expected: (rows.max(2), cols.max(2)),
                found: (rows, cols),
            });
        }
        Ok(Matrix {
            values: self.values.clone().remove_row(row).remove_column(col),
        })
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when the matrix is not square.
    ///
    /// # Examples
    /// ```
    /// use trussreact::Matrix;
    ///
    /// let m = Matrix::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).expect("rectangular");
    /// assert_eq!(m.determinant(), Ok(-2.0));
    /// ```
    pub fn determinant(&self) -> Result<f64, MatrixError> {
        self.check_square()?;
        if self.rows() == 1 {
            return Ok(self.values[(0, 0)]);
        }
        let mut total = 0.0;
        for (col, entry) in self.values.row(0).iter().enumerate() {
            let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
            total += sign * entry * self.minor(0, col)?.determinant()?;
        }
        Ok(total)
    }

    /// Matrix of signed minors. The single cofactor of a 1x1 matrix is 1.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when the matrix is not square.
    pub fn cofactor_matrix(&self) -> Result<Matrix, MatrixError> {
        self.check_square()?;
        let n = self.rows();
        if n == 1 {
            return Matrix::identity(1);
        }
        let mut cofactors = DMatrix::zeros(n, n);
        for row in 0..n {
            for col in 0..n {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                cofactors[(row, col)] = sign * self.minor(row, col)?.determinant()?;
            }
        }
        Ok(Matrix { values: cofactors })
    }

    /// Inverse via the adjugate scaled by the reciprocal determinant.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeError`] when the matrix is not square and
    /// [`MatrixError::SingularMatrix`] when its determinant is zero.
    pub fn inverse(&self) -> Result<Matrix, MatrixError> {
        let det = self.determinant()?;
        if det == 0.0 {
            return Err(MatrixError::SingularMatrix(self.rows()));
        }
        Ok(self.cofactor_matrix()?.transpose().scale(1.0 / det))
    }

    /// Fail unless the matrix is square.
    fn check_square(&self) -> Result<(), MatrixError> {
        let (rows, cols) = self.shape();
        if rows == cols {
            Ok(())
        } else {
            Err(MatrixError::ShapeError {
                expected: (rows, rows),
                found: (rows, cols),
            })
        }
    }

    /// Fail unless `other` has the same shape as `self`.
    fn check_same_shape(&self, other: &Matrix) -> Result<(), MatrixError> {
        if self.shape() == other.shape() {
            Ok(())
        } else {
            Err(MatrixError::ShapeError {
                expected: self.shape(),
                found: other.shape(),
            })
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.values[index]
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, factor: f64) -> Matrix {
        self.scale(factor)
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, matrix: &Matrix) -> Matrix {
        matrix.scale(self)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.values.row_iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Solve `coefficients * x = rhs` as `inverse(coefficients) * rhs`.
///
/// Each row of `coefficients` holds one equation, so `2x + 3y = 5` and
/// `3x + y = 2` are passed as `[[2, 3], [3, 1]]` and `[5, 2]`.
///
/// # Errors
///
/// Returns the errors of [`Matrix::inverse`], plus
/// [`MatrixError::DimensionMismatch`] when `rhs` has the wrong length.
///
/// # Examples
/// ```
/// use trussreact::solve_linear_system;
///
/// let x = solve_linear_system(&[vec![2.0, 3.0], vec![3.0, 1.0]], &[5.0, 2.0])
///     .expect("non-singular system");
/// assert!((x[0] - 1.0 / 7.0).abs() < 1e-12);
/// assert!((x[1] - 11.0 / 7.0).abs() < 1e-12);
/// ```
pub fn solve_linear_system(coefficients: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, MatrixError> {
    let a = Matrix::new(coefficients.to_vec())?;
    let b = Matrix::column(rhs)?;
    let solution = a.inverse()?.multiply(&b)?;
    Ok(solution.values.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn matrix(rows: &[&[f64]]) -> Matrix {
        Matrix::new(rows.iter().map(|row| row.to_vec()).collect()).expect("rectangular rows")
    }

    #[test]
    fn ragged_and_empty_rows_are_rejected() {
        assert!(matches!(
            Matrix::new(vec![vec![1.0], vec![2.0, 3.0]]),
            Err(MatrixError::ShapeError { .. })
        ));
        assert!(matches!(
            Matrix::new(Vec::new()),
            Err(MatrixError::ShapeError { .. })
        ));
        assert!(matches!(
            Matrix::new(vec![Vec::new()]),
            Err(MatrixError::ShapeError { .. })
        ));
    }

    #[test]
    fn product_checks_inner_dimensions() {
        let a = matrix(&[&[1.0, 2.0, 3.0]]);
        let b = matrix(&[&[1.0], &[2.0]]);
        assert_eq!(
            a.multiply(&b),
            Err(MatrixError::DimensionMismatch {
                left: (1, 3),
                right: (2, 1)
            })
        );

        let c = matrix(&[&[1.0], &[2.0], &[3.0]]);
        assert_eq!(a.multiply(&c), Ok(matrix(&[&[14.0]])));
        assert_eq!(c.multiply(&a).map(|m| m.shape()), Ok((3, 3)));
    }

    #[test]
    fn scalar_multiplication_works_from_either_side() {
        let a = matrix(&[&[1.0, -2.0], &[0.5, 4.0]]);
        let expected = matrix(&[&[2.0, -4.0], &[1.0, 8.0]]);
        assert_eq!(&a * 2.0, expected);
        assert_eq!(2.0 * &a, expected);
    }

    #[test]
    fn elementwise_operations_require_matching_shapes() {
        let a = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = matrix(&[&[4.0, 3.0], &[2.0, 1.0]]);
        assert_eq!(a.add(&b), Ok(matrix(&[&[5.0, 5.0], &[5.0, 5.0]])));
        assert_eq!(a.subtract(&b), Ok(matrix(&[&[-3.0, -1.0], &[1.0, 3.0]])));

        let wide = matrix(&[&[1.0, 2.0, 3.0]]);
        assert!(matches!(a.add(&wide), Err(MatrixError::ShapeError { .. })));
        assert!(matches!(a.subtract(&wide), Err(MatrixError::ShapeError { .. })));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let a = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        assert_eq!(
            a.transpose(),
            matrix(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]])
        );
    }

    #[test]
    fn determinant_matches_known_values() {
        assert_eq!(matrix(&[&[5.0]]).determinant(), Ok(5.0));
        assert_eq!(matrix(&[&[1.0, 2.0], &[3.0, 4.0]]).determinant(), Ok(-2.0));
        assert_eq!(
            matrix(&[&[2.0, 0.0, 1.0], &[1.0, 3.0, 2.0], &[1.0, 1.0, 2.0]]).determinant(),
            Ok(6.0)
        );
        assert!(matches!(
            matrix(&[&[1.0, 2.0]]).determinant(),
            Err(MatrixError::ShapeError { .. })
        ));
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let a = matrix(&[&[4.0, 7.0, 2.0], &[3.0, 6.0, 1.0], &[2.0, 5.0, 3.0]]);
        let product = a.multiply(&a.inverse().expect("invertible")).expect("square");
        let identity = Matrix::identity(3).expect("non-empty");
        for row in 0..3 {
            for col in 0..3 {
                assert_relative_eq!(product[(row, col)], identity[(row, col)], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn empty_identity_is_rejected() {
        assert!(matches!(
            Matrix::identity(0),
            Err(MatrixError::ShapeError { .. })
        ));
        assert_eq!(Matrix::identity(1), Ok(matrix(&[&[1.0]])));
    }

    #[test]
    fn entries_read_back_in_row_order() {
        let rows = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        let a = Matrix::new(rows.clone()).expect("rectangular");
        assert_eq!(a.to_rows(), rows);
        assert_eq!(a.get(1, 0), Some(4.0));
        assert_eq!(a.get(0, 2), Some(3.0));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.get(0, 3), None);
        assert_eq!(a.transpose().to_rows()[2], vec![3.0, 6.0]);
    }

    #[test]
    fn inverse_of_single_entry_is_reciprocal() {
        assert_eq!(matrix(&[&[4.0]]).inverse(), Ok(matrix(&[&[0.25]])));
    }

    #[test]
    fn singular_matrices_have_no_inverse() {
        let a = matrix(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(a.inverse(), Err(MatrixError::SingularMatrix(2)));
        assert_eq!(
            solve_linear_system(&[vec![0.0, 0.0], vec![0.0, 0.0]], &[1.0, 1.0]),
            Err(MatrixError::SingularMatrix(2))
        );
    }

    #[test]
    fn linear_system_solution_satisfies_equations() {
        let coefficients = vec![vec![2.0, 3.0], vec![3.0, 1.0]];
        let rhs = [5.0, 2.0];
        let x = solve_linear_system(&coefficients, &rhs).expect("non-singular");
        assert_eq!(x.len(), 2);
        for (row, expected) in coefficients.iter().zip(rhs) {
            let lhs: f64 = row.iter().zip(&x).map(|(a, b)| a * b).sum();
            assert_relative_eq!(lhs, expected, epsilon = 1e-12);
        }
        assert_relative_eq!(x[0], 1.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 11.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn linear_system_rejects_mismatched_rhs() {
        assert!(matches!(
            solve_linear_system(&[vec![1.0, 0.0], vec![0.0, 1.0]], &[1.0, 2.0, 3.0]),
            Err(MatrixError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn display_prints_space_separated_rows() {
        assert_eq!(matrix(&[&[1.0, 2.5], &[3.0, 4.0]]).to_string(), "1 2.5\n3 4");
    }
}
