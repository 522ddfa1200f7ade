use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::ops::Add;

/// Dense row-major matrix of `f64`.
///
/// Shape checks inside the arithmetic helpers are internal invariants and
/// panic; callers that accept user data validate dimensions first.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows × cols` matrix with i.i.d. draws from `U[low, high]`,
    /// row by row, consuming `rng` in a fixed order.
    ///
    /// Shape: (rows, cols). `cols` is the fan-in (number of input connections).
    pub fn uniform<R: Rng + ?Sized>(rows: usize, cols: usize, low: f64, high: f64, rng: &mut R) -> Matrix {
        let dist = Uniform::new_inclusive(low, high);
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = dist.sample(rng);
            }
        }

        res
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        if self.cols != v.len() {
            panic!("Matrix and vector are of incorrect sizes")
        }

        self.data
            .iter()
            .map(|row| row.iter().zip(v).map(|(w, x)| w * x).sum())
            .collect()
    }

    /// Outer product `u · vᵀ`, shape (u.len(), v.len()).
    pub fn outer(u: &[f64], v: &[f64]) -> Matrix {
        Matrix {
            rows: u.len(),
            cols: v.len(),
            data: u.iter().map(|&a| v.iter().map(|&b| a * b).collect()).collect(),
        }
    }

    /// Builds a matrix from row vectors. All rows must share one length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let rows = data.len();
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            panic!("Rows are of differing lengths")
        }

        Matrix { rows, cols, data }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = self;

        for (row, rhs_row) in res.data.iter_mut().zip(rhs.data) {
            for (x, y) in row.iter_mut().zip(rhs_row) {
                *x += y;
            }
        }

        res
    }
}
