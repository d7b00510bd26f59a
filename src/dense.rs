//! Dense matrices
//!
//! [DenseMatrix] gives the rest of the crate a small, uniform matrix interface on top of
//! an rlst array. Storage, products and factorisations are all done by rlst; this module
//! only forwards to it and converts between slices and arrays.
use crate::types::{BemError, BemResult, BemScalar};
use itertools::izip;
use log::debug;
use num::Zero;
use rlst::{
    empty_array, rlst_array_from_slice2, rlst_dynamic_array2, DynamicArray, MultIntoResize,
    RawAccess, RawAccessMut, Shape,
};

/// A dense matrix stored in column-major order.
pub struct DenseMatrix<T: BemScalar> {
    mat: DynamicArray<T, 2>,
}

impl<T: BemScalar> DenseMatrix<T> {
    /// Create a zero matrix.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            mat: rlst_dynamic_array2!(T, [nrows, ncols]),
        }
    }

    /// Wrap an existing rlst array.
    pub fn from_array(mat: DynamicArray<T, 2>) -> Self {
        Self { mat }
    }

    /// The underlying rlst array.
    pub fn array(&self) -> &DynamicArray<T, 2> {
        &self.mat
    }

    /// Unwrap into the underlying rlst array.
    pub fn into_array(self) -> DynamicArray<T, 2> {
        self.mat
    }

    /// Number of rows
    pub fn nrows(&self) -> usize {
        self.mat.shape()[0]
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.mat.shape()[1]
    }

    /// The shape `[nrows, ncols]`
    pub fn shape(&self) -> [usize; 2] {
        self.mat.shape()
    }

    /// The entries in column-major order.
    pub fn data(&self) -> &[T] {
        self.mat.data()
    }

    /// Mutable access to the entries in column-major order.
    pub fn data_mut(&mut self) -> &mut [T] {
        self.mat.data_mut()
    }

    /// A read-only view of the entries at the given rows and columns.
    ///
    /// A single row or column is the view with a one element index list.
    pub fn submatrix<'a>(&'a self, rows: &'a [usize], cols: &'a [usize]) -> SubMatrix<'a, T> {
        check_indices(self.shape(), rows, cols);
        SubMatrix {
            matrix: self,
            rows,
            cols,
        }
    }

    /// A mutable view of the entries at the given rows and columns.
    pub fn submatrix_mut<'a>(
        &'a mut self,
        rows: &'a [usize],
        cols: &'a [usize],
    ) -> SubMatrixMut<'a, T> {
        check_indices(self.shape(), rows, cols);
        SubMatrixMut {
            matrix: self,
            rows,
            cols,
        }
    }

    /// Copy all entries of `other` into this matrix.
    pub fn assign(&mut self, other: &Self) {
        assert_eq!(self.shape(), other.shape(), "Matrix shapes do not match.");
        self.data_mut().copy_from_slice(other.data());
    }

    /// Set all entries to zero.
    pub fn clear(&mut self) {
        self.data_mut().fill(T::zero());
    }

    /// Compute `b = A x`.
    pub fn mv_prod(&self, b: &mut [T], x: &[T]) {
        self.check_mv_sizes(b, x);
        if self.nrows() == 0 {
            return;
        }
        if self.ncols() == 0 {
            b.fill(T::zero());
            return;
        }
        b.copy_from_slice(self.product(x).data());
    }

    /// Compute `b += A x`.
    pub fn add_mv_prod(&self, b: &mut [T], x: &[T]) {
        self.check_mv_sizes(b, x);
        if self.nrows() == 0 || self.ncols() == 0 {
            return;
        }
        for (entry, value) in izip!(b.iter_mut(), self.product(x).data()) {
            *entry += *value;
        }
    }

    /// Return `A x` as a new vector.
    pub fn apply(&self, x: &[T]) -> Vec<T> {
        let mut b = vec![T::zero(); self.nrows()];
        self.mv_prod(&mut b, x);
        b
    }

    /// Compute the inverse.
    ///
    /// The inverse is obtained by rlst from an LU factorisation with partial pivoting
    /// (LAPACK `getrf`/`getri`). Keep the result around to solve with the same matrix
    /// several times.
    pub fn inverse(&self) -> BemResult<Self> {
        assert_eq!(
            self.nrows(),
            self.ncols(),
            "Only square matrices can be factorised."
        );
        debug!("LU factorisation of a {0}x{0} dense matrix", self.nrows());
        let mut inverse = self.clone();
        inverse
            .mat
            .view_mut()
            .into_inverse_alloc()
            .map_err(|e| BemError::LinearAlgebra(format!("{e:?}")))?;
        Ok(inverse)
    }

    /// Solve `A x = b` by LU factorisation with partial pivoting (LAPACK `getrf`/`getrs`).
    ///
    /// The factorisation works on a copy, so `self` is left unchanged.
    pub fn lu_solve(&self, b: &[T]) -> BemResult<Vec<T>> {
        assert_eq!(
            self.nrows(),
            self.ncols(),
            "Only square matrices can be factorised."
        );
        assert_eq!(
            b.len(),
            self.nrows(),
            "Right-hand side has length {} but the matrix has {} rows.",
            b.len(),
            self.nrows()
        );
        if b.is_empty() {
            return Ok(vec![]);
        }
        debug!("LU solve with a {0}x{0} dense matrix", self.nrows());
        T::solve_lu(self.clone().mat, b)
    }

    fn check_mv_sizes(&self, b: &[T], x: &[T]) {
        assert_eq!(
            b.len(),
            self.nrows(),
            "Output vector has length {} but the matrix has {} rows.",
            b.len(),
            self.nrows()
        );
        assert_eq!(
            x.len(),
            self.ncols(),
            "Input vector has length {} but the matrix has {} columns.",
            x.len(),
            self.ncols()
        );
    }

    fn product(&self, x: &[T]) -> DynamicArray<T, 2> {
        let x = rlst_array_from_slice2!(x, [x.len(), 1]);
        empty_array::<T, 2>().simple_mult_into_resize(self.mat.view(), x)
    }

    fn zip_with(&self, other: &Self, op: impl Fn(T, T) -> T) -> Self {
        assert_eq!(self.shape(), other.shape(), "Matrix shapes do not match.");
        let mut output = Self::new(self.nrows(), self.ncols());
        for (out, a, b) in izip!(output.data_mut().iter_mut(), self.data(), other.data()) {
            *out = op(*a, *b);
        }
        output
    }
}

fn check_indices(shape: [usize; 2], rows: &[usize], cols: &[usize]) {
    if let Some(r) = rows.iter().find(|r| **r >= shape[0]) {
        panic!("Row index {r} out of range for a matrix with {} rows.", shape[0]);
    }
    if let Some(c) = cols.iter().find(|c| **c >= shape[1]) {
        panic!(
            "Column index {c} out of range for a matrix with {} columns.",
            shape[1]
        );
    }
}

impl<T: BemScalar> Clone for DenseMatrix<T> {
    fn clone(&self) -> Self {
        let mut output = Self::new(self.nrows(), self.ncols());
        output.assign(self);
        output
    }
}

impl<T: BemScalar> std::fmt::Debug for DenseMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DenseMatrix of shape {}x{}", self.nrows(), self.ncols())
    }
}

impl<T: BemScalar + std::fmt::Display> std::fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                write!(f, "{}\t\t", self[[i, j]])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: BemScalar> std::ops::Index<[usize; 2]> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, index: [usize; 2]) -> &T {
        &self.mat[index]
    }
}

impl<T: BemScalar> std::ops::IndexMut<[usize; 2]> for DenseMatrix<T> {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut T {
        &mut self.mat[index]
    }
}

impl<'a, T: BemScalar> std::ops::Add for &'a DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn add(self, other: Self) -> DenseMatrix<T> {
        self.zip_with(other, |a, b| a + b)
    }
}

impl<'a, T: BemScalar> std::ops::Sub for &'a DenseMatrix<T> {
    type Output = DenseMatrix<T>;

    fn sub(self, other: Self) -> DenseMatrix<T> {
        self.zip_with(other, |a, b| a - b)
    }
}

/// Read-only view of a subset of rows and columns of a [DenseMatrix].
pub struct SubMatrix<'a, T: BemScalar> {
    matrix: &'a DenseMatrix<T>,
    rows: &'a [usize],
    cols: &'a [usize],
}

impl<'a, T: BemScalar> SubMatrix<'a, T> {
    /// The shape `[rows.len(), cols.len()]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows.len(), self.cols.len()]
    }

    /// Entry `(i, j)` of the view.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.matrix[[self.rows[i], self.cols[j]]]
    }

    /// Copy the view into a new matrix.
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut output = DenseMatrix::new(self.rows.len(), self.cols.len());
        for j in 0..self.cols.len() {
            for i in 0..self.rows.len() {
                output[[i, j]] = self.get(i, j);
            }
        }
        output
    }
}

/// Mutable view of a subset of rows and columns of a [DenseMatrix].
pub struct SubMatrixMut<'a, T: BemScalar> {
    matrix: &'a mut DenseMatrix<T>,
    rows: &'a [usize],
    cols: &'a [usize],
}

impl<'a, T: BemScalar> SubMatrixMut<'a, T> {
    /// The shape `[rows.len(), cols.len()]`
    pub fn shape(&self) -> [usize; 2] {
        [self.rows.len(), self.cols.len()]
    }

    /// Entry `(i, j)` of the view.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.matrix[[self.rows[i], self.cols[j]]]
    }

    /// Set entry `(i, j)` of the view.
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.matrix[[self.rows[i], self.cols[j]]] = value;
    }

    /// Overwrite the viewed entries with the entries of `block`.
    pub fn fill_from(&mut self, block: &DenseMatrix<T>) {
        assert_eq!(self.shape(), block.shape(), "Block shape does not match view.");
        for j in 0..self.cols.len() {
            for i in 0..self.rows.len() {
                self.set(i, j, block[[i, j]]);
            }
        }
    }

    /// Add the entries of `block` to the viewed entries.
    pub fn add_from(&mut self, block: &DenseMatrix<T>) {
        assert_eq!(self.shape(), block.shape(), "Block shape does not match view.");
        for j in 0..self.cols.len() {
            for i in 0..self.rows.len() {
                let value = self.get(i, j) + block[[i, j]];
                self.set(i, j, value);
            }
        }
    }

    /// Copy the view into a new matrix.
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut output = DenseMatrix::new(self.rows.len(), self.cols.len());
        for j in 0..self.cols.len() {
            for i in 0..self.rows.len() {
                output[[i, j]] = self.get(i, j);
            }
        }
        output
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::*;
    use rlst::c64;

    fn example_matrix() -> DenseMatrix<f64> {
        let mut mat = DenseMatrix::<f64>::new(3, 3);
        mat[[0, 0]] = 4.0;
        mat[[0, 1]] = 1.0;
        mat[[0, 2]] = -1.0;
        mat[[1, 0]] = 2.0;
        mat[[1, 1]] = 5.0;
        mat[[1, 2]] = 0.5;
        mat[[2, 0]] = -1.0;
        mat[[2, 1]] = 0.0;
        mat[[2, 2]] = 3.0;
        mat
    }

    #[test]
    fn test_indexing_and_shape() {
        let mut mat = DenseMatrix::<f64>::new(2, 3);
        assert_eq!(mat.shape(), [2, 3]);
        assert_eq!(mat.nrows(), 2);
        assert_eq!(mat.ncols(), 3);
        mat[[1, 2]] = 7.0;
        assert_eq!(mat[[1, 2]], 7.0);
        assert_eq!(mat[[0, 0]], 0.0);
        // column-major storage
        assert_eq!(mat.data()[5], 7.0);
    }

    #[test]
    fn test_submatrix_views() {
        let mut mat = example_matrix();
        let rows = [2, 0];
        let cols = [1];
        let view = mat.submatrix(&rows, &cols);
        assert_eq!(view.shape(), [2, 1]);
        assert_eq!(view.get(0, 0), 0.0);
        assert_eq!(view.get(1, 0), 1.0);

        let mut block = DenseMatrix::<f64>::new(2, 1);
        block[[0, 0]] = 10.0;
        block[[1, 0]] = 20.0;
        let mut view = mat.submatrix_mut(&rows, &cols);
        view.fill_from(&block);
        view.add_from(&block);
        assert_eq!(mat[[2, 1]], 20.0);
        assert_eq!(mat[[0, 1]], 40.0);
        assert_eq!(mat[[1, 1]], 5.0);
    }

    #[test]
    #[should_panic]
    fn test_submatrix_out_of_range() {
        let mat = example_matrix();
        let _ = mat.submatrix(&[3], &[0]);
    }

    #[test]
    fn test_add_sub_assign_clear() {
        let a = example_matrix();
        let mut b = DenseMatrix::<f64>::new(3, 3);
        b.assign(&a);
        let sum = &a + &b;
        let diff = &sum - &a;
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(sum[[i, j]], 2.0 * a[[i, j]]);
                assert_eq!(diff[[i, j]], a[[i, j]]);
            }
        }
        b.clear();
        assert!(b.data().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_display() {
        let mut mat = DenseMatrix::<f64>::new(2, 2);
        mat[[0, 1]] = 1.5;
        assert_eq!(format!("{mat}"), "0\t\t1.5\t\t\n0\t\t0\t\t\n");
    }

    #[test]
    fn test_mv_prod() {
        let mat = example_matrix();
        let x = [1.0, 2.0, 3.0];
        let mut b = [0.0; 3];
        mat.mv_prod(&mut b, &x);
        assert_relative_eq!(b[0], 3.0, epsilon = 1e-14);
        assert_relative_eq!(b[1], 13.5, epsilon = 1e-14);
        assert_relative_eq!(b[2], 8.0, epsilon = 1e-14);

        mat.add_mv_prod(&mut b, &x);
        assert_relative_eq!(b[0], 6.0, epsilon = 1e-14);
        assert_relative_eq!(b[1], 27.0, epsilon = 1e-14);
        assert_relative_eq!(b[2], 16.0, epsilon = 1e-14);
    }

    #[test]
    #[should_panic]
    fn test_mv_prod_size_mismatch() {
        let mat = example_matrix();
        let mut b = [0.0; 2];
        mat.mv_prod(&mut b, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_lu_solve_real() {
        let mat = example_matrix();
        let b = [1.0, -2.0, 0.5];
        let x = mat.lu_solve(&b).unwrap();
        let b2 = mat.apply(&x);
        for (v, w) in b.iter().zip(b2.iter()) {
            assert_relative_eq!(v, w, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_solve_complex() {
        let mut mat = DenseMatrix::<c64>::new(2, 2);
        mat[[0, 0]] = c64::new(2.0, 1.0);
        mat[[0, 1]] = c64::new(0.0, -1.0);
        mat[[1, 0]] = c64::new(1.0, 0.0);
        mat[[1, 1]] = c64::new(3.0, 0.5);
        let b = [c64::new(1.0, 0.0), c64::new(0.0, 2.0)];
        let x = mat.lu_solve(&b).unwrap();
        let b2 = mat.apply(&x);
        for (v, w) in b.iter().zip(b2.iter()) {
            assert_relative_eq!(v.re, w.re, epsilon = 1e-12);
            assert_relative_eq!(v.im, w.im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_solve_needs_pivoting() {
        let mut mat = DenseMatrix::<f64>::new(3, 3);
        mat[[0, 1]] = 2.0;
        mat[[1, 0]] = 1.0;
        mat[[1, 2]] = -1.0;
        mat[[2, 0]] = 4.0;
        mat[[2, 2]] = 1.0;
        let before = mat.clone();
        let b = [2.0, 0.0, 5.0];
        let x = mat.lu_solve(&b).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], 1.0, epsilon = 1e-12);
        assert_eq!(mat.data(), before.data());

        let inverse = mat.inverse().unwrap();
        let y = inverse.apply(&b);
        for (v, w) in x.iter().zip(y.iter()) {
            assert_relative_eq!(v, w, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lu_solve_empty() {
        let mat = DenseMatrix::<f64>::new(0, 0);
        assert!(mat.lu_solve(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_inverse() {
        let mat = example_matrix();
        let inverse = mat.inverse().unwrap();
        for j in 0..3 {
            let mut e = [0.0; 3];
            e[j] = 1.0;
            let column = mat.apply(&inverse.submatrix(&[0, 1, 2], &[j]).to_dense().data().to_vec());
            for (i, v) in column.iter().enumerate() {
                assert_abs_diff_eq!(*v, e[i], epsilon = 1e-12);
            }
        }
    }
}
