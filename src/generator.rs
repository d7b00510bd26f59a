//! Coefficient access for hierarchical matrix libraries
//!
//! A hierarchical matrix library never sees a kernel matrix as a whole. It samples
//! single entries and dense sub-blocks while it builds its cluster tree and low rank
//! approximations. [MatrixGenerator] is the interface through which it does so.
use crate::dense::DenseMatrix;
use crate::types::BemScalar;
use log::debug;
use rayon::prelude::*;

/// Generator of the entries of a (possibly very large) matrix.
pub trait MatrixGenerator {
    /// Scalar type
    type T: BemScalar;

    /// Number of rows
    fn nrows(&self) -> usize;

    /// Number of columns
    fn ncols(&self) -> usize;

    /// Entry `(row, col)`.
    fn coefficient(&self, row: usize, col: usize) -> Self::T;

    /// The dense block at the given rows and columns.
    ///
    /// The default implementation calls [MatrixGenerator::coefficient] for every entry.
    /// Implementations that can compute blocks more efficiently should override it.
    fn block(&self, rows: &[usize], cols: &[usize]) -> DenseMatrix<Self::T> {
        let mut output = DenseMatrix::new(rows.len(), cols.len());
        for (j, col) in cols.iter().enumerate() {
            for (i, row) in rows.iter().enumerate() {
                output[[i, j]] = self.coefficient(*row, *col);
            }
        }
        output
    }
}

/// Assemble the full matrix of a generator.
pub fn assemble_dense<G: MatrixGenerator>(generator: &G) -> DenseMatrix<G::T> {
    debug!(
        "Assembling {}x{} dense matrix from generator",
        generator.nrows(),
        generator.ncols()
    );
    let rows = (0..generator.nrows()).collect::<Vec<_>>();
    let cols = (0..generator.ncols()).collect::<Vec<_>>();
    generator.block(&rows, &cols)
}

/// Assemble the full matrix of a generator, computing columns in parallel.
///
/// Each column is requested as a single [MatrixGenerator::block], so per-block setup in
/// a generator is paid once per column rather than once per entry.
pub fn assemble_dense_parallel<G: MatrixGenerator + Sync>(generator: &G) -> DenseMatrix<G::T>
where
    G::T: Send,
{
    let nrows = generator.nrows();
    let ncols = generator.ncols();
    debug!("Assembling {nrows}x{ncols} dense matrix from generator in parallel");

    let mut output = DenseMatrix::new(nrows, ncols);
    if nrows == 0 {
        return output;
    }
    let rows = (0..nrows).collect::<Vec<_>>();
    output
        .data_mut()
        .par_chunks_mut(nrows)
        .enumerate()
        .for_each(|(col, column)| {
            column.copy_from_slice(generator.block(&rows, &[col]).data());
        });
    output
}
