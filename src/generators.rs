//! Generators for boundary and potential operators
//!
//! These adaptors expose boundary element operators through [MatrixGenerator] so that a
//! hierarchical matrix library can sample them. Operators are allowed to carry mutable
//! per-evaluation state, so every generator works on a local clone of its operator and
//! never touches the one it was given. This also makes the generators safe to share
//! between threads.
use crate::dense::DenseMatrix;
use crate::generator::MatrixGenerator;
use crate::operator::{BoundaryOperator, DofMap, Geometry, PotentialOperator, SubBlockOperator};

/// Generator for the matrix of a boundary operator, entry by entry.
pub struct BoundaryOperatorGenerator<'a, Op, Dofs>
where
    Op: BoundaryOperator + Clone,
    Dofs: DofMap<Element = Op::Element>,
{
    operator: &'a Op,
    dofs: &'a Dofs,
}

impl<'a, Op, Dofs> BoundaryOperatorGenerator<'a, Op, Dofs>
where
    Op: BoundaryOperator + Clone,
    Dofs: DofMap<Element = Op::Element>,
{
    /// Create new
    pub fn new(operator: &'a Op, dofs: &'a Dofs) -> Self {
        Self { operator, dofs }
    }
}

impl<'a, Op, Dofs> MatrixGenerator for BoundaryOperatorGenerator<'a, Op, Dofs>
where
    Op: BoundaryOperator + Clone,
    Dofs: DofMap<Element = Op::Element>,
{
    type T = Op::T;

    fn nrows(&self) -> usize {
        self.dofs.n_dofs()
    }

    fn ncols(&self) -> usize {
        self.dofs.n_dofs()
    }

    fn coefficient(&self, row: usize, col: usize) -> Op::T {
        let mut operator = self.operator.clone();
        operator.evaluate(self.dofs.to_element(row), self.dofs.to_element(col))
    }

    fn block(&self, rows: &[usize], cols: &[usize]) -> DenseMatrix<Op::T> {
        let mut operator = self.operator.clone();
        let mut output = DenseMatrix::new(rows.len(), cols.len());
        for (j, col) in cols.iter().enumerate() {
            let trial = self.dofs.to_element(*col);
            for (i, row) in rows.iter().enumerate() {
                output[[i, j]] = operator.evaluate(self.dofs.to_element(*row), trial);
            }
        }
        output
    }
}

/// Generator for an operator that computes its matrix block by block.
pub struct SubBlockGenerator<'a, Op, Dofs>
where
    Op: SubBlockOperator + Clone,
    Dofs: DofMap,
{
    operator: &'a Op,
    dofs: &'a Dofs,
}

impl<'a, Op, Dofs> SubBlockGenerator<'a, Op, Dofs>
where
    Op: SubBlockOperator + Clone,
    Dofs: DofMap,
{
    /// Create new
    pub fn new(operator: &'a Op, dofs: &'a Dofs) -> Self {
        Self { operator, dofs }
    }
}

impl<'a, Op, Dofs> MatrixGenerator for SubBlockGenerator<'a, Op, Dofs>
where
    Op: SubBlockOperator + Clone,
    Dofs: DofMap,
{
    type T = Op::T;

    fn nrows(&self) -> usize {
        self.dofs.n_dofs()
    }

    fn ncols(&self) -> usize {
        self.dofs.n_dofs()
    }

    fn coefficient(&self, row: usize, col: usize) -> Op::T {
        let mut block = DenseMatrix::new(1, 1);
        self.operator
            .clone()
            .compute_block(&[row], &[col], &mut block);
        block[[0, 0]]
    }

    fn block(&self, rows: &[usize], cols: &[usize]) -> DenseMatrix<Op::T> {
        let mut block = DenseMatrix::new(rows.len(), cols.len());
        self.operator.clone().compute_block(rows, cols, &mut block);
        block
    }
}

/// Generator for the matrix of a potential operator.
///
/// Rows are indexed by the nodes of the evaluation geometry, columns by degrees of freedom.
pub struct PotentialGenerator<'a, Op, Dofs, Geo>
where
    Op: PotentialOperator + Clone,
    Dofs: DofMap<Element = Op::Element>,
    Geo: Geometry,
{
    operator: &'a Op,
    dofs: &'a Dofs,
    geometry: &'a Geo,
}

impl<'a, Op, Dofs, Geo> PotentialGenerator<'a, Op, Dofs, Geo>
where
    Op: PotentialOperator + Clone,
    Dofs: DofMap<Element = Op::Element>,
    Geo: Geometry,
{
    /// Create new
    pub fn new(operator: &'a Op, dofs: &'a Dofs, geometry: &'a Geo) -> Self {
        Self {
            operator,
            dofs,
            geometry,
        }
    }
}

impl<'a, Op, Dofs, Geo> MatrixGenerator for PotentialGenerator<'a, Op, Dofs, Geo>
where
    Op: PotentialOperator + Clone,
    Dofs: DofMap<Element = Op::Element>,
    Geo: Geometry,
{
    type T = Op::T;

    fn nrows(&self) -> usize {
        self.geometry.n_nodes()
    }

    fn ncols(&self) -> usize {
        self.dofs.n_dofs()
    }

    fn coefficient(&self, row: usize, col: usize) -> Op::T {
        let mut operator = self.operator.clone();
        operator.evaluate(&self.geometry.node(row), self.dofs.to_element(col))
    }

    fn block(&self, rows: &[usize], cols: &[usize]) -> DenseMatrix<Op::T> {
        let mut operator = self.operator.clone();
        let mut output = DenseMatrix::new(rows.len(), cols.len());
        for (i, row) in rows.iter().enumerate() {
            let point = self.geometry.node(*row);
            for (j, col) in cols.iter().enumerate() {
                output[[i, j]] = operator.evaluate(&point, self.dofs.to_element(*col));
            }
        }
        output
    }
}
