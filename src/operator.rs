//! Interfaces of the boundary element collaborators
//!
//! Mesh handling, quadrature and singular integration are provided by other libraries.
//! The adaptors in [crate::generators] only see them through the traits in this module.
use crate::dense::DenseMatrix;
use crate::types::{BemScalar, Point};

/// Map from degrees of freedom to the mesh entities they live on.
pub trait DofMap {
    /// Identifier of a mesh element (or node) as understood by the operators.
    type Element: Copy;

    /// Number of degrees of freedom.
    fn n_dofs(&self) -> usize;

    /// The element associated with a degree of freedom.
    fn to_element(&self, dof: usize) -> Self::Element;
}

/// A boundary integral operator evaluated element by element.
///
/// Implementations may keep scratch data or caches between calls, hence `&mut self`.
/// Adaptors that need shared access evaluate on a local clone.
pub trait BoundaryOperator {
    /// Scalar type
    type T: BemScalar;
    /// Element identifier
    type Element: Copy;

    /// Interaction between a test element and a trial element.
    fn evaluate(&mut self, test: Self::Element, trial: Self::Element) -> Self::T;
}

/// A boundary integral operator that computes whole blocks of its matrix at once.
pub trait SubBlockOperator {
    /// Scalar type
    type T: BemScalar;

    /// Fill `block` with the entries at the given degree of freedom rows and columns.
    ///
    /// `block` has shape `[rows.len(), cols.len()]`.
    fn compute_block(&mut self, rows: &[usize], cols: &[usize], block: &mut DenseMatrix<Self::T>);
}

/// A potential operator evaluated between a point and a boundary element.
pub trait PotentialOperator {
    /// Scalar type
    type T: BemScalar;
    /// Element identifier
    type Element: Copy;

    /// Contribution of a boundary element to the potential at `point`.
    fn evaluate(&mut self, point: &Point, element: Self::Element) -> Self::T;
}

/// A set of evaluation points.
pub trait Geometry {
    /// Number of nodes
    fn n_nodes(&self) -> usize;

    /// The coordinates of a node.
    fn node(&self, index: usize) -> Point;
}
