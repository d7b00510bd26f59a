//! Types specific to bempp-adapters

use rlst::{
    c32, c64, rlst_dynamic_array2, DynamicArray, MatrixInverse, MatrixLuDecomposition, RawAccess,
    RawAccessMut, RlstScalar, Shape, TransMode,
};

/// Scalar types that can be stored in a [crate::dense::DenseMatrix] and factorised.
pub trait BemScalar: RlstScalar + MatrixInverse {
    /// Solve `A x = b` with an LU decomposition of the square matrix `A`, consuming `A`.
    fn solve_lu(mat: DynamicArray<Self, 2>, b: &[Self]) -> BemResult<Vec<Self>>;
}

macro_rules! implement_bem_scalar {
    ($scalar:ty) => {
        impl BemScalar for $scalar {
            fn solve_lu(mat: DynamicArray<Self, 2>, b: &[Self]) -> BemResult<Vec<Self>> {
                let n = mat.shape()[0];
                let lu = mat
                    .into_lu_alloc()
                    .map_err(|e| BemError::LinearAlgebra(format!("{e:?}")))?;
                let mut rhs = rlst_dynamic_array2!($scalar, [n, 1]);
                rhs.data_mut().copy_from_slice(b);
                lu.solve_mat(TransMode::NoTrans, rhs.view_mut())
                    .map_err(|e| BemError::LinearAlgebra(format!("{e:?}")))?;
                Ok(rhs.data().to_vec())
            }
        }
    };
}

implement_bem_scalar!(f32);
implement_bem_scalar!(f64);
implement_bem_scalar!(c32);
implement_bem_scalar!(c64);

/// A point in three dimensional space.
pub type Point = [f64; 3];

/// The partial differential equation a boundary operator is associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationType {
    /// Laplace equation
    Laplace,
    /// Helmholtz equation
    Helmholtz,
    /// Modified Helmholtz (Yukawa) equation
    ModifiedHelmholtz,
    /// Time-harmonic Maxwell equations
    Maxwell,
}

/// The kind of boundary integral operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorType {
    /// Single layer operator
    SingleLayer,
    /// Double layer operator
    DoubleLayer,
    /// Adjoint (transpose) double layer operator
    AdjointDoubleLayer,
    /// Hypersingular operator
    Hypersingular,
}

impl std::fmt::Display for EquationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EquationType::Laplace => "Laplace",
            EquationType::Helmholtz => "Helmholtz",
            EquationType::ModifiedHelmholtz => "modified Helmholtz",
            EquationType::Maxwell => "Maxwell",
        };
        write!(f, "{name}")
    }
}

impl std::fmt::Display for OperatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperatorType::SingleLayer => "single layer",
            OperatorType::DoubleLayer => "double layer",
            OperatorType::AdjointDoubleLayer => "adjoint double layer",
            OperatorType::Hypersingular => "hypersingular",
        };
        write!(f, "{name}")
    }
}

/// Generic error type
#[derive(thiserror::Error, Debug)]
pub enum BemError {
    /// The dense linear algebra backend failed, for example on a singular matrix.
    #[error("Linear algebra error: {0}")]
    LinearAlgebra(String),
    /// No analytical eigenvalue is known for this operator.
    #[error("No reference eigenvalue for the {operator} operator of the {equation} equation in {dimension}D")]
    UnsupportedOperator {
        /// Equation type
        equation: EquationType,
        /// Operator type
        operator: OperatorType,
        /// Spatial dimension
        dimension: usize,
    },
    /// The requested mode does not fit the operator.
    #[error("Invalid mode: {0}")]
    InvalidMode(String),
    /// A geometric or physical parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result Type
pub type BemResult<T> = std::result::Result<T, BemError>;
