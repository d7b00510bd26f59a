//! Point interaction operators backed by Green's function kernels
//!
//! [KernelPointOperator] evaluates a kernel between the points of a [PointCloud]. It is the
//! simplest operator that fits the adaptors in [crate::generators] and is a convenient way of
//! sampling kernel matrices with a hierarchical matrix library.
use crate::dense::DenseMatrix;
use crate::eigenvalues::OperatorTraits;
use crate::operator::{BoundaryOperator, DofMap, Geometry, PotentialOperator, SubBlockOperator};
use crate::types::{BemScalar, EquationType, OperatorType, Point};
use green_kernels::{
    helmholtz_3d::Helmholtz3dKernel, laplace_3d::Laplace3dKernel,
    modified_helmholtz_3d::ModifiedHelmholtz3dKernel, traits::Kernel, types::GreenKernelEvalType,
};
use rlst::RlstScalar;

/// A cloud of points in 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    /// Create new
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the cloud empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The points
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Geometry for PointCloud {
    fn n_nodes(&self) -> usize {
        self.points.len()
    }

    fn node(&self, index: usize) -> Point {
        self.points[index]
    }
}

/// One degree of freedom per point of a point cloud.
#[derive(Debug, Clone, Copy)]
pub struct PointDofs {
    npoints: usize,
}

impl PointDofs {
    /// Create new
    pub fn new(points: &PointCloud) -> Self {
        Self {
            npoints: points.len(),
        }
    }
}

impl DofMap for PointDofs {
    type Element = usize;

    fn n_dofs(&self) -> usize {
        self.npoints
    }

    fn to_element(&self, dof: usize) -> usize {
        dof
    }
}

/// Evaluate a Green's function kernel between points of a cloud.
///
/// Coincident points are handed to the kernel unchanged, so the diagonal of the matrix is
/// whatever the kernel returns for a zero distance.
#[derive(Clone)]
pub struct KernelPointOperator<'a, T, K>
where
    T: BemScalar + RlstScalar<Real = f64>,
    K: Kernel<T = T>,
{
    kernel: K,
    sources: &'a PointCloud,
    result: Vec<T>,
}

impl<'a, T, K> KernelPointOperator<'a, T, K>
where
    T: BemScalar + RlstScalar<Real = f64>,
    K: Kernel<T = T>,
{
    /// Create new
    pub fn new(kernel: K, sources: &'a PointCloud) -> Self {
        Self {
            kernel,
            sources,
            result: vec![T::zero(); 1],
        }
    }

    /// The source points
    pub fn sources(&self) -> &PointCloud {
        self.sources
    }

    fn interact(&mut self, target: &Point, source: &Point) -> T {
        self.kernel.assemble_st(
            GreenKernelEvalType::Value,
            &source[..],
            &target[..],
            &mut self.result,
        );
        self.result[0]
    }
}

impl<'a, T> KernelPointOperator<'a, T, Laplace3dKernel<T>>
where
    T: BemScalar + RlstScalar<Real = f64>,
{
    /// Laplace kernel `1 / (4 pi r)`
    pub fn laplace(sources: &'a PointCloud) -> Self {
        Self::new(Laplace3dKernel::<T>::new(), sources)
    }
}

impl<'a, T> KernelPointOperator<'a, T, Helmholtz3dKernel<T>>
where
    T: BemScalar + RlstScalar<Real = f64, Complex = T>,
{
    /// Helmholtz kernel `e^{ikr} / (4 pi r)`
    pub fn helmholtz(wavenumber: f64, sources: &'a PointCloud) -> Self {
        Self::new(Helmholtz3dKernel::<T>::new(wavenumber), sources)
    }
}

impl<'a> KernelPointOperator<'a, f64, ModifiedHelmholtz3dKernel<f64>> {
    /// Modified Helmholtz (Yukawa) kernel `e^{-omega r} / (4 pi r)`
    pub fn modified_helmholtz(omega: f64, sources: &'a PointCloud) -> Self {
        Self::new(ModifiedHelmholtz3dKernel::<f64>::new(omega), sources)
    }
}

impl<'a, T, K> BoundaryOperator for KernelPointOperator<'a, T, K>
where
    T: BemScalar + RlstScalar<Real = f64>,
    K: Kernel<T = T>,
{
    type T = T;
    type Element = usize;

    fn evaluate(&mut self, test: usize, trial: usize) -> T {
        let sources = self.sources;
        self.interact(&sources.points[test], &sources.points[trial])
    }
}

impl<'a, T, K> SubBlockOperator for KernelPointOperator<'a, T, K>
where
    T: BemScalar + RlstScalar<Real = f64>,
    K: Kernel<T = T>,
{
    type T = T;

    fn compute_block(&mut self, rows: &[usize], cols: &[usize], block: &mut DenseMatrix<T>) {
        assert_eq!(
            block.shape(),
            [rows.len(), cols.len()],
            "Block has the wrong shape"
        );
        let sources = self.sources;
        for (j, col) in cols.iter().enumerate() {
            for (i, row) in rows.iter().enumerate() {
                block[[i, j]] = self.interact(&sources.points[*row], &sources.points[*col]);
            }
        }
    }
}

impl<'a, T, K> PotentialOperator for KernelPointOperator<'a, T, K>
where
    T: BemScalar + RlstScalar<Real = f64>,
    K: Kernel<T = T>,
{
    type T = T;
    type Element = usize;

    fn evaluate(&mut self, point: &Point, element: usize) -> T {
        let sources = self.sources;
        self.interact(point, &sources.points[element])
    }
}

impl<'a, T> OperatorTraits for KernelPointOperator<'a, T, Laplace3dKernel<T>>
where
    T: BemScalar + RlstScalar<Real = f64>,
{
    const EQUATION: EquationType = EquationType::Laplace;
    const OPERATOR: OperatorType = OperatorType::SingleLayer;
    const DIMENSION: usize = 3;
}

impl<'a, T> OperatorTraits for KernelPointOperator<'a, T, Helmholtz3dKernel<T>>
where
    T: BemScalar + RlstScalar<Real = f64, Complex = T>,
{
    const EQUATION: EquationType = EquationType::Helmholtz;
    const OPERATOR: OperatorType = OperatorType::SingleLayer;
    const DIMENSION: usize = 3;
}

impl<'a> OperatorTraits for KernelPointOperator<'a, f64, ModifiedHelmholtz3dKernel<f64>> {
    const EQUATION: EquationType = EquationType::ModifiedHelmholtz;
    const OPERATOR: OperatorType = OperatorType::SingleLayer;
    const DIMENSION: usize = 3;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eigenvalues::{Mode, RefEigenvalue, ReferenceParameters};
    use approx::*;
    use rlst::c64;
    use std::f64::consts::PI;

    fn cloud() -> PointCloud {
        PointCloud::new(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.5, 0.5, 1.5],
        ])
    }

    fn distance(a: &Point, b: &Point) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }

    #[test]
    fn test_point_dofs() {
        let points = cloud();
        let dofs = PointDofs::new(&points);
        assert_eq!(dofs.n_dofs(), 4);
        assert_eq!(dofs.to_element(3), 3);
        assert_eq!(points.n_nodes(), 4);
        assert_eq!(points.node(2), [0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_laplace() {
        let points = cloud();
        let mut op = KernelPointOperator::<f64, _>::laplace(&points);
        for (i, j) in [(0, 1), (1, 2), (3, 0)] {
            let r = distance(&points.points()[i], &points.points()[j]);
            let value = BoundaryOperator::evaluate(&mut op, i, j);
            assert_relative_eq!(value, 1.0 / (4.0 * PI * r), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_helmholtz() {
        let points = cloud();
        let k = 2.5;
        let mut op = KernelPointOperator::<c64, _>::helmholtz(k, &points);
        let r = distance(&points.points()[1], &points.points()[3]);
        let value = BoundaryOperator::evaluate(&mut op, 1, 3);
        let expected = c64::new((k * r).cos(), (k * r).sin()) / (4.0 * PI * r);
        assert_relative_eq!(value.re, expected.re, epsilon = 1e-12);
        assert_relative_eq!(value.im, expected.im, epsilon = 1e-12);
    }

    #[test]
    fn test_modified_helmholtz_decays() {
        let points = cloud();
        let mut yukawa = KernelPointOperator::modified_helmholtz(1.5, &points);
        let mut laplace = KernelPointOperator::<f64, _>::laplace(&points);
        for (i, j) in [(0, 1), (0, 2), (2, 3)] {
            let y = BoundaryOperator::evaluate(&mut yukawa, i, j);
            let l = BoundaryOperator::evaluate(&mut laplace, i, j);
            assert!(y > 0.0);
            assert!(y < l);
        }
    }

    #[test]
    fn test_block_and_potential() {
        let points = cloud();
        let mut op = KernelPointOperator::<f64, _>::laplace(&points);
        let mut block = DenseMatrix::new(2, 2);
        op.compute_block(&[0, 2], &[1, 3], &mut block);
        for (i, row) in [0, 2].iter().enumerate() {
            for (j, col) in [1, 3].iter().enumerate() {
                let expected = BoundaryOperator::evaluate(&mut op, *row, *col);
                assert_relative_eq!(block[[i, j]], expected, epsilon = 1e-14);
            }
        }

        let target = [3.0, 0.0, 0.0];
        let value = PotentialOperator::evaluate(&mut op, &target, 1);
        assert_relative_eq!(value, 1.0 / (8.0 * PI), epsilon = 1e-12);
    }

    #[test]
    fn test_operator_traits() {
        type Laplace = KernelPointOperator<'static, f64, Laplace3dKernel<f64>>;
        assert_eq!(Laplace::EQUATION, EquationType::Laplace);
        assert_eq!(Laplace::DIMENSION, 3);
        let value =
            RefEigenvalue::<Laplace>::compute(Mode::Spherical(0, 0), &ReferenceParameters::default())
                .unwrap();
        assert_relative_eq!(value.re, 1.0, epsilon = 1e-14);
    }
}
