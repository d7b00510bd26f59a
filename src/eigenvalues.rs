//! Analytical eigenvalues of boundary integral operators
//!
//! On a circle of radius `r` the Fourier modes `e^{i n theta}`, and on a sphere of radius
//! `rho` the spherical harmonics `Y_n^m`, are eigenfunctions of the single layer, double
//! layer, adjoint double layer and hypersingular operators of the Laplace, Helmholtz and
//! modified Helmholtz equations. The eigenvalues are known in closed form in terms of
//! Bessel functions and serve as reference values when testing discretisations.
//!
//! The values follow the normalisation of the operators on the unit parametrisation of
//! the circle and sphere, which is why they carry an extra factor `r^2` or `rho^2`
//! compared with the textbook eigenvalues.
use crate::special::{
    bessel_j, bessel_j_derivative, hankel, hankel_derivative, modified_bessel_i_derivative_scaled,
    modified_bessel_i_scaled, modified_bessel_k_derivative_scaled, modified_bessel_k_scaled,
    modified_spherical_bessel_i_derivative_scaled, modified_spherical_bessel_i_scaled,
    modified_spherical_bessel_k_derivative_scaled, modified_spherical_bessel_k_scaled,
    spherical_bessel_j, spherical_bessel_j_derivative, spherical_hankel,
    spherical_hankel_derivative,
};
use crate::types::{BemError, BemResult, EquationType, OperatorType};
use log::warn;
use rlst::c64;
use std::f64::consts::PI;
use std::marker::PhantomData;

/// An eigenmode on a circle or a sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The Fourier mode `e^{i n theta}` on a circle.
    Circular(i32),
    /// The spherical harmonic `Y_n^m` on a sphere. The eigenvalues only depend on `n`.
    Spherical(usize, i32),
}

/// Geometry and physics of the reference problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceParameters {
    /// Radius of the circle or sphere
    pub radius: f64,
    /// Wavenumber. Ignored for the Laplace equation.
    pub wavenumber: f64,
}

impl ReferenceParameters {
    /// Create new
    pub fn new(radius: f64, wavenumber: f64) -> Self {
        Self { radius, wavenumber }
    }
}

impl Default for ReferenceParameters {
    fn default() -> Self {
        Self {
            radius: 1.0,
            wavenumber: 1.0,
        }
    }
}

/// Static description of a boundary operator.
pub trait OperatorTraits {
    /// The equation the operator belongs to
    const EQUATION: EquationType;
    /// The kind of operator
    const OPERATOR: OperatorType;
    /// Spatial dimension
    const DIMENSION: usize;
}

/// Reference eigenvalues of the operator type `Op`.
pub struct RefEigenvalue<Op: OperatorTraits> {
    _op: PhantomData<Op>,
}

impl<Op: OperatorTraits> RefEigenvalue<Op> {
    /// Eigenvalue of `Op` for the given mode.
    pub fn compute(mode: Mode, parameters: &ReferenceParameters) -> BemResult<c64> {
        reference_eigenvalue(Op::EQUATION, Op::OPERATOR, Op::DIMENSION, mode, parameters)
    }
}

/// Eigenvalue of a boundary operator on a circle (`dimension = 2`) or sphere (`dimension = 3`).
pub fn reference_eigenvalue(
    equation: EquationType,
    operator: OperatorType,
    dimension: usize,
    mode: Mode,
    parameters: &ReferenceParameters,
) -> BemResult<c64> {
    let unsupported = || BemError::UnsupportedOperator {
        equation,
        operator,
        dimension,
    };

    if equation == EquationType::Maxwell
        && (dimension != 3 || operator != OperatorType::SingleLayer)
    {
        return Err(unsupported());
    }

    check_parameters(equation, parameters)?;

    match (dimension, mode) {
        (2, Mode::Circular(n)) => circle_eigenvalue(equation, operator, n, parameters),
        (3, Mode::Spherical(n, _)) => Ok(sphere_eigenvalue(equation, operator, n, parameters)),
        (2, Mode::Spherical(..)) => Err(BemError::InvalidMode(
            "a spherical mode was given for an operator on a circle".to_string(),
        )),
        (3, Mode::Circular(_)) => Err(BemError::InvalidMode(
            "a circular mode was given for an operator on a sphere".to_string(),
        )),
        _ => Err(unsupported()),
    }
}

fn check_parameters(equation: EquationType, parameters: &ReferenceParameters) -> BemResult<()> {
    if !(parameters.radius.is_finite() && parameters.radius > 0.0) {
        return Err(BemError::InvalidParameter(format!(
            "radius must be positive, got {}",
            parameters.radius
        )));
    }
    if equation != EquationType::Laplace
        && !(parameters.wavenumber.is_finite() && parameters.wavenumber > 0.0)
    {
        return Err(BemError::InvalidParameter(format!(
            "wavenumber must be positive, got {}",
            parameters.wavenumber
        )));
    }
    Ok(())
}

fn circle_eigenvalue(
    equation: EquationType,
    operator: OperatorType,
    n: i32,
    parameters: &ReferenceParameters,
) -> BemResult<c64> {
    let r = parameters.radius;
    let k = parameters.wavenumber;
    let n = n.unsigned_abs();
    let r2 = r * r;
    let pi2 = PI * PI;
    let iu = c64::new(0.0, 1.0);

    let value = match equation {
        EquationType::Laplace => match operator {
            OperatorType::SingleLayer => {
                if n == 0 {
                    warn!("The Laplace single layer eigenvalue of the constant mode is not defined");
                    return Err(BemError::InvalidMode(
                        "the Laplace single layer on a circle has no eigenvalue for n = 0"
                            .to_string(),
                    ));
                }
                c64::new(PI * r2 / n as f64, 0.0)
            }
            OperatorType::DoubleLayer | OperatorType::AdjointDoubleLayer => c64::new(0.0, 0.0),
            OperatorType::Hypersingular => c64::new(PI * n as f64, 0.0),
        },
        EquationType::Helmholtz => {
            let x = k * r;
            let h = hankel(n, x);
            let j = c64::new(bessel_j(n, x), 0.0);
            let dh = hankel_derivative(n, x);
            let dj = c64::new(bessel_j_derivative(n, x), 0.0);
            match operator {
                OperatorType::SingleLayer => iu * h * j * (r2 * pi2),
                OperatorType::DoubleLayer => iu * (h * dj + dh * j) * (-0.5 * k * r2 * pi2),
                OperatorType::AdjointDoubleLayer => iu * (h * dj + dh * j) * (0.5 * k * r2 * pi2),
                OperatorType::Hypersingular => -iu * dh * dj * (k * k * r2 * pi2),
            }
        }
        EquationType::ModifiedHelmholtz => {
            let x = k * r;
            // Every term pairs an I factor with a K factor, so the scalings cancel.
            let i = modified_bessel_i_scaled(n, x);
            let kn = modified_bessel_k_scaled(n, x);
            let di = modified_bessel_i_derivative_scaled(n, x);
            let dk = modified_bessel_k_derivative_scaled(n, x);
            let value = match operator {
                OperatorType::SingleLayer => 2.0 * r2 * PI * kn * i,
                OperatorType::DoubleLayer => -k * r2 * PI * (dk * i + kn * di),
                OperatorType::AdjointDoubleLayer => k * r2 * PI * (dk * i + kn * di),
                OperatorType::Hypersingular => -2.0 * k * k * r2 * PI * di * dk,
            };
            c64::new(value, 0.0)
        }
        EquationType::Maxwell => {
            return Err(BemError::UnsupportedOperator {
                equation,
                operator,
                dimension: 2,
            })
        }
    };
    Ok(value)
}

fn sphere_eigenvalue(
    equation: EquationType,
    operator: OperatorType,
    n: usize,
    parameters: &ReferenceParameters,
) -> c64 {
    let rho = parameters.radius;
    let k = parameters.wavenumber;
    let rho2 = rho * rho;
    let rho4 = rho2 * rho2;
    let nf = n as f64;
    let iu = c64::new(0.0, 1.0);

    match equation {
        EquationType::Laplace => {
            let value = match operator {
                OperatorType::SingleLayer => rho2 * rho / (2.0 * nf + 1.0),
                OperatorType::DoubleLayer => 0.5 * rho2 / (2.0 * nf + 1.0),
                OperatorType::AdjointDoubleLayer => -0.5 * rho2 / (2.0 * nf + 1.0),
                OperatorType::Hypersingular => rho * nf * (nf + 1.0) / (2.0 * nf + 1.0),
            };
            c64::new(value, 0.0)
        }
        EquationType::Helmholtz => {
            let x = k * rho;
            let j = c64::new(spherical_bessel_j(n, x), 0.0);
            let h = spherical_hankel(n, x);
            let dj = c64::new(spherical_bessel_j_derivative(n, x), 0.0);
            let dh = spherical_hankel_derivative(n, x);
            match operator {
                OperatorType::SingleLayer => iu * j * h * (k * rho4),
                OperatorType::DoubleLayer => iu * (dj * h + dh * j) * (-0.5 * k * k * rho4),
                OperatorType::AdjointDoubleLayer => iu * (dj * h + dh * j) * (0.5 * k * k * rho4),
                OperatorType::Hypersingular => -iu * dj * dh * (k * k * k * rho4),
            }
        }
        EquationType::ModifiedHelmholtz => {
            let x = k * rho;
            let i = modified_spherical_bessel_i_scaled(n, x);
            let kn = modified_spherical_bessel_k_scaled(n, x);
            let di = modified_spherical_bessel_i_derivative_scaled(n, x);
            let dk = modified_spherical_bessel_k_derivative_scaled(n, x);
            let value = match operator {
                OperatorType::SingleLayer => 2.0 * k * rho4 / PI * i * kn,
                OperatorType::DoubleLayer => -k * k * rho4 / PI * (di * kn + dk * i),
                OperatorType::AdjointDoubleLayer => k * k * rho4 / PI * (di * kn + dk * i),
                OperatorType::Hypersingular => -2.0 * k * k * k * rho4 / PI * di * dk,
            };
            c64::new(value, 0.0)
        }
        EquationType::Maxwell => {
            // Only the single layer reaches this point. The functions are evaluated at k,
            // independently of the radius.
            let j = c64::new(spherical_bessel_j(n, k), 0.0);
            let dj = c64::new(spherical_bessel_j_derivative(n, k), 0.0);
            let h = spherical_hankel(n, k);
            let dh = spherical_hankel_derivative(n, k);
            iu / k * (j + dj * k) * (h + dh * k)
        }
    }
}
