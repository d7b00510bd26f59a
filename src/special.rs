//! Bessel-type special functions
//!
//! Cylindrical functions of integer order and spherical functions, together with their
//! first derivatives. These are the building blocks of the analytical eigenvalues of
//! boundary operators on circles and spheres.
//!
//! Integer order cylindrical Bessel functions of the first and second kind and the
//! modified Bessel functions are taken from [spec_math]. Spherical functions are
//! computed by recurrence from their closed form low order terms.
//!
//! The modified functions grow or decay exponentially. The `_scaled` variants return
//! `I_n(x) e^{-x}`, `K_n(x) e^{x}`, `i_n(x) e^{-x}` and `k_n(x) e^{x}`, which stay
//! representable for any argument.
//!
//! All functions expect a strictly positive argument.
use rlst::c64;
use spec_math::Bessel;
use std::f64::consts::{FRAC_PI_2, PI};

/// Rescale the downward recurrence when values exceed this magnitude.
const RESCALE_THRESHOLD: f64 = 1e250;

/// Above this argument the scaled modified Bessel functions of order 0 and 1 are taken
/// from their large argument expansion.
const LARGE_ARGUMENT: f64 = 500.0;

/// Cylindrical Bessel function of the first kind `J_n(x)`.
pub fn bessel_j(n: u32, x: f64) -> f64 {
    x.bessel_jv(n as f64)
}

/// Cylindrical Bessel function of the second kind `Y_n(x)`.
pub fn bessel_y(n: u32, x: f64) -> f64 {
    x.bessel_yv(n as f64)
}

/// Hankel function of the first kind `H_n(x) = J_n(x) + i Y_n(x)`.
pub fn hankel(n: u32, x: f64) -> c64 {
    c64::new(bessel_j(n, x), bessel_y(n, x))
}

/// Derivative `J_n'(x)`.
pub fn bessel_j_derivative(n: u32, x: f64) -> f64 {
    if n == 0 {
        -bessel_j(1, x)
    } else {
        0.5 * (bessel_j(n - 1, x) - bessel_j(n + 1, x))
    }
}

/// Derivative `Y_n'(x)`.
pub fn bessel_y_derivative(n: u32, x: f64) -> f64 {
    if n == 0 {
        -bessel_y(1, x)
    } else {
        0.5 * (bessel_y(n - 1, x) - bessel_y(n + 1, x))
    }
}

/// Derivative `H_n'(x)` of the Hankel function of the first kind.
pub fn hankel_derivative(n: u32, x: f64) -> c64 {
    c64::new(bessel_j_derivative(n, x), bessel_y_derivative(n, x))
}

/// Modified Bessel function of the first kind `I_n(x)`.
pub fn modified_bessel_i(n: u32, x: f64) -> f64 {
    x.bessel_iv(n as f64)
}

/// Modified Bessel function of the second kind `K_n(x)`.
pub fn modified_bessel_k(n: u32, x: f64) -> f64 {
    k_upward(n, x, x.bessel_k0(), x.bessel_k1())
}

/// Upward recurrence `K_{m+1} = K_{m-1} + 2m/x K_m`, which is stable for `K`.
fn k_upward(n: u32, x: f64, k0: f64, k1: f64) -> f64 {
    if n == 0 {
        return k0;
    }
    let mut previous = k0;
    let mut current = k1;
    for m in 1..n {
        let next = previous + 2.0 * m as f64 / x * current;
        previous = current;
        current = next;
    }
    current
}

/// Sum of the large argument expansion of `I_nu` (`sign = -1`) or `K_nu` (`sign = 1`)
/// without its prefactor.
fn large_argument_series(nu: f64, x: f64, sign: f64) -> f64 {
    let mu = 4.0 * nu * nu;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..=40 {
        let odd = (2 * k - 1) as f64;
        term *= sign * (mu - odd * odd) / (8.0 * k as f64 * x);
        sum += term;
        if term.abs() < f64::EPSILON * sum.abs() {
            break;
        }
    }
    sum
}

/// Exponentially scaled modified Bessel function of the first kind `I_n(x) e^{-x}`.
pub fn modified_bessel_i_scaled(n: u32, x: f64) -> f64 {
    if x < LARGE_ARGUMENT {
        return modified_bessel_i(n, x) * (-x).exp();
    }
    let prefactor = 1.0 / (2.0 * PI * x).sqrt();
    let i0 = prefactor * large_argument_series(0.0, x, -1.0);
    if n == 0 {
        return i0;
    }
    let nf = n as f64;
    if nf * (nf + 1.0) <= x {
        // Upward recurrence loses at most a factor e^{n^2/x} here.
        let mut previous = i0;
        let mut current = prefactor * large_argument_series(1.0, x, -1.0);
        for m in 1..n {
            let next = previous - 2.0 * m as f64 / x * current;
            previous = current;
            current = next;
        }
        current
    } else {
        let order = n as usize;
        let start = order + (40.0 * x).sqrt() as usize + 30;
        let values = miller_recurrence(order, start, 1.0, |m| 2.0 * m as f64 / x);
        i0 * values[order] / values[0]
    }
}

/// Exponentially scaled modified Bessel function of the second kind `K_n(x) e^{x}`.
pub fn modified_bessel_k_scaled(n: u32, x: f64) -> f64 {
    if x < LARGE_ARGUMENT {
        let scale = x.exp();
        k_upward(n, x, x.bessel_k0() * scale, x.bessel_k1() * scale)
    } else {
        let prefactor = (FRAC_PI_2 / x).sqrt();
        k_upward(
            n,
            x,
            prefactor * large_argument_series(0.0, x, 1.0),
            prefactor * large_argument_series(1.0, x, 1.0),
        )
    }
}

/// Derivative `I_n'(x)`.
pub fn modified_bessel_i_derivative(n: u32, x: f64) -> f64 {
    if n == 0 {
        modified_bessel_i(1, x)
    } else {
        0.5 * (modified_bessel_i(n - 1, x) + modified_bessel_i(n + 1, x))
    }
}

/// Derivative `K_n'(x)`.
pub fn modified_bessel_k_derivative(n: u32, x: f64) -> f64 {
    if n == 0 {
        -modified_bessel_k(1, x)
    } else {
        -0.5 * (modified_bessel_k(n - 1, x) + modified_bessel_k(n + 1, x))
    }
}

/// Scaled derivative `I_n'(x) e^{-x}`.
pub fn modified_bessel_i_derivative_scaled(n: u32, x: f64) -> f64 {
    if n == 0 {
        modified_bessel_i_scaled(1, x)
    } else {
        0.5 * (modified_bessel_i_scaled(n - 1, x) + modified_bessel_i_scaled(n + 1, x))
    }
}

/// Scaled derivative `K_n'(x) e^{x}`.
pub fn modified_bessel_k_derivative_scaled(n: u32, x: f64) -> f64 {
    if n == 0 {
        -modified_bessel_k_scaled(1, x)
    } else {
        -0.5 * (modified_bessel_k_scaled(n - 1, x) + modified_bessel_k_scaled(n + 1, x))
    }
}

/// Run the downward recurrence `f_{m-1} = a_m f_m + sign * f_{m+1}` from `start` and
/// return the unnormalised values `f_0, ..., f_order`.
///
/// The buffer has `start + 2` entries, so callers keep `start - order` bounded.
fn miller_recurrence(
    order: usize,
    start: usize,
    sign: f64,
    coefficient: impl Fn(usize) -> f64,
) -> Vec<f64> {
    let start = start.max(order + 1);
    let mut values = vec![0.0; start + 2];
    values[start] = 1e-30;
    for m in (1..=start).rev() {
        values[m - 1] = coefficient(m) * values[m] + sign * values[m + 1];
        if values[m - 1].abs() > RESCALE_THRESHOLD {
            for v in values[m - 1..].iter_mut() {
                *v /= RESCALE_THRESHOLD;
            }
        }
    }
    values.truncate(order + 1);
    values
}

/// Spherical Bessel functions of the first kind `j_0(x), ..., j_order(x)`.
///
/// For `order <= x` the upward recurrence from the closed forms of `j_0` and `j_1` is
/// stable. Above that Miller's downward recurrence is used, started `O(x^{1/3})` terms
/// past `order` and normalised by whichever of `j_0`, `j_1` is larger.
pub fn spherical_bessel_j_all(order: usize, x: f64) -> Vec<f64> {
    let j0 = x.sin() / x;
    if order == 0 {
        return vec![j0];
    }
    let j1 = x.sin() / (x * x) - x.cos() / x;
    if order as f64 <= x {
        let mut values = Vec::with_capacity(order + 1);
        values.push(j0);
        values.push(j1);
        for m in 1..order {
            let next = (2 * m + 1) as f64 / x * values[m] - values[m - 1];
            values.push(next);
        }
        return values;
    }
    let start = order + (10.0 * x.cbrt()) as usize + 30;
    let mut values = miller_recurrence(order, start, -1.0, |m| (2 * m + 1) as f64 / x);
    let scale = if j0.abs() >= j1.abs() {
        j0 / values[0]
    } else {
        j1 / values[1]
    };
    for v in values.iter_mut() {
        *v *= scale;
    }
    values
}

/// Spherical Bessel functions of the second kind `y_0(x), ..., y_order(x)`.
///
/// Uses the upward recurrence from `y_0(x) = -cos(x)/x`, which is stable for `y_n`.
pub fn spherical_bessel_y_all(order: usize, x: f64) -> Vec<f64> {
    let mut values = Vec::with_capacity(order + 1);
    values.push(-x.cos() / x);
    if order >= 1 {
        values.push(-x.cos() / (x * x) - x.sin() / x);
    }
    for m in 2..=order {
        let next = (2 * m - 1) as f64 / x * values[m - 1] - values[m - 2];
        values.push(next);
    }
    values
}

/// Spherical Bessel function of the first kind `j_n(x)`.
pub fn spherical_bessel_j(n: usize, x: f64) -> f64 {
    spherical_bessel_j_all(n, x)[n]
}

/// Spherical Bessel function of the second kind `y_n(x)`.
pub fn spherical_bessel_y(n: usize, x: f64) -> f64 {
    spherical_bessel_y_all(n, x)[n]
}

/// Spherical Hankel function of the first kind `h_n(x) = j_n(x) + i y_n(x)`.
pub fn spherical_hankel(n: usize, x: f64) -> c64 {
    c64::new(spherical_bessel_j(n, x), spherical_bessel_y(n, x))
}

/// Derivative of a spherical function from its values `z_0, ..., z_{n+1}`.
fn spherical_derivative(n: usize, x: f64, values: &[f64]) -> f64 {
    if n == 0 {
        -values[1]
    } else {
        values[n - 1] - (n + 1) as f64 / x * values[n]
    }
}

/// Derivative `j_n'(x)`.
pub fn spherical_bessel_j_derivative(n: usize, x: f64) -> f64 {
    spherical_derivative(n, x, &spherical_bessel_j_all(n + 1, x))
}

/// Derivative `y_n'(x)`.
pub fn spherical_bessel_y_derivative(n: usize, x: f64) -> f64 {
    spherical_derivative(n, x, &spherical_bessel_y_all(n + 1, x))
}

/// Derivative `h_n'(x)` of the spherical Hankel function of the first kind.
pub fn spherical_hankel_derivative(n: usize, x: f64) -> c64 {
    c64::new(
        spherical_bessel_j_derivative(n, x),
        spherical_bessel_y_derivative(n, x),
    )
}

/// Scaled modified spherical Bessel functions of the first kind
/// `i_0(x) e^{-x}, ..., i_order(x) e^{-x}`.
///
/// `i_n(x) = sqrt(pi / 2x) I_{n+1/2}(x)`. For `n(n+1) <= x` the upward recurrence from the
/// closed forms is used, otherwise a downward recurrence normalised by
/// `i_0(x) e^{-x} = (1 - e^{-2x}) / 2x`.
pub fn modified_spherical_bessel_i_scaled_all(order: usize, x: f64) -> Vec<f64> {
    let i0 = -(-2.0 * x).exp_m1() / (2.0 * x);
    if order == 0 {
        return vec![i0];
    }
    let nf = order as f64;
    if nf * (nf + 1.0) <= x {
        let mut values = Vec::with_capacity(order + 1);
        values.push(i0);
        values.push((1.0 + (-2.0 * x).exp()) / (2.0 * x) - i0 / x);
        for m in 1..order {
            let next = values[m - 1] - (2 * m + 1) as f64 / x * values[m];
            values.push(next);
        }
        return values;
    }
    let start = order + (40.0 * x).sqrt() as usize + 30;
    let mut values = miller_recurrence(order, start, 1.0, |m| (2 * m + 1) as f64 / x);
    let scale = i0 / values[0];
    for v in values.iter_mut() {
        *v *= scale;
    }
    values
}

/// Scaled modified spherical Bessel functions of the second kind
/// `k_0(x) e^{x}, ..., k_order(x) e^{x}`.
///
/// `k_n(x) = sqrt(pi / 2x) K_{n+1/2}(x)`, so that `k_0(x) = pi e^{-x} / 2x`. Computed by
/// upward recurrence.
pub fn modified_spherical_bessel_k_scaled_all(order: usize, x: f64) -> Vec<f64> {
    let mut values = Vec::with_capacity(order + 1);
    values.push(FRAC_PI_2 / x);
    if order >= 1 {
        values.push(FRAC_PI_2 * (1.0 / x + 1.0 / (x * x)));
    }
    for m in 2..=order {
        let next = values[m - 2] + (2 * m - 1) as f64 / x * values[m - 1];
        values.push(next);
    }
    values
}

/// Modified spherical Bessel functions of the first kind `i_0(x), ..., i_order(x)`.
pub fn modified_spherical_bessel_i_all(order: usize, x: f64) -> Vec<f64> {
    let scale = x.exp();
    modified_spherical_bessel_i_scaled_all(order, x)
        .into_iter()
        .map(|v| v * scale)
        .collect()
}

/// Modified spherical Bessel functions of the second kind `k_0(x), ..., k_order(x)`.
pub fn modified_spherical_bessel_k_all(order: usize, x: f64) -> Vec<f64> {
    let scale = (-x).exp();
    modified_spherical_bessel_k_scaled_all(order, x)
        .into_iter()
        .map(|v| v * scale)
        .collect()
}

/// Modified spherical Bessel function of the first kind `i_n(x)`.
pub fn modified_spherical_bessel_i(n: usize, x: f64) -> f64 {
    modified_spherical_bessel_i_all(n, x)[n]
}

/// Modified spherical Bessel function of the second kind `k_n(x)`.
pub fn modified_spherical_bessel_k(n: usize, x: f64) -> f64 {
    modified_spherical_bessel_k_all(n, x)[n]
}

/// Scaled modified spherical Bessel function of the first kind `i_n(x) e^{-x}`.
pub fn modified_spherical_bessel_i_scaled(n: usize, x: f64) -> f64 {
    modified_spherical_bessel_i_scaled_all(n, x)[n]
}

/// Scaled modified spherical Bessel function of the second kind `k_n(x) e^{x}`.
pub fn modified_spherical_bessel_k_scaled(n: usize, x: f64) -> f64 {
    modified_spherical_bessel_k_scaled_all(n, x)[n]
}

fn modified_spherical_i_derivative(n: usize, x: f64, values: &[f64]) -> f64 {
    if n == 0 {
        values[1]
    } else {
        values[n - 1] - (n + 1) as f64 / x * values[n]
    }
}

fn modified_spherical_k_derivative(n: usize, x: f64, values: &[f64]) -> f64 {
    if n == 0 {
        -values[1]
    } else {
        -values[n - 1] - (n + 1) as f64 / x * values[n]
    }
}

/// Derivative `i_n'(x)`.
pub fn modified_spherical_bessel_i_derivative(n: usize, x: f64) -> f64 {
    modified_spherical_i_derivative(n, x, &modified_spherical_bessel_i_all(n + 1, x))
}

/// Derivative `k_n'(x)`.
pub fn modified_spherical_bessel_k_derivative(n: usize, x: f64) -> f64 {
    modified_spherical_k_derivative(n, x, &modified_spherical_bessel_k_all(n + 1, x))
}

/// Scaled derivative `i_n'(x) e^{-x}`.
pub fn modified_spherical_bessel_i_derivative_scaled(n: usize, x: f64) -> f64 {
    modified_spherical_i_derivative(n, x, &modified_spherical_bessel_i_scaled_all(n + 1, x))
}

/// Scaled derivative `k_n'(x) e^{x}`.
pub fn modified_spherical_bessel_k_derivative_scaled(n: usize, x: f64) -> f64 {
    modified_spherical_k_derivative(n, x, &modified_spherical_bessel_k_scaled_all(n + 1, x))
}
