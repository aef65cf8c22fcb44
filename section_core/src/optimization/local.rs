//! Derivative-free local search in the unit box
//!
//! - [`bounded_brent`]: scalar minimization on an interval, golden-section
//!   steps with parabolic interpolation where it is safe.
//! - [`powell`]: direction-set method over `[0, 1]ⁿ`; every line search is a
//!   bounded Brent search restricted to the part of the line inside the box.
//!
//! Both only ever evaluate points inside their bounds, so the objective never
//! sees an infeasible geometry.

/// Golden-section fraction (3 − √5)/2
const GOLDEN: f64 = 0.381_966_011_250_105_1;

/// Result of a local search
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMinimum {
    pub x: Vec<f64>,
    pub fx: f64,
    pub evaluations: usize,
}

/// +1 for zero, so a zero step still moves by the tolerance
fn step_sign(value: f64) -> f64 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Minimize `f` on `[a, b]` (Brent's bounded method).
///
/// Returns `(x, f(x), evaluations)`. Endpoints are never evaluated.
pub fn bounded_brent<F>(mut f: F, a: f64, b: f64, xatol: f64, max_evaluations: usize) -> (f64, f64, usize)
where
    F: FnMut(f64) -> f64,
{
    let sqrt_eps = f64::EPSILON.sqrt();
    let (mut a, mut b) = (a, b);

    let mut fulc = a + GOLDEN * (b - a);
    let mut nfc = fulc;
    let mut xf = fulc;
    let mut rat: f64 = 0.0;
    let mut e: f64 = 0.0;
    let mut fx = f(xf);
    let mut evaluations = 1;
    let mut ffulc = fx;
    let mut fnfc = fx;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
    let mut tol2 = 2.0 * tol1;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) && evaluations < max_evaluations {
        let mut golden = true;

        if e.abs() > tol1 {
            golden = false;
            let mut r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            r = e;
            e = rat;

            if p.abs() < (0.5 * q * r).abs() && p > q * (a - xf) && p < q * (b - xf) {
                rat = p / q;
                let x = xf + rat;
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1 * step_sign(xm - xf);
                }
            } else {
                golden = true;
            }
        }

        if golden {
            e = if xf >= xm { a - xf } else { b - xf };
            rat = GOLDEN * e;
        }

        let x = xf + step_sign(rat) * rat.abs().max(tol1);
        let fu = f(x);
        evaluations += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + xatol / 3.0;
        tol2 = 2.0 * tol1;
    }

    (xf, fx, evaluations)
}

/// Range of `t` for which `x + t·d` stays inside the unit box
fn box_interval(x: &[f64], d: &[f64]) -> Option<(f64, f64)> {
    let mut lo = f64::NEG_INFINITY;
    let mut hi = f64::INFINITY;
    for (&xi, &di) in x.iter().zip(d) {
        if di.abs() < 1e-15 {
            continue;
        }
        let (t0, t1) = ((0.0 - xi) / di, (1.0 - xi) / di);
        lo = lo.max(t0.min(t1));
        hi = hi.min(t0.max(t1));
    }
    (lo.is_finite() && hi.is_finite() && hi - lo > 1e-15).then_some((lo, hi))
}

fn along(x: &[f64], d: &[f64], t: f64) -> Vec<f64> {
    x.iter().zip(d).map(|(xi, di)| (xi + t * di).clamp(0.0, 1.0)).collect()
}

/// Line search from `x` along `d`; keeps `x` if nothing better is found.
fn line_search<F>(
    f: &mut F,
    x: &[f64],
    fx: f64,
    d: &[f64],
    xtol: f64,
    budget: usize,
) -> (Vec<f64>, f64, usize)
where
    F: FnMut(&[f64]) -> f64,
{
    let Some((lo, hi)) = box_interval(x, d) else {
        return (x.to_vec(), fx, 0);
    };
    let (t, ft, evaluations) = bounded_brent(|t| f(&along(x, d, t)), lo, hi, xtol, budget.max(1));
    if ft < fx {
        (along(x, d, t), ft, evaluations)
    } else {
        (x.to_vec(), fx, evaluations)
    }
}

/// Powell's direction-set method in `[0, 1]ⁿ`.
///
/// Stops after `max_iterations` sweeps, when a sweep improves the objective
/// by less than `ftol` (relative), or when `max_evaluations` is used up.
pub fn powell<F>(
    mut f: F,
    x0: &[f64],
    xtol: f64,
    ftol: f64,
    max_iterations: usize,
    max_evaluations: usize,
) -> LocalMinimum
where
    F: FnMut(&[f64]) -> f64,
{
    let n = x0.len();
    let mut x: Vec<f64> = x0.iter().map(|v| v.clamp(0.0, 1.0)).collect();
    let mut fx = f(&x);
    let mut evaluations = 1;
    let mut directions: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();

    for _ in 0..max_iterations.max(1) {
        let x_start = x.clone();
        let f_start = fx;
        let mut largest_decrease = 0.0;
        let mut largest_index = 0;

        for (i, d) in directions.iter().enumerate() {
            let f_before = fx;
            let budget = max_evaluations.saturating_sub(evaluations);
            let (x_new, f_new, used) = line_search(&mut f, &x, fx, d, xtol, budget);
            evaluations += used;
            x = x_new;
            fx = f_new;
            if f_before - fx > largest_decrease {
                largest_decrease = f_before - fx;
                largest_index = i;
            }
        }

        let converged = 2.0 * (f_start - fx) <= ftol * (f_start.abs() + fx.abs()) + 1e-20;
        if converged || evaluations >= max_evaluations {
            break;
        }

        // Replace the direction of largest decrease with the net displacement
        // when the extrapolated point says the valley runs that way.
        let displacement: Vec<f64> = x.iter().zip(&x_start).map(|(a, b)| a - b).collect();
        let extrapolated: Vec<f64> = x.iter().zip(&x_start).map(|(a, b)| (2.0 * a - b).clamp(0.0, 1.0)).collect();
        let f_extra = f(&extrapolated);
        evaluations += 1;

        if f_start > f_extra {
            let t = 2.0 * (f_start + f_extra - 2.0 * fx) * (f_start - fx - largest_decrease).powi(2)
                - largest_decrease * (f_start - f_extra).powi(2);
            if t < 0.0 {
                let budget = max_evaluations.saturating_sub(evaluations);
                let (x_new, f_new, used) = line_search(&mut f, &x, fx, &displacement, xtol, budget);
                evaluations += used;
                x = x_new;
                fx = f_new;
                if displacement.iter().any(|v| v.abs() > 0.0) {
                    directions.remove(largest_index);
                    directions.push(displacement);
                }
            }
        }

        if evaluations >= max_evaluations {
            break;
        }
    }

    LocalMinimum { x, fx, evaluations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brent_parabola() {
        let (x, fx, n) = bounded_brent(|x| (x - 0.3).powi(2) + 1.0, 0.0, 1.0, 1e-8, 500);
        assert!((x - 0.3).abs() < 1e-6);
        assert!((fx - 1.0).abs() < 1e-10);
        assert!(n < 50);
    }

    #[test]
    fn test_brent_kink() {
        // |x − a| like a capacity mismatch
        let (x, _, _) = bounded_brent(|x| (x - 0.6180).abs(), 0.0, 1.0, 1e-9, 500);
        assert!((x - 0.6180).abs() < 1e-6);
    }

    #[test]
    fn test_brent_minimum_at_bound() {
        let (x, _, _) = bounded_brent(|x| x, 0.2, 0.9, 1e-8, 500);
        assert!((x - 0.2).abs() < 1e-6);
        assert!(x > 0.2);
    }

    #[test]
    fn test_brent_respects_budget() {
        let (_, _, n) = bounded_brent(|x| (x - 0.5).abs(), 0.0, 1.0, 1e-12, 5);
        assert!(n <= 5);
    }

    #[test]
    fn test_powell_quadratic() {
        let result = powell(
            |x| (x[0] - 0.25).powi(2) + 10.0 * (x[1] - 0.7).powi(2) + (x[0] - 0.25) * (x[1] - 0.7),
            &[0.9, 0.1],
            1e-8,
            1e-12,
            50,
            5_000,
        );
        assert!((result.x[0] - 0.25).abs() < 1e-4);
        assert!((result.x[1] - 0.7).abs() < 1e-4);
    }

    #[test]
    fn test_powell_stays_in_box() {
        let result = powell(|x| -x[0] - x[1], &[0.5, 0.5], 1e-8, 1e-12, 20, 2_000);
        assert!(result.x.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(result.fx < -1.99);
    }

    #[test]
    fn test_powell_one_dimension() {
        let result = powell(|x| (x[0] - 0.1).abs(), &[0.8], 1e-9, 1e-12, 10, 1_000);
        assert!((result.x[0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_box_interval() {
        let (lo, hi) = box_interval(&[0.25, 0.5], &[1.0, 0.0]).unwrap();
        assert!((lo + 0.25).abs() < 1e-15);
        assert!((hi - 0.75).abs() < 1e-15);
        assert!(box_interval(&[0.5], &[0.0]).is_none());
    }
}
