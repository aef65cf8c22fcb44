//! Basin hopping in the unit box
//!
//! Repeats: random hop from the current minimum, local [`powell`] search,
//! Metropolis acceptance at temperature `T`. The best local minimum seen is
//! returned, whether or not it was the last one accepted. Hops are clamped
//! into the box, so every trial geometry stays within its bounds.

use rand::Rng;

use super::local::{powell, LocalMinimum};

/// Parameters of one basin-hopping run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasinHopping {
    /// Number of hops after the initial local search
    pub iterations: usize,
    /// Metropolis temperature in objective units
    pub temperature: f64,
    /// Half-width of the uniform hop per coordinate
    pub step_size: f64,
    /// Line-search tolerance of the local search
    pub xtol: f64,
    /// Relative tolerance of the local search
    pub ftol: f64,
    /// Evaluation cap of each local search
    pub local_evaluations: usize,
}

/// Local sweeps allowed per hop
const LOCAL_ITERATIONS: usize = 100;

impl BasinHopping {
    /// Run from `x0` and return the best minimum with the total evaluation count.
    pub fn run<F, R>(&self, mut f: F, x0: &[f64], rng: &mut R) -> LocalMinimum
    where
        F: FnMut(&[f64]) -> f64,
        R: Rng,
    {
        let mut current = powell(&mut f, x0, self.xtol, self.ftol, LOCAL_ITERATIONS, self.local_evaluations);
        let mut evaluations = current.evaluations;
        let mut best = current.clone();
        let mut accepted = 0usize;

        for hop in 0..self.iterations {
            let start: Vec<f64> = current
                .x
                .iter()
                .map(|xi| (xi + rng.gen_range(-self.step_size..=self.step_size)).clamp(0.0, 1.0))
                .collect();
            let trial = powell(&mut f, &start, self.xtol, self.ftol, LOCAL_ITERATIONS, self.local_evaluations);
            evaluations += trial.evaluations;

            let accept = trial.fx < current.fx
                || rng.gen::<f64>() < (-(trial.fx - current.fx) / self.temperature).exp();
            log::debug!(
                "hop {}: f = {:.6} at {:?} ({})",
                hop,
                trial.fx,
                trial.x,
                if accept { "accepted" } else { "rejected" }
            );

            if trial.fx < best.fx {
                best = trial.clone();
            }
            if accept {
                accepted += 1;
                current = trial;
            }
        }

        log::debug!(
            "basin hopping: {} of {} hops accepted, best f = {:.6}",
            accepted,
            self.iterations,
            best.fx
        );
        LocalMinimum {
            x: best.x,
            fx: best.fx,
            evaluations,
        }
    }
}
