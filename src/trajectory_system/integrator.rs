//! Adaptive Dormand–Prince 5(4) integrator.
//!
//! `odeint` advances a first-order system through an ordered grid of output
//! times and reports the state at every grid point. Internally it takes as
//! many error-controlled steps as it needs and lands exactly on each
//! requested time.

use crate::constants::{
    ABSOLUTE_TOLERANCE, MAX_INTEGRATOR_STEPS, MIN_STEP_SIZE, RELATIVE_TOLERANCE,
};
use crate::errors::{Result, SimulationError};

/// Right-hand side `dy/dt = f(t, y)` of an N-dimensional system.
pub trait OdeSystem<const N: usize> {
    fn rhs(&self, t: f64, y: &[f64; N], dydt: &mut [f64; N]);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub rtol: f64,
    pub atol: f64,
    /// Step budget for each output interval.
    pub max_steps: usize,
    pub min_step: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            rtol: RELATIVE_TOLERANCE,
            atol: ABSOLUTE_TOLERANCE,
            max_steps: MAX_INTEGRATOR_STEPS,
            min_step: MIN_STEP_SIZE,
        }
    }
}

impl Tolerances {
    pub fn new(rtol: f64, atol: f64) -> Self {
        Tolerances {
            rtol,
            atol,
            ..Default::default()
        }
    }
}

// Dormand–Prince tableau
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (also row 7 of the tableau)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// 5th minus 4th-order weights
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 5.0;

fn stage<const N: usize>(y: &[f64; N], h: f64, terms: &[(f64, &[f64; N])]) -> [f64; N] {
    let mut out = *y;
    for (i, value) in out.iter_mut().enumerate() {
        let increment: f64 = terms.iter().map(|(a, k)| a * k[i]).sum();
        *value += h * increment;
    }
    out
}

fn all_finite<const N: usize>(values: &[f64; N]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// One trial step: the 5th-order solution and the weighted RMS error.
fn dopri_step<S, const N: usize>(
    system: &S,
    t: f64,
    y: &[f64; N],
    h: f64,
    tol: &Tolerances,
) -> Result<([f64; N], f64)>
where
    S: OdeSystem<N>,
{
    let eval = |t: f64, y: &[f64; N]| -> Result<[f64; N]> {
        let mut dydt = [0.0; N];
        system.rhs(t, y, &mut dydt);
        if all_finite(&dydt) {
            Ok(dydt)
        } else {
            Err(SimulationError::IntegrationError(format!(
                "non-finite derivative at t = {}: {:?}",
                t, dydt
            )))
        }
    };

    let k1 = eval(t, y)?;
    let k2 = eval(t + C2 * h, &stage(y, h, &[(A21, &k1)]))?;
    let k3 = eval(t + C3 * h, &stage(y, h, &[(A31, &k1), (A32, &k2)]))?;
    let k4 = eval(
        t + C4 * h,
        &stage(y, h, &[(A41, &k1), (A42, &k2), (A43, &k3)]),
    )?;
    let k5 = eval(
        t + C5 * h,
        &stage(y, h, &[(A51, &k1), (A52, &k2), (A53, &k3), (A54, &k4)]),
    )?;
    let k6 = eval(
        t + h,
        &stage(
            y,
            h,
            &[(A61, &k1), (A62, &k2), (A63, &k3), (A64, &k4), (A65, &k5)],
        ),
    )?;
    let y_new = stage(
        y,
        h,
        &[(B1, &k1), (B3, &k3), (B4, &k4), (B5, &k5), (B6, &k6)],
    );
    let k7 = eval(t + h, &y_new)?;

    let mut sum_sq = 0.0;
    for i in 0..N {
        let err = h
            * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
        let scale = tol.atol + tol.rtol * y[i].abs().max(y_new[i].abs());
        sum_sq += (err / scale).powi(2);
    }
    let error = if N == 0 { 0.0 } else { (sum_sq / N as f64).sqrt() };

    Ok((y_new, error))
}

fn step_factor(error: f64) -> f64 {
    if error == 0.0 {
        MAX_FACTOR
    } else {
        (SAFETY * error.powf(-0.2)).clamp(MIN_FACTOR, MAX_FACTOR)
    }
}

/// Step size to try after an accepted step of `h_try`. A step clipped to
/// land on an output time keeps the larger pre-clip size `h` so that short
/// output gaps don't throttle the next interval.
fn next_step_size(h: f64, h_try: f64, factor: f64, lands_on_output: bool) -> f64 {
    let grown = h_try * factor;
    if lands_on_output {
        grown.max(h.min(h_try * MAX_FACTOR))
    } else {
        grown
    }
}

/// Integrates `system` from `y0` at `times[0]` and returns the state at
/// every entry of `times`. The first row is `y0` itself.
pub fn odeint<S, const N: usize>(
    system: &S,
    y0: &[f64; N],
    times: &[f64],
    tol: &Tolerances,
) -> Result<Vec<[f64; N]>>
where
    S: OdeSystem<N>,
{
    if times.is_empty() {
        return Ok(Vec::new());
    }
    if times.iter().any(|t| !t.is_finite()) || times.windows(2).any(|w| w[1] <= w[0]) {
        return Err(SimulationError::IntegrationError(
            "output times must be finite and strictly increasing".to_string(),
        ));
    }
    if !all_finite(y0) {
        return Err(SimulationError::IntegrationError(format!(
            "non-finite initial state: {:?}",
            y0
        )));
    }

    let mut solution = Vec::with_capacity(times.len());
    solution.push(*y0);

    let mut t = times[0];
    let mut y = *y0;
    let mut h = times[times.len() - 1] - times[0];

    for &t_out in &times[1..] {
        let mut steps = 0;
        while t < t_out {
            if steps >= tol.max_steps {
                return Err(SimulationError::IntegrationError(format!(
                    "step budget of {} exhausted at t = {} before reaching {}",
                    tol.max_steps, t, t_out
                )));
            }
            steps += 1;

            let remaining = t_out - t;
            let lands_on_output = h >= remaining;
            let h_try = if lands_on_output { remaining } else { h };

            let (y_new, error) = dopri_step(system, t, &y, h_try, tol)?;
            let factor = step_factor(error);

            if error <= 1.0 {
                t = if lands_on_output { t_out } else { t + h_try };
                y = y_new;
                h = next_step_size(h, h_try, factor, lands_on_output);
            } else {
                h = h_try * factor;
                if h < tol.min_step {
                    return Err(SimulationError::IntegrationError(format!(
                        "step size {:e} fell below minimum {:e} at t = {}",
                        h, tol.min_step, t
                    )));
                }
            }
        }
        solution.push(y);
    }

    Ok(solution)
}
