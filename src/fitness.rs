//! VDOT fitness estimation
//!
//! Derives a VDOT fitness index from a single performance using the
//! Daniels/Gilbert oxygen-cost and drop-dead curves:
//!
//! - oxygen cost of running at velocity `v` (m/min):
//!   `VO2 = -4.6 + 0.182258·v + 0.000104·v²`
//! - fraction of VO2max sustainable for `t` minutes:
//!   `%VO2max = 0.8 + 0.1894393·e^(-0.012788·t) + 0.2989558·e^(-0.1932605·t)`
//! - `VDOT = round(VO2 / %VO2max)`

use crate::error::{CalculationError, Result};
use crate::models::{FitnessResult, NormalizedPerformance};
use tracing::debug;

/// Baseline of the sustainable-fraction curve
pub const VO2MAX_FRACTION_BASE: f64 = 0.8;
/// Sustainable-fraction curve coefficient C1
pub const COEFF1: f64 = 0.1894393;
/// Sustainable-fraction curve exponent C2
pub const COEFF2: f64 = -0.012788;
/// Sustainable-fraction curve coefficient C3
pub const COEFF3: f64 = 0.2989558;
/// Sustainable-fraction curve exponent C4
pub const COEFF4: f64 = -0.1932605;

/// Oxygen cost intercept (mL/kg/min)
pub const OXYGEN_COST_INTERCEPT: f64 = -4.6;
/// Oxygen cost linear term
pub const OXYGEN_COST_LINEAR: f64 = 0.182258;
/// Oxygen cost quadratic term
pub const OXYGEN_COST_QUADRATIC: f64 = 0.000104;

/// Velocity in meters per minute
pub fn calculate_velocity(distance_meters: f64, time_minutes: f64) -> Result<f64> {
    if time_minutes == 0.0 {
        return Err(CalculationError::DivisionByZero {
            calculation: "velocity".to_string(),
        }
        .into());
    }
    Ok(distance_meters / time_minutes)
}

/// Fraction of VO2max that can be sustained for an effort of `time_minutes`
pub fn vo2max_fraction(time_minutes: f64) -> f64 {
    VO2MAX_FRACTION_BASE
        + COEFF1 * (COEFF2 * time_minutes).exp()
        + COEFF3 * (COEFF4 * time_minutes).exp()
}

/// Oxygen cost (mL/kg/min) of running at `velocity` m/min
pub fn oxygen_cost(velocity: f64) -> f64 {
    OXYGEN_COST_INTERCEPT + OXYGEN_COST_LINEAR * velocity + OXYGEN_COST_QUADRATIC * velocity.powi(2)
}

/// Rounded VDOT index, half away from zero
pub fn calculate_vdot(vo2max_fraction: f64, velocity: f64) -> i64 {
    (oxygen_cost(velocity) / vo2max_fraction).round() as i64
}

/// Run the full estimation for a normalized performance
pub fn estimate(performance: &NormalizedPerformance) -> Result<FitnessResult> {
    let velocity = calculate_velocity(performance.distance_meters, performance.time_minutes)?;
    let fraction = vo2max_fraction(performance.time_minutes);
    let vdot = calculate_vdot(fraction, velocity);

    debug!(velocity, vo2max_fraction = fraction, vdot, "estimated fitness");

    Ok(FitnessResult {
        velocity,
        vo2max_fraction: fraction,
        vdot,
    })
}
