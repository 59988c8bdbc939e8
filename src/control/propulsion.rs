use crate::config::PhysicalConstants;

/// Thrust-to-weight ratio of the engine, modelled on the S-IC first stage.
///
/// `action` and `fuel_mass` are the burn rate and remaining fuel frozen at
/// the start of the integration step. The engine cuts off (ratio 0) when
/// the tank cannot sustain `action` for a full step. While burning, the
/// `g_local` factors cancel, so the result only depends on the burn rate
/// and the vehicle mass.
pub fn thrust_to_weight(
    g_local: f64,
    action: f64,
    fuel_mass: f64,
    constants: &PhysicalConstants,
) -> f64 {
    if can_sustain(action, fuel_mass, constants) {
        let total_mass = constants.empty_mass + fuel_mass;
        action * g_local * constants.specific_impulse / (total_mass * g_local)
    } else {
        0.0
    }
}

/// Whether the tank can sustain `action` for one full step.
pub fn can_sustain(action: f64, fuel_mass: f64, constants: &PhysicalConstants) -> bool {
    fuel_mass > action * constants.time_step
}
