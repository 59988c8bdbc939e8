use std::io::{self, Write};

use crate::trajectory_system::state::{StateVector, STATE_DIMENSION};
use crate::utils::vector2d::Vector2D;

/// Append-only log of every integrator output row across all steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    states: Vec<StateVector>,
}

impl Trajectory {
    pub fn new() -> Self {
        Trajectory { states: Vec::new() }
    }

    pub fn extend<I: IntoIterator<Item = StateVector>>(&mut self, states: I) {
        self.states.extend(states);
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn last(&self) -> Option<&StateVector> {
        self.states.last()
    }

    /// One component (by state index) over the whole log, `None` for an
    /// index outside the state layout.
    pub fn time_series(&self, component: usize) -> Option<Vec<f64>> {
        if component >= STATE_DIMENSION {
            return None;
        }
        Some(self.states.iter().map(|s| s.to_array()[component]).collect())
    }

    /// `(polar_angle, radial_distance)` pairs.
    pub fn polar_ground_track(&self) -> Vec<(f64, f64)> {
        self.states
            .iter()
            .map(|s| (s.polar_angle, s.radial_distance))
            .collect()
    }

    pub fn cartesian_ground_track(&self) -> Vec<Vector2D> {
        self.states
            .iter()
            .map(|s| Vector2D::from_polar(s.radial_distance, s.polar_angle))
            .collect()
    }
}

/// Write the log as CSV, one row per state.
pub fn write_trajectory<W: Write>(writer: &mut W, trajectory: &Trajectory) -> io::Result<()> {
    writeln!(
        writer,
        "index,speed,flight_path_angle,radial_distance,fuel_mass,polar_angle,x,y"
    )?;

    for (index, s) in trajectory.states().iter().enumerate() {
        let point = Vector2D::from_polar(s.radial_distance, s.polar_angle);
        writeln!(
            writer,
            "{},{:.4},{:.6},{:.4},{:.4},{:.8},{:.4},{:.4}",
            index,
            s.speed,
            s.flight_path_angle,
            s.radial_distance,
            s.fuel_mass,
            s.polar_angle,
            point.x,
            point.y,
        )?;
    }

    Ok(())
}

pub fn write_trajectory_file(path: &str, trajectory: &Trajectory) -> io::Result<()> {
    let mut file = io::BufWriter::new(std::fs::File::create(path)?);
    write_trajectory(&mut file, trajectory)?;
    file.flush()
}
