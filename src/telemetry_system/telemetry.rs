use crate::trajectory_system::state::StateVector;

/// Running summary of an agent's interaction with the environment.
#[derive(Debug, Clone)]
pub struct Telemetry {
    pub log: Vec<String>,
    body_radius: f64,
    max_speed: f64,
    max_altitude: f64,
    min_fuel: f64,
    steps: usize,
    episodes: usize,
    episode_return: f64,
    episode_returns: Vec<f64>,
    simulation_time: f64,
}

impl Telemetry {
    pub fn new(body_radius: f64) -> Self {
        Telemetry {
            log: Vec::new(),
            body_radius,
            max_speed: 0.0,
            max_altitude: 0.0,
            min_fuel: f64::MAX,
            steps: 0,
            episodes: 0,
            episode_return: 0.0,
            episode_returns: Vec::new(),
            simulation_time: 0.0,
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn collect_step(&mut self, state: &StateVector, action: f64, reward: f64, delta_time: f64) {
        self.simulation_time += delta_time;
        self.steps += 1;
        self.episode_return += reward;

        let altitude = state.altitude(self.body_radius);
        self.max_speed = self.max_speed.max(state.speed);
        self.max_altitude = self.max_altitude.max(altitude);
        self.min_fuel = self.min_fuel.min(state.fuel_mass);

        self.log.push(format!(
            "Time: {} | Burn: {:.1} kg/s | Speed: {:.2} m/s | Path angle: {:.2}° | \
             Altitude: {} | Fuel: {:.2} kg | Reward: {:.4}",
            Self::format_time(self.simulation_time),
            action,
            state.speed,
            state.flight_path_angle.to_degrees(),
            Self::format_altitude(altitude),
            state.fuel_mass,
            reward,
        ));
    }

    /// Close the current episode and start accumulating a new return.
    pub fn end_episode(&mut self) -> f64 {
        let episode_return = self.episode_return;
        self.episode_returns.push(episode_return);
        self.episodes += 1;
        self.episode_return = 0.0;
        episode_return
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn episode_returns(&self) -> &[f64] {
        &self.episode_returns
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn max_altitude(&self) -> f64 {
        self.max_altitude
    }

    pub fn min_fuel(&self) -> f64 {
        self.min_fuel
    }

    pub fn display_data(&self) {
        println!("--- Telemetry Data ---");
        for entry in &self.log {
            println!("{}", entry);
        }
        println!("--- End of Telemetry ---");

        println!("\n--- Simulation Summary ---");
        println!("Simulated Time: {}", Self::format_time(self.simulation_time));
        println!("Steps: {}", self.steps);
        println!("Max Speed: {:.2} m/s", self.max_speed);
        println!("Max Altitude: {}", Self::format_altitude(self.max_altitude));
        if self.steps > 0 {
            println!("Min Fuel: {:.2} kg", self.min_fuel);
        }

        println!("\n--- Episode Returns ---");
        for (episode, episode_return) in self.episode_returns.iter().enumerate() {
            println!("Episode {}: {:.4}", episode + 1, episode_return);
        }
    }
}
