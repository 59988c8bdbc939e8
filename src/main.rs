use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rocket_ascent::*;
use tracing_subscriber::EnvFilter;

const EPISODES: usize = 5;
const MAX_STEPS_PER_EPISODE: usize = 300;
const BURN_LEVELS: usize = 14;
const SEED: u64 = 42;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let csv_path = std::env::args().nth(1);

    let design = Design::new(1e4)?;
    let mut env = Environment::new(&design)?;
    let burn_rates = env.action_space().discretize(BURN_LEVELS);
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut telemetry = Telemetry::new(env.constants().body_radius);

    for episode in 1..=EPISODES {
        let mut state = env.reset();

        for _ in 0..MAX_STEPS_PER_EPISODE {
            let action = *burn_rates.choose(&mut rng).unwrap_or(&0.0);

            let (next_state, reward) = match env.step(state, action) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Episode {} aborted: {}", episode, e);
                    break;
                }
            };
            telemetry.collect_step(&next_state, action, reward, env.constants().time_step);

            if !env.running(&next_state) {
                break;
            }
            state = next_state;
        }

        let episode_return = telemetry.end_episode();
        tracing::info!("Episode {} finished with return {:.4}", episode, episode_return);
    }

    telemetry.display_data();

    if let Some(path) = csv_path {
        write_trajectory_file(&path, env.trajectory())?;
        tracing::info!(
            "Wrote {} trajectory rows to {}",
            env.trajectory().len(),
            path
        );
    }

    Ok(())
}
