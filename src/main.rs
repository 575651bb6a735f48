//! Hill Climb entry point
//!
//! Headless native driver: runs a scripted drive on one level at the fixed
//! timestep and reports the run. Usage: `hill-climb [level] [ticks] [quality]`.

use std::path::Path;

use hill_climb::consts::*;
use hill_climb::sim::{GameEvent, GameState, TickInput, abandon_run, tick};
use hill_climb::{LEVELS, Profile, QualityPreset, Settings};

/// Simple autopilot: hold the throttle and lean toward the slope ahead
fn autopilot(state: &GameState) -> TickInput {
    let car = &state.vehicle;
    let ahead = state.terrain.angle_at(car.pos.x + CAR_WIDTH * 2.0);
    let lean = ahead - car.angle;
    TickInput {
        throttle: true,
        brake: car.vel.x > car.top_speed() * 0.9,
        steer_left: !car.grounded && lean > 0.2,
        steer_right: !car.grounded && lean < -0.2,
        pause: false,
    }
}

fn main() {
    env_logger::init();
    log::info!("Hill Climb (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let level = args
        .next()
        .and_then(|a| a.parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, LEVELS.len())
        - 1;
    let max_ticks = args
        .next()
        .and_then(|a| a.parse::<u64>().ok())
        .unwrap_or(60 * 60 * 5);
    let quality = match args.next().map(|a| a.parse::<QualityPreset>()) {
        Some(Ok(preset)) => preset,
        Some(Err(err)) => {
            log::warn!("{err}; using the default preset");
            QualityPreset::default()
        }
        None => QualityPreset::default(),
    };

    let profile_path = Path::new(Profile::FILE_NAME);
    let mut profile = Profile::load_or_default(profile_path);
    let settings = Settings::from_preset(quality);

    let Some(mut state) = GameState::for_level(level, profile.car_stats, &settings) else {
        log::error!("No level {}", level + 1);
        return;
    };

    // Fixed-timestep accumulator, fed a steady 60 FPS frame clock
    let frame_dt = 1.0 / 60.0;
    let mut accumulator = 0.0_f32;
    while state.time_ticks < max_ticks && !state.is_over() {
        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot(&state);
            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::Damaged { amount, severity } => {
                        log::info!("{:?}: -{:.1} health", severity, amount)
                    }
                    GameEvent::FuelCollected { amount } => log::debug!("Fuel +{}", amount),
                    GameEvent::CoinCollected { value } => log::debug!("Coin +{}", value),
                    GameEvent::TargetReached => log::info!("Level target reached"),
                    GameEvent::RunEnded { cause } => log::info!("Run ended: {:?}", cause),
                    GameEvent::Landed => {}
                }
            }
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    // Out of ticks still counts as a run
    abandon_run(&mut state);

    let car = &state.vehicle;
    println!("Level:    {} ({})", LEVELS[level].name, LEVELS[level].difficulty_label);
    println!("Quality:  {}", quality.as_str());
    println!("Ticks:    {}", state.time_ticks);
    println!("Distance: {:.0} / {:.0}", car.distance_traveled, state.target_distance);
    println!("Coins:    {}", state.coins);
    println!("Fuel:     {:.1}", car.fuel);
    println!("Health:   {:.1}", car.health);

    if let Some(summary) = &state.summary {
        println!("Outcome:  {:?}", summary.cause);
        if profile.record_run(summary) {
            println!("New best for {}!", summary.level_key());
        }
        if let Some(best) = profile.best_for(&summary.level_key()) {
            println!("Best:     {:.0}", best);
        }
        if let Err(err) = profile.save(profile_path) {
            log::error!("{err}");
        }
    }
}
