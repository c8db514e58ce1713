//! Sky Raid headless driver
//!
//! Runs one scripted session against the simulation core and reports the
//! outcome. Usage: `sky-raid [tuning.json]`; set `SKY_RAID_SEED` for a
//! reproducible run.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Raid (headless) starting...");

    let tuning = load_tuning(std::env::args().nth(1));
    let seed = session_seed();

    let mut sim = match sky_raid::sim::Simulation::new(tuning, seed) {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("Cannot start simulation: {e}");
            std::process::exit(1);
        }
    };

    let tick_rate = sim.tuning().tick_rate;
    let ticks = (tick_rate * SESSION_SECS) as u64;
    sim.start();
    for n in 0..ticks {
        if sim.step(&autopilot(n, tick_rate)).is_some() {
            log::info!("Player shot down after {:.1}s", sim.entities().elapsed_time());
            break;
        }
    }

    let report = sim.last_report();
    log::info!(
        "Seed {}: final score {} with {} health left (last tick: {} melee, {} hits dealt, {} taken)",
        sim.seed(),
        sim.score(),
        sim.player_health(),
        report.melee_contacts,
        report.enemy_hits,
        report.player_hits
    );

    let mut ledger = sky_raid::UpgradeLedger::default();
    ledger.award_for_score(sim.score());
    spend_evenly(&mut ledger);
    match ledger.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::warn!("Could not serialize upgrade ledger: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}

/// Upper bound on the scripted session length
#[cfg(not(target_arch = "wasm32"))]
const SESSION_SECS: f64 = 180.0;

/// Read tuning from `path`, falling back to defaults on any problem
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> sky_raid::Tuning {
    let Some(path) = path else {
        return sky_raid::Tuning::default();
    };
    let loaded = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| sky_raid::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {path}");
            tuning
        }
        Err(e) => {
            log::warn!("Failed to load tuning from {path}: {e}; using defaults");
            sky_raid::Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn session_seed() -> u64 {
    if let Some(seed) = std::env::var("SKY_RAID_SEED").ok().and_then(|s| s.parse().ok()) {
        return seed;
    }
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Spend points one per stat in turn until none are left or all are capped
#[cfg(not(target_arch = "wasm32"))]
fn spend_evenly(ledger: &mut sky_raid::UpgradeLedger) {
    loop {
        let mut spent = false;
        for stat in sky_raid::UpgradeStat::ALL {
            spent |= ledger.increase(stat);
        }
        if !spent {
            break;
        }
    }
}

/// Weave across the screen, firing continuously
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(tick: u64, tick_rate: f64) -> sky_raid::sim::PlayerIntents {
    let second = (tick as f64 / tick_rate) as u64;
    sky_raid::sim::PlayerIntents {
        left: second % 4 < 2,
        right: second % 4 >= 2,
        attack: true,
        ..Default::default()
    }
}
