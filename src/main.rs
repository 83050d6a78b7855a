/*!
 * Memory Strategy Simulator - Demo Entry Point
 *
 * Builds an engine from the environment, applies one random workload and
 * prints the resulting state as JSON on stdout.
 */

use anyhow::Context;
use memsim::core::json;
use memsim::memory::run_random_workload;
use memsim::{init_tracing, MemoryManager, SimResult, SimulatorConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = SimulatorConfig::from_env().context("Failed to load simulator configuration")?;
    info!(
        mode = %config.mode,
        algorithm = %config.algorithm,
        total_memory = config.total_memory,
        unit_size = config.unit_size(),
        "Simulator starting"
    );

    let mut rng = match std::env::var("MEMSIM_SEED") {
        Ok(seed) => {
            let seed: u64 = seed.trim().parse().context("MEMSIM_SEED must be an integer")?;
            info!(seed, "Using seeded workload");
            StdRng::seed_from_u64(seed)
        }
        Err(_) => StdRng::from_entropy(),
    };

    let snapshot = simulate(&config, &mut rng).context("Simulation failed")?;
    println!("{}", snapshot);
    Ok(())
}

/// Run one random workload and render the final state as pretty JSON
fn simulate(config: &SimulatorConfig, rng: &mut StdRng) -> SimResult<String> {
    let mut manager = MemoryManager::from_config(config)?;

    let created = run_random_workload(&mut manager, rng);
    let stats = manager.stats();
    info!(
        processes = created.len(),
        block_pages = manager.block_page_count(),
        utilization = %format!("{:.1}%", stats.utilization_rate),
        used_memory = stats.used_memory,
        fragmented_blocks = stats.fragmented_blocks,
        pressure = %stats.memory_pressure(),
        "Workload complete"
    );

    Ok(json::to_string_pretty(&manager.snapshot())?)
}
