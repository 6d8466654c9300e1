//! Running several independent scenarios.

use qs_stats::RunSummary;
use tracing::info;

use crate::{NoopObserver, ScenarioConfig, SimResult};

/// Build and run every scenario, returning one result per scenario in input
/// order.  A failing scenario does not stop the others.
///
/// With the `parallel` Cargo feature the scenarios run on Rayon's thread
/// pool.  Each scenario owns its streams, so results are identical either way.
pub fn run_scenarios(scenarios: &[ScenarioConfig]) -> Vec<SimResult<RunSummary>> {
    info!(scenarios = scenarios.len(), "Running batch");

    #[cfg(not(feature = "parallel"))]
    {
        scenarios.iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        scenarios.par_iter().map(run_one).collect()
    }
}

fn run_one(scenario: &ScenarioConfig) -> SimResult<RunSummary> {
    scenario.build()?.run(&mut NoopObserver)
}
