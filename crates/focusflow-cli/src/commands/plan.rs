use focusflow_core::StudyPlanner;

use super::{open_store, runtime, CommandResult};

pub fn run() -> CommandResult {
    let (config, store) = open_store()?;
    let backlog = store.backlog();
    let planner = StudyPlanner::from_config(&config.planner);

    let plan = runtime()?.block_on(planner.generate_study_plan(&backlog));
    println!("{plan}");
    Ok(())
}
