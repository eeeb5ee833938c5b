//! When steps for build worker BDD scenarios.

use std::sync::Arc;

use super::world::{BuildWorld, run_async};
use chrono::TimeDelta;
use extmatrix::queue::services::{DEFAULT_LEASE_TIMEOUT, DanglingJobSweeper};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the worker drains the queue")]
fn worker_drains_queue(world: &mut BuildWorld) -> Result<(), eyre::Report> {
    let worker = world.worker()?;
    let summary = run_async(worker.run()).wrap_err("run worker")?;
    world.last_summary = Some(summary);
    Ok(())
}

#[when(r#"the build tasks for "{pattern}" are requested"#)]
fn build_tasks_requested(world: &mut BuildWorld, pattern: String) -> Result<(), eyre::Report> {
    let trigger = world.trigger()?;
    if let Err(err) = run_async(trigger.enqueue_pattern(&pattern)) {
        world.last_trigger_error = Some(err);
    }
    Ok(())
}

#[when("the clock moves on by {minutes:i64} minutes")]
fn clock_moves_on(world: &mut BuildWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}

#[when("dangling jobs are cleared")]
fn dangling_jobs_cleared(world: &mut BuildWorld) -> Result<(), eyre::Report> {
    let sweeper = DanglingJobSweeper::new(
        Arc::clone(&world.jobs),
        Arc::clone(&world.statuses),
        Arc::clone(&world.clock),
    );
    run_async(sweeper.sweep(DEFAULT_LEASE_TIMEOUT)).wrap_err("sweep dangling jobs")?;
    Ok(())
}
