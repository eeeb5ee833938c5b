//! Given steps for build worker BDD scenarios.

use super::world::{BuildWorld, run_async};
use crate::spec_fixtures::{FAILING_BUILD, PASSING_BUILD};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"the build tasks for "{pattern}" are queued"#)]
fn build_tasks_queued(world: &mut BuildWorld, pattern: String) -> Result<(), eyre::Report> {
    let trigger = world.trigger()?;
    run_async(trigger.enqueue_pattern(&pattern)).wrap_err("enqueue scenario pattern")?;
    Ok(())
}

#[given("the container engine reports a successful build")]
fn engine_succeeds(world: &mut BuildWorld) -> Result<(), eyre::Report> {
    world.engine.push_build(PASSING_BUILD)?;
    Ok(())
}

#[given("the container engine reports a failed build")]
fn engine_fails(world: &mut BuildWorld) -> Result<(), eyre::Report> {
    world.engine.push_build(FAILING_BUILD)?;
    Ok(())
}

#[given("a worker has claimed the next job")]
fn worker_claimed_job(world: &mut BuildWorld) -> Result<(), eyre::Report> {
    run_async(world.queue().claim_next())?
        .ok_or_else(|| eyre::eyre!("expected a queued job to claim"))?;
    Ok(())
}
