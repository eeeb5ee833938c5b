//! Then steps for build worker BDD scenarios.

use super::world::{BuildWorld, run_async};
use extmatrix::tag::Tag;
use rstest_bdd_macros::then;

#[then(r#"the status of "{tag}" is "{label}""#)]
fn status_is(world: &BuildWorld, tag: String, label: String) -> Result<(), eyre::Report> {
    let parsed = Tag::parse(&tag)?;
    let actual = run_async(world.store().display_label(&parsed))?;
    if actual != label {
        return Err(eyre::eyre!("expected {tag} to be {label}, found {actual}"));
    }
    Ok(())
}

#[then("the queue has {finished:u64} finished job and {failed:u64} failed jobs")]
fn queue_totals(world: &BuildWorld, finished: u64, failed: u64) -> Result<(), eyre::Report> {
    let counts = run_async(world.queue().counts())?;
    if (counts.finished, counts.failed) != (finished, failed) {
        return Err(eyre::eyre!(
            "expected {finished} finished and {failed} failed, found {counts:?}"
        ));
    }
    Ok(())
}

#[then(r#"the request fails with "{message}""#)]
fn request_fails(world: &BuildWorld, message: String) -> Result<(), eyre::Report> {
    let err = world
        .last_trigger_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the request to fail"))?;
    if err.to_string() != message {
        return Err(eyre::eyre!("expected error {message:?}, got {err}"));
    }
    Ok(())
}

#[then("the queue is empty")]
fn queue_is_empty(world: &BuildWorld) -> Result<(), eyre::Report> {
    let counts = run_async(world.queue().counts())?;
    if counts.total != 0 {
        return Err(eyre::eyre!("expected no jobs, found {}", counts.total));
    }
    Ok(())
}

#[then("the worker reports {processed:u32} processed job")]
fn worker_processed(world: &BuildWorld, processed: u32) -> Result<(), eyre::Report> {
    let summary = world
        .last_summary
        .ok_or_else(|| eyre::eyre!("missing worker summary"))?;
    if summary.processed != processed || summary.interrupted {
        return Err(eyre::eyre!("unexpected worker summary {summary:?}"));
    }
    Ok(())
}
