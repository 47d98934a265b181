use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tutti_onboarding::{
    clear_all_display_state, present_deferred, present_once, reset_onboarding_state,
    DeferredOnboarding, Displayable, PresentationOutcome, SharedDisplayStateStore,
};
use tutti_store::JsonFileDisplayStateStore;

use crate::bootstrap_helpers::resolve_store_path;
use crate::cli_args::{Cli, CliCommand, CliDemoItem};
use crate::console_presenter::{ConsoleHintPresenter, ConsoleHost, ConsoleTutorialPresenter};
use crate::demo_catalog::{demo_users, DemoCatalog};

const ATTEMPT_ANCHOR: &str = "console";

pub(crate) fn execute_cli(cli: Cli, out: &mut ConsoleHost) -> Result<()> {
    if let Some(user_id) = cli.user_id.as_deref() {
        validate_user_id(user_id)?;
    }
    let path = resolve_store_path(cli.store_path)?;
    let store = Arc::new(
        JsonFileDisplayStateStore::open(&path)
            .with_context(|| format!("failed to open display state store {}", path.display()))?,
    );
    let shared: SharedDisplayStateStore = store.clone();
    let catalog = DemoCatalog::new(shared);
    let user_id = cli.user_id.as_deref();

    match cli.command {
        CliCommand::Show { item, anchor } => execute_show(&catalog, item, user_id, &anchor, out)?,
        CliCommand::Attempt { required } => execute_attempt(&catalog, user_id, required, out)?,
        CliCommand::Status => render_status(&catalog, user_id, out)?,
        CliCommand::Reset { all: true } => {
            let removed = clear_all_display_state(&*store);
            writeln!(out, "Done! Removed {removed} display state entries.")?;
        }
        CliCommand::Reset { all: false } => execute_reset(&catalog, user_id, out)?,
    }

    if let Some(error) = store.last_persist_error() {
        bail!(
            "failed to persist display state to {}: {error}",
            path.display()
        );
    }
    Ok(())
}

fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        bail!("user id must not be blank; omit --user-id for anonymous state");
    }
    Ok(())
}

fn item_label(item: CliDemoItem) -> &'static str {
    match item {
        CliDemoItem::Hint => "hint",
        CliDemoItem::Tutorial | CliDemoItem::LocalizedTutorial => "tutorial",
    }
}

fn user_label(user_id: Option<&str>) -> &str {
    user_id.unwrap_or("anonymous")
}

fn execute_show(
    catalog: &DemoCatalog,
    item: CliDemoItem,
    user_id: Option<&str>,
    anchor: &str,
    out: &mut ConsoleHost,
) -> Result<()> {
    let outcome = match item {
        CliDemoItem::Hint => present_once(
            &mut ConsoleHintPresenter,
            &catalog.hint(user_id),
            &mut *out,
            anchor,
        ),
        CliDemoItem::Tutorial => present_once(
            &mut ConsoleTutorialPresenter,
            &catalog.tutorial(user_id),
            &mut *out,
            anchor,
        ),
        CliDemoItem::LocalizedTutorial => present_once(
            &mut ConsoleTutorialPresenter,
            &catalog.localized_tutorial(user_id),
            &mut *out,
            anchor,
        ),
    };
    tracing::debug!(outcome = outcome.as_str(), ?item, "show command finished");

    let label = item_label(item);
    match outcome {
        PresentationOutcome::Presented | PresentationOutcome::Deferred { .. } => {}
        PresentationOutcome::AlreadyDisplayed => {
            writeln!(out, "This {label} has already been displayed.")?;
            writeln!(
                out,
                "Run 'tutti reset' to reset its display state. You can then display it again."
            )?;
        }
        PresentationOutcome::Declined => {
            writeln!(out, "This {label} could not be presented.")?;
        }
    }
    Ok(())
}

fn execute_attempt(
    catalog: &DemoCatalog,
    user_id: Option<&str>,
    required: u32,
    out: &mut ConsoleHost,
) -> Result<()> {
    let hint = catalog.deferred_hint(user_id, required);
    let outcome = present_deferred(&mut ConsoleHintPresenter, &hint, &mut *out, ATTEMPT_ANCHOR);
    match outcome {
        PresentationOutcome::Deferred { remaining } => writeln!(
            out,
            "deferred hint id={} user={} remaining_attempts={remaining}",
            hint.identifier(),
            user_label(user_id)
        )?,
        PresentationOutcome::AlreadyDisplayed => {
            writeln!(out, "This hint has already been displayed.")?;
        }
        PresentationOutcome::Declined => writeln!(out, "This hint could not be presented.")?,
        PresentationOutcome::Presented => {}
    }
    Ok(())
}

fn render_status(
    catalog: &DemoCatalog,
    user_id: Option<&str>,
    out: &mut ConsoleHost,
) -> Result<()> {
    for user in demo_users(user_id) {
        for item in catalog.displayables(user) {
            writeln!(
                out,
                "{} id={} user={} displayed={}",
                item.type_tag(),
                item.identifier(),
                user_label(user),
                item.has_been_displayed()
            )?;
        }
        for item in catalog.deferred(user) {
            writeln!(
                out,
                "deferred_{} id={} user={} displayed={} attempts={}",
                item.type_tag(),
                item.identifier(),
                user_label(user),
                item.has_been_displayed(),
                item.registered_presentation_attempts()
            )?;
        }
    }
    Ok(())
}

fn execute_reset(
    catalog: &DemoCatalog,
    user_id: Option<&str>,
    out: &mut ConsoleHost,
) -> Result<()> {
    let users = demo_users(user_id);
    let displayables: Vec<Box<dyn Displayable>> = users
        .iter()
        .flat_map(|user| catalog.displayables(*user))
        .collect();
    let deferred: Vec<Box<dyn DeferredOnboarding>> = users
        .iter()
        .flat_map(|user| catalog.deferred(*user))
        .collect();

    let displayable_refs: Vec<&dyn Displayable> =
        displayables.iter().map(|item| &**item).collect();
    let deferred_refs: Vec<&dyn DeferredOnboarding> =
        deferred.iter().map(|item| &**item).collect();
    let touched = reset_onboarding_state(&displayable_refs, &deferred_refs);

    writeln!(
        out,
        "Done! All hints and tutorials are now set to not displayed ({touched} entries reset)."
    )?;
    Ok(())
}
