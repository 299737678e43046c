//! pathdedup - geometry-based duplicate path remover
//!
//! Finds vector paths and compound paths that share the same geometry at a
//! chosen decimal precision, keeps the first of each and removes the rest.
//! Compound paths are processed before simple paths.

pub mod actions;
pub mod cli;
pub mod config;
pub mod document;
pub mod duplicates;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod output;
pub mod progress;

use std::sync::Arc;

use anyhow::{Context, Result};
use yansi::Paint;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::document::Workspace;
use crate::duplicates::{DedupEngine, EngineConfig, Scope};
use crate::error::ExitCode;
use crate::output::{status_message, JsonReport};
use crate::progress::Progress;

/// Run one dedup pass as described by the command line.
///
/// # Errors
///
/// Configuration, workspace I/O and JSON failures. Engine outcomes such as
/// "no documents open" are reported through the returned [`ExitCode`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, !cli.no_color);
    if cli.no_color {
        yansi::disable();
    }

    let config = Config::load(cli.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(cli.precision, cli.scope);

    let mut workspace = Workspace::load(&cli.workspace)
        .with_context(|| format!("failed to load workspace {}", cli.workspace.display()))?;

    let (document_name, scope) = match workspace.active_document() {
        Some(document) => {
            let has_selection = !document.selection.is_empty();
            if config.scope.falls_back(has_selection) {
                log::warn!("Nothing selected in '{}', using the whole document", document.name);
            }
            (
                Some(document.name.clone()),
                config.scope.resolve(has_selection),
            )
        }
        None => (None, Scope::WholeDocument),
    };

    let mut engine_config = EngineConfig::default()
        .with_precision(config.precision)
        .with_scope(scope)
        .with_parallel_threshold(config.parallel_threshold);
    let show_progress = !cli.no_progress && !cli.quiet && cli.output == OutputFormat::Text;
    if show_progress {
        engine_config = engine_config.with_progress_callback(Arc::new(Progress::new()));
    }

    let result = DedupEngine::new(engine_config).run_on_active(workspace.active_document_mut());
    let exit_code = ExitCode::from_outcome(&result);

    for failure in result.iter().flat_map(|outcome| outcome.failures()) {
        log::debug!("Not removed: {}", failure.message());
    }

    match cli.output {
        OutputFormat::Text => {
            let message = status_message(&result);
            match exit_code {
                ExitCode::Success => println!("{}", message.green()),
                ExitCode::PartialSuccess => println!("{}", message.yellow()),
                _ => println!("{}", message.yellow().bold()),
            }
        }
        OutputFormat::Json => {
            let report = JsonReport::new(document_name.as_deref(), &result);
            report
                .write_to(&mut std::io::stdout().lock(), true)
                .context("failed to write JSON report")?;
        }
    }

    if let (Ok(outcome), Some(destination)) = (&result, cli.destination()) {
        workspace
            .save(&destination)
            .with_context(|| format!("failed to write workspace {}", destination.display()))?;
        log::debug!(
            "Saved {} with {} item(s) removed",
            destination.display(),
            outcome.removed_simple() + outcome.removed_compound()
        );
    }

    Ok(exit_code)
}
