//! Watch command implementation.

use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;

use mdtangle::errors::{Result, TangleError};
use mdtangle::interface::Context;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use super::tangle::{tangle, TangleOptions};

/// Options for the watch command.
#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    /// Debounce delay in milliseconds; the config value when unset.
    pub debounce_ms: Option<u64>,
}

/// Compiled source and exclude patterns.
struct PathFilter {
    sources: Vec<glob::Pattern>,
    exclude: Vec<glob::Pattern>,
}

impl PathFilter {
    fn new(ctx: &Context) -> Result<Self> {
        let compile = |patterns: &[String]| -> Result<Vec<glob::Pattern>> {
            patterns
                .iter()
                .map(|p| glob::Pattern::new(p).map_err(TangleError::from))
                .collect()
        };
        let mut exclude = compile(&ctx.config.exclude)?;
        exclude.extend(compile(&ctx.config.watch.exclude)?);
        Ok(Self {
            sources: compile(&ctx.config.source_patterns)?,
            exclude,
        })
    }

    /// Returns true if a change to `path` should trigger a new pass.
    fn is_relevant(&self, path: &Path, base_dir: &Path) -> bool {
        let relative = path.strip_prefix(base_dir).unwrap_or(path);
        let literal_separator = glob::MatchOptions {
            require_literal_separator: true,
            ..glob::MatchOptions::new()
        };
        self.sources.iter().any(|p| p.matches_path(relative))
            && !self
                .exclude
                .iter()
                .any(|p| p.matches_path_with(relative, literal_separator))
    }
}

fn run_pass(ctx: &Context) {
    let options = TangleOptions {
        quiet: true,
        ..Default::default()
    };
    match tangle(ctx, options) {
        Ok(()) => tracing::info!("Tangle complete"),
        Err(e) => eprintln!("Tangle error: {}", e),
    }
}

/// Executes the watch command.
///
/// Every relevant change triggers a complete tangle pass; a failing pass is
/// reported and watching continues.
pub fn watch(ctx: &Context, options: WatchOptions) -> Result<()> {
    let debounce = Duration::from_millis(options.debounce_ms.unwrap_or(ctx.config.watch.debounce_ms));
    let filter = PathFilter::new(ctx)?;

    println!("Watching for changes (debounce: {}ms)...", debounce.as_millis());
    println!("Press Ctrl+C to stop.");

    run_pass(ctx);

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default(),
    )
    .map_err(|e| TangleError::Watch(e.to_string()))?;

    watcher
        .watch(&ctx.base_dir, RecursiveMode::Recursive)
        .map_err(|e| TangleError::Watch(e.to_string()))?;

    loop {
        let event: notify::Event = rx
            .recv()
            .map_err(|e| TangleError::Watch(format!("Watch error: {}", e)))?;

        if matches!(event.kind, EventKind::Access(_))
            || !event.paths.iter().any(|p| filter.is_relevant(p, &ctx.base_dir))
        {
            continue;
        }
        tracing::debug!("File changed: {:?}", event.paths);

        // Let a burst of events settle before re-tangling.
        loop {
            match rx.recv_timeout(debounce) {
                Ok(_) => continue,
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(TangleError::Watch("watcher disconnected".to_string()));
                }
            }
        }

        run_pass(ctx);
    }
}
