//! Event dispatch: classify, resolve config, delegate to a handler.

use crate::config::HookConfig;
use crate::handlers::Handlers;
use hook_common::prelude::*;
use hook_memory::MemoryHub;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an event before any handler runs.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to create context directory {}: {source}", .path.display())]
    ContextDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What happened to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Hook disabled by config; nothing touched
    Disabled,
    /// Unknown `(type, action)`; one log line written
    Unhandled,
    /// Bootstrap finished; `context_written` is false when assemble failed
    Bootstrapped { context_written: bool },
    ContextAssembled,
    MemoryWritten,
    Summarized,
    /// Message event without content
    Skipped,
    /// Handler gave up; the message was logged
    Failed(String),
}

/// Routes host events to the memory-fabric handlers.
///
/// `make_runner` builds the subprocess runner from the resolved config, so the
/// per-event timeout setting reaches the runner.
pub struct Dispatcher<F> {
    make_runner: F,
}

impl<F, R> Dispatcher<F>
where
    F: Fn(&HookConfig) -> R,
    R: CommandRunner,
{
    pub fn new(make_runner: F) -> Self {
        Self { make_runner }
    }

    /// Handle one event. Only a missing workspace or an unusable context
    /// directory is reported as an error; handler failures are logged.
    pub fn dispatch(&self, input: &mut HookInput) -> Result<Dispatch, DispatchError> {
        let workspace = input.context.require_workspace()?;
        let config = HookConfig::resolve(input.context.cfg.as_ref());
        if !config.enabled {
            return Ok(Dispatch::Disabled);
        }

        let paths = config.paths(&workspace);
        fs::create_dir_all(&paths.dir).map_err(|source| DispatchError::ContextDir {
            path: paths.dir.clone(),
            source,
        })?;
        let log = HookLog::new(&paths.log);

        let event = input.event();
        if let HookEvent::Unhandled { .. } = event {
            log.record(&format!("Ignoring unhandled event {}", event.label()));
            return Ok(Dispatch::Unhandled);
        }

        let handlers = Handlers {
            hub: MemoryHub::new(config.memory_hub_path.clone(), (self.make_runner)(&config)),
            paths: &paths,
            log: &log,
            max_tokens: config.max_tokens,
        };

        let context = &mut input.context;
        let outcome = match event {
            HookEvent::AgentBootstrap => handlers.bootstrap(context),
            HookEvent::MessageReceived => handlers.context_assemble(context.message()),
            HookEvent::MessageSent => handlers.write_memory(context.message()),
            HookEvent::CommandStop => handlers.summarize(),
            HookEvent::Unhandled { .. } => Dispatch::Unhandled,
        };
        Ok(outcome)
    }
}
