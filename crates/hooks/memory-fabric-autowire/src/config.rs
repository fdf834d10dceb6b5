//! Per-event hook configuration.
//!
//! Resolution order (later wins):
//! 1. Built-in defaults
//! 2. `MEMORY_HUB_PATH` environment variable (executable path only)
//! 3. `cfg.hooks.internal.entries["memory-fabric-autowire"]` from the event

use camino::Utf8PathBuf;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Identifier of this hook in the host configuration tree.
pub const HOOK_ID: &str = "memory-fabric-autowire";

/// Environment override for the memory-hub executable.
pub const HUB_PATH_ENV: &str = "MEMORY_HUB_PATH";

pub const DEFAULT_CONTEXT_DIR: &str = ".memory_fabric";
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

pub const TOOLS_FILE: &str = "TOOLS.md";
pub const CONTEXT_PACK_FILE: &str = "context_pack.md";
pub const LOG_FILE: &str = "hook.log";

/// Resolved configuration for a single event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Directory under the workspace holding all hook files
    pub context_dir: PathBuf,
    /// Token budget passed to `assemble`
    pub max_tokens: u32,
    /// memory-hub executable
    pub memory_hub_path: Utf8PathBuf,
    /// `false` turns every event into a no-op
    pub enabled: bool,
    /// Optional deadline for each memory-hub call
    pub timeout_secs: Option<u64>,
}

/// Files the hook owns inside the context directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPaths {
    pub dir: PathBuf,
    pub tools: PathBuf,
    pub context_pack: PathBuf,
    pub log: PathBuf,
}

impl HookConfig {
    /// Resolve configuration from the event's `cfg` tree and the process environment.
    pub fn resolve(cfg: Option<&Value>) -> Self {
        let env_hub = std::env::var(HUB_PATH_ENV).ok();
        Self::defaults_with(env_hub.as_deref(), dirs::home_dir().as_deref())
            .overlay(hook_entry(cfg))
    }

    /// Defaults given an optional environment override and home directory.
    pub fn defaults_with(env_hub_path: Option<&str>, home: Option<&Path>) -> Self {
        let memory_hub_path = env_hub_path
            .filter(|p| !p.trim().is_empty())
            .map(|p| expand_home(p, home))
            .unwrap_or_else(|| default_hub_path(home));

        Self {
            context_dir: PathBuf::from(DEFAULT_CONTEXT_DIR),
            max_tokens: DEFAULT_MAX_TOKENS,
            memory_hub_path,
            enabled: true,
            timeout_secs: None,
        }
    }

    /// Shallow-merge a hook entry over `self`. Keys with the wrong type are skipped.
    pub fn overlay(mut self, entry: Option<&Map<String, Value>>) -> Self {
        let Some(entry) = entry else {
            return self;
        };

        // Must stay inside the workspace.
        if let Some(dir) = entry.get("contextDir").and_then(Value::as_str).map(Path::new)
            && !dir.as_os_str().is_empty()
            && dir.is_relative()
        {
            self.context_dir = dir.to_path_buf();
        }

        if let Some(max_tokens) = entry
            .get("maxTokens")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
        {
            self.max_tokens = max_tokens;
        }

        if let Some(path) = entry.get("memoryHubPath").and_then(Value::as_str)
            && !path.trim().is_empty()
        {
            self.memory_hub_path = expand_home(path, dirs::home_dir().as_deref());
        }

        if let Some(enabled) = entry.get("enabled").and_then(Value::as_bool) {
            self.enabled = enabled;
        }

        if let Some(secs) = entry.get("timeoutSecs").and_then(Value::as_u64)
            && secs > 0
        {
            self.timeout_secs = Some(secs);
        }

        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn paths(&self, workspace: &Path) -> ContextPaths {
        let dir = workspace.join(&self.context_dir);
        ContextPaths {
            tools: dir.join(TOOLS_FILE),
            context_pack: dir.join(CONTEXT_PACK_FILE),
            log: dir.join(LOG_FILE),
            dir,
        }
    }
}

/// Look up `hooks.internal.entries[HOOK_ID]`; anything malformed means "no override".
fn hook_entry(cfg: Option<&Value>) -> Option<&Map<String, Value>> {
    cfg?.get("hooks")?
        .get("internal")?
        .get("entries")?
        .get(HOOK_ID)?
        .as_object()
}

fn default_hub_path(home: Option<&Path>) -> Utf8PathBuf {
    expand_home("~/.local/share/memory-fabric/bin/memory-hub", home)
}

/// Expand a leading `~/` against `home`; other paths are returned as given.
fn expand_home(path: &str, home: Option<&Path>) -> Utf8PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => {
            Utf8PathBuf::from(home.to_string_lossy().into_owned()).join(rest)
        }
        _ => Utf8PathBuf::from(path),
    }
}
