//! Lifecycle hook wiring an agent runtime to the memory-fabric hub.
//!
//! - `agent:bootstrap` writes `TOOLS.md`, primes `context_pack.md` and
//!   registers the tools document as a bootstrap file
//! - `message:received` refreshes `context_pack.md` from `memory-hub assemble`
//! - `message:sent` stores the reply as a session note
//! - `command:stop` summarizes and promotes session notes
//!
//! Every step is recorded in `<workspace>/<contextDir>/hook.log`.

pub mod config;
pub mod dispatch;
mod handlers;
pub mod tools;

pub use config::{ContextPaths, HookConfig, HOOK_ID};
pub use dispatch::{Dispatch, DispatchError, Dispatcher};
