//! User action handlers.
//!
//! Each sub-module groups related actions by domain. Handlers run on the
//! state-owning loop, mutate [`AppState`](crate::state::AppState) through its
//! managers, and redraw the affected pane through the [`Host`](crate::host::Host).
//! Failures are reported with `Host::alert` and leave state unchanged.

pub mod files;
pub mod invite;
pub mod messaging;
pub mod profile;
