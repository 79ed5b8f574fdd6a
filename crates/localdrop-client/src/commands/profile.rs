//! Profile name actions.

use tracing::{info, warn};

use localdrop_store::{codec, KvStore};

use crate::commands::messaging::refresh_chat;
use crate::host::Host;
use crate::state::AppState;

/// Save a new profile name and rewrite the author of past messages.
///
/// The input is trimmed; an empty result is ignored.
pub fn save_profile_name<S: KvStore, H: Host>(state: &mut AppState<S>, host: &mut H, input: &str) {
    let new_name = input.trim();
    if new_name.is_empty() {
        return;
    }

    let old_name = state.profile_name.clone();

    if let Err(e) = codec::save_profile_name(&mut state.store, new_name) {
        warn!(error = %e, "Profile name not saved");
        host.alert(&format!("Failed to save profile name: {e}"));
        return;
    }

    if let Err(e) = state.chat.rename_author(&mut state.store, &old_name, new_name) {
        warn!(error = %e, "Chat history not renamed, restoring previous name");
        if let Err(e) = codec::save_profile_name(&mut state.store, &old_name) {
            warn!(error = %e, "Previous profile name not restored");
        }
        host.alert(&format!("Failed to save profile name: {e}"));
        return;
    }

    state.profile_name = new_name.to_string();
    info!(profile = %new_name, "Profile name saved");

    refresh_chat(state, host);
    host.show_profile_name(new_name);
}

/// Prefill the profile input with the stored name.
pub fn show_profile<S: KvStore, H: Host>(state: &AppState<S>, host: &mut H) {
    host.show_profile_name(&state.profile_name);
}
