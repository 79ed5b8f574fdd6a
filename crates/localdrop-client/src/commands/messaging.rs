use tracing::warn;

use localdrop_store::KvStore;

use crate::host::Host;
use crate::render::render_chat;
use crate::state::AppState;

/// Send `body` as the current profile. Blank bodies are ignored.
pub fn send_chat<S: KvStore, H: Host>(state: &mut AppState<S>, host: &mut H, body: &str) {
    match state.chat.send(&mut state.store, &state.profile_name, body) {
        Ok(Some(_)) => refresh_chat(state, host),
        Ok(None) => {}
        Err(e) => {
            warn!(error = %e, "Message not saved");
            host.alert(&format!("Failed to send message: {e}"));
        }
    }
}

pub fn refresh_chat<S: KvStore, H: Host>(state: &AppState<S>, host: &mut H) {
    host.present(&render_chat(&state.chat));
}
