use tracing::{info, warn};

use localdrop_shared::invite::generate_invite_link;

use crate::host::Host;

pub const MSG_INVITE_COPY_FAILED: &str = "Failed to copy the invite link.";

/// Generate an invite link, put it on the clipboard and tell the user.
///
/// Returns the link when it reached the clipboard.
pub fn create_invite<H: Host>(host: &mut H, page_url: &str) -> Option<String> {
    let link = generate_invite_link(page_url);

    match host.write_clipboard(&link) {
        Ok(()) => {
            info!(link = %link, "Invite link created");
            host.alert(&format!("Invite link copied to clipboard:\n{link}"));
            Some(link)
        }
        Err(e) => {
            warn!(error = %e, "Invite link not copied");
            host.alert(MSG_INVITE_COPY_FAILED);
            None
        }
    }
}
