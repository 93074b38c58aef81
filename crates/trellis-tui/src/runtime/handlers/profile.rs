use trellis_core::profile::ProfileClient;

use crate::events::UiEvent;

/// Fetches the current user's profile.
///
/// Pure async function - runtime spawns and sends result to inbox.
pub async fn fetch_profile(client: ProfileClient) -> UiEvent {
    let result = client
        .fetch_current_user()
        .await
        .map_err(|e| format!("{e:#}"));
    UiEvent::ProfileLoaded(result)
}

/// Result event when no client could be built (no token configured).
pub fn profile_unavailable() -> UiEvent {
    UiEvent::ProfileLoaded(Err("no profile token configured".to_string()))
}
