//! One-shot evaluation of the dismissal rules.

use anyhow::{Context, Result};
use serde_json::json;
use trellis_core::{
    DismissalPolicy, FocusContext, OverlaySnapshot, OverlayVisibility, Trigger, decide,
};

/// Inputs for a single decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecideOptions {
    pub visibility: OverlayVisibility,
    pub focus: FocusContext,
    /// Key code; a click when absent.
    pub key: Option<u32>,
    pub policy: DismissalPolicy,
}

/// Prints `{"trigger": ..., "commands": [...]}` for the given state.
pub fn run(options: &DecideOptions) -> Result<()> {
    println!("{}", render(options)?);
    Ok(())
}

fn render(options: &DecideOptions) -> Result<String> {
    let trigger = options
        .key
        .map_or(Trigger::Click, |code| Trigger::Key { code });
    let snapshot = OverlaySnapshot {
        visibility: options.visibility,
        focus: options.focus,
    };
    let commands = decide(&snapshot, trigger, &options.policy);

    serde_json::to_string(&json!({
        "trigger": trigger,
        "commands": commands,
    }))
    .context("serialize decision")
}
