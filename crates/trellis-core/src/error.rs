use std::io;

use thiserror::Error;

use crate::actions::ActionName;
use crate::lifecycle::ListenerKind;

/// Lifecycle and configuration errors reported by the coordinator.
///
/// The decision engine itself never fails; only activation, deactivation and
/// action-table validation produce these.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Activated twice without deactivating. The second call was ignored.
    #[error("coordinator is already active; ignoring duplicate activation")]
    AlreadyActive,

    /// The action table lacks a required callback.
    #[error("missing action callback `{0}`")]
    MissingAction(ActionName),

    /// Binding or unbinding an input listener failed.
    #[error("failed to update {kind} listener")]
    Listener {
        kind: ListenerKind,
        #[source]
        source: io::Error,
    },
}

impl CoordinatorError {
    /// Returns false for conditions the caller may log and continue past.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CoordinatorError::AlreadyActive)
    }
}
