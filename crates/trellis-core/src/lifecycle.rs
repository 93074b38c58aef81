//! Input listener lifecycle and the coordinator that owns it.
//!
//! `Coordinator` ties the pieces together:
//! - `activate()` binds one click and one key-down listener and, for an
//!   authenticated session, requests the current user's profile once
//! - `handle_document_click()` / `handle_esc_key()` run the decision engine
//!   against the caller's snapshot and dispatch the result
//! - `deactivate()` unbinds both listeners; later events dispatch nothing
//!
//! Listener binding is abstracted behind `InputListeners` so hosts decide what
//! "attached" means (mouse capture in the terminal, a plain registry in tests).

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::actions::{OverlayActions, dispatch};
use crate::commands::CommandSet;
use crate::decide::decide;
use crate::error::CoordinatorError;
use crate::policy::DismissalPolicy;
use crate::state::{AuthContext, OverlaySnapshot};
use crate::trigger::Trigger;

/// Kind of document-level listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    Click,
    KeyDown,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerKind::Click => f.write_str("click"),
            ListenerKind::KeyDown => f.write_str("keydown"),
        }
    }
}

/// Opaque handle returned by `InputListeners::attach`.
///
/// A handle only detaches from the registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerHandle {
    registry: u64,
    id: u64,
    kind: ListenerKind,
}

impl ListenerHandle {
    pub fn kind(self) -> ListenerKind {
        self.kind
    }
}

/// Host-side listener binding.
pub trait InputListeners {
    /// Binds a listener of `kind`.
    ///
    /// # Errors
    /// Returns an error if the host could not start delivering events.
    fn attach(&mut self, kind: ListenerKind) -> io::Result<ListenerHandle>;

    /// Unbinds a previously attached listener.
    ///
    /// # Errors
    /// Returns an error if the host could not stop delivering events.
    fn detach(&mut self, handle: ListenerHandle) -> io::Result<()>;
}

/// In-memory listener registry.
///
/// Tracks live handles so leaks and duplicates are observable. Hosts wrap it
/// to attach real side effects to binding.
#[derive(Debug)]
pub struct ListenerRegistry {
    registry: u64,
    next_id: u64,
    live: BTreeSet<ListenerHandle>,
}

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(0);

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self {
            registry: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            next_id: 0,
            live: BTreeSet::new(),
        }
    }
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live listeners of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.live.iter().filter(|h| h.kind == kind).count()
    }

    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }

    pub fn total(&self) -> usize {
        self.live.len()
    }
}

impl InputListeners for ListenerRegistry {
    fn attach(&mut self, kind: ListenerKind) -> io::Result<ListenerHandle> {
        let handle = ListenerHandle {
            registry: self.registry,
            id: self.next_id,
            kind,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(handle);
        Ok(handle)
    }

    fn detach(&mut self, handle: ListenerHandle) -> io::Result<()> {
        if !self.live.remove(&handle) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} listener {} is not attached", handle.kind, handle.id),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct Attached {
    click: ListenerHandle,
    key_down: ListenerHandle,
}

/// Overlay-dismissal coordinator.
///
/// Reads snapshots, never writes the store. All side effects go through the
/// supplied `OverlayActions`.
pub struct Coordinator<A: OverlayActions, L: InputListeners> {
    actions: A,
    listeners: L,
    policy: DismissalPolicy,
    attached: Option<Attached>,
}

impl<A: OverlayActions, L: InputListeners> Coordinator<A, L> {
    pub fn new(actions: A, listeners: L, policy: DismissalPolicy) -> Self {
        Self {
            actions,
            listeners,
            policy,
            attached: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.attached.is_some()
    }

    pub fn policy(&self) -> &DismissalPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: DismissalPolicy) {
        self.policy = policy;
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut A {
        &mut self.actions
    }

    pub fn listeners(&self) -> &L {
        &self.listeners
    }

    /// Binds the click and key-down listeners.
    ///
    /// Requests the user profile once when `auth` is authenticated.
    ///
    /// # Errors
    /// - `AlreadyActive` (non-fatal) if called twice without `deactivate()`;
    ///   the call is ignored
    /// - `MissingAction` if the action table is incomplete; nothing is bound
    /// - `Listener` if the host refused a binding; nothing stays bound
    pub fn activate(&mut self, auth: &AuthContext) -> Result<(), CoordinatorError> {
        if self.is_active() {
            warn!("duplicate activation ignored");
            return Err(CoordinatorError::AlreadyActive);
        }

        self.actions.ensure_complete()?;

        let click = self
            .listeners
            .attach(ListenerKind::Click)
            .map_err(|source| CoordinatorError::Listener {
                kind: ListenerKind::Click,
                source,
            })?;
        let key_down = match self.listeners.attach(ListenerKind::KeyDown) {
            Ok(handle) => handle,
            Err(source) => {
                if let Err(err) = self.listeners.detach(click) {
                    warn!(error = %err, "failed to roll back click listener");
                }
                return Err(CoordinatorError::Listener {
                    kind: ListenerKind::KeyDown,
                    source,
                });
            }
        };
        self.attached = Some(Attached { click, key_down });
        info!(authenticated = auth.is_authenticated, "coordinator activated");

        if auth.is_authenticated {
            self.actions.fetch_user();
        }
        Ok(())
    }

    /// Unbinds both listeners. No-op when inactive.
    ///
    /// # Errors
    /// Returns `Listener` if the host failed to unbind. The coordinator is
    /// inactive afterwards either way.
    pub fn deactivate(&mut self) -> Result<(), CoordinatorError> {
        let Some(Attached { click, key_down }) = self.attached.take() else {
            debug!("deactivate on inactive coordinator");
            return Ok(());
        };

        let click_result = self.listeners.detach(click);
        let key_result = self.listeners.detach(key_down);
        info!("coordinator deactivated");

        click_result.map_err(|source| CoordinatorError::Listener {
            kind: ListenerKind::Click,
            source,
        })?;
        key_result.map_err(|source| CoordinatorError::Listener {
            kind: ListenerKind::KeyDown,
            source,
        })
    }

    /// Runs the engine for `trigger` and dispatches the result.
    ///
    /// Returns the dispatched commands; empty while inactive.
    pub fn handle(&mut self, snapshot: &OverlaySnapshot, trigger: Trigger) -> CommandSet {
        if !self.is_active() {
            debug!(%trigger, "coordinator inactive; dropping event");
            return CommandSet::empty();
        }

        let commands = decide(snapshot, trigger, &self.policy);
        if !commands.is_empty() {
            debug!(%trigger, %commands, "dismissing overlays");
        }
        dispatch(&commands, &mut self.actions);
        commands
    }

    /// Click listener target.
    pub fn handle_document_click(&mut self, snapshot: &OverlaySnapshot) -> CommandSet {
        self.handle(snapshot, Trigger::Click)
    }

    /// Key-down listener target.
    pub fn handle_esc_key(&mut self, snapshot: &OverlaySnapshot, code: u32) -> CommandSet {
        self.handle(snapshot, Trigger::Key { code })
    }
}

impl<A: OverlayActions, L: InputListeners> Drop for Coordinator<A, L> {
    fn drop(&mut self) {
        if let Err(err) = self.deactivate() {
            warn!(error = %err, "failed to release listeners on drop");
        }
    }
}

impl<A, L> fmt::Debug for Coordinator<A, L>
where
    A: OverlayActions + fmt::Debug,
    L: InputListeners + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("actions", &self.actions)
            .field("listeners", &self.listeners)
            .field("policy", &self.policy)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::state::OverlayVisibility;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl OverlayActions for Recorder {
        fn close_pop_over(&mut self) {
            self.calls.push("closePopOver");
        }
        fn close_all_modals(&mut self) {
            self.calls.push("closeAllModals");
        }
        fn close_boards_menu(&mut self) {
            self.calls.push("closeBoardsMenu");
        }
        fn fetch_user(&mut self) {
            self.calls.push("fetchUser");
        }
    }

    /// Registry that refuses key-down bindings.
    #[derive(Debug, Default)]
    struct NoKeyboard {
        inner: ListenerRegistry,
    }

    impl InputListeners for NoKeyboard {
        fn attach(&mut self, kind: ListenerKind) -> io::Result<ListenerHandle> {
            if kind == ListenerKind::KeyDown {
                return Err(io::Error::other("no keyboard"));
            }
            self.inner.attach(kind)
        }
        fn detach(&mut self, handle: ListenerHandle) -> io::Result<()> {
            self.inner.detach(handle)
        }
    }

    fn coordinator() -> Coordinator<Recorder, ListenerRegistry> {
        Coordinator::new(
            Recorder::default(),
            ListenerRegistry::new(),
            DismissalPolicy::default(),
        )
    }

    fn modal_open() -> OverlaySnapshot {
        OverlaySnapshot {
            visibility: OverlayVisibility {
                modal_open: true,
                ..OverlayVisibility::default()
            },
            ..OverlaySnapshot::default()
        }
    }

    #[test]
    fn test_activate_binds_one_listener_of_each_kind() {
        let mut c = coordinator();
        c.activate(&AuthContext::anonymous()).unwrap();

        assert!(c.is_active());
        assert_eq!(c.listeners().count(ListenerKind::Click), 1);
        assert_eq!(c.listeners().count(ListenerKind::KeyDown), 1);
        assert!(c.actions().calls.is_empty());
    }

    #[test]
    fn test_authenticated_activation_fetches_user_once() {
        let mut c = coordinator();
        c.activate(&AuthContext::authenticated("fullName")).unwrap();
        assert_eq!(c.actions().calls, vec!["fetchUser"]);

        let err = c.activate(&AuthContext::authenticated("fullName")).unwrap_err();
        assert!(matches!(err, CoordinatorError::AlreadyActive));
        assert!(!err.is_fatal());
        assert_eq!(c.actions().calls, vec!["fetchUser"]);
        assert_eq!(c.listeners().total(), 2);
    }

    #[test]
    fn test_deactivate_releases_all_listeners() {
        let mut c = coordinator();
        c.activate(&AuthContext::anonymous()).unwrap();
        c.deactivate().unwrap();

        assert!(!c.is_active());
        assert_eq!(c.listeners().total(), 0);
        // Second deactivate is a no-op.
        c.deactivate().unwrap();
    }

    #[test]
    fn test_reactivation_after_deactivate_fetches_again() {
        let mut c = coordinator();
        let auth = AuthContext::authenticated("fullName");
        c.activate(&auth).unwrap();
        c.deactivate().unwrap();
        c.activate(&auth).unwrap();

        assert_eq!(c.actions().calls, vec!["fetchUser", "fetchUser"]);
        assert_eq!(c.listeners().total(), 2);
    }

    #[test]
    fn test_events_after_deactivate_dispatch_nothing() {
        let mut c = coordinator();
        c.activate(&AuthContext::anonymous()).unwrap();
        c.deactivate().unwrap();

        let commands = c.handle_document_click(&modal_open());
        assert!(commands.is_empty());
        assert!(c.actions().calls.is_empty());
    }

    #[test]
    fn test_events_before_activation_dispatch_nothing() {
        let mut c = coordinator();
        assert!(c.handle_esc_key(&modal_open(), 27).is_empty());
        assert!(c.actions().calls.is_empty());
    }

    #[test]
    fn test_click_dispatches_decided_commands() {
        let mut c = coordinator();
        c.activate(&AuthContext::anonymous()).unwrap();

        let commands = c.handle_document_click(&modal_open());

        assert!(commands.contains(Command::CloseAllModals));
        assert_eq!(c.actions().calls, vec!["closeAllModals"]);
    }

    #[test]
    fn test_non_escape_key_dispatches_nothing() {
        let mut c = coordinator();
        c.activate(&AuthContext::anonymous()).unwrap();
        assert!(c.handle_esc_key(&modal_open(), 65).is_empty());
        assert!(c.actions().calls.is_empty());
    }

    #[test]
    fn test_missing_action_is_fatal_and_binds_nothing() {
        let table = crate::actions::ActionTable::new().on_close_pop_over(|| {});
        let mut c = Coordinator::new(table, ListenerRegistry::new(), DismissalPolicy::default());

        let err = c.activate(&AuthContext::anonymous()).unwrap_err();

        assert!(err.is_fatal());
        assert!(!c.is_active());
        assert_eq!(c.listeners().total(), 0);
    }

    #[test]
    fn test_failed_key_binding_rolls_back_click() {
        let mut c = Coordinator::new(
            Recorder::default(),
            NoKeyboard::default(),
            DismissalPolicy::default(),
        );

        let err = c.activate(&AuthContext::authenticated("x")).unwrap_err();

        assert!(matches!(
            err,
            CoordinatorError::Listener {
                kind: ListenerKind::KeyDown,
                ..
            }
        ));
        assert_eq!(c.listeners().inner.total(), 0);
        assert!(c.actions().calls.is_empty());
    }

    #[test]
    fn test_registry_rejects_unknown_handle() {
        let mut registry = ListenerRegistry::new();
        let handle = registry.attach(ListenerKind::Click).unwrap();
        registry.detach(handle).unwrap();
        assert!(registry.detach(handle).is_err());
    }

    #[test]
    fn test_registry_rejects_handle_from_another_registry() {
        let mut ours = ListenerRegistry::new();
        let mut theirs = ListenerRegistry::new();
        let own = ours.attach(ListenerKind::Click).unwrap();
        let foreign = theirs.attach(ListenerKind::Click).unwrap();

        let err = ours.detach(foreign).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(ours.count(ListenerKind::Click), 1);
        ours.detach(own).unwrap();
        theirs.detach(foreign).unwrap();
    }
}
