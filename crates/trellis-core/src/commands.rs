//! Close commands produced by the decision engine.
//!
//! A `Command` is an intent to close one overlay, independent of whether that
//! overlay is actually open when the command reaches the store.

use std::fmt;

use enum_map::{Enum, EnumMap};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// Close intents, declared in dispatch order (modal → pop-over → menu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    CloseAllModals,
    ClosePopOver,
    CloseBoardsMenu,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::CloseAllModals => "closeAllModals",
            Command::ClosePopOver => "closePopOver",
            Command::CloseBoardsMenu => "closeBoardsMenu",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of commands computed for one input event.
///
/// Each command appears at most once; iteration follows dispatch order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandSet {
    entries: EnumMap<Command, bool>,
}

impl CommandSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a command. Returns false if it was already present.
    pub fn insert(&mut self, command: Command) -> bool {
        let slot = &mut self.entries[command];
        let inserted = !*slot;
        *slot = true;
        inserted
    }

    pub fn contains(&self, command: Command) -> bool {
        self.entries[command]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|present| !*present)
    }

    pub fn len(&self) -> usize {
        self.entries.values().filter(|present| **present).count()
    }

    /// Iterates present commands in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        self.entries
            .iter()
            .filter_map(|(command, &present)| present.then_some(command))
    }
}

impl FromIterator<Command> for CommandSet {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut set = CommandSet::empty();
        for command in iter {
            set.insert(command);
        }
        set
    }
}

impl fmt::Display for CommandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, command) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{command}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for CommandSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for command in self.iter() {
            seq.serialize_element(&command)?;
        }
        seq.end()
    }
}
