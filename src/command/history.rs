//! Per-player command history and transient display text

use std::collections::VecDeque;

use crate::command::Command;

/// Depth of the per-player command ring
pub const HISTORY_DEPTH: usize = 3;

/// One resolved command and whether it succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub command: Command,
    pub success: bool,
}

/// Transient per-player display text
///
/// Snapshotted and restored as a unit around the team confirmation
/// prompt, so the interruption leaves no trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub message: String,
    pub description: String,
    pub objective: String,
    pub show_message: bool,
}

/// Ring of the last [`HISTORY_DEPTH`] commands plus display text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: VecDeque<CommandRecord>,
    pub display: DisplayState,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resolved command; the oldest entry falls off the ring
    pub fn record(&mut self, command: Command, success: bool) {
        self.entries.push_front(CommandRecord { command, success });
        self.entries.truncate(HISTORY_DEPTH);
    }

    /// Most recent command, if any
    pub fn last(&self) -> Option<&CommandRecord> {
        self.entries.front()
    }

    /// Entries newest first
    pub fn entries(&self) -> impl Iterator<Item = &CommandRecord> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> DisplayState {
        self.display.clone()
    }

    pub fn restore(&mut self, state: DisplayState) {
        self.display = state;
    }
}
