//! Command codes, keyword table and parsed commands

pub mod history;

use serde::{Deserialize, Serialize};

pub use history::{CommandHistory, CommandRecord, DisplayState, HISTORY_DEPTH};

/// Command codes accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandCode {
    Move,
    Take,
    Drop,
    Chat,
    Attack,
    Inspect,
    Recruit,
    Abandon,
    Open,
    Use,
    Team,
    Turn,
    Save,
    Load,
    Exit,
}

/// Keyword bindings for one command code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub code: CommandCode,
    /// Full keyword, also the canonical form used on the wire
    pub word: &'static str,
    /// Short code accepted at the prompt
    pub short: &'static str,
}

/// The complete code-to-keyword table
pub const COMMAND_TABLE: &[CommandDescriptor] = &[
    CommandDescriptor {
        code: CommandCode::Move,
        word: "move",
        short: "m",
    },
    CommandDescriptor {
        code: CommandCode::Take,
        word: "take",
        short: "t",
    },
    CommandDescriptor {
        code: CommandCode::Drop,
        word: "drop",
        short: "d",
    },
    CommandDescriptor {
        code: CommandCode::Chat,
        word: "chat",
        short: "c",
    },
    CommandDescriptor {
        code: CommandCode::Attack,
        word: "attack",
        short: "at",
    },
    CommandDescriptor {
        code: CommandCode::Inspect,
        word: "inspect",
        short: "i",
    },
    CommandDescriptor {
        code: CommandCode::Recruit,
        word: "recruit",
        short: "r",
    },
    CommandDescriptor {
        code: CommandCode::Abandon,
        word: "abandon",
        short: "ab",
    },
    CommandDescriptor {
        code: CommandCode::Open,
        word: "open",
        short: "o",
    },
    CommandDescriptor {
        code: CommandCode::Use,
        word: "use",
        short: "u",
    },
    CommandDescriptor {
        code: CommandCode::Team,
        word: "team",
        short: "tm",
    },
    CommandDescriptor {
        code: CommandCode::Turn,
        word: "turn",
        short: "tu",
    },
    CommandDescriptor {
        code: CommandCode::Save,
        word: "save",
        short: "s",
    },
    CommandDescriptor {
        code: CommandCode::Load,
        word: "load",
        short: "l",
    },
    CommandDescriptor {
        code: CommandCode::Exit,
        word: "exit",
        short: "e",
    },
];

impl CommandCode {
    /// Resolve a keyword (case-insensitive, full word or short code)
    pub fn from_keyword(word: &str) -> Option<CommandCode> {
        let lower = word.to_ascii_lowercase();
        COMMAND_TABLE
            .iter()
            .find(|d| d.word == lower || d.short == lower)
            .map(|d| d.code)
    }

    /// Canonical keyword, used at the prompt and on the wire
    pub fn keyword(self) -> &'static str {
        self.descriptor().word
    }

    pub fn descriptor(self) -> &'static CommandDescriptor {
        // The table covers every variant; the lookup cannot miss.
        COMMAND_TABLE
            .iter()
            .find(|d| d.code == self)
            .unwrap_or(&COMMAND_TABLE[0])
    }
}

/// A parsed command: a code plus up to two string arguments
///
/// Absent arguments are empty strings, which keeps the wire form and the
/// history records uniform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub code: CommandCode,
    pub arg0: String,
    pub arg1: String,
}

impl Command {
    pub fn new(code: CommandCode) -> Self {
        Self {
            code,
            arg0: String::new(),
            arg1: String::new(),
        }
    }

    pub fn with_arg(code: CommandCode, arg0: impl Into<String>) -> Self {
        Self {
            code,
            arg0: arg0.into(),
            arg1: String::new(),
        }
    }

    pub fn with_args(code: CommandCode, arg0: impl Into<String>, arg1: impl Into<String>) -> Self {
        Self {
            code,
            arg0: arg0.into(),
            arg1: arg1.into(),
        }
    }

    /// Tokenize one input line into a command; None if the first word is
    /// not a known keyword. Extra words beyond two arguments are ignored.
    pub fn parse(line: &str) -> Option<Command> {
        let mut tokens = line.split_whitespace();
        let code = CommandCode::from_keyword(tokens.next()?)?;
        let arg0 = tokens.next().unwrap_or("").to_string();
        let arg1 = tokens.next().unwrap_or("").to_string();
        Some(Command { code, arg0, arg1 })
    }
}
