//! Single-character commands.
//!
//! The key map follows the classic vi-style layout: `hjkl` move the cursor,
//! `i` plots, `s`/`p` start and pause, `q` quits. `n` single-steps.

/// A controller command decoded from one input character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Stop the run loop.
    Quit,
    /// Stop advancing generations.
    Pause,
    /// Advance one generation per tick until paused.
    Start,
    /// Advance exactly one generation, then stay paused.
    Step,
    /// Move the cursor up one row.
    CursorUp,
    /// Move the cursor down one row.
    CursorDown,
    /// Move the cursor right one column.
    CursorRight,
    /// Move the cursor left one column.
    CursorLeft,
    /// Toggle the cell under the cursor.
    Plot,
}

/// Character bindings, one entry per command.
pub const KEY_MAP: [(char, Command); 9] = [
    ('q', Command::Quit),
    ('p', Command::Pause),
    ('s', Command::Start),
    ('n', Command::Step),
    ('k', Command::CursorUp),
    ('j', Command::CursorDown),
    ('l', Command::CursorRight),
    ('h', Command::CursorLeft),
    ('i', Command::Plot),
];

impl Command {
    /// Decode a character. Unbound characters yield `None`.
    pub fn from_char(ch: char) -> Option<Self> {
        KEY_MAP
            .iter()
            .find(|(key, _)| *key == ch)
            .map(|(_, command)| *command)
    }
}

/// Decode every bound character of a line, skipping the rest.
pub fn parse_line(line: &str) -> Vec<Command> {
    line.chars().filter_map(Command::from_char).collect()
}
