use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Difficulty;

/// Movement direction of the creature head.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the opposite heading.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit vector in world coordinates (y grows upward).
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, 1.0),
            Self::Down => (0.0, -1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// High-level commands dispatched to the game controller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Start,
    Steer(Heading),
    TogglePause,
    SetDifficulty(Difficulty),
    Quit,
}

/// Returns whether a heading change is legal (no immediate 180° turns).
#[must_use]
pub fn heading_change_is_valid(current: Heading, next: Heading) -> bool {
    next != current.opposite()
}

/// Source of discrete input commands.
pub trait InputSource {
    /// Waits up to `timeout` for the next command.
    ///
    /// Returns `Ok(None)` when the timeout elapsed or the event was unbound.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Key code to command table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Command>,
}

impl KeyBindings {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `key` to `command`, replacing any previous binding.
    pub fn bind_key(&mut self, key: KeyCode, command: Command) {
        self.bindings.insert(key, command);
    }

    /// Resolves a key event, honouring Ctrl-C as quit.
    #[must_use]
    pub fn resolve(&self, key: KeyEvent) -> Option<Command> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Command::Quit);
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings.get(&code).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self::empty();

        keys.bind_key(KeyCode::Char(' '), Command::Start);
        keys.bind_key(KeyCode::Up, Command::Steer(Heading::Up));
        keys.bind_key(KeyCode::Down, Command::Steer(Heading::Down));
        keys.bind_key(KeyCode::Left, Command::Steer(Heading::Left));
        keys.bind_key(KeyCode::Right, Command::Steer(Heading::Right));
        keys.bind_key(KeyCode::Char('w'), Command::Steer(Heading::Up));
        keys.bind_key(KeyCode::Char('s'), Command::Steer(Heading::Down));
        keys.bind_key(KeyCode::Char('a'), Command::Steer(Heading::Left));
        keys.bind_key(KeyCode::Char('d'), Command::Steer(Heading::Right));
        keys.bind_key(KeyCode::Char('p'), Command::TogglePause);
        keys.bind_key(KeyCode::Char('1'), Command::SetDifficulty(Difficulty::Easy));
        keys.bind_key(KeyCode::Char('2'), Command::SetDifficulty(Difficulty::Normal));
        keys.bind_key(KeyCode::Char('3'), Command::SetDifficulty(Difficulty::Hard));
        keys.bind_key(KeyCode::Char('q'), Command::Quit);
        keys.bind_key(KeyCode::Esc, Command::Quit);

        keys
    }
}

/// Crossterm-backed keyboard input.
#[derive(Debug, Default)]
pub struct TerminalInput {
    bindings: KeyBindings,
}

impl TerminalInput {
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(self.bindings.resolve(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Command, Heading, KeyBindings, heading_change_is_valid};
    use crate::config::Difficulty;

    #[test]
    fn opposite_heading_is_correct() {
        assert_eq!(Heading::Up.opposite(), Heading::Down);
        assert_eq!(Heading::Down.opposite(), Heading::Up);
        assert_eq!(Heading::Left.opposite(), Heading::Right);
        assert_eq!(Heading::Right.opposite(), Heading::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        for heading in Heading::ALL {
            assert!(!heading_change_is_valid(heading, heading.opposite()));
        }

        assert!(heading_change_is_valid(Heading::Up, Heading::Left));
        assert!(heading_change_is_valid(Heading::Up, Heading::Up));
    }

    #[test]
    fn default_bindings_cover_every_command() {
        let keys = KeyBindings::default();
        let press = |code| keys.resolve(KeyEvent::new(code, KeyModifiers::NONE));

        assert_eq!(press(KeyCode::Char(' ')), Some(Command::Start));
        assert_eq!(press(KeyCode::Up), Some(Command::Steer(Heading::Up)));
        assert_eq!(press(KeyCode::Char('P')), Some(Command::TogglePause));
        assert_eq!(
            press(KeyCode::Char('3')),
            Some(Command::SetDifficulty(Difficulty::Hard))
        );
        assert_eq!(press(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(press(KeyCode::Char('x')), None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let keys = KeyBindings::empty();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(keys.resolve(event), Some(Command::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let keys = KeyBindings::default();
        let event = KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(keys.resolve(event), None);
    }

    #[test]
    fn rebinding_replaces_previous_command() {
        let mut keys = KeyBindings::default();
        keys.bind_key(KeyCode::Enter, Command::Start);
        keys.bind_key(KeyCode::Char(' '), Command::TogglePause);

        let press = |code| keys.resolve(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(press(KeyCode::Enter), Some(Command::Start));
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::TogglePause));
    }
}
