use std::time::Duration;

use crate::console::Console;
use crate::error::Result;
use crate::snake::Direction;

/// A key press, independent of the terminal library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Ctrl+C. Raw mode delivers it as a key instead of a signal.
    Interrupt,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
    Interrupt,
}

pub fn command_for(key: Key) -> Option<Command> {
    let command = match key {
        Key::Up => Command::Steer(Direction::Up),
        Key::Down => Command::Steer(Direction::Down),
        Key::Left => Command::Steer(Direction::Left),
        Key::Right => Command::Steer(Direction::Right),
        Key::Interrupt => Command::Interrupt,
        Key::Char(c) => match c.to_ascii_lowercase() {
            'w' => Command::Steer(Direction::Up),
            's' => Command::Steer(Direction::Down),
            'a' => Command::Steer(Direction::Left),
            'd' => Command::Steer(Direction::Right),
            'q' => Command::Quit,
            _ => return None,
        },
        Key::Other => return None,
    };
    Some(command)
}

/// Wait up to `timeout` for a single key and translate it.
pub fn poll_command(console: &mut impl Console, timeout: Duration) -> Result<Option<Command>> {
    Ok(console.poll_input(timeout)?.and_then(command_for))
}
