use std::fmt;
use std::io;

#[derive(Debug)]
pub enum GameError {
    /// The terminal could not be put into game mode.
    TerminalInit(io::Error),
    /// Termination signals could not be routed to the game.
    SignalHandler(ctrlc::Error),
    /// The board would be smaller than the minimum playable size.
    TerminalTooSmall { width: u16, height: u16 },
    /// Ctrl+C was pressed, or SIGINT/SIGTERM/SIGHUP arrived.
    Interrupted,
    /// Something tried to draw outside the canvas. Always a bug.
    RenderOutOfBounds { row: u16, col: u16 },
    Io(io::Error),
}

impl GameError {
    /// Errors raised before the game could start.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            GameError::TerminalInit(_)
                | GameError::SignalHandler(_)
                | GameError::TerminalTooSmall { .. }
        )
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::TerminalInit(e) => write!(f, "failed to initialise terminal: {}", e),
            GameError::SignalHandler(e) => write!(f, "failed to install signal handler: {}", e),
            GameError::TerminalTooSmall { width, height } => write!(
                f,
                "terminal too small: board would be {}x{}, need at least {}x{}",
                width,
                height,
                crate::board::Board::MIN_SIZE,
                crate::board::Board::MIN_SIZE
            ),
            GameError::Interrupted => write!(f, "interrupted"),
            GameError::RenderOutOfBounds { row, col } => {
                write!(f, "internal error: drawing outside the screen at ({}, {})", row, col)
            }
            GameError::Io(e) => write!(f, "terminal I/O error: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::TerminalInit(e) | GameError::Io(e) => Some(e),
            GameError::SignalHandler(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ctrlc::Error> for GameError {
    fn from(e: ctrlc::Error) -> Self {
        GameError::SignalHandler(e)
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_errors() {
        assert!(GameError::TerminalTooSmall { width: 2, height: 2 }.is_startup());
        assert!(GameError::TerminalInit(io::Error::other("no tty")).is_startup());
        assert!(!GameError::Interrupted.is_startup());
        assert!(!GameError::Io(io::Error::other("broken pipe")).is_startup());
    }

    #[test]
    fn test_display_mentions_sizes() {
        let msg = GameError::TerminalTooSmall { width: 3, height: 9 }.to_string();
        assert!(msg.contains("3x9"), "{}", msg);
        assert!(msg.contains("4x4"), "{}", msg);
    }
}
