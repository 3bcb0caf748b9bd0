use crate::error::EngineError;
use std::fmt;
use std::str::FromStr;

/// A logical player command. Physical key decoding happens in the host; the
/// engine only sees these values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Up,
    Down,
    Left,
    Right,
    Space,
}

impl CommandKind {
    /// Canonical ordering. Lane assignment and random selection both index
    /// into this array, so a kind always lands in the same lane.
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Up,
        CommandKind::Down,
        CommandKind::Left,
        CommandKind::Right,
        CommandKind::Space,
    ];

    /// The fixed lane slot for this kind.
    pub fn lane(self) -> usize {
        match self {
            CommandKind::Up => 0,
            CommandKind::Down => 1,
            CommandKind::Left => 2,
            CommandKind::Right => 3,
            CommandKind::Space => 4,
        }
    }

    /// Horizontal lane center as a fraction of track width.
    pub fn lane_fraction(self) -> f64 {
        match self {
            CommandKind::Up => 0.2,
            CommandKind::Down => 0.35,
            CommandKind::Left => 0.5,
            CommandKind::Right => 0.65,
            CommandKind::Space => 0.8,
        }
    }

    /// Display glyph for text shells.
    pub fn glyph(self) -> char {
        match self {
            CommandKind::Up => '↑',
            CommandKind::Down => '↓',
            CommandKind::Left => '←',
            CommandKind::Right => '→',
            CommandKind::Space => '␣',
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Up => "up",
            CommandKind::Down => "down",
            CommandKind::Left => "left",
            CommandKind::Right => "right",
            CommandKind::Space => "space",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CommandKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(CommandKind::Up),
            "down" => Ok(CommandKind::Down),
            "left" => Ok(CommandKind::Left),
            "right" => Ok(CommandKind::Right),
            "space" => Ok(CommandKind::Space),
            other => Err(EngineError::UnknownCommand(other.to_string())),
        }
    }
}
