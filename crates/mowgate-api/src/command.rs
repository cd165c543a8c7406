// Control commands accepted by the mower's control endpoint.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A control action for the selected mower.
///
/// The vendor accepts exactly three actions; anything else must be
/// rejected locally before a request is built. Parsing through
/// `FromStr` is the single rejection point -- a constructed `Command`
/// is always valid on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Park,
}

impl Command {
    /// The wire string for the `{"action": ...}` control body.
    pub fn as_action(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Stop => "STOP",
            Self::Park => "PARK",
        }
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "START" => Ok(Self::Start),
            "STOP" => Ok(Self::Stop),
            "PARK" => Ok(Self::Park),
            _ => Err(Error::InvalidCommand { action: s.into() }),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_action())
    }
}
