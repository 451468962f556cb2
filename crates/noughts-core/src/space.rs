//! A single cell of the board.

use serde::{Deserialize, Serialize};

/// Symbol shown by a space nobody has claimed yet
pub const BLANK: &str = " ";

/// One grid cell: blank until a player claims it, then fixed forever.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SpaceData")]
pub struct Space {
    /// Occupant's symbol, `None` while blank
    occupant: Option<String>,
}

/// Unchecked wire form of [`Space`]
#[derive(Deserialize)]
struct SpaceData {
    occupant: Option<String>,
}

impl TryFrom<SpaceData> for Space {
    type Error = String;

    fn try_from(data: SpaceData) -> Result<Self, Self::Error> {
        let mut space = Space::new();
        if let Some(symbol) = data.occupant {
            if !space.occupy(&symbol) {
                return Err(format!("space cannot be occupied by {:?}", symbol));
            }
        }
        Ok(space)
    }
}

impl Space {
    /// Create a blank space
    pub fn new() -> Self {
        Self::default()
    }

    /// Current symbol, [`BLANK`] if unoccupied
    pub fn symbol(&self) -> &str {
        self.occupant.as_deref().unwrap_or(BLANK)
    }

    /// Check if nobody has claimed this space
    pub fn is_blank(&self) -> bool {
        self.occupant.is_none()
    }

    /// Claim the space for `symbol`.
    ///
    /// Returns `true` only on the blank -> occupied transition. An occupied
    /// space is left untouched and every further call returns `false`.
    /// A blank or empty `symbol` is refused so a space can never look
    /// blank again once claimed.
    pub fn occupy(&mut self, symbol: &str) -> bool {
        if !self.is_blank() || symbol.is_empty() || symbol == BLANK {
            return false;
        }
        self.occupant = Some(symbol.to_string());
        true
    }
}
