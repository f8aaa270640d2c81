use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr, IntoStaticStr};

/// Race type code as stored by the game.
///
/// Codes 7 and 8 are the two online race modes. Code 1 is a local race
/// against bots; the decoder rejects it, it only matters for bench testing
/// against the bot roster.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRepr, IntoStaticStr, Display,
)]
#[repr(u32)]
pub enum RaceType {
    #[strum(serialize = "practice")]
    Practice = 1,
    #[strum(serialize = "online")]
    Online = 7,
    #[strum(serialize = "online-cup")]
    OnlineCup = 8,
}

impl RaceType {
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_repr(code)
    }

    pub fn code(&self) -> u32 {
        *self as u32
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online | Self::OnlineCup)
    }
}
