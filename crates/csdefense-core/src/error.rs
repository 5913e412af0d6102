//! Error taxonomy for player commands and configuration loading.

use serde::{Deserialize, Serialize};

use crate::types::{GridCell, TowerId};

/// Why a wave start was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum WaveRejection {
    /// A wave is still spawning or draining.
    #[error("a wave is already in progress")]
    InProgress,
    /// Every configured wave has already been started.
    #[error("all {total} waves have been started")]
    NoWavesRemaining { total: u32 },
}

/// A player command that could not be applied.
///
/// These are recoverable and leave the simulation untouched; the caller
/// surfaces them as feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "type")]
pub enum CommandError {
    #[error("insufficient funds: cost {cost}, available {available}")]
    InsufficientFunds { cost: u32, available: i64 },

    #[error("cell {cell} is already occupied")]
    CellOccupied { cell: GridCell },

    #[error("cell {cell} is outside the grid or on the path")]
    InvalidCell { cell: GridCell },

    #[error("{tower} is not on the board")]
    NotFound { tower: TowerId },

    #[error("wave rejected: {reason}")]
    WaveRejected { reason: WaveRejection },
}

impl From<WaveRejection> for CommandError {
    fn from(reason: WaveRejection) -> Self {
        CommandError::WaveRejected { reason }
    }
}

/// Failure to load or validate a [`crate::config::GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            reason: reason.into(),
        }
    }
}
