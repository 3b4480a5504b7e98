//! Error types for the fallible edges of the game (shop, settings, wave control).
//!
//! The per-frame simulation never fails; these only surface from operations
//! the surrounding menus trigger between waves.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Not enough coins for a purchase.
    #[error("Insufficient coins: need {required}, have {available}")]
    InsufficientCoins {
        /// Price of the item.
        required: u64,
        /// Coins the player holds.
        available: u64,
    },

    /// The item is already owned.
    #[error("Already owned: {0}")]
    AlreadyOwned(String),

    /// The item must be owned first.
    #[error("Not owned: {0}")]
    NotOwned(String),

    /// Upgrade already at its cap.
    #[error("{0} is already at max level")]
    MaxLevel(String),

    /// Name not present in any catalog.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Waves are numbered from 1.
    #[error("Invalid wave number: {0}")]
    InvalidWave(u32),

    /// A wave is already running.
    #[error("A wave is already in progress")]
    WaveInProgress,

    /// Settings JSON could not be parsed or written.
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}
