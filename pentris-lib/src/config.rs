use core::fmt;

use crate::pieces::PieceSet;

pub const DEFAULT_FRAME_MILLIS: u64 = 16;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroFrameTime,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroFrameTime => write!(f, "frame time must be at least 1 ms"),
        }
    }
}

impl core::error::Error for ConfigError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub pieces: PieceSet,
    pub frame_millis: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pieces: PieceSet::Classic,
            frame_millis: DEFAULT_FRAME_MILLIS,
        }
    }
}

impl GameConfig {
    /// Checked once before the first frame; nothing is re-validated per tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_millis == 0 {
            return Err(ConfigError::ZeroFrameTime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        let extended = GameConfig {
            pieces: PieceSet::Extended,
            ..GameConfig::default()
        };
        assert_eq!(extended.validate(), Ok(()));
    }

    #[test]
    fn zero_frame_time_is_rejected() {
        let config = GameConfig {
            frame_millis: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameTime));
        assert_eq!(
            ConfigError::ZeroFrameTime.to_string(),
            "frame time must be at least 1 ms"
        );
    }

    #[test]
    fn every_piece_set_fits_the_board() {
        use crate::common::BOARD_WIDTH;
        for pieces in [PieceSet::Classic, PieceSet::Extended] {
            assert!(!pieces.templates().is_empty());
            for t in pieces.templates() {
                let widest = t.shape.width().max(t.shape.height());
                assert!(widest as usize <= BOARD_WIDTH, "{}", t.name);
            }
        }
    }
}
