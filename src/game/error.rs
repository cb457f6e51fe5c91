/// Errors raised by the game engine.
///
/// These only signal caller bugs such as an unusable grid. Gameplay outcomes
/// (rejected turns, game over) are never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidConfiguration(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = GameError::InvalidConfiguration("grid_width must be positive".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: grid_width must be positive"
        );
    }
}
