pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod fleet;
pub mod input;
pub mod settings;
pub mod sprite;

pub use config::GameConfig;
pub use entities::{FrameSnapshot, GameSession, GameStatus};
pub use error::ConfigError;
pub use settings::Settings;
