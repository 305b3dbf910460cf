use std::fmt;

/// Everything that can stop the game from starting.  The running game itself
/// never fails; only loading and validating its tunables can.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Read { path: String, message: String },
    Parse { path: String, message: String },
    Invalid { field: &'static str, reason: String },
    Sprite { path: String, message: String },
    EmptyFleet { columns: i32, rows: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => write!(f, "cannot read config {path}: {message}"),
            Self::Parse { path, message } => write!(f, "cannot parse config {path}: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
            Self::Sprite { path, message } => write!(f, "cannot load sprite {path}: {message}"),
            Self::EmptyFleet { columns, rows } => write!(
                f,
                "screen too small for the alien fleet: {columns} column(s) x {rows} row(s)"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
