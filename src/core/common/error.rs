use std::fmt;

#[derive(Debug)]
pub enum OrthosError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A record in a delimited input file could not be parsed. `line` is 1-based.
    Parsing { line: usize, message: String },
    NotFound(String),
    InvalidInput { message: String },
    Configuration(String),
}

impl fmt::Display for OrthosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::Json(e) => write!(f, "JSON Serialization Error: {}", e),
            Self::Parsing { line, message } => {
                write!(f, "Parsing Error at line {}: {}", line, message)
            }
            Self::NotFound(s) => write!(f, "Not Found: {}", s),
            Self::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
        }
    }
}

impl std::error::Error for OrthosError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrthosError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for OrthosError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for OrthosError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, |pos| pos.line() as usize);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Self::Io(e),
            _ => Self::Parsing { line, message },
        }
    }
}

impl From<toml::de::Error> for OrthosError {
    fn from(err: toml::de::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}
