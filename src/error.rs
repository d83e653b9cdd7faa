use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyllogyError {
    #[error("Syntax error: {message}")]
    Syntax { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Grammar error: {0}")]
    Grammar(String),
}

pub type Result<T> = std::result::Result<T, SyllogyError>;

impl SyllogyError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax { message: message.into(), line: None, col: None }
    }
}

// Helper conversions
impl From<std::io::Error> for SyllogyError {
    fn from(e: std::io::Error) -> Self { Self::Persistence(e.to_string()) }
}
impl From<config::ConfigError> for SyllogyError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<regex::Error> for SyllogyError {
    fn from(e: regex::Error) -> Self { Self::Grammar(e.to_string()) }
}
