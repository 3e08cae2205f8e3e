use motion_lines_syntax::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Line {line} has no line number marker")]
    LineNotFound { line: u32 },
    #[error("Malformed markup: {0}")]
    MalformedMarkup(#[from] ParseError),
    #[error("Invalid line range: {to} must be greater than {from}")]
    InvalidRange { from: u32, to: u32 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
