//! Error types.
//!
//! `AppError` is what the binary reports: a message plus the process exit code.
//! `InputError` is the structured failure of reading one numeric parameter, so
//! callers that are not the interactive binary (tests, scripted runs) can
//! inspect it instead of the process dying.

/// Exit code for bad user input (unparseable numbers, bad flags).
pub const EXIT_INPUT: u8 = 2;
/// Exit code for export failures.
pub const EXIT_EXPORT: u8 = 3;
/// Exit code for terminal/viewer failures.
pub const EXIT_TERMINAL: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure while reading a single parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The text could not be parsed as a floating-point number.
    InvalidNumber { field: String, input: String },
    /// Reading the prompt answer or writing the prompt failed.
    Io(String),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::InvalidNumber { field, input } => {
                write!(f, "could not convert {field} to float: '{input}'")
            }
            InputError::Io(msg) => write!(f, "input error: {msg}"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<InputError> for AppError {
    fn from(err: InputError) -> Self {
        AppError::new(EXIT_INPUT, err.to_string())
    }
}
