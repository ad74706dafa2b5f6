use std::fmt;

/// Error type returned by kotok public APIs.
#[derive(Debug)]
pub enum KotokError {
    /// Native runtime library could not be loaded.
    LibraryLoad(String),
    /// Required symbol could not be resolved from the runtime library.
    SymbolLoad(String),
    /// Rust string contained an interior `NUL` byte for C interop.
    NulByte(std::ffi::NulError),
    /// Backend name or user-provided configuration was invalid.
    Configuration(String),
    /// Error reported by the pipeline runtime.
    Api(String),
}

impl fmt::Display for KotokError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KotokError::LibraryLoad(message) => write!(f, "failed to load library: {message}"),
            KotokError::SymbolLoad(message) => write!(f, "failed to load symbol: {message}"),
            KotokError::NulByte(error) => write!(f, "string contains NUL byte: {error}"),
            KotokError::Configuration(message) => write!(f, "invalid configuration: {message}"),
            KotokError::Api(message) => write!(f, "pipeline api error: {message}"),
        }
    }
}

impl std::error::Error for KotokError {}

impl From<std::ffi::NulError> for KotokError {
    fn from(value: std::ffi::NulError) -> Self {
        KotokError::NulByte(value)
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KotokError>;
