use thiserror::Error;

pub type Result<T> = std::result::Result<T, PatchError>;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("integrity error: {subject}: expected {algorithm} {expected}, got {actual}")]
    Integrity {
        subject: String,
        algorithm: String,
        expected: String,
        actual: String,
    },

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("decoding error: {0}")]
    Decoding(String),

    #[error("fragment format error: {0}")]
    Fragment(String),

    #[error("guard mismatch: {label} at 0x{offset:05x}: expected 0x{expected:02x}, found 0x{found:02x}")]
    GuardMismatch {
        label: String,
        offset: usize,
        expected: u8,
        found: u8,
    },

    #[error("external tool failed: {tool} (exit code: {code})")]
    ExternalTool {
        tool: String,
        code: String,
        output: String,
    },

    #[error("profile error: {0}")]
    Profile(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
