use std::fmt;

/// Machine-readable error taxonomy for the PPK codec.
///
/// Every variant carries an optional human-readable hint. Nothing here,
/// in `Display` or `Debug`, ever includes the passphrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PpkError {
    InvalidInput,
    FileTooLarge { limit: u32, actual: usize },
    FieldTooLarge { limit: u32, actual: u32 },
    BufferUnderrun,
    WrongFormat,
    InvalidPpkFormat,
    UnsupportedVersion { version: u32 },
    MissingField { field: &'static str },
    InvalidBase64 { field: &'static str },
    UnsupportedEncryption { name: String },
    UnsupportedArgon2 { flavor: String },
    PassphraseRequired,
    InvalidMac { encrypted: bool },
    UnsupportedAlgorithm { name: String },
    InvalidArguments { reason: &'static str },
}

impl PpkError {
    /// A short machine-readable code, stable across versions of this crate.
    pub fn code(&self) -> &'static str {
        match self {
            PpkError::InvalidInput => "InvalidInput",
            PpkError::FileTooLarge { .. } => "FileTooLarge",
            PpkError::FieldTooLarge { .. } => "FieldTooLarge",
            PpkError::BufferUnderrun => "BufferUnderrun",
            PpkError::WrongFormat => "WrongFormat",
            PpkError::InvalidPpkFormat => "InvalidPpkFormat",
            PpkError::UnsupportedVersion { .. } => "UnsupportedVersion",
            PpkError::MissingField { .. } => "MissingField",
            PpkError::InvalidBase64 { .. } => "InvalidBase64",
            PpkError::UnsupportedEncryption { .. } => "UnsupportedEncryption",
            PpkError::UnsupportedArgon2 { .. } => "UnsupportedArgon2",
            PpkError::PassphraseRequired => "PassphraseRequired",
            PpkError::InvalidMac { .. } => "InvalidMac",
            PpkError::UnsupportedAlgorithm { .. } => "UnsupportedAlgorithm",
            PpkError::InvalidArguments { .. } => "InvalidArguments",
        }
    }

    /// A human-readable hint, safe to show to a user.
    pub fn hint(&self) -> String {
        match self {
            PpkError::InvalidInput => "input is empty".to_string(),
            PpkError::FileTooLarge { limit, actual } => {
                format!("input is {actual} bytes, limit is {limit}")
            }
            PpkError::FieldTooLarge { limit, actual } => {
                format!("wire field of {actual} bytes exceeds cap of {limit}")
            }
            PpkError::BufferUnderrun => "wire read past end of blob".to_string(),
            PpkError::WrongFormat => {
                "input looks like an OpenSSH or PEM key, not a PPK file".to_string()
            }
            PpkError::InvalidPpkFormat => "missing PuTTY-User-Key-File- header".to_string(),
            PpkError::UnsupportedVersion { version } => {
                format!("PPK version {version} is not supported (expected 2 or 3)")
            }
            PpkError::MissingField { field } => format!("required field `{field}` is missing"),
            PpkError::InvalidBase64 { field } => format!("`{field}` is not valid base64"),
            PpkError::UnsupportedEncryption { name } => {
                format!("encryption `{name}` is not supported")
            }
            PpkError::UnsupportedArgon2 { flavor } => {
                format!("Argon2 flavor `{flavor}` is not recognised")
            }
            PpkError::PassphraseRequired => "file is encrypted but no passphrase was given".to_string(),
            PpkError::InvalidMac { encrypted } => {
                if *encrypted {
                    "MAC mismatch: wrong passphrase, or the file was tampered with".to_string()
                } else {
                    "MAC mismatch: the file was tampered with".to_string()
                }
            }
            PpkError::UnsupportedAlgorithm { name } => {
                format!("key algorithm `{name}` is not supported")
            }
            PpkError::InvalidArguments { reason } => reason.to_string(),
        }
    }
}

impl fmt::Display for PpkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.hint())
    }
}

impl std::error::Error for PpkError {}

pub type Result<T> = std::result::Result<T, PpkError>;
