use std::path::PathBuf;

/// Why an untrusted payload could not be narrowed into a typed record.
///
/// Every parser aborts on its first failure with exactly one of these. The rendered text is what
/// callers show to the submitter, so the messages are part of the observable contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The payload is not a JSON object.
    #[error("Missing or incorrect data")]
    NotAnObject,

    /// One or more required top-level keys are absent.
    #[error("Incorrect data: some fields are missing")]
    MissingFields,

    /// A present field has the wrong shape, is blank, or holds an unparseable date.
    #[error("Missing or incorrect {0}")]
    MissingOrIncorrect(&'static str),

    /// A nested record (discharge, sick leave) lacks one of its required sub-fields.
    #[error("Missing or incorrect {0}")]
    IncompleteRecord(&'static str),

    #[error("Missing or incorrect gender: {0}")]
    IncorrectGender(String),

    #[error("Unsupported type for entries: {0}")]
    UnsupportedEntryType(String),

    /// Every submitted code that is not in the reference set, in submission order.
    #[error("Invalid diagnosis code: {}", .0.join(","))]
    InvalidDiagnosisCodes(Vec<String>),
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("patient not found: {0}")]
    PatientNotFound(String),
    #[error("patient store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize diagnoses: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to deserialize seed patients: {0}")]
    SeedDeserialization(serde_json::Error),
    #[error("seed patient {index} rejected: {source}")]
    SeedRejected {
        index: usize,
        #[source]
        source: StoreError,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
