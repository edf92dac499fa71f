//! # Error Definitions
//!
//! Every way encoding or decoding can fail. Malformed input is deterministic,
//! so none of these are retried by the codec.

/// Gatepack serialization and deserialization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A varint ran past 10 bytes, overflowed 64 bits, or was cut off by the end of input.
    MalformedVarint,
    /// A tag carried field number 0, an unsupported wire type, or a wire type
    /// that disagrees with the descriptor or with an earlier occurrence of the same field.
    MalformedTag { number: u64, wire_type: u8 },
    /// A length-delimited or fixed-width value claims more bytes than remain.
    TruncatedInput { needed: usize, remaining: usize },
    /// A string field held bytes that are not valid UTF-8.
    InvalidUtf8 { field: &'static str },
    /// The message type is not present in the schema registry.
    UnknownMessageType(String),
    /// A message accessor returned a value whose shape disagrees with its descriptor.
    KindMismatch { message: &'static str, field: &'static str },
    /// Two fields in one descriptor share a field number.
    DuplicateField { message: &'static str, number: u32 },
    /// A descriptor pairs a field kind with a wire type that cannot carry it.
    WireTypeMismatch { message: &'static str, field: &'static str },
    /// Embedded messages nested deeper than the safety limit.
    RecursionLimitExceeded,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedVarint => write!(f, "malformed varint"),
            Error::MalformedTag { number, wire_type } => {
                write!(f, "malformed tag: field {} with wire type {}", number, wire_type)
            }
            Error::TruncatedInput { needed, remaining } => {
                write!(f, "truncated input: needed {} bytes, {} remaining", needed, remaining)
            }
            Error::InvalidUtf8 { field } => write!(f, "field '{}' is not valid UTF-8", field),
            Error::UnknownMessageType(name) => write!(f, "message type '{}' is not registered", name),
            Error::KindMismatch { message, field } => {
                write!(f, "{}.{} does not match its descriptor", message, field)
            }
            Error::DuplicateField { message, number } => {
                write!(f, "{} declares field number {} more than once", message, number)
            }
            Error::WireTypeMismatch { message, field } => {
                write!(f, "{}.{} uses a wire type that cannot carry its kind", message, field)
            }
            Error::RecursionLimitExceeded => write!(f, "message nesting exceeds the recursion limit"),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for Gatepack operations.
pub type Result<T> = std::result::Result<T, Error>;
