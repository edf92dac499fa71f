//! # Unknown Fields
//!
//! Fields a decoder did not recognise, kept byte-for-byte so that a message can
//! be decoded, forwarded, and re-encoded by an older schema without data loss.

use crate::descriptor::WireType;

/// A single unrecognised field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField {
    pub number: u64,
    pub wire_type: WireType,
    /// Tag and value exactly as they appeared on the wire.
    pub raw: Vec<u8>,
}

/// Unrecognised fields in the order they were decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFields {
    fields: Vec<UnknownField>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: UnknownField) {
        self.fields.push(field);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnknownField> {
        self.fields.iter()
    }

    /// Appends the raw bytes of every field to `buf`.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        for field in &self.fields {
            buf.extend_from_slice(&field.raw);
        }
    }
}
