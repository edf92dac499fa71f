//! # Encoder
//!
//! Walks a message's descriptor and writes `[tag][value]` records.
//!
//! ## Invariants
//! - **Deterministic**: Known fields are written in ascending field-number order,
//!   followed by retained unknown fields in the order they were decoded.
//! - **Implicit Defaults**: Singular fields holding their zero value are omitted.
//!   An absent embedded message is omitted; a present but empty one is written
//!   with length zero so presence survives the round trip.
//! - **Bounded**: Nesting is limited to `MAX_RECURSION_DEPTH`.

use crate::descriptor::FieldDescriptor;
use crate::descriptor::Kind;
use crate::error::Error;
use crate::error::Result;
use crate::message::Message;
use crate::message::Value;
use crate::registry::Registry;
use crate::registry::registry;
use crate::varint::encode_varint;

/// The maximum embedded-message depth before encoding or decoding gives up.
pub const MAX_RECURSION_DEPTH: usize = 64;

/// Encodes `message` with the process-wide registry.
pub fn encode(message: &dyn Message) -> Result<Vec<u8>> {
    let mut enc = Encoder::new()?;
    enc.message(message)?;
    Ok(enc.into_bytes())
}

/// Encodes `message` onto the end of `buf`.
pub fn encode_to(buf: &mut Vec<u8>, message: &dyn Message) -> Result<()> {
    let mut enc = Encoder::with_buffer(registry()?, std::mem::take(buf));
    let result = enc.message(message);
    *buf = enc.into_bytes();
    result
}

/// A descriptor-driven message writer.
pub struct Encoder<'r> {
    buf: Vec<u8>,
    registry: &'r Registry,
}

impl Encoder<'static> {
    /// Creates an encoder backed by the process-wide registry.
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(registry()?))
    }
}

impl<'r> Encoder<'r> {
    /// Creates an encoder backed by a specific registry.
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self::with_buffer(registry, Vec::with_capacity(256))
    }

    fn with_buffer(registry: &'r Registry, buf: Vec<u8>) -> Self {
        Self { buf, registry }
    }

    /// Consumes the encoder and returns the bytes written so far.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Writes every field of `message`.
    pub fn message(&mut self, message: &dyn Message) -> Result<()> {
        let mut buf = std::mem::take(&mut self.buf);
        let result = self.write_message(&mut buf, message, 0);
        self.buf = buf;
        result
    }

    fn write_message(&self, buf: &mut Vec<u8>, message: &dyn Message, depth: usize) -> Result<()> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(Error::RecursionLimitExceeded);
        }

        let descriptor = message.descriptor();
        let entry = self.registry.get(descriptor.name)?;

        for &field in &entry.ordered {
            let value = message.field(field).ok_or(Error::KindMismatch {
                message: descriptor.name,
                field: field.name,
            })?;
            self.write_field(buf, descriptor.name, field, value, depth)?;
        }

        message.unknown_fields().write_to(buf);
        Ok(())
    }

    fn write_field(
        &self,
        buf: &mut Vec<u8>,
        message: &'static str,
        field: &FieldDescriptor,
        value: Value<'_>,
        depth: usize,
    ) -> Result<()> {
        let mismatch = || Error::KindMismatch { message, field: field.name };

        match (field.kind, field.repeated, value) {
            (Kind::String, false, Value::Str(s)) => {
                if !s.is_empty() {
                    write_delimited(buf, field, s.as_bytes());
                }
            }
            (Kind::Bytes, false, Value::Bytes(b)) => {
                if !b.is_empty() {
                    write_delimited(buf, field, b);
                }
            }
            (Kind::Message { type_name }, false, Value::Message(inner)) => {
                let Some(inner) = inner else { return Ok(()) };
                if inner.descriptor().name != type_name {
                    return Err(mismatch());
                }
                let mut nested = Vec::new();
                self.write_message(&mut nested, inner, depth + 1)?;
                write_delimited(buf, field, &nested);
            }
            (Kind::String, true, Value::RepeatedStr(items)) => {
                for s in items {
                    write_delimited(buf, field, s.as_bytes());
                }
            }
            (Kind::Bytes, true, Value::RepeatedBytes(items)) => {
                for b in items {
                    write_delimited(buf, field, b);
                }
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

fn write_delimited(buf: &mut Vec<u8>, field: &FieldDescriptor, payload: &[u8]) {
    encode_varint(buf, field.tag());
    encode_varint(buf, payload.len() as u64);
    buf.extend_from_slice(payload);
}
