//! # Decoder
//!
//! Reads `[tag][value]` records back into a message, steered by its descriptor.
//!
//! ## Invariants
//! - **Bounds Checked**: Every length is checked against the remaining input
//!   before it is used; nothing reads past the buffer.
//! - **Forward Compatible**: Unknown field numbers are skipped by wire-type rule
//!   and retained verbatim on the message.
//! - **Last Write Wins**: A singular field seen more than once keeps its final
//!   occurrence. An embedded message is replaced, not merged.
//! - **Consistent Tags**: Within one message, a field number must keep the wire
//!   type it was first seen with, and known fields must use their declared type.

use std::collections::HashMap;

use tracing::trace;

use crate::descriptor::FieldDescriptor;
use crate::descriptor::Kind;
use crate::descriptor::MAX_FIELD_NUMBER;
use crate::descriptor::WireType;
use crate::descriptor::split_tag;
use crate::encoder::MAX_RECURSION_DEPTH;
use crate::error::Error;
use crate::error::Result;
use crate::message::Message;
use crate::message::Slot;
use crate::registry::Registry;
use crate::registry::registry;
use crate::unknown::UnknownField;
use crate::varint::decode_varint;

/// Decodes a fresh `M` with the process-wide registry.
pub fn decode<M: Message + Default>(bytes: &[u8]) -> Result<M> {
    let mut message = M::default();
    merge(bytes, &mut message)?;
    Ok(message)
}

/// Decodes `bytes` into an existing message, overwriting singular fields and
/// appending to repeated ones.
pub fn merge(bytes: &[u8], message: &mut dyn Message) -> Result<()> {
    Decoder::new(bytes)?.message(message)
}

/// A descriptor-driven message reader over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct Decoder<'a, 'r> {
    buf: &'a [u8],
    registry: &'r Registry,
}

impl<'a> Decoder<'a, 'static> {
    /// Creates a decoder backed by the process-wide registry.
    pub fn new(buf: &'a [u8]) -> Result<Self> {
        Ok(Self::with_registry(buf, registry()?))
    }
}

impl<'a, 'r> Decoder<'a, 'r> {
    /// Creates a decoder backed by a specific registry.
    pub fn with_registry(buf: &'a [u8], registry: &'r Registry) -> Self {
        Self { buf, registry }
    }

    /// Reads the whole buffer into `message`.
    pub fn message(&mut self, message: &mut dyn Message) -> Result<()> {
        let buf = self.buf;
        self.read_message(buf, message, 0)?;
        self.buf = &buf[buf.len()..];
        Ok(())
    }

    fn read_message(&self, buf: &[u8], message: &mut dyn Message, depth: usize) -> Result<()> {
        if depth > MAX_RECURSION_DEPTH {
            return Err(Error::RecursionLimitExceeded);
        }

        let descriptor = self.registry.get(message.descriptor().name)?.descriptor;
        // Wire type each unknown number was first seen with. Known numbers are
        // pinned by their descriptor instead.
        let mut unknown_wire: HashMap<u64, u8> = HashMap::new();
        let mut pos = 0;

        while pos < buf.len() {
            let start = pos;
            let (tag, n) = decode_varint(buf, pos)?;
            pos += n;

            let (number, bits) = split_tag(tag);
            let malformed = Error::MalformedTag { number, wire_type: bits };
            if number == 0 || number > MAX_FIELD_NUMBER as u64 {
                return Err(malformed);
            }
            let Some(wire_type) = WireType::from_u8(bits) else {
                return Err(malformed);
            };
            match descriptor.field(number as u32) {
                Some(field) => {
                    if field.wire_type != wire_type {
                        return Err(malformed);
                    }
                    let payload = read_delimited(buf, &mut pos)?;
                    self.assign(message, field, payload, depth)?;
                }
                None => {
                    if *unknown_wire.entry(number).or_insert(bits) != bits {
                        return Err(malformed);
                    }
                    skip_value(buf, &mut pos, wire_type)?;
                    trace!(ty = descriptor.name, number, wire_type = bits, "retaining unknown field");
                    message.unknown_fields_mut().push(UnknownField {
                        number,
                        wire_type,
                        raw: buf[start..pos].to_vec(),
                    });
                }
            }
        }

        Ok(())
    }

    fn assign(
        &self,
        message: &mut dyn Message,
        field: &'static FieldDescriptor,
        payload: &[u8],
        depth: usize,
    ) -> Result<()> {
        let owner = message.descriptor().name;
        let mismatch = || Error::KindMismatch { message: owner, field: field.name };
        let slot = message.field_mut(field).ok_or_else(mismatch)?;

        match (field.kind, field.repeated, slot) {
            (Kind::String, false, Slot::Str(s)) => *s = utf8(field, payload)?,
            (Kind::Bytes, false, Slot::Bytes(b)) => *b = payload.to_vec(),
            (Kind::Message { type_name }, false, Slot::Message(inner)) => {
                if inner.descriptor().name != type_name {
                    return Err(mismatch());
                }
                self.read_message(payload, inner, depth + 1)?;
            }
            (Kind::String, true, Slot::RepeatedStr(items)) => items.push(utf8(field, payload)?),
            (Kind::Bytes, true, Slot::RepeatedBytes(items)) => items.push(payload.to_vec()),
            _ => return Err(mismatch()),
        }
        Ok(())
    }
}

fn utf8(field: &'static FieldDescriptor, payload: &[u8]) -> Result<String> {
    std::str::from_utf8(payload)
        .map(str::to_owned)
        .map_err(|_| Error::InvalidUtf8 { field: field.name })
}

/// Takes `n` bytes starting at `*pos`, advancing past them.
fn take<'a>(buf: &'a [u8], pos: &mut usize, n: usize) -> Result<&'a [u8]> {
    let remaining = buf.len() - *pos;
    if n > remaining {
        return Err(Error::TruncatedInput { needed: n, remaining });
    }
    let bytes = &buf[*pos..*pos + n];
    *pos += n;
    Ok(bytes)
}

/// Reads a varint length and the payload it announces.
fn read_delimited<'a>(buf: &'a [u8], pos: &mut usize) -> Result<&'a [u8]> {
    let (len, n) = decode_varint(buf, *pos)?;
    *pos += n;
    let len = usize::try_from(len).unwrap_or(usize::MAX);
    take(buf, pos, len)
}

/// Advances past one value of the given wire type.
fn skip_value(buf: &[u8], pos: &mut usize, wire_type: WireType) -> Result<()> {
    match wire_type {
        WireType::Varint => {
            let (_, n) = decode_varint(buf, *pos)?;
            *pos += n;
        }
        WireType::Fixed64 => {
            take(buf, pos, 8)?;
        }
        WireType::Fixed32 => {
            take(buf, pos, 4)?;
        }
        WireType::LengthDelimited => {
            read_delimited(buf, pos)?;
        }
    }
    Ok(())
}
