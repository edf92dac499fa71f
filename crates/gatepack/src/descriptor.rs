//! # Descriptors
//!
//! Static metadata describing the shape of each message on the wire.
//!
//! ## Invariants
//! - Field numbers are unique within a message and never reused for another kind.
//!   The registry checks this when it is built.
//! - Descriptors are `'static` tables; nothing mutates them at runtime.

use crate::error::Error;
use crate::error::Result;

/// The encoding family of a tagged value.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    /// A single varint.
    Varint = 0,
    /// Eight little-endian bytes. Only ever skipped.
    Fixed64 = 1,
    /// A varint length followed by that many bytes.
    LengthDelimited = 2,
    /// Four little-endian bytes. Only ever skipped.
    Fixed32 = 5,
}

impl WireType {
    /// Returns the wire type for the low three bits of a tag, or `None` if
    /// unsupported (including the deprecated group markers 3 and 4).
    pub const fn from_u8(b: u8) -> Option<Self> {
        match b {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

/// What a field's bytes mean once read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// UTF-8 text.
    String,
    /// Opaque bytes.
    Bytes,
    /// An embedded message, named by its registered type.
    Message { type_name: &'static str },
}

impl Kind {
    /// The only wire type able to carry this kind.
    pub const fn wire_type(&self) -> WireType {
        match self {
            Kind::String | Kind::Bytes | Kind::Message { .. } => WireType::LengthDelimited,
        }
    }
}

/// One field of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub number: u32,
    pub name: &'static str,
    pub wire_type: WireType,
    pub kind: Kind,
    pub repeated: bool,
}

impl FieldDescriptor {
    /// A singular field; the wire type follows from the kind.
    pub const fn singular(number: u32, name: &'static str, kind: Kind) -> Self {
        Self { number, name, wire_type: kind.wire_type(), kind, repeated: false }
    }

    /// A repeated field; the wire type follows from the kind.
    pub const fn repeated(number: u32, name: &'static str, kind: Kind) -> Self {
        Self { number, name, wire_type: kind.wire_type(), kind, repeated: true }
    }

    /// The tag value `(number << 3) | wire_type` that prefixes this field.
    pub const fn tag(&self) -> u64 {
        make_tag(self.number, self.wire_type)
    }
}

/// The full shape of a message type.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub name: &'static str,
    /// Declaration order. Encoding order comes from the registry.
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// Looks up a field by number.
    pub fn field(&self, number: u32) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Looks up a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Checks the structural invariants of this descriptor.
    pub fn validate(&self) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(Error::MalformedTag { number: field.number as u64, wire_type: field.wire_type as u8 });
            }
            if field.wire_type != field.kind.wire_type() {
                return Err(Error::WireTypeMismatch { message: self.name, field: field.name });
            }
            if self.fields[..i].iter().any(|f| f.number == field.number) {
                return Err(Error::DuplicateField { message: self.name, number: field.number });
            }
        }
        Ok(())
    }
}

/// Largest field number expressible in a tag.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Combines a field number and wire type into a tag.
pub const fn make_tag(number: u32, wire_type: WireType) -> u64 {
    ((number as u64) << 3) | wire_type as u64
}

/// Splits a tag into its field number and raw wire type bits.
pub const fn split_tag(tag: u64) -> (u64, u8) {
    (tag >> 3, (tag & 0x07) as u8)
}
