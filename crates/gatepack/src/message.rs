//! # Message Reflection
//!
//! The seam between concrete message structs and the generic encoder/decoder.
//! A message never encodes itself; it only hands out views of its fields,
//! addressed by descriptor, and the engine does the rest.

use crate::descriptor::FieldDescriptor;
use crate::descriptor::MessageDescriptor;
use crate::unknown::UnknownFields;

/// A read-only view of one field's current value.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    Str(&'a str),
    Bytes(&'a [u8]),
    /// `None` when the embedded message is absent.
    Message(Option<&'a dyn Message>),
    RepeatedStr(&'a [String]),
    RepeatedBytes(&'a [Vec<u8>]),
}

/// A writable slot for one field, handed to the decoder.
pub enum Slot<'a> {
    Str(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    /// A freshly reset embedded message. Handing out a new instance on every
    /// call is what makes the last occurrence of a singular message win.
    Message(&'a mut dyn Message),
    RepeatedStr(&'a mut Vec<String>),
    RepeatedBytes(&'a mut Vec<Vec<u8>>),
}

/// A structured value described by a `MessageDescriptor`.
///
/// # Invariants
/// - `field` and `field_mut` must return the variant matching the descriptor's
///   `kind` and `repeated` flag, or `None` for a field the type does not own.
///   The engine reports any disagreement as `Error::KindMismatch`.
pub trait Message: std::fmt::Debug + Send + Sync {
    fn descriptor(&self) -> &'static MessageDescriptor;

    fn field(&self, field: &FieldDescriptor) -> Option<Value<'_>>;

    fn field_mut(&mut self, field: &FieldDescriptor) -> Option<Slot<'_>>;

    fn unknown_fields(&self) -> &UnknownFields;

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields;
}
