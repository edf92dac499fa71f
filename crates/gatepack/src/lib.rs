//! # Gatepack
//!
//! A small, descriptor-driven binary encoding for the Gateway protocol.
//!
//! ## Philosophy
//!
//! - **One Engine**: A single encoder and a single decoder, steered by static
//!   descriptor tables. Messages expose their fields; they never serialize themselves.
//! - **Evolvable**: Tagged fields plus verbatim retention of unknown fields let
//!   old and new schema versions read each other's bytes.
//! - **Bounded**: Decoders are bounds-checked views. Malformed input is an error, never a panic.
//!
//! ## Format
//!
//! - **Record**: `[Tag: varint][Value]`, where `Tag = (field_number << 3) | wire_type`.
//! - **Length-delimited** (wire type 2): `[Len: varint][Bytes: Len]` for strings,
//!   byte sequences and embedded messages.
//! - **Repeated** fields are one record per element, in order.

mod error;

pub mod varint;
pub mod descriptor;
pub mod unknown;
pub mod message;
pub mod gateway;
pub mod registry;
pub mod encoder;
pub mod decoder;

pub use error::Error;
pub use error::Result;

pub use descriptor::FieldDescriptor;
pub use descriptor::Kind;
pub use descriptor::MessageDescriptor;
pub use descriptor::WireType;

pub use message::Message;
pub use message::Slot;
pub use message::Value;

pub use unknown::UnknownField;
pub use unknown::UnknownFields;

pub use gateway::Identity;
pub use gateway::Response;
pub use gateway::Transaction;

pub use registry::Registry;
pub use registry::registry;

pub use encoder::Encoder;
pub use encoder::encode;
pub use encoder::encode_to;

pub use decoder::Decoder;
pub use decoder::decode;
pub use decoder::merge;
