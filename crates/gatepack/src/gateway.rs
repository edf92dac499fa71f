//! # Gateway Messages
//!
//! The three message shapes spoken by the Gateway service, and the static
//! schema tables describing them.
//!
//! Field numbers are part of the wire contract. Never renumber a field or reuse
//! a retired number for a different kind.

use crate::descriptor::FieldDescriptor;
use crate::descriptor::Kind;
use crate::descriptor::MessageDescriptor;
use crate::message::Message;
use crate::message::Slot;
use crate::message::Value;
use crate::unknown::UnknownFields;

pub static IDENTITY: MessageDescriptor = MessageDescriptor {
    name: "gateway.Identity",
    fields: &[
        FieldDescriptor::singular(1, "msp", Kind::String),
        FieldDescriptor::singular(2, "cert", Kind::String),
        FieldDescriptor::singular(3, "key", Kind::String),
    ],
};

pub static TRANSACTION: MessageDescriptor = MessageDescriptor {
    name: "gateway.Transaction",
    fields: &[
        FieldDescriptor::singular(1, "id", Kind::Message { type_name: "gateway.Identity" }),
        FieldDescriptor::singular(2, "channel", Kind::String),
        FieldDescriptor::singular(3, "chaincodeID", Kind::String),
        FieldDescriptor::singular(4, "txnName", Kind::String),
        FieldDescriptor::repeated(5, "args", Kind::String),
    ],
};

pub static RESPONSE: MessageDescriptor = MessageDescriptor {
    name: "gateway.Response",
    fields: &[
        FieldDescriptor::singular(1, "value", Kind::Bytes),
    ],
};

/// Every message type the built-in registry knows about.
pub static SCHEMA: &[&MessageDescriptor] = &[&IDENTITY, &TRANSACTION, &RESPONSE];

/// The credentials a transaction is submitted under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub msp: String,
    pub cert: String,
    pub key: String,
    pub unknown: UnknownFields,
}

impl Identity {
    pub fn new(msp: impl Into<String>, cert: impl Into<String>, key: impl Into<String>) -> Self {
        Self { msp: msp.into(), cert: cert.into(), key: key.into(), unknown: UnknownFields::new() }
    }
}

impl Message for Identity {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &IDENTITY
    }

    fn field(&self, field: &FieldDescriptor) -> Option<Value<'_>> {
        match field.number {
            1 => Some(Value::Str(&self.msp)),
            2 => Some(Value::Str(&self.cert)),
            3 => Some(Value::Str(&self.key)),
            _ => None,
        }
    }

    fn field_mut(&mut self, field: &FieldDescriptor) -> Option<Slot<'_>> {
        match field.number {
            1 => Some(Slot::Str(&mut self.msp)),
            2 => Some(Slot::Str(&mut self.cert)),
            3 => Some(Slot::Str(&mut self.key)),
            _ => None,
        }
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

/// A named chaincode invocation with positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub id: Option<Identity>,
    pub channel: String,
    pub chaincode_id: String,
    pub txn_name: String,
    /// Order is significant.
    pub args: Vec<String>,
    pub unknown: UnknownFields,
}

impl Transaction {
    pub fn new(channel: impl Into<String>, chaincode_id: impl Into<String>, txn_name: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            chaincode_id: chaincode_id.into(),
            txn_name: txn_name.into(),
            ..Self::default()
        }
    }

    pub fn with_identity(mut self, id: Identity) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

impl Message for Transaction {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &TRANSACTION
    }

    fn field(&self, field: &FieldDescriptor) -> Option<Value<'_>> {
        match field.number {
            1 => Some(Value::Message(self.id.as_ref().map(|id| id as &dyn Message))),
            2 => Some(Value::Str(&self.channel)),
            3 => Some(Value::Str(&self.chaincode_id)),
            4 => Some(Value::Str(&self.txn_name)),
            5 => Some(Value::RepeatedStr(&self.args)),
            _ => None,
        }
    }

    fn field_mut(&mut self, field: &FieldDescriptor) -> Option<Slot<'_>> {
        match field.number {
            1 => Some(Slot::Message(self.id.insert(Identity::default()))),
            2 => Some(Slot::Str(&mut self.channel)),
            3 => Some(Slot::Str(&mut self.chaincode_id)),
            4 => Some(Slot::Str(&mut self.txn_name)),
            5 => Some(Slot::RepeatedStr(&mut self.args)),
            _ => None,
        }
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

/// The opaque result of a submitted or evaluated transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    pub value: Vec<u8>,
    pub unknown: UnknownFields,
}

impl Response {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self { value: value.into(), unknown: UnknownFields::new() }
    }
}

impl Message for Response {
    fn descriptor(&self) -> &'static MessageDescriptor {
        &RESPONSE
    }

    fn field(&self, field: &FieldDescriptor) -> Option<Value<'_>> {
        match field.number {
            1 => Some(Value::Bytes(&self.value)),
            _ => None,
        }
    }

    fn field_mut(&mut self, field: &FieldDescriptor) -> Option<Slot<'_>> {
        match field.number {
            1 => Some(Slot::Bytes(&mut self.value)),
            _ => None,
        }
    }

    fn unknown_fields(&self) -> &UnknownFields {
        &self.unknown
    }

    fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}
