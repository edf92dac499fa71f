//! # Schema Registry
//!
//! Maps message type names to their descriptors, with each descriptor's fields
//! pre-sorted into wire order.
//!
//! ## Philosophy
//!
//! - **Build Once**: The process-wide registry is constructed behind a run-once
//!   guard the first time anything asks for it, and is never mutated afterwards.
//! - **Validate Early**: Duplicate field numbers, wire/kind disagreements and
//!   dangling message references are rejected when the registry is built, not
//!   when the first malformed message shows up.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::descriptor::FieldDescriptor;
use crate::descriptor::Kind;
use crate::descriptor::MessageDescriptor;
use crate::error::Error;
use crate::error::Result;
use crate::gateway::SCHEMA;

static REGISTRY: LazyLock<Result<Registry>> = LazyLock::new(|| Registry::build(SCHEMA));

/// Returns the process-wide registry, building it on first use.
///
/// # Errors
/// Returns the validation error if the built-in schema is inconsistent.
pub fn registry() -> Result<&'static Registry> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// A registered message type.
#[derive(Debug)]
pub struct Entry {
    pub descriptor: &'static MessageDescriptor,
    /// Fields in ascending field-number order.
    pub ordered: Vec<&'static FieldDescriptor>,
}

/// An immutable set of message descriptors.
#[derive(Debug)]
pub struct Registry {
    entries: HashMap<&'static str, Entry>,
}

impl Registry {
    /// Validates and indexes a schema.
    pub fn build(schema: &[&'static MessageDescriptor]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(schema.len());

        for &descriptor in schema {
            descriptor.validate()?;
            let mut ordered: Vec<&'static FieldDescriptor> = descriptor.fields.iter().collect();
            ordered.sort_by_key(|f| f.number);
            entries.insert(descriptor.name, Entry { descriptor, ordered });
        }

        // Embedded references must resolve within the same schema.
        for entry in entries.values() {
            for field in &entry.ordered {
                if let Kind::Message { type_name } = field.kind {
                    if !entries.contains_key(type_name) {
                        return Err(Error::UnknownMessageType(type_name.to_string()));
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    /// Looks up a message type by name.
    pub fn get(&self, name: &str) -> Result<&Entry> {
        self.entries.get(name).ok_or_else(|| Error::UnknownMessageType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
