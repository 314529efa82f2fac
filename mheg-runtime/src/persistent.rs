// MHEG - mheg-runtime
// Module: Persistent store
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Receiver-side persistent storage for StorePersistent and
//! ReadPersistent.
//!
//! Files live for the lifetime of the engine and survive application
//! changes, which is what lets one application hand values to the next.

use std::collections::HashMap;

use mheg_error::{codes, kinds, Error, ErrorCategory, Result};
use mheg_foundation::{GroupId, ObjectReference, OctetString, VariableValue};

use crate::engine::Engine;
use crate::object::ObjectBody;

/// Values stored under file names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentStore {
    files: HashMap<OctetString, Vec<VariableValue>>,
}

impl PersistentStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content of `file`
    pub fn store(&mut self, file: OctetString, values: Vec<VariableValue>) {
        self.files.insert(file, values);
    }

    /// Content of `file`
    pub fn read(&self, file: &OctetString) -> Option<&[VariableValue]> {
        self.files.get(file).map(Vec::as_slice)
    }

    /// True if nothing has been stored
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Engine {
    /// Persistent store
    pub fn persistent_store(&self) -> &PersistentStore {
        &self.persistent
    }

    /// StorePersistent: snapshot `variables` under `file`.
    ///
    /// Nothing is stored if any variable cannot be resolved.
    pub(crate) fn store_persistent(&mut self, file: OctetString, variables: &[ObjectReference], gid: &GroupId) -> Result<()> {
        let mut values = Vec::with_capacity(variables.len());
        for reference in variables {
            let id = self.find_object(reference, gid).ok_or_else(kinds::object_not_found)?;
            match self.registry.get(id).map(|object| &object.body) {
                Some(ObjectBody::Variable(variable)) => values.push(variable.value.clone()),
                _ => return Err(kinds::not_a_variable()),
            }
        }
        self.logger.debug(gid, format!("Stored {} values in {file}", values.len()));
        self.persistent.store(file, values);
        Ok(())
    }

    /// ReadPersistent: write the values of `file` into `variables` in
    /// order.
    ///
    /// A value only goes into a variable of its own kind; the read fails at
    /// the first mismatch, leaving earlier variables written.
    pub(crate) fn read_persistent(&mut self, file: &OctetString, variables: &[ObjectReference], gid: &GroupId) -> Result<()> {
        let values = self
            .persistent
            .read(file)
            .map(<[VariableValue]>::to_vec)
            .ok_or(Error::new(ErrorCategory::Runtime, codes::PERSISTENT_FILE_NOT_FOUND, "No such persistent file"))?;
        if values.len() < variables.len() {
            return Err(Error::new(ErrorCategory::Runtime, codes::PERSISTENT_FILE_NOT_FOUND, "Persistent file holds fewer values than requested"));
        }
        for (reference, value) in variables.iter().zip(values) {
            let id = self.find_object(reference, gid).ok_or_else(kinds::object_not_found)?;
            match self.body_mut(id)? {
                ObjectBody::Variable(variable) if variable.kind() == value.kind() => variable.value = value,
                ObjectBody::Variable(_) => return Err(kinds::variable_kind_mismatch()),
                _ => return Err(kinds::not_a_variable()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_replaces_file() {
        let mut store = PersistentStore::new();
        assert!(store.is_empty());
        store.store("ram://a".into(), vec![VariableValue::Integer(1)]);
        store.store("ram://a".into(), vec![VariableValue::Boolean(true)]);
        assert_eq!(store.read(&"ram://a".into()), Some(&[VariableValue::Boolean(true)][..]));
        assert_eq!(store.read(&"ram://b".into()), None);
    }
}
