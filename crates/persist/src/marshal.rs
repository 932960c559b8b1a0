// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Converting configuration models to and from bytes

use ck_core::{MarshalError, PersistenceError};
use std::io::{Read, Write};

/// Writes a model out and reads it back as a list of boot operations
pub trait ConfigurationMarshaller: Send + Sync {
    type Model;
    type Operation;

    fn marshal(&self, model: &Self::Model, output: &mut dyn Write) -> Result<(), MarshalError>;

    fn unmarshal(&self, input: &mut dyn Read) -> Result<Vec<Self::Operation>, MarshalError>;
}

/// Marshal `model` into memory, surfacing marshalling errors immediately
pub(crate) fn marshal_to_vec<M: ConfigurationMarshaller>(
    marshaller: &M,
    model: &M::Model,
) -> Result<Vec<u8>, PersistenceError> {
    let mut buffer = Vec::new();
    marshaller
        .marshal(model, &mut buffer)
        .map_err(PersistenceError::Marshal)?;
    Ok(buffer)
}

/// Plain text; each non-blank line is one operation
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMarshaller;

impl ConfigurationMarshaller for TextMarshaller {
    type Model = String;
    type Operation = String;

    fn marshal(&self, model: &String, output: &mut dyn Write) -> Result<(), MarshalError> {
        output.write_all(model.as_bytes())?;
        Ok(())
    }

    fn unmarshal(&self, input: &mut dyn Read) -> Result<Vec<String>, MarshalError> {
        let mut content = String::new();
        input.read_to_string(&mut content)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Pretty-printed JSON; a top-level array unmarshals to its elements
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl ConfigurationMarshaller for JsonMarshaller {
    type Model = serde_json::Value;
    type Operation = serde_json::Value;

    fn marshal(&self, model: &serde_json::Value, output: &mut dyn Write) -> Result<(), MarshalError> {
        serde_json::to_writer_pretty(&mut *output, model)?;
        output.write_all(b"\n")?;
        Ok(())
    }

    fn unmarshal(&self, input: &mut dyn Read) -> Result<Vec<serde_json::Value>, MarshalError> {
        let value: serde_json::Value = serde_json::from_reader(input)?;
        match value {
            serde_json::Value::Array(operations) => Ok(operations),
            operation => Ok(vec![operation]),
        }
    }
}

#[cfg(test)]
#[path = "marshal_tests.rs"]
mod tests;
