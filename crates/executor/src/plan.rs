//! Rearrangement plans.
//!
//! A plan is an ordered YAML sequence of single-key mappings. The key names
//! the operation, the value maps its named arguments:
//!
//! ```yaml
//! - describe:
//!     context: Support becomes Help
//!     category: 3
//!     name: Help
//!     slug: help
//! - publicCategoriesReadonly:
//! ```
//!
//! The optional `context` key is accepted on every record. It is shown to
//! the operator when the record runs and is never passed to the operation.
//!
//! The whole plan is parsed before anything runs, so a bad record anywhere
//! aborts the run before the first mutation.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::operation::Operation;
use crate::{Error, Result};

/// Argument key reserved for operator-facing annotations
pub const CONTEXT_KEY: &str = "context";

/// One plan entry: an operation plus its optional annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// The operation to run
    pub operation: Operation,
    /// Free-text annotation shown to the operator
    pub context: Option<String>,
}

impl OperationRecord {
    /// A record without annotation
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            context: None,
        }
    }

    /// Attach an annotation
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl From<Operation> for OperationRecord {
    fn from(operation: Operation) -> Self {
        Self::new(operation)
    }
}

/// An ordered list of operation records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    records: Vec<OperationRecord>,
}

impl Plan {
    /// Build a plan from records
    pub fn new(records: Vec<OperationRecord>) -> Self {
        Self { records }
    }

    /// Parse a plan from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Value = serde_yaml::from_str(text).map_err(|e| Error::Config {
            reason: e.to_string(),
        })?;
        let items = match document {
            Value::Sequence(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(Error::Config {
                    reason: format!("plan must be a sequence, got {}", kind(&other)),
                })
            }
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| parse_record(i + 1, item))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    /// Read and parse a plan file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Records in execution order
    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the plan has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntoIterator for Plan {
    type Item = OperationRecord;
    type IntoIter = std::vec::IntoIter<OperationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<OperationRecord> for Plan {
    fn from_iter<I: IntoIterator<Item = OperationRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn parse_record(index: usize, item: Value) -> Result<OperationRecord> {
    let mapping = match item {
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(Error::MalformedRecord {
                index,
                reason: format!("expected a single-key mapping, got {}", kind(&other)),
            })
        }
    };
    if mapping.len() != 1 {
        return Err(Error::MalformedRecord {
            index,
            reason: format!(
                "expected exactly one operation name, got {} keys",
                mapping.len()
            ),
        });
    }

    let Some((key, args)) = mapping.into_iter().next() else {
        return Err(Error::MalformedRecord {
            index,
            reason: "empty record".into(),
        });
    };
    let name = match key {
        Value::String(name) => name,
        other => {
            return Err(Error::MalformedRecord {
                index,
                reason: format!("operation name must be a string, got {}", kind(&other)),
            })
        }
    };

    let (args, context) = strip_context(index, &name, args)?;
    let operation = Operation::from_parts(index, &name, args)?;
    Ok(OperationRecord { operation, context })
}

/// Remove the `context` annotation from an argument mapping.
fn strip_context(index: usize, name: &str, args: Value) -> Result<(Value, Option<String>)> {
    let mut mapping: Mapping = match args {
        Value::Mapping(mapping) => mapping,
        Value::Null => return Ok((Value::Null, None)),
        other => {
            return Err(Error::InvalidArguments {
                index,
                operation: name.to_string(),
                reason: format!("arguments must be a mapping, got {}", kind(&other)),
            })
        }
    };

    let context = match mapping.remove(CONTEXT_KEY) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            return Err(Error::InvalidArguments {
                index,
                operation: name.to_string(),
                reason: format!("context must be a string, got {}", kind(&other)),
            })
        }
    };
    Ok((Value::Mapping(mapping), context))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
