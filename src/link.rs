use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A foreign key as upstream systems actually send it: sometimes a bare id
/// string, sometimes a numeric id, sometimes the whole referenced object —
/// inconsistently, even within a single collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordRef {
    Text(String),
    Number(i64),
    Embedded {
        #[serde(alias = "_id")]
        id: Box<RecordRef>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RecordRef {
    /// Normalize any reference shape to a comparable id string. This is the
    /// single resolution point — nothing else inspects reference shapes.
    pub fn resolve_id(&self) -> Option<String> {
        match self {
            RecordRef::Text(s) if s.is_empty() => None,
            RecordRef::Text(s) => Some(s.clone()),
            RecordRef::Number(n) => Some(n.to_string()),
            RecordRef::Embedded { id, .. } => id.resolve_id(),
        }
    }

    /// Display name carried by a populated reference, when there is one.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            RecordRef::Embedded { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}

/// A record that can be looked up by id.
pub trait Identified {
    fn record_id(&self) -> &str;
}

/// Id → record index, built once per collection so that joining two
/// collections costs O(n + m) instead of a scan per lookup.
#[derive(Debug)]
pub struct EntityIndex<'a, T> {
    by_id: HashMap<&'a str, &'a T>,
}

impl<'a, T: Identified> EntityIndex<'a, T> {
    pub fn build(records: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            // First record wins on duplicate ids
            by_id.entry(record.record_id()).or_insert(record);
        }
        Self { by_id }
    }

    /// Resolve a loose reference to its record. An unmatched or missing
    /// relation is `None`, never an error — callers render it as "N/A".
    pub fn get(&self, reference: Option<&RecordRef>) -> Option<&'a T> {
        let id = reference?.resolve_id()?;
        self.get_id(&id)
    }

    pub fn get_id(&self, id: &str) -> Option<&'a T> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
