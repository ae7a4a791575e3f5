use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{require_input, Error, Result};

/// Tag for tokens outside any entity
pub const OUTSIDE: &str = "O";

/// BIO tag vocabulary: `O`, then `B-<TYPE>` and `I-<TYPE>` for each entity
/// type in order, with dense ids in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSchema {
    entity_types: Vec<String>,
    labels: Vec<String>,
    ids: HashMap<String, u32>,
}

impl LabelSchema {
    /// Repeated entity types keep their first position.
    pub fn build<S: AsRef<str>>(entity_types: &[S]) -> Self {
        let mut seen = HashSet::new();
        let entity_types: Vec<String> = entity_types
            .iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| {
                let fresh = seen.insert(t.clone());
                if !fresh {
                    tracing::warn!("Ignoring repeated entity type {}", t);
                }
                fresh
            })
            .collect();

        let mut labels = vec![OUTSIDE.to_string()];
        for entity in &entity_types {
            labels.push(format!("B-{entity}"));
            labels.push(format!("I-{entity}"));
        }
        let ids = labels
            .iter()
            .zip(0u32..)
            .map(|(label, id)| (label.clone(), id))
            .collect();

        Self {
            entity_types,
            labels,
            ids,
        }
    }

    pub fn id(&self, tag: &str) -> Option<u32> {
        self.ids.get(tag).copied()
    }

    pub fn label(&self, id: u32) -> Option<&str> {
        self.labels.get(id as usize).map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.ids.contains_key(tag)
    }

    /// Ids outside the vocabulary decode as `O`.
    pub fn decode(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter()
            .map(|&id| self.label(id).unwrap_or(OUTSIDE))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn entity_types(&self) -> &[String] {
        &self.entity_types
    }
}

/// `metadata.json` written next to the splits.
#[derive(Debug, Clone, Copy)]
pub struct SplitMetadata<'a> {
    schema: &'a LabelSchema,
}

impl<'a> SplitMetadata<'a> {
    pub const fn new(schema: &'a LabelSchema) -> Self {
        Self { schema }
    }

    /// Pretty-printed, both maps in id order.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Rebuild the schema from a metadata file, checking that both maps agree
    /// with the entity list.
    pub fn load(path: &Path) -> Result<LabelSchema> {
        require_input(path)?;
        let raw: RawMetadata = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        let schema = LabelSchema::build(&raw.entity_labels);

        let consistent = raw.label2id.len() == schema.len()
            && raw.id2label.len() == schema.len()
            && raw
                .label2id
                .iter()
                .all(|(label, &id)| schema.id(label) == Some(id))
            && raw.id2label.iter().all(|(id, label)| {
                id.parse::<u32>()
                    .ok()
                    .and_then(|id| schema.label(id))
                    .is_some_and(|expected| expected == label)
            });
        if !consistent {
            return Err(Error::InvalidMetadata(path.to_path_buf()));
        }
        Ok(schema)
    }
}

impl Serialize for SplitMetadata<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SplitMetadata", 3)?;
        state.serialize_field("id2label", &IdToLabel(self.schema.labels()))?;
        state.serialize_field("label2id", &LabelToId(self.schema.labels()))?;
        state.serialize_field("entity_labels", self.schema.entity_types())?;
        state.end()
    }
}

struct IdToLabel<'a>(&'a [String]);

impl Serialize for IdToLabel<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().enumerate().map(|(id, label)| (id.to_string(), label)))
    }
}

struct LabelToId<'a>(&'a [String]);

impl Serialize for LabelToId<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().enumerate().map(|(id, label)| (label, id)))
    }
}

#[derive(Deserialize)]
struct RawMetadata {
    id2label: HashMap<String, String>,
    label2id: HashMap<String, u32>,
    entity_labels: Vec<String>,
}
