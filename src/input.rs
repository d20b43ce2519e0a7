//! Loading raw score records from JSON files.
//!
//! Two document shapes are accepted:
//!
//! ```json
//! [{ "date": "01.06.2024", "qs": 6, "secondaryCount": 2 }]
//! ```
//!
//! ```json
//! { "entities": [{ "name": "Brand", "level": "campaign", "records": [...] }] }
//! ```
//!
//! A bare array becomes a single account-level entity named after the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::types::{EntityLevel, RawScoreRecord};

/// Raw records belonging to one entity of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecords {
    pub name: String,
    #[serde(default)]
    pub level: EntityLevel,
    #[serde(default)]
    pub records: Vec<RawScoreRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Entities { entities: Vec<EntityRecords> },
    Records(Vec<RawScoreRecord>),
}

/// Load entities from a JSON file.
pub fn load(path: &Path) -> Result<Vec<EntityRecords>> {
    let contents = std::fs::read_to_string(path)?;
    let fallback_name = path
        .file_stem()
        .map_or_else(|| "records".to_string(), |s| s.to_string_lossy().into_owned());
    let entities = parse(&contents, &fallback_name)?;

    info!(
        "Loaded {} entities ({} records) from {}",
        entities.len(),
        entities.iter().map(|e| e.records.len()).sum::<usize>(),
        path.display()
    );

    Ok(entities)
}

/// Parse entities from JSON text. `fallback_name` names a bare record array.
pub fn parse(contents: &str, fallback_name: &str) -> Result<Vec<EntityRecords>> {
    let document: Document = serde_json::from_str(contents)?;
    Ok(match document {
        Document::Entities { entities } => entities,
        Document::Records(records) => vec![EntityRecords {
            name: fallback_name.to_string(),
            level: EntityLevel::Account,
            records,
        }],
    })
}
