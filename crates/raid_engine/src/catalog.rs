//! Static data catalogs.
//!
//! Move and species records are loaded from JSON. A built-in set ships with the
//! crate and is parsed once on first use; callers can build their own catalog
//! or merge extra records into a clone of the built-in one.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::core_data::{MoveData, StatTable};
use crate::error::{EngineError, Result};
use crate::types::Type;

const BUILTIN_MOVES: &str = include_str!("../data/moves.json");
const BUILTIN_SPECIES: &str = include_str!("../data/species.json");

/// Normalize a display name to a lookup key ("Will-O-Wisp" -> "willowisp").
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ============================================================================
// Moves
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MoveCatalog {
    moves: HashMap<String, Arc<MoveData>>,
}

impl MoveCatalog {
    /// Parse a JSON array of move records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MoveData> = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        for record in records {
            if record.name.is_empty() {
                return Err(EngineError::Catalog("move record without a name".to_string()));
            }
            catalog.insert(record);
        }
        Ok(catalog)
    }

    /// The catalog bundled with the crate.
    pub fn builtin() -> &'static MoveCatalog {
        static CATALOG: OnceLock<MoveCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| match MoveCatalog::from_json(BUILTIN_MOVES) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("built-in move catalog is unusable: {}", err);
                MoveCatalog::default()
            }
        })
    }

    pub fn insert(&mut self, record: MoveData) {
        self.moves.insert(to_id(&record.name), Arc::new(record));
    }

    /// Merge every record of `other`, replacing records with the same name.
    pub fn extend(&mut self, other: MoveCatalog) {
        self.moves.extend(other.moves);
    }

    pub fn get(&self, name: &str) -> Option<Arc<MoveData>> {
        self.moves.get(&to_id(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.moves.contains_key(&to_id(name))
    }

    /// Look up a move, falling back to an inert placeholder record.
    ///
    /// The second value is `false` when the placeholder was used.
    pub fn resolve(&self, name: &str) -> (Arc<MoveData>, bool) {
        match self.get(name) {
            Some(data) => (data, true),
            None => {
                log::warn!("move '{}' not in catalog; treating as a no-op", name);
                (Arc::new(MoveData::unknown(name)), false)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.moves.values().map(|m| m.name.as_str())
    }
}

// ============================================================================
// Species
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    pub name: String,
    pub types: Vec<Type>,
    pub base_stats: StatTable,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub abilities: Vec<String>,
}

impl SpeciesData {
    pub fn new(name: &str, types: &[Type], base_stats: StatTable) -> Self {
        Self {
            name: name.to_string(),
            types: types.to_vec(),
            base_stats,
            weight_kg: 50.0,
            abilities: Vec::new(),
        }
    }

    pub fn primary_ability(&self) -> Option<&str> {
        self.abilities.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    species: HashMap<String, Arc<SpeciesData>>,
}

impl SpeciesCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<SpeciesData> = serde_json::from_str(json)?;
        let mut catalog = Self::default();
        for record in records {
            if record.types.is_empty() {
                return Err(EngineError::Catalog(format!(
                    "species '{}' has no types",
                    record.name
                )));
            }
            catalog.insert(record);
        }
        Ok(catalog)
    }

    pub fn builtin() -> &'static SpeciesCatalog {
        static CATALOG: OnceLock<SpeciesCatalog> = OnceLock::new();
        CATALOG.get_or_init(|| match SpeciesCatalog::from_json(BUILTIN_SPECIES) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::error!("built-in species catalog is unusable: {}", err);
                SpeciesCatalog::default()
            }
        })
    }

    pub fn insert(&mut self, record: SpeciesData) {
        self.species.insert(to_id(&record.name), Arc::new(record));
    }

    pub fn get(&self, name: &str) -> Result<Arc<SpeciesData>> {
        self.species
            .get(&to_id(name))
            .cloned()
            .ok_or_else(|| EngineError::UnknownSpecies(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
