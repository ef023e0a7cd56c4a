//! Side-table of parsed notetag data keyed by database entry.
//!
//! The host's database records are shared and never written to. Everything the
//! shop derives from a note field lives here instead, keyed by [`EntryKey`].

use std::collections::HashMap;

use crate::config::ShopConfig;
use crate::cost::{CostSpec, CostSpecBuilder};
use crate::database::{DatabaseOracle, EntryId, EntryKey, EntryKind};
use crate::notetag::{self, Directive};

/// Everything parsed from one entry's note field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryNotes {
    pub cost: CostSpec,
    /// `<retain on death>`: the entry survives the host's death cleanup.
    pub retain_on_death: bool,
    /// `<shop skills: ...>`: skills offered when this item opens a shop.
    /// Multiple tags concatenate.
    pub shop_skills: Vec<EntryId>,
}

impl EntryNotes {
    /// Parses a note field in a single pass.
    pub fn from_note(note: &str, config: &ShopConfig) -> Self {
        let mut cost = CostSpecBuilder::new(config);
        let mut retain_on_death = false;
        let mut shop_skills = Vec::new();

        for directive in notetag::parse_note(note) {
            match &directive {
                Directive::RetainOnDeath => retain_on_death = true,
                Directive::ShopSkills(skills) => shop_skills.extend_from_slice(skills),
                _ => {
                    cost.apply(&directive);
                }
            }
        }

        Self {
            cost: cost.build(),
            retain_on_death,
            shop_skills,
        }
    }
}

/// Side-table mapping every processed entry to its [`EntryNotes`].
#[derive(Clone, Debug, Default)]
pub struct CostRegistry {
    config: ShopConfig,
    entries: HashMap<EntryKey, EntryNotes>,
}

impl CostRegistry {
    pub fn new(config: ShopConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
        }
    }

    /// Scans every table of the database. Run once at load, before any shop query.
    pub fn build<D>(database: &D, config: ShopConfig) -> Self
    where
        D: DatabaseOracle + ?Sized,
    {
        let mut registry = Self::new(config);
        for kind in EntryKind::ALL {
            for entry in database.entries(kind) {
                registry.process(EntryKey::new(kind, entry.id), &entry.note);
            }
        }
        registry
    }

    /// Parses one note field, replacing any record previously stored for the key.
    pub fn process(&mut self, key: EntryKey, note: &str) -> &EntryNotes {
        let notes = EntryNotes::from_note(note, &self.config);
        self.entries.insert(key, notes);
        &self.entries[&key]
    }

    pub fn config(&self) -> &ShopConfig {
        &self.config
    }

    pub fn get(&self, key: EntryKey) -> Option<&EntryNotes> {
        self.entries.get(&key)
    }

    pub fn cost(&self, key: EntryKey) -> Option<&CostSpec> {
        self.get(key).map(|notes| &notes.cost)
    }

    /// Returns false for unknown entries.
    pub fn retains_on_death(&self, key: EntryKey) -> bool {
        self.get(key).is_some_and(|notes| notes.retain_on_death)
    }

    /// States removed by the host's death cleanup, in input order.
    pub fn states_cleared_on_death(&self, states: &[EntryId]) -> Vec<EntryId> {
        states
            .iter()
            .copied()
            .filter(|&id| !self.retains_on_death(EntryKey::new(EntryKind::State, id)))
            .collect()
    }

    /// Skill list declared on a shop item, or `None` if the item is unknown.
    pub fn shop_skills(&self, item: EntryId) -> Option<&[EntryId]> {
        self.get(EntryKey::new(EntryKind::Item, item))
            .map(|notes| notes.shop_skills.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of processed entries of one kind.
    pub fn count(&self, kind: EntryKind) -> usize {
        self.entries.keys().filter(|key| key.kind == kind).count()
    }
}
