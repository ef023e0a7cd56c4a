use std::fmt;

/// Host database table an entry belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntryKind {
    Item,
    Weapon,
    Armor,
    Skill,
    State,
}

impl EntryKind {
    /// Every table scanned for notetags at load time.
    pub const ALL: [EntryKind; 5] = [
        EntryKind::Item,
        EntryKind::Weapon,
        EntryKind::Armor,
        EntryKind::Skill,
        EntryKind::State,
    ];

    /// Returns true for tables whose entries can be held in the party inventory.
    #[inline]
    pub const fn is_inventory(self) -> bool {
        matches!(self, Self::Item | Self::Weapon | Self::Armor)
    }
}

/// Numeric id of an entry within its table. Hosts reserve id 0 for "none".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntryId(pub u32);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identity of a database entry across all tables.
///
/// Used as the side-table key for cost records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryKey {
    pub kind: EntryKind,
    pub id: EntryId,
}

impl EntryKey {
    pub const fn new(kind: EntryKind, id: EntryId) -> Self {
        Self { kind, id }
    }

    pub const fn skill(id: u32) -> Self {
        Self::new(EntryKind::Skill, EntryId(id))
    }

    pub const fn item(id: u32) -> Self {
        Self::new(EntryKind::Item, EntryId(id))
    }

    pub const fn state(id: u32) -> Self {
        Self::new(EntryKind::State, EntryId(id))
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.id)
    }
}

/// The subset of a host database record the shop reads.
///
/// Hosts carry many more fields; loaders keep only what is needed here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DatabaseEntry {
    pub id: EntryId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: String,
}

impl DatabaseEntry {
    pub fn new(id: u32, name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            id: EntryId(id),
            name: name.into(),
            note: note.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn entry_kind_parses_case_insensitively() {
        assert_eq!(EntryKind::from_str("WEAPON").unwrap(), EntryKind::Weapon);
        assert_eq!(EntryKind::from_str("Armor").unwrap(), EntryKind::Armor);
        assert!(EntryKind::from_str("variable").is_err());
    }

    #[test]
    fn entry_key_display() {
        assert_eq!(EntryKey::skill(12).to_string(), "skill#12");
        assert_eq!(
            EntryKey::new(EntryKind::Weapon, EntryId(3)).to_string(),
            "weapon#3"
        );
    }
}
