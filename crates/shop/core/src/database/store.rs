use std::collections::{HashMap, HashSet};

use super::entry::{EntryId, EntryKind};

/// Party member that learns purchased skills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

/// Live game state read at resolution time.
///
/// Values are queried on every call, never cached at parse time, so shop
/// requirement checks always reflect the current switches and variables.
pub trait RuntimeOracle: Send + Sync {
    fn variable(&self, id: u32) -> i64;
    fn switch(&self, id: u32) -> bool;
    fn gold(&self) -> u32;
    fn item_count(&self, kind: EntryKind, id: EntryId) -> u32;
    fn knows_skill(&self, actor: ActorId, skill: EntryId) -> bool;
}

/// Mutable half of the host's runtime stores, used to commit purchases.
pub trait RuntimeStore: RuntimeOracle {
    fn set_variable(&mut self, id: u32, value: i64);
    fn lose_gold(&mut self, amount: u32);
    fn lose_item(&mut self, kind: EntryKind, id: EntryId, amount: u32);
    fn learn_skill(&mut self, actor: ActorId, skill: EntryId);
}

/// In-memory runtime store. Unset variables read as 0 and unset switches as off.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    gold: u32,
    variables: HashMap<u32, i64>,
    switches: HashMap<u32, bool>,
    inventory: HashMap<(EntryKind, EntryId), u32>,
    skills: HashSet<(ActorId, EntryId)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_variable(mut self, id: u32, value: i64) -> Self {
        self.variables.insert(id, value);
        self
    }

    pub fn with_switch(mut self, id: u32, value: bool) -> Self {
        self.switches.insert(id, value);
        self
    }

    pub fn with_item(mut self, kind: EntryKind, id: u32, count: u32) -> Self {
        self.inventory.insert((kind, EntryId(id)), count);
        self
    }

    pub fn with_skill(mut self, actor: ActorId, skill: u32) -> Self {
        self.skills.insert((actor, EntryId(skill)));
        self
    }

    pub fn set_switch(&mut self, id: u32, value: bool) {
        self.switches.insert(id, value);
    }
}

impl RuntimeOracle for MemoryStore {
    fn variable(&self, id: u32) -> i64 {
        self.variables.get(&id).copied().unwrap_or(0)
    }

    fn switch(&self, id: u32) -> bool {
        self.switches.get(&id).copied().unwrap_or(false)
    }

    fn gold(&self) -> u32 {
        self.gold
    }

    fn item_count(&self, kind: EntryKind, id: EntryId) -> u32 {
        self.inventory.get(&(kind, id)).copied().unwrap_or(0)
    }

    fn knows_skill(&self, actor: ActorId, skill: EntryId) -> bool {
        self.skills.contains(&(actor, skill))
    }
}

impl RuntimeStore for MemoryStore {
    fn set_variable(&mut self, id: u32, value: i64) {
        self.variables.insert(id, value);
    }

    fn lose_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_sub(amount);
    }

    fn lose_item(&mut self, kind: EntryKind, id: EntryId, amount: u32) {
        let count = self.inventory.entry((kind, id)).or_insert(0);
        *count = count.saturating_sub(amount);
    }

    fn learn_skill(&mut self, actor: ActorId, skill: EntryId) {
        self.skills.insert((actor, skill));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_values_read_as_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.variable(4), 0);
        assert!(!store.switch(4));
        assert_eq!(store.item_count(EntryKind::Item, EntryId(1)), 0);
    }

    #[test]
    fn mutations_saturate() {
        let mut store = MemoryStore::new()
            .with_gold(50)
            .with_item(EntryKind::Item, 1, 2);
        store.lose_gold(80);
        store.lose_item(EntryKind::Item, EntryId(1), 5);
        assert_eq!(store.gold(), 0);
        assert_eq!(store.item_count(EntryKind::Item, EntryId(1)), 0);
    }

    #[test]
    fn learned_skills_are_per_actor() {
        let mut store = MemoryStore::new();
        store.learn_skill(ActorId(1), EntryId(7));
        assert!(store.knows_skill(ActorId(1), EntryId(7)));
        assert!(!store.knows_skill(ActorId(2), EntryId(7)));
    }
}
