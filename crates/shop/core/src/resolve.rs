//! Resolution of cost records against the database and live game state.
//!
//! Raw `(kind, id, quantity)` records become references into the host's
//! tables. Ids that do not exist resolve to an explicit
//! [`CostLine::Unresolved`] so shop UI code can flag the broken entry instead
//! of rendering a cost with a missing item.

use crate::cost::{CostSpec, ItemKind};
use crate::database::{DatabaseEntry, DatabaseOracle, EntryId, EntryKey, RuntimeOracle};
use crate::error::{ErrorSeverity, ShopError};
use crate::registry::CostRegistry;

/// Errors raised while resolving an entry's costs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The entry was never processed into the registry.
    #[error("no buy cost registered for {0}")]
    NotRegistered(EntryKey),
}

impl ShopError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotRegistered(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotRegistered(_) => "RESOLVE_NOT_REGISTERED",
        }
    }
}

/// One item cost after dereferencing its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CostLine<'a> {
    Resolved {
        kind: ItemKind,
        entry: &'a DatabaseEntry,
        quantity: u32,
        /// Amount currently in the party inventory.
        held: u32,
    },
    Unresolved {
        kind: ItemKind,
        id: EntryId,
        quantity: u32,
    },
}

impl CostLine<'_> {
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Resolved { quantity, .. } | Self::Unresolved { quantity, .. } => *quantity,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Unresolved lines are never affordable.
    pub fn is_affordable(&self) -> bool {
        match self {
            Self::Resolved { quantity, held, .. } => held >= quantity,
            Self::Unresolved { .. } => false,
        }
    }
}

/// Combined quantity owed for one inventory entry across all its cost lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemTotal<'a> {
    pub kind: ItemKind,
    pub entry: &'a DatabaseEntry,
    pub required: u32,
    pub held: u32,
}

impl ItemTotal<'_> {
    pub fn satisfied(&self) -> bool {
        self.held >= self.required
    }
}

/// Gold cost against the party's purse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoldStatus {
    pub required: u32,
    pub current: u32,
}

impl GoldStatus {
    pub fn satisfied(&self) -> bool {
        self.current >= self.required
    }
}

/// A variable cost or variable requirement evaluated against the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableStatus {
    pub variable: u32,
    pub required: u32,
    pub current: i64,
}

impl VariableStatus {
    pub fn satisfied(&self) -> bool {
        self.current >= i64::from(self.required)
    }
}

/// A switch requirement evaluated against the current switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwitchStatus {
    pub switch: u32,
    pub required: bool,
    pub current: bool,
}

impl SwitchStatus {
    pub fn satisfied(&self) -> bool {
        self.current == self.required
    }
}

/// Full evaluation of an entry's costs and requirements at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseCheck<'a> {
    pub key: EntryKey,
    pub gold: GoldStatus,
    pub items: Vec<CostLine<'a>>,
    pub variable_costs: Vec<VariableStatus>,
    pub variable_requirements: Vec<VariableStatus>,
    pub switch_requirements: Vec<SwitchStatus>,
}

impl<'a> PurchaseCheck<'a> {
    /// Switch and variable gates all pass.
    pub fn requirements_met(&self) -> bool {
        self.switch_requirements.iter().all(SwitchStatus::satisfied)
            && self.variable_requirements.iter().all(VariableStatus::satisfied)
    }

    /// Gold, items and variable costs are all covered.
    ///
    /// Repeated declarations of the same item or variable are checked against
    /// their combined quantity.
    pub fn is_affordable(&self) -> bool {
        self.gold.satisfied()
            && self.items.iter().all(CostLine::is_resolved)
            && self.item_totals().iter().all(ItemTotal::satisfied)
            && self.variable_cost_totals().iter().all(VariableStatus::satisfied)
    }

    /// Resolved item lines summed per entry, in order of first declaration.
    pub fn item_totals(&self) -> Vec<ItemTotal<'a>> {
        let mut totals: Vec<ItemTotal<'a>> = Vec::new();
        for line in &self.items {
            let CostLine::Resolved {
                kind,
                entry,
                quantity,
                held,
            } = *line
            else {
                continue;
            };
            match totals
                .iter_mut()
                .find(|total| total.kind == kind && total.entry.id == entry.id)
            {
                Some(total) => total.required = total.required.saturating_add(quantity),
                None => totals.push(ItemTotal {
                    kind,
                    entry,
                    required: quantity,
                    held,
                }),
            }
        }
        totals
    }

    /// Variable costs summed per variable, in order of first declaration.
    pub fn variable_cost_totals(&self) -> Vec<VariableStatus> {
        let mut totals: Vec<VariableStatus> = Vec::new();
        for status in &self.variable_costs {
            match totals
                .iter_mut()
                .find(|total| total.variable == status.variable)
            {
                Some(total) => total.required = total.required.saturating_add(status.required),
                None => totals.push(*status),
            }
        }
        totals
    }

    pub fn can_buy(&self) -> bool {
        self.requirements_met() && self.is_affordable()
    }

    /// Item cost lines whose ids are missing from the database.
    pub fn unresolved(&self) -> impl Iterator<Item = &CostLine<'a>> {
        self.items.iter().filter(|line| !line.is_resolved())
    }
}

/// Resolves registry records against database tables and runtime stores.
pub struct CostResolver<'a, D, R>
where
    D: DatabaseOracle + ?Sized,
    R: RuntimeOracle + ?Sized,
{
    registry: &'a CostRegistry,
    database: &'a D,
    runtime: &'a R,
}

impl<'a, D, R> CostResolver<'a, D, R>
where
    D: DatabaseOracle + ?Sized,
    R: RuntimeOracle + ?Sized,
{
    pub fn new(registry: &'a CostRegistry, database: &'a D, runtime: &'a R) -> Self {
        Self {
            registry,
            database,
            runtime,
        }
    }

    pub fn database(&self) -> &'a D {
        self.database
    }

    fn spec(&self, key: EntryKey) -> Result<&'a CostSpec, ResolveError> {
        self.registry.cost(key).ok_or(ResolveError::NotRegistered(key))
    }

    /// Stored gold cost, verbatim.
    pub fn buy_cost_gold(&self, key: EntryKey) -> Result<u32, ResolveError> {
        Ok(self.spec(key)?.gold_cost)
    }

    /// Item costs dereferenced into the weapon, armor and item tables, in
    /// declaration order.
    pub fn buy_cost_items(&self, key: EntryKey) -> Result<Vec<CostLine<'a>>, ResolveError> {
        let spec = self.spec(key)?;
        Ok(spec
            .item_cost
            .iter()
            .map(|cost| {
                let table = cost.kind.into();
                match self.database.entry(table, cost.id) {
                    Some(entry) => CostLine::Resolved {
                        kind: cost.kind,
                        entry,
                        quantity: cost.quantity,
                        held: self.runtime.item_count(table, cost.id),
                    },
                    None => CostLine::Unresolved {
                        kind: cost.kind,
                        id: cost.id,
                        quantity: cost.quantity,
                    },
                }
            })
            .collect())
    }

    pub fn variable_costs(&self, key: EntryKey) -> Result<Vec<VariableStatus>, ResolveError> {
        let spec = self.spec(key)?;
        Ok(spec
            .variable_cost
            .iter()
            .map(|cost| VariableStatus {
                variable: cost.variable,
                required: cost.quantity,
                current: self.runtime.variable(cost.variable),
            })
            .collect())
    }

    pub fn variable_requirements(
        &self,
        key: EntryKey,
    ) -> Result<Vec<VariableStatus>, ResolveError> {
        let spec = self.spec(key)?;
        Ok(spec
            .variable_requirement
            .iter()
            .map(|req| VariableStatus {
                variable: req.variable,
                required: req.threshold,
                current: self.runtime.variable(req.variable),
            })
            .collect())
    }

    pub fn switch_requirements(&self, key: EntryKey) -> Result<Vec<SwitchStatus>, ResolveError> {
        let spec = self.spec(key)?;
        Ok(spec
            .switch_requirement
            .iter()
            .map(|req| SwitchStatus {
                switch: req.switch,
                required: req.required,
                current: self.runtime.switch(req.switch),
            })
            .collect())
    }

    /// Evaluates everything at once.
    pub fn check(&self, key: EntryKey) -> Result<PurchaseCheck<'a>, ResolveError> {
        Ok(PurchaseCheck {
            key,
            gold: GoldStatus {
                required: self.buy_cost_gold(key)?,
                current: self.runtime.gold(),
            },
            items: self.buy_cost_items(key)?,
            variable_costs: self.variable_costs(key)?,
            variable_requirements: self.variable_requirements(key)?,
            switch_requirements: self.switch_requirements(key)?,
        })
    }

    pub fn requirements_met(&self, key: EntryKey) -> Result<bool, ResolveError> {
        Ok(self.check(key)?.requirements_met())
    }

    pub fn can_afford(&self, key: EntryKey) -> Result<bool, ResolveError> {
        Ok(self.check(key)?.is_affordable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShopConfig;
    use crate::database::{Database, EntryKind, MemoryStore};

    fn database() -> Database {
        let items = (1..=50).map(|id| DatabaseEntry::new(id, format!("Item {id}"), ""));
        Database::new()
            .with_table(EntryKind::Item, items)
            .with_table(EntryKind::Weapon, [DatabaseEntry::new(3, "Longsword", "")])
            .with_table(
                EntryKind::Skill,
                [
                    DatabaseEntry::new(1, "Fire", "<buy cost weapon 3: 2>\n<buy cost item 7: 1>"),
                    DatabaseEntry::new(2, "Ice", "<buy cost item 9999: 1>\n<buy cost gold: 0>"),
                    DatabaseEntry::new(
                        3,
                        "Bolt",
                        "<buy require switch 5: true>\n<buy require variable 4: 10>\n\
                         <buy cost variable 2: 3>",
                    ),
                ],
            )
    }

    #[test]
    fn items_resolve_in_declaration_order() {
        let db = database();
        let registry = CostRegistry::build(&db, ShopConfig::default());
        let store = MemoryStore::new().with_item(EntryKind::Weapon, 3, 2);
        let resolver = CostResolver::new(&registry, &db, &store);

        let lines = resolver.buy_cost_items(EntryKey::skill(1)).unwrap();
        assert_eq!(lines.len(), 2);
        match &lines[0] {
            CostLine::Resolved {
                kind,
                entry,
                quantity,
                held,
            } => {
                assert_eq!(*kind, ItemKind::Weapon);
                assert_eq!(entry.name, "Longsword");
                assert_eq!((*quantity, *held), (2, 2));
            }
            other => panic!("expected resolved weapon, got {other:?}"),
        }
        match &lines[1] {
            CostLine::Resolved { entry, quantity, .. } => {
                assert_eq!(entry.id, EntryId(7));
                assert_eq!(*quantity, 1);
            }
            other => panic!("expected resolved item, got {other:?}"),
        }
        assert!(lines[0].is_affordable());
        assert!(!lines[1].is_affordable());
    }

    #[test]
    fn missing_ids_are_reported_unresolved() {
        let db = database();
        let registry = CostRegistry::build(&db, ShopConfig::default());
        let store = MemoryStore::new().with_item(EntryKind::Item, 9999, 5);
        let resolver = CostResolver::new(&registry, &db, &store);

        let check = resolver.check(EntryKey::skill(2)).unwrap();
        assert_eq!(check.gold.required, 0);
        assert_eq!(
            check.items,
            vec![CostLine::Unresolved {
                kind: ItemKind::Item,
                id: EntryId(9999),
                quantity: 1,
            }]
        );
        assert_eq!(check.unresolved().count(), 1);
        assert!(!check.is_affordable());
    }

    #[test]
    fn requirements_follow_live_state() {
        let db = database();
        let registry = CostRegistry::build(&db, ShopConfig::default());
        let key = EntryKey::skill(3);

        let before = MemoryStore::new().with_gold(500).with_variable(4, 9);
        let resolver = CostResolver::new(&registry, &db, &before);
        assert!(!resolver.requirements_met(key).unwrap());

        let after = before
            .clone()
            .with_switch(5, true)
            .with_variable(4, 10)
            .with_variable(2, 3);
        let resolver = CostResolver::new(&registry, &db, &after);
        assert!(resolver.requirements_met(key).unwrap());
        assert!(resolver.can_afford(key).unwrap());
        assert!(resolver.check(key).unwrap().can_buy());
    }

    #[test]
    fn repeated_costs_are_checked_as_totals() {
        let db = database().with_table(
            EntryKind::Skill,
            [DatabaseEntry::new(
                4,
                "Storm",
                "<buy cost item 1: 2>\n<buy cost variable 7: 4>\n\
                 <buy cost item 1: 2>\n<buy cost variable 7: 4>",
            )],
        );
        let registry = CostRegistry::build(&db, ShopConfig::default());
        let key = EntryKey::skill(4);

        let short = MemoryStore::new()
            .with_gold(100)
            .with_item(EntryKind::Item, 1, 3)
            .with_variable(7, 5);
        let check = CostResolver::new(&registry, &db, &short).check(key).unwrap();
        assert!(check.items.iter().all(CostLine::is_affordable));
        let totals = check.item_totals();
        assert_eq!(totals.len(), 1);
        assert_eq!((totals[0].required, totals[0].held), (4, 3));
        assert_eq!(check.variable_cost_totals()[0].required, 8);
        assert!(!check.is_affordable());

        let enough = short.with_item(EntryKind::Item, 1, 4).with_variable(7, 8);
        let check = CostResolver::new(&registry, &db, &enough).check(key).unwrap();
        assert!(check.is_affordable());
    }

    #[test]
    fn unknown_entry_is_an_error() {
        let db = database();
        let registry = CostRegistry::build(&db, ShopConfig::default());
        let store = MemoryStore::new();
        let resolver = CostResolver::new(&registry, &db, &store);

        let err = resolver.buy_cost_gold(EntryKey::skill(42)).unwrap_err();
        assert_eq!(err, ResolveError::NotRegistered(EntryKey::skill(42)));
        assert_eq!(err.error_code(), "RESOLVE_NOT_REGISTERED");
        assert_eq!(resolver.buy_cost_gold(EntryKey::skill(1)).unwrap(), 100);
    }
}
