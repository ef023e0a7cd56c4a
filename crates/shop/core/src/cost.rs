//! Buy-cost records and the builder that folds directives into them.
//!
//! # Lifecycle
//!
//! A [`CostSpec`] is built once per database entry at load time from the
//! entry's note field and the shop configuration. It is not mutated afterwards;
//! reprocessing a note replaces the whole record.
//!
//! # Folding rules
//!
//! - Gold is a scalar: the last `<buy cost gold: N>` wins.
//! - Every list keeps declaration order and keeps duplicates.

use crate::config::ShopConfig;
use crate::database::{EntryId, EntryKind};
use crate::notetag::{self, Directive};

/// Inventory table an item cost draws from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemKind {
    Item,
    Weapon,
    Armor,
}

impl From<ItemKind> for EntryKind {
    fn from(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Item => EntryKind::Item,
            ItemKind::Weapon => EntryKind::Weapon,
            ItemKind::Armor => EntryKind::Armor,
        }
    }
}

/// `<buy cost {weapon|armor|item} ID: QTY>`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCost {
    pub kind: ItemKind,
    pub id: EntryId,
    pub quantity: u32,
}

impl ItemCost {
    pub const fn new(kind: ItemKind, id: u32, quantity: u32) -> Self {
        Self {
            kind,
            id: EntryId(id),
            quantity,
        }
    }
}

/// `<buy cost variable ID: QTY>`: QTY is subtracted from the variable on purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableCost {
    pub variable: u32,
    pub quantity: u32,
}

impl VariableCost {
    pub const fn new(variable: u32, quantity: u32) -> Self {
        Self { variable, quantity }
    }
}

/// `<buy require variable ID: QTY>`: the variable must be at least QTY. Not consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableRequirement {
    pub variable: u32,
    pub threshold: u32,
}

impl VariableRequirement {
    pub const fn new(variable: u32, threshold: u32) -> Self {
        Self {
            variable,
            threshold,
        }
    }
}

/// `<buy require switch ID: true|false>`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchRequirement {
    pub switch: u32,
    pub required: bool,
}

impl SwitchRequirement {
    pub const fn new(switch: u32, required: bool) -> Self {
        Self { switch, required }
    }
}

/// Structured cost and requirement record of one purchasable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostSpec {
    pub gold_cost: u32,
    pub item_cost: Vec<ItemCost>,
    pub variable_cost: Vec<VariableCost>,
    pub variable_requirement: Vec<VariableRequirement>,
    pub switch_requirement: Vec<SwitchRequirement>,
}

impl CostSpec {
    /// Empty record charging only the given gold price.
    pub fn with_default_price(default_price: u32) -> Self {
        Self {
            gold_cost: default_price,
            item_cost: Vec::new(),
            variable_cost: Vec::new(),
            variable_requirement: Vec::new(),
            switch_requirement: Vec::new(),
        }
    }

    /// Builds a record from a note field. Never fails; unrecognized text is skipped.
    pub fn from_note(note: &str, config: &ShopConfig) -> Self {
        let mut builder = CostSpecBuilder::new(config);
        for directive in notetag::parse_note(note) {
            builder.apply(&directive);
        }
        builder.build()
    }

    /// Directives that reproduce this record when parsed with any configuration.
    ///
    /// Gold is always emitted so the record does not depend on the default price.
    pub fn directives(&self) -> Vec<Directive> {
        let mut directives = Vec::with_capacity(
            1 + self.item_cost.len()
                + self.variable_cost.len()
                + self.variable_requirement.len()
                + self.switch_requirement.len(),
        );
        directives.push(Directive::GoldCost(self.gold_cost));
        directives.extend(self.item_cost.iter().copied().map(Directive::ItemCost));
        directives.extend(self.variable_cost.iter().copied().map(Directive::VariableCost));
        directives.extend(
            self.variable_requirement
                .iter()
                .copied()
                .map(Directive::VariableRequirement),
        );
        directives.extend(
            self.switch_requirement
                .iter()
                .copied()
                .map(Directive::SwitchRequirement),
        );
        directives
    }

    /// Canonical note text, one tag per line.
    pub fn to_notetags(&self) -> String {
        self.directives()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns true when the entry has any switch or variable gate.
    pub fn has_requirements(&self) -> bool {
        !self.variable_requirement.is_empty() || !self.switch_requirement.is_empty()
    }
}

impl Default for CostSpec {
    fn default() -> Self {
        Self::with_default_price(ShopConfig::DEFAULT_PRICE)
    }
}

/// Folds directives into a [`CostSpec`].
#[derive(Clone, Debug)]
pub struct CostSpecBuilder {
    spec: CostSpec,
}

impl CostSpecBuilder {
    pub fn new(config: &ShopConfig) -> Self {
        Self {
            spec: CostSpec::with_default_price(config.default_price),
        }
    }

    /// Applies one directive. Non-cost directives are ignored.
    pub fn apply(&mut self, directive: &Directive) -> &mut Self {
        match directive {
            Directive::GoldCost(gold) => self.spec.gold_cost = *gold,
            Directive::ItemCost(cost) => self.spec.item_cost.push(*cost),
            Directive::VariableCost(cost) => self.spec.variable_cost.push(*cost),
            Directive::VariableRequirement(req) => self.spec.variable_requirement.push(*req),
            Directive::SwitchRequirement(req) => self.spec.switch_requirement.push(*req),
            Directive::RetainOnDeath | Directive::ShopSkills(_) => {}
        }
        self
    }

    pub fn build(self) -> CostSpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ShopConfig {
        ShopConfig::new().with_default_price(120)
    }

    #[test]
    fn no_tags_yields_default_price_and_empty_lists() {
        let spec = CostSpec::from_note("Just a description.\nNothing else.", &config());
        assert_eq!(spec, CostSpec::with_default_price(120));
        assert!(spec.item_cost.is_empty());
        assert!(!spec.has_requirements());
    }

    #[test]
    fn gold_tag_among_unrelated_text() {
        let note = "Learn fire.\n<buy cost gold: 250>\nAuthor: someone";
        assert_eq!(CostSpec::from_note(note, &config()).gold_cost, 250);
    }

    #[test]
    fn item_costs_keep_declaration_order() {
        let note = "<buy cost weapon 3: 2>\n<buy cost item 7: 1>";
        let spec = CostSpec::from_note(note, &config());
        assert_eq!(
            spec.item_cost,
            vec![
                ItemCost::new(ItemKind::Weapon, 3, 2),
                ItemCost::new(ItemKind::Item, 7, 1),
            ]
        );
    }

    #[test]
    fn last_gold_tag_wins_and_duplicates_are_kept() {
        let note = "<buy cost gold: 100>\n<buy cost item 1: 1>\n<buy cost gold: 300>\n<buy cost item 1: 1>";
        let spec = CostSpec::from_note(note, &config());
        assert_eq!(spec.gold_cost, 300);
        assert_eq!(spec.item_cost.len(), 2);
        assert_eq!(CostSpec::from_note(note, &config()), spec);
    }

    #[test]
    fn requirements_are_collected() {
        let note = "<buy require switch 5: TRUE>\n<buy require variable 4: 10>\n<buy cost variable 2: 3>";
        let spec = CostSpec::from_note(note, &config());
        assert_eq!(spec.switch_requirement, vec![SwitchRequirement::new(5, true)]);
        assert_eq!(spec.variable_requirement, vec![VariableRequirement::new(4, 10)]);
        assert_eq!(spec.variable_cost, vec![VariableCost::new(2, 3)]);
        assert!(spec.has_requirements());
    }

    #[test]
    fn notetags_reparse_to_the_same_spec() {
        let note = "<buy require switch 1: false>\n<buy cost armor 2: 1>\n<buy cost gold: 40>\n\
                    <buy cost variable 8: 2>\n<buy require variable 3: 7>\n<buy cost armor 2: 1>";
        let spec = CostSpec::from_note(note, &config());
        let text = spec.to_notetags();
        let other_config = ShopConfig::new().with_default_price(9);
        assert_eq!(CostSpec::from_note(&text, &other_config), spec);
    }

    #[test]
    fn non_cost_directives_leave_spec_untouched() {
        let mut builder = CostSpecBuilder::new(&config());
        builder
            .apply(&Directive::RetainOnDeath)
            .apply(&Directive::ShopSkills(vec![EntryId(1)]));
        assert_eq!(builder.build(), CostSpec::with_default_price(120));
    }
}
