use std::fmt;

use crate::cost::{ItemCost, SwitchRequirement, VariableCost, VariableRequirement};
use crate::database::EntryId;

/// A recognized notetag, produced by the grammar and folded by builders.
///
/// `Display` writes the canonical tag text, so a list of directives can be
/// written back into a note field and parsed again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directive {
    /// `<buy cost gold: N>`
    GoldCost(u32),

    /// `<buy cost {weapon|armor|item} ID: QTY>`
    ItemCost(ItemCost),

    /// `<buy cost variable ID: QTY>`
    VariableCost(VariableCost),

    /// `<buy require variable ID: QTY>`
    VariableRequirement(VariableRequirement),

    /// `<buy require switch ID: true|false>`
    SwitchRequirement(SwitchRequirement),

    /// `<retain on death>` on a state, skill or item.
    RetainOnDeath,

    /// `<shop skills: ID, ID, ...>` on the item that defines a shop's stock.
    ShopSkills(Vec<EntryId>),
}

impl Directive {
    /// Returns true for directives that contribute to a `CostSpec`.
    pub const fn is_cost(&self) -> bool {
        matches!(
            self,
            Self::GoldCost(_)
                | Self::ItemCost(_)
                | Self::VariableCost(_)
                | Self::VariableRequirement(_)
                | Self::SwitchRequirement(_)
        )
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoldCost(gold) => write!(f, "<buy cost gold: {gold}>"),
            Self::ItemCost(cost) => write!(
                f,
                "<buy cost {} {}: {}>",
                cost.kind, cost.id.0, cost.quantity
            ),
            Self::VariableCost(cost) => write!(
                f,
                "<buy cost variable {}: {}>",
                cost.variable, cost.quantity
            ),
            Self::VariableRequirement(req) => write!(
                f,
                "<buy require variable {}: {}>",
                req.variable, req.threshold
            ),
            Self::SwitchRequirement(req) => write!(
                f,
                "<buy require switch {}: {}>",
                req.switch, req.required
            ),
            Self::RetainOnDeath => f.write_str("<retain on death>"),
            Self::ShopSkills(skills) => {
                f.write_str("<shop skills: ")?;
                for (i, skill) in skills.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", skill.0)?;
                }
                f.write_str(">")
            }
        }
    }
}
