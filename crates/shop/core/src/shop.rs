//! Skill shop: the `OpenSkillShop` plugin command, shop stock and purchases.
//!
//! The host owns the shop scene and its windows. This module decides what the
//! scene lists, whether each listing can be bought, and what a purchase takes
//! out of the runtime stores.

use std::str::FromStr;

use crate::cost::{ItemCost, VariableCost};
use crate::database::{
    ActorId, DatabaseEntry, DatabaseOracle, EntryId, EntryKey, EntryKind, RuntimeOracle,
    RuntimeStore,
};
use crate::error::{ErrorSeverity, ShopError};
use crate::registry::CostRegistry;
use crate::resolve::{CostLine, CostResolver, PurchaseCheck, ResolveError};

// ============================================================================
// Plugin command
// ============================================================================

/// Errors produced while parsing a plugin command line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty plugin command")]
    Empty,

    /// Not a command this plugin handles; the host should try other plugins.
    #[error("unknown plugin command '{0}'")]
    Unknown(String),

    #[error("plugin command '{0}' is missing its argument")]
    MissingArgument(&'static str),

    #[error("plugin command '{command}' expects an item id, got '{argument}'")]
    InvalidArgument {
        command: &'static str,
        argument: String,
    },
}

impl ShopError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "COMMAND_EMPTY",
            Self::Unknown(_) => "COMMAND_UNKNOWN",
            Self::MissingArgument(_) => "COMMAND_MISSING_ARGUMENT",
            Self::InvalidArgument { .. } => "COMMAND_INVALID_ARGUMENT",
        }
    }
}

/// Plugin commands recognized from event scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PluginCommand {
    /// `OpenSkillShop X`: open the shop whose stock is listed on item X.
    OpenSkillShop { item: EntryId },
}

impl PluginCommand {
    pub const OPEN_SKILL_SHOP: &'static str = "OpenSkillShop";

    /// Parses a command name and its arguments as the host splits them.
    pub fn from_parts(command: &str, args: &[&str]) -> Result<Self, CommandError> {
        match command {
            "" => Err(CommandError::Empty),
            Self::OPEN_SKILL_SHOP => {
                let argument = args
                    .first()
                    .ok_or(CommandError::MissingArgument(Self::OPEN_SKILL_SHOP))?;
                let item = argument
                    .parse::<u32>()
                    .map_err(|_| CommandError::InvalidArgument {
                        command: Self::OPEN_SKILL_SHOP,
                        argument: (*argument).to_string(),
                    })?;
                Ok(Self::OpenSkillShop {
                    item: EntryId(item),
                })
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

impl FromStr for PluginCommand {
    type Err = CommandError;

    /// Parses a whole command line, e.g. `OpenSkillShop 12`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        Self::from_parts(command, &args)
    }
}

// ============================================================================
// Shop stock
// ============================================================================

/// Errors produced while opening a shop.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OpenShopError {
    #[error("shop item {0} does not exist")]
    ItemNotFound(EntryId),
}

impl ShopError for OpenShopError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "SHOP_ITEM_NOT_FOUND",
        }
    }
}

/// The stock of one skill shop, as declared on its item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillShop {
    /// Item whose note declared the stock.
    pub source: EntryId,
    /// Skills offered, in declaration order.
    pub skills: Vec<EntryId>,
    /// Declared ids with no skill in the database.
    pub missing: Vec<EntryId>,
    /// Heading for the cost list.
    pub requirements_text: String,
}

/// A skill offered by a shop, with its evaluated costs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing<'a> {
    pub skill: &'a DatabaseEntry,
    pub check: PurchaseCheck<'a>,
}

impl SkillShop {
    /// Runs a plugin command against the loaded registry and database.
    pub fn from_command<D>(
        command: PluginCommand,
        registry: &CostRegistry,
        database: &D,
    ) -> Result<Self, OpenShopError>
    where
        D: DatabaseOracle + ?Sized,
    {
        match command {
            PluginCommand::OpenSkillShop { item } => Self::open(item, registry, database),
        }
    }

    pub fn open<D>(
        item: EntryId,
        registry: &CostRegistry,
        database: &D,
    ) -> Result<Self, OpenShopError>
    where
        D: DatabaseOracle + ?Sized,
    {
        if database.entry(EntryKind::Item, item).is_none() {
            return Err(OpenShopError::ItemNotFound(item));
        }

        let declared = registry.shop_skills(item).unwrap_or_default();
        let (skills, missing): (Vec<EntryId>, Vec<EntryId>) = declared
            .iter()
            .copied()
            .partition(|&skill| database.entry(EntryKind::Skill, skill).is_some());

        Ok(Self {
            source: item,
            skills,
            missing,
            requirements_text: registry.config().requirements_text.clone(),
        })
    }

    /// Evaluates every offered skill against the current game state.
    pub fn listings<'a, D, R>(&self, resolver: &CostResolver<'a, D, R>) -> Vec<Listing<'a>>
    where
        D: DatabaseOracle + ?Sized,
        R: RuntimeOracle + ?Sized,
    {
        self.skills
            .iter()
            .filter_map(|&skill| {
                let entry = resolver.database().entry(EntryKind::Skill, skill)?;
                let check = resolver.check(EntryKey::new(EntryKind::Skill, skill)).ok()?;
                Some(Listing {
                    skill: entry,
                    check,
                })
            })
            .collect()
    }
}

// ============================================================================
// Purchase
// ============================================================================

/// Reasons a purchase is refused. Nothing is deducted when any of these occur.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("skill {0} does not exist")]
    UnknownSkill(EntryId),

    #[error("actor {actor:?} already knows skill {skill}")]
    AlreadyKnown { actor: ActorId, skill: EntryId },

    #[error("cost refers to missing {kind} {id}")]
    UnresolvedCost { kind: EntryKind, id: EntryId },

    #[error("switch or variable requirement not met for {0}")]
    RequirementUnmet(EntryKey),

    #[error("not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u32, available: u32 },

    #[error("not enough {kind} {id}: need {required}, have {available}")]
    InsufficientItem {
        kind: EntryKind,
        id: EntryId,
        required: u32,
        available: u32,
    },

    #[error("variable {variable} too low: need {required}, have {available}")]
    InsufficientVariable {
        variable: u32,
        required: u32,
        available: i64,
    },
}

impl ShopError for PurchaseError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Resolve(err) => err.severity(),
            Self::UnresolvedCost { .. } => ErrorSeverity::Internal,
            Self::UnknownSkill(_) | Self::AlreadyKnown { .. } => ErrorSeverity::Validation,
            Self::RequirementUnmet(_)
            | Self::InsufficientGold { .. }
            | Self::InsufficientItem { .. }
            | Self::InsufficientVariable { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Resolve(err) => err.error_code(),
            Self::UnknownSkill(_) => "PURCHASE_UNKNOWN_SKILL",
            Self::AlreadyKnown { .. } => "PURCHASE_ALREADY_KNOWN",
            Self::UnresolvedCost { .. } => "PURCHASE_UNRESOLVED_COST",
            Self::RequirementUnmet(_) => "PURCHASE_REQUIREMENT_UNMET",
            Self::InsufficientGold { .. } => "PURCHASE_INSUFFICIENT_GOLD",
            Self::InsufficientItem { .. } => "PURCHASE_INSUFFICIENT_ITEM",
            Self::InsufficientVariable { .. } => "PURCHASE_INSUFFICIENT_VARIABLE",
        }
    }
}

/// What a committed purchase took from the runtime stores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub actor: ActorId,
    pub skill: EntryId,
    pub gold: u32,
    pub items: Vec<ItemCost>,
    pub variables: Vec<VariableCost>,
}

impl Receipt {
    /// Validates a check and extracts the deductions. Errors name the first
    /// failing line in the order: requirements, unresolved items, gold, items,
    /// variables. Repeated item and variable costs are validated as totals.
    fn from_check(
        actor: ActorId,
        skill: EntryId,
        check: &PurchaseCheck<'_>,
    ) -> Result<Self, PurchaseError> {
        if !check.requirements_met() {
            return Err(PurchaseError::RequirementUnmet(check.key));
        }

        let mut items = Vec::with_capacity(check.items.len());
        for line in &check.items {
            match *line {
                CostLine::Unresolved { kind, id, .. } => {
                    return Err(PurchaseError::UnresolvedCost {
                        kind: kind.into(),
                        id,
                    });
                }
                CostLine::Resolved {
                    kind,
                    entry,
                    quantity,
                    ..
                } => items.push(ItemCost {
                    kind,
                    id: entry.id,
                    quantity,
                }),
            }
        }

        if !check.gold.satisfied() {
            return Err(PurchaseError::InsufficientGold {
                required: check.gold.required,
                available: check.gold.current,
            });
        }

        if let Some(total) = check
            .item_totals()
            .into_iter()
            .find(|total| !total.satisfied())
        {
            return Err(PurchaseError::InsufficientItem {
                kind: total.kind.into(),
                id: total.entry.id,
                required: total.required,
                available: total.held,
            });
        }

        if let Some(status) = check
            .variable_cost_totals()
            .into_iter()
            .find(|status| !status.satisfied())
        {
            return Err(PurchaseError::InsufficientVariable {
                variable: status.variable,
                required: status.required,
                available: status.current,
            });
        }

        Ok(Self {
            actor,
            skill,
            gold: check.gold.required,
            items,
            variables: check
                .variable_costs
                .iter()
                .map(|status| VariableCost::new(status.variable, status.required))
                .collect(),
        })
    }
}

/// Buys a skill for an actor: validates everything first, then deducts gold,
/// items and variable costs and teaches the skill.
pub fn purchase<D, S>(
    registry: &CostRegistry,
    database: &D,
    store: &mut S,
    actor: ActorId,
    skill: EntryId,
) -> Result<Receipt, PurchaseError>
where
    D: DatabaseOracle + ?Sized,
    S: RuntimeStore + ?Sized,
{
    if database.entry(EntryKind::Skill, skill).is_none() {
        return Err(PurchaseError::UnknownSkill(skill));
    }
    if store.knows_skill(actor, skill) {
        return Err(PurchaseError::AlreadyKnown { actor, skill });
    }

    let receipt = {
        let resolver = CostResolver::new(registry, database, &*store);
        let check = resolver.check(EntryKey::new(EntryKind::Skill, skill))?;
        Receipt::from_check(actor, skill, &check)?
    };

    store.lose_gold(receipt.gold);
    for cost in &receipt.items {
        store.lose_item(cost.kind.into(), cost.id, cost.quantity);
    }
    for cost in &receipt.variables {
        let current = store.variable(cost.variable);
        store.set_variable(cost.variable, current.saturating_sub(i64::from(cost.quantity)));
    }
    store.learn_skill(actor, skill);

    Ok(receipt)
}
