//! Static rule table for notetag directives.
//!
//! Each rule is a sequence of slots matched against the whole token list of a
//! tag. Literal words compare case-insensitively; value slots capture. Adding a
//! directive means adding a rule and a `Directive` variant; builders and
//! resolvers are untouched.

use crate::cost::{ItemCost, ItemKind, SwitchRequirement, VariableCost, VariableRequirement};
use crate::database::EntryId;

use super::directive::Directive;
use super::token::Token;

/// One position in a rule's token shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    /// Literal keyword.
    Word(&'static str),
    Colon,
    /// Captures an unsigned integer.
    Number,
    /// Captures `weapon`, `armor` or `item`.
    ItemKind,
    /// Captures `true` or `false`.
    Flag,
    /// Captures `N` or `N, N, ...`.
    NumberList,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Capture {
    Number(u32),
    ItemKind(ItemKind),
    Flag(bool),
    NumberList(Vec<u32>),
}

/// A named directive shape and the constructor applied to its captures.
pub struct Rule {
    pub name: &'static str,
    slots: &'static [Slot],
    build: fn(&[Capture]) -> Option<Directive>,
}

impl Rule {
    /// Matches the rule against a complete tag body.
    pub fn matches(&self, tokens: &[Token<'_>]) -> Option<Directive> {
        let mut captures = Vec::with_capacity(3);
        let mut rest = tokens;
        for slot in self.slots {
            rest = slot.take(rest, &mut captures)?;
        }
        if !rest.is_empty() {
            return None;
        }
        (self.build)(&captures)
    }
}

impl core::fmt::Debug for Rule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("slots", &self.slots)
            .finish()
    }
}

impl Slot {
    fn take<'t, 'a>(
        &self,
        tokens: &'t [Token<'a>],
        captures: &mut Vec<Capture>,
    ) -> Option<&'t [Token<'a>]> {
        let (first, rest) = tokens.split_first()?;
        match (self, first) {
            (Slot::Word(keyword), token) if token.is_word(keyword) => Some(rest),
            (Slot::Colon, Token::Colon) => Some(rest),
            (Slot::Number, Token::Number(value)) => {
                captures.push(Capture::Number(*value));
                Some(rest)
            }
            (Slot::ItemKind, Token::Word(word)) => {
                let kind = word.parse::<ItemKind>().ok()?;
                captures.push(Capture::ItemKind(kind));
                Some(rest)
            }
            (Slot::Flag, Token::Word(word)) => {
                let flag = if word.eq_ignore_ascii_case("true") {
                    true
                } else if word.eq_ignore_ascii_case("false") {
                    false
                } else {
                    return None;
                };
                captures.push(Capture::Flag(flag));
                Some(rest)
            }
            (Slot::NumberList, Token::Number(value)) => {
                let mut values = vec![*value];
                let mut rest = rest;
                while let [Token::Comma, Token::Number(value), tail @ ..] = rest {
                    values.push(*value);
                    rest = tail;
                }
                captures.push(Capture::NumberList(values));
                Some(rest)
            }
            _ => None,
        }
    }
}

use Slot::{Colon, Flag, Number, NumberList, Word};

/// Every recognized directive, in the order they are tried.
///
/// Shapes are disjoint, so at most one rule matches a given tag.
pub static RULES: &[Rule] = &[
    Rule {
        name: "gold cost",
        slots: &[Word("buy"), Word("cost"), Word("gold"), Colon, Number],
        build: |captures| match captures {
            [Capture::Number(gold)] => Some(Directive::GoldCost(*gold)),
            _ => None,
        },
    },
    Rule {
        name: "item cost",
        slots: &[Word("buy"), Word("cost"), Slot::ItemKind, Number, Colon, Number],
        build: |captures| match captures {
            [Capture::ItemKind(kind), Capture::Number(id), Capture::Number(quantity)] => {
                Some(Directive::ItemCost(ItemCost::new(*kind, *id, *quantity)))
            }
            _ => None,
        },
    },
    Rule {
        name: "variable cost",
        slots: &[Word("buy"), Word("cost"), Word("variable"), Number, Colon, Number],
        build: |captures| match captures {
            [Capture::Number(variable), Capture::Number(quantity)] => {
                Some(Directive::VariableCost(VariableCost::new(*variable, *quantity)))
            }
            _ => None,
        },
    },
    Rule {
        name: "variable requirement",
        slots: &[Word("buy"), Word("require"), Word("variable"), Number, Colon, Number],
        build: |captures| match captures {
            [Capture::Number(variable), Capture::Number(threshold)] => Some(
                Directive::VariableRequirement(VariableRequirement::new(*variable, *threshold)),
            ),
            _ => None,
        },
    },
    Rule {
        name: "switch requirement",
        slots: &[Word("buy"), Word("require"), Word("switch"), Number, Colon, Flag],
        build: |captures| match captures {
            [Capture::Number(switch), Capture::Flag(required)] => Some(
                Directive::SwitchRequirement(SwitchRequirement::new(*switch, *required)),
            ),
            _ => None,
        },
    },
    Rule {
        name: "retain on death",
        slots: &[Word("retain"), Word("on"), Word("death")],
        build: |_| Some(Directive::RetainOnDeath),
    },
    Rule {
        name: "shop skills",
        slots: &[Word("shop"), Word("skills"), Colon, NumberList],
        build: |captures| match captures {
            [Capture::NumberList(ids)] => Some(Directive::ShopSkills(
                ids.iter().copied().map(EntryId).collect(),
            )),
            _ => None,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notetag::token::tokenize;

    fn first_match(body: &str) -> Option<(&'static str, Directive)> {
        let tokens = tokenize(body)?;
        RULES
            .iter()
            .find_map(|rule| rule.matches(&tokens).map(|d| (rule.name, d)))
    }

    #[test]
    fn rule_shapes_are_disjoint() {
        let bodies = [
            "buy cost gold: 1",
            "buy cost item 1: 1",
            "buy cost variable 1: 1",
            "buy require variable 1: 1",
            "buy require switch 1: true",
            "retain on death",
            "shop skills: 1, 2",
        ];
        for body in bodies {
            let tokens = tokenize(body).unwrap();
            let matching = RULES.iter().filter(|r| r.matches(&tokens).is_some()).count();
            assert_eq!(matching, 1, "{body} matched {matching} rules");
        }
    }

    #[test]
    fn variable_is_not_an_item_kind() {
        let (name, _) = first_match("buy cost variable 3: 4").unwrap();
        assert_eq!(name, "variable cost");
    }

    #[test]
    fn trailing_tokens_reject_the_rule() {
        assert!(first_match("buy cost gold: 5 extra").is_none());
        assert!(first_match("shop skills: 1, 2,").is_none());
        assert!(first_match("buy require switch 1: maybe").is_none());
    }

    #[test]
    fn shop_skill_list_captures_every_id() {
        let (_, directive) = first_match("shop skills: 4, 9 ,12").unwrap();
        assert_eq!(
            directive,
            Directive::ShopSkills(vec![EntryId(4), EntryId(9), EntryId(12)])
        );
    }
}
