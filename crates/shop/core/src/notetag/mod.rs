//! Notetag grammar.
//!
//! Note fields are free text. Each line is scanned for `<...>` tags, every tag
//! is tokenized and tried against the [`RULES`] table, and recognized tags
//! become [`Directive`] values. Unrecognized tags and plain text are skipped
//! without diagnostics: authors mix directives with their own notes.
//!
//! A line may hold several tags and every one of them is parsed, so a line is
//! never consumed by the first directive found on it.
mod directive;
mod grammar;
mod token;

pub use directive::Directive;
pub use grammar::{RULES, Rule};
pub use token::{Tags, Token, tags, tokenize};

/// Parses a single tag body (the text between `<` and `>`).
pub fn parse_tag(body: &str) -> Option<Directive> {
    let tokens = tokenize(body)?;
    RULES.iter().find_map(|rule| rule.matches(&tokens))
}

/// Parses every directive on one line, in order of appearance.
pub fn parse_line(line: &str) -> impl Iterator<Item = Directive> + '_ {
    tags(line).filter_map(parse_tag)
}

/// Splits a note field on line breaks (`\r`, `\n` or both), skipping blank lines.
pub fn lines(note: &str) -> impl Iterator<Item = &str> {
    note.split(['\r', '\n']).filter(|line| !line.trim().is_empty())
}

/// Parses every directive in a note field, in declaration order.
pub fn parse_note(note: &str) -> Vec<Directive> {
    lines(note).flat_map(parse_line).collect()
}
