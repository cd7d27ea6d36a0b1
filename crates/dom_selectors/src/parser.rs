//! Selector text parsing.

use crate::{Combinator, ComplexSelector, CompoundSelector, SelectorList, SimpleSelector};
use core::mem::take;

/// Tokens produced while walking a selector string.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    /// An explicit combinator (`>`, `+`, `~`).
    Combinator(Combinator),
    /// Whitespace that implies a descendant combinator.
    DescendantWs,
    /// A simple selector.
    Simple(SimpleSelector),
}

/// Cursor-based tokenizer over a selector string.
struct Tokenizer<'input> {
    input: &'input [u8],
    index: usize,
}

impl<'input> Tokenizer<'input> {
    fn new(input: &'input str) -> Self {
        Self {
            input: input.as_bytes(),
            index: 0,
        }
    }

    fn next(&mut self) -> Option<Tok> {
        // Interior whitespace implies a descendant combinator; leading and
        // trailing whitespace does not.
        let before = self.index;
        if self.skip_spaces() && before > 0 && self.index < self.input.len() {
            return Some(Tok::DescendantWs);
        }
        let current = *self.input.get(self.index)?;
        match current {
            b'*' => {
                self.index += 1;
                Some(Tok::Simple(SimpleSelector::Universal))
            }
            b'.' => {
                self.index += 1;
                Some(Tok::Simple(SimpleSelector::Class(self.consume_ident(false))))
            }
            b'#' => {
                self.index += 1;
                Some(Tok::Simple(SimpleSelector::Id(self.consume_ident(false))))
            }
            b'[' => Some(self.consume_attribute()),
            b'>' => {
                self.index += 1;
                Some(Tok::Combinator(Combinator::Child))
            }
            b'+' => {
                self.index += 1;
                Some(Tok::Combinator(Combinator::AdjacentSibling))
            }
            b'~' => {
                self.index += 1;
                Some(Tok::Combinator(Combinator::GeneralSibling))
            }
            _ => {
                let ident = self.consume_ident(true);
                if ident.is_empty() {
                    // Unsupported byte (e.g. pseudo-class syntax): skip it.
                    self.index += 1;
                    return self.next();
                }
                Some(Tok::Simple(SimpleSelector::Type(ident)))
            }
        }
    }

    /// Consume an identifier of ASCII alphanumerics, `-` and `_`.
    /// Type selectors are lowercased; class and id tokens keep their case.
    fn consume_ident(&mut self, lowercase: bool) -> String {
        let start = self.index;
        while self
            .input
            .get(self.index)
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || *byte == b'-' || *byte == b'_')
        {
            self.index += 1;
        }
        let slice = self.input.get(start..self.index).unwrap_or(&[]);
        let ident = String::from_utf8_lossy(slice).into_owned();
        if lowercase {
            ident.to_ascii_lowercase()
        } else {
            ident
        }
    }

    /// Consume `[name]` or `[name=value]`, with quoted or bare values.
    fn consume_attribute(&mut self) -> Tok {
        // skip '['
        self.index += 1;
        self.skip_spaces();
        let name = self.consume_ident(true);
        self.skip_spaces();
        let value = if self.input.get(self.index) == Some(&b'=') {
            self.index += 1;
            self.skip_spaces();
            Some(match self.input.get(self.index) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    self.index += 1;
                    self.consume_until(quote)
                }
                _ => self.consume_bare_value(),
            })
        } else {
            None
        };
        self.skip_spaces();
        if self.input.get(self.index) == Some(&b']') {
            self.index += 1;
        }
        Tok::Simple(SimpleSelector::Attribute { name, value })
    }

    /// Consume until the closing quote byte, which is itself skipped.
    fn consume_until(&mut self, quote: u8) -> String {
        let start = self.index;
        while self
            .input
            .get(self.index)
            .is_some_and(|byte| *byte != quote)
        {
            self.index += 1;
        }
        let slice = self.input.get(start..self.index).unwrap_or(&[]);
        if self.index < self.input.len() {
            self.index += 1;
        }
        String::from_utf8_lossy(slice).into_owned()
    }

    /// Consume an unquoted attribute value up to whitespace or `]`.
    fn consume_bare_value(&mut self) -> String {
        let start = self.index;
        while self
            .input
            .get(self.index)
            .is_some_and(|byte| !byte.is_ascii_whitespace() && *byte != b']')
        {
            self.index += 1;
        }
        let slice = self.input.get(start..self.index).unwrap_or(&[]);
        String::from_utf8_lossy(slice).into_owned()
    }

    /// Skip ASCII whitespace, reporting whether any was consumed.
    fn skip_spaces(&mut self) -> bool {
        let start = self.index;
        while self
            .input
            .get(self.index)
            .is_some_and(u8::is_ascii_whitespace)
        {
            self.index += 1;
        }
        self.index > start
    }
}

/// Parse a comma-separated selector list. Empty parts are dropped.
pub fn parse_selector_list(input: &str) -> SelectorList {
    let mut list = SelectorList::default();
    for part in input.split(',') {
        let sel = parse_complex_selector(part.trim());
        if !sel.first.is_empty() || !sel.rest.is_empty() {
            list.selectors.push(sel);
        }
    }
    list
}

/// Parse one complex selector. The parser is permissive: malformed input
/// yields the longest sensible prefix rather than an error.
pub fn parse_complex_selector(input: &str) -> ComplexSelector {
    // `lead` is the combinator that connects the compound currently being
    // built to the chain committed so far; the first compound has none.
    fn commit(
        current: &mut CompoundSelector,
        lead: Option<Combinator>,
        first: &mut Option<CompoundSelector>,
        rest: &mut Vec<(Combinator, CompoundSelector)>,
    ) {
        if first.is_none() {
            *first = Some(take(current));
        } else {
            rest.push((lead.unwrap_or(Combinator::Descendant), take(current)));
        }
    }

    let mut tokens = Tokenizer::new(input);
    let mut current = CompoundSelector::default();
    let mut first: Option<CompoundSelector> = None;
    let mut rest: Vec<(Combinator, CompoundSelector)> = Vec::new();
    let mut lead: Option<Combinator> = None;

    while let Some(token) = tokens.next() {
        match token {
            Tok::Combinator(comb) => {
                if !current.is_empty() {
                    commit(&mut current, lead, &mut first, &mut rest);
                }
                // An explicit combinator overrides surrounding whitespace.
                lead = Some(comb);
            }
            Tok::DescendantWs => {
                if !current.is_empty() {
                    commit(&mut current, lead, &mut first, &mut rest);
                    lead = Some(Combinator::Descendant);
                }
            }
            Tok::Simple(simple) => {
                current.simples.push(simple);
            }
        }
    }
    if !current.is_empty() {
        commit(&mut current, lead, &mut first, &mut rest);
    }

    ComplexSelector {
        first: first.unwrap_or_default(),
        rest,
    }
}
