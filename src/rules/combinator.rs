//! Parser combinator engine.
//!
//! Rules live in a [`Grammar`] arena and refer to each other by [`RuleId`], so
//! recursive grammars are built with a forward-declared [`Rule::Ref`] that is
//! resolved once the target rule exists.

use crate::error::SyntaxError;
use crate::rules::grammar::Production;
use crate::rules::script::{ActionTerm, MatchTerm};
use crate::rules::unescape::unquote;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTED_RE: Regex =
        Regex::new(r#"^"(?:[^"\\]|\\.)*""#).expect("valid quoted string regex");
    static ref WHITESPACE_RE: Regex = Regex::new(r"^[ \t]+").expect("valid whitespace regex");
}

pub type RuleId = usize;

/// Position in the input being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn advance(self, n: usize) -> Self {
        Self {
            input: self.input,
            position: (self.position + n).min(self.input.len()),
        }
    }
}

/// Value produced by a successful rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    Nil,
    /// Matched text kept by a `Literal` or `Pattern`
    Lexeme(String),
    /// Unescaped content of a quoted string
    Quoted(String),
    Seq(Vec<Ast>),
    Terms(Vec<MatchTerm>),
    Action(ActionTerm),
    Actions(Vec<ActionTerm>),
    Instruction {
        matches: Vec<MatchTerm>,
        actions: Vec<ActionTerm>,
    },
}

impl Ast {
    /// Depth-first leaves of nested `Seq` nodes, skipping `Nil`
    pub fn flatten(&self) -> Vec<&Ast> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Ast>) {
        match self {
            Ast::Nil => {}
            Ast::Seq(items) => items.iter().for_each(|item| item.flatten_into(out)),
            other => out.push(other),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Rule {
    /// Exact text; yields `Lexeme` when `keep`, `Nil` otherwise
    Literal { text: String, keep: bool },
    /// Anchored regex; lexemes listed in `reserved` are rejected
    Pattern {
        regex: Regex,
        label: String,
        keep: bool,
        reserved: Vec<String>,
    },
    /// Double-quoted string with C-style escapes
    Quoted,
    /// One or more spaces or tabs; yields `Nil`
    Whitespace,
    Seq(Vec<RuleId>),
    /// First alternative that succeeds
    FirstOf(Vec<RuleId>),
    /// Exactly one alternative may succeed
    OneOf(Vec<RuleId>),
    Optional(RuleId),
    /// Repeat while the inner rule succeeds and consumes input
    ZeroOrMore(RuleId),
    /// Forward declaration, `None` until resolved
    Ref(Option<RuleId>),
    Reduce(Production, RuleId),
}

type Step<'a> = Result<(Cursor<'a>, Ast), SyntaxError>;

#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: Rule) -> RuleId {
        self.rules.push(rule);
        self.rules.len() - 1
    }

    pub fn literal(&mut self, text: &str) -> RuleId {
        self.add(Rule::Literal {
            text: text.to_string(),
            keep: false,
        })
    }

    pub fn keep_literal(&mut self, text: &str) -> RuleId {
        self.add(Rule::Literal {
            text: text.to_string(),
            keep: true,
        })
    }

    /// `regex` must be anchored with `^`
    pub fn pattern(&mut self, regex: Regex, label: &str, reserved: &[&str]) -> RuleId {
        self.add(Rule::Pattern {
            regex,
            label: label.to_string(),
            keep: true,
            reserved: reserved.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn quoted(&mut self) -> RuleId {
        self.add(Rule::Quoted)
    }

    pub fn whitespace(&mut self) -> RuleId {
        self.add(Rule::Whitespace)
    }

    pub fn seq(&mut self, items: &[RuleId]) -> RuleId {
        self.add(Rule::Seq(items.to_vec()))
    }

    pub fn first_of(&mut self, items: &[RuleId]) -> RuleId {
        self.add(Rule::FirstOf(items.to_vec()))
    }

    pub fn one_of(&mut self, items: &[RuleId]) -> RuleId {
        self.add(Rule::OneOf(items.to_vec()))
    }

    pub fn optional(&mut self, inner: RuleId) -> RuleId {
        self.add(Rule::Optional(inner))
    }

    pub fn zero_or_more(&mut self, inner: RuleId) -> RuleId {
        self.add(Rule::ZeroOrMore(inner))
    }

    pub fn reduce(&mut self, production: Production, inner: RuleId) -> RuleId {
        self.add(Rule::Reduce(production, inner))
    }

    pub fn forward_ref(&mut self) -> RuleId {
        self.add(Rule::Ref(None))
    }

    /// Point a forward reference at its target
    pub fn resolve(&mut self, reference: RuleId, target: RuleId) -> Result<(), SyntaxError> {
        match self.rules.get_mut(reference) {
            Some(Rule::Ref(slot)) => {
                *slot = Some(target);
                Ok(())
            }
            _ => Err(SyntaxError::new(
                0,
                format!("rule {} is not a forward reference", reference),
            )),
        }
    }

    /// Fail if any forward reference was never resolved
    pub fn check(&self) -> Result<(), SyntaxError> {
        match self.rules.iter().position(|r| matches!(r, Rule::Ref(None))) {
            Some(id) => Err(SyntaxError::new(0, format!("unresolved rule reference {}", id))),
            None => Ok(()),
        }
    }

    /// Parse the whole of `input` with `start`; trailing input is an error
    pub fn parse(&self, start: RuleId, input: &str) -> Result<Ast, SyntaxError> {
        let (cursor, ast) = self.run(start, Cursor::new(input))?;
        if !cursor.is_end() {
            return Err(SyntaxError::new(
                cursor.position(),
                format!("unexpected trailing input `{}`", cursor.rest()),
            ));
        }
        Ok(ast)
    }

    /// Short human-readable form of a rule, used in error messages
    pub fn describe(&self, id: RuleId) -> String {
        match self.rules.get(id) {
            Some(Rule::Literal { text, .. }) => format!("\"{}\"", text),
            Some(Rule::Pattern { label, .. }) => label.clone(),
            Some(Rule::Quoted) => "quoted string".to_string(),
            Some(Rule::Whitespace) => "whitespace".to_string(),
            Some(Rule::Seq(items)) => self.describe_all(items, " "),
            Some(Rule::FirstOf(items)) | Some(Rule::OneOf(items)) => {
                self.describe_all(items, " or ")
            }
            Some(Rule::Optional(inner)) => format!("({})?", self.describe(*inner)),
            Some(Rule::ZeroOrMore(inner)) => format!("({})*", self.describe(*inner)),
            Some(Rule::Ref(_)) => "...".to_string(),
            Some(Rule::Reduce(production, _)) => production.name().to_string(),
            None => format!("<missing rule {}>", id),
        }
    }

    fn describe_all(&self, items: &[RuleId], separator: &str) -> String {
        items
            .iter()
            .map(|id| self.describe(*id))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn run<'a>(&self, id: RuleId, cursor: Cursor<'a>) -> Step<'a> {
        let Some(rule) = self.rules.get(id) else {
            return Err(SyntaxError::new(
                cursor.position(),
                format!("missing rule {}", id),
            ));
        };

        match rule {
            Rule::Literal { text, keep } => {
                if cursor.rest().starts_with(text.as_str()) {
                    let ast = if *keep {
                        Ast::Lexeme(text.clone())
                    } else {
                        Ast::Nil
                    };
                    Ok((cursor.advance(text.len()), ast))
                } else {
                    Err(expected(cursor, &self.describe(id)))
                }
            }
            Rule::Pattern {
                regex,
                label,
                keep,
                reserved,
            } => {
                let Some(found) = regex.find(cursor.rest()).filter(|m| m.start() == 0) else {
                    return Err(expected(cursor, label));
                };
                let lexeme = found.as_str();
                if reserved.iter().any(|r| r == lexeme) {
                    return Err(SyntaxError::new(
                        cursor.position(),
                        format!("reserved keyword `{}` cannot be used as {}", lexeme, label),
                    ));
                }
                let ast = if *keep {
                    Ast::Lexeme(lexeme.to_string())
                } else {
                    Ast::Nil
                };
                Ok((cursor.advance(found.end()), ast))
            }
            Rule::Quoted => {
                let Some(found) = QUOTED_RE.find(cursor.rest()) else {
                    return Err(expected(cursor, "quoted string"));
                };
                let value = unquote(found.as_str())
                    .map_err(|message| SyntaxError::new(cursor.position(), message))?;
                Ok((cursor.advance(found.end()), Ast::Quoted(value)))
            }
            Rule::Whitespace => match WHITESPACE_RE.find(cursor.rest()) {
                Some(found) => Ok((cursor.advance(found.end()), Ast::Nil)),
                None => Err(expected(cursor, "whitespace")),
            },
            Rule::Seq(items) => {
                let mut current = cursor;
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    let (next, ast) = self.run(*item, current)?;
                    values.push(ast);
                    current = next;
                }
                Ok((current, Ast::Seq(values)))
            }
            Rule::FirstOf(items) => {
                let mut furthest: Option<SyntaxError> = None;
                for item in items {
                    match self.run(*item, cursor) {
                        Ok(step) => return Ok(step),
                        Err(err) => {
                            if furthest
                                .as_ref()
                                .map_or(true, |f| err.position > f.position)
                            {
                                furthest = Some(err);
                            }
                        }
                    }
                }
                Err(furthest
                    .filter(|f| f.position > cursor.position())
                    .unwrap_or_else(|| expected(cursor, &self.describe(id))))
            }
            Rule::OneOf(items) => {
                let successes: Vec<(RuleId, Cursor<'a>, Ast)> = items
                    .iter()
                    .filter_map(|item| {
                        self.run(*item, cursor)
                            .ok()
                            .map(|(next, ast)| (*item, next, ast))
                    })
                    .collect();
                match successes.len() {
                    0 => Err(SyntaxError::new(
                        cursor.position(),
                        format!("failed to parse any of: {}", self.describe_all(items, ", ")),
                    )),
                    1 => {
                        let (_, next, ast) = successes.into_iter().next().ok_or_else(|| {
                            SyntaxError::new(cursor.position(), "lost the only alternative")
                        })?;
                        Ok((next, ast))
                    }
                    _ => {
                        let matched: Vec<RuleId> = successes.iter().map(|(id, _, _)| *id).collect();
                        Err(SyntaxError::new(
                            cursor.position(),
                            format!("more than one match: {}", self.describe_all(&matched, ", ")),
                        ))
                    }
                }
            }
            Rule::Optional(inner) => match self.run(*inner, cursor) {
                Ok(step) => Ok(step),
                Err(_) => Ok((cursor, Ast::Nil)),
            },
            Rule::ZeroOrMore(inner) => {
                let mut current = cursor;
                let mut values = Vec::new();
                while !current.is_end() {
                    match self.run(*inner, current) {
                        Ok((next, ast)) if next.position() > current.position() => {
                            values.push(ast);
                            current = next;
                        }
                        _ => break,
                    }
                }
                Ok((current, Ast::Seq(values)))
            }
            Rule::Ref(Some(target)) => self.run(*target, cursor),
            Rule::Ref(None) => Err(SyntaxError::new(
                cursor.position(),
                format!("unresolved rule reference {}", id),
            )),
            Rule::Reduce(production, inner) => {
                let (next, ast) = self.run(*inner, cursor)?;
                let reduced = production.reduce(ast, cursor.position())?;
                Ok((next, reduced))
            }
        }
    }
}

fn expected(cursor: Cursor<'_>, what: &str) -> SyntaxError {
    SyntaxError::new(cursor.position(), format!("expected {}", what))
}
