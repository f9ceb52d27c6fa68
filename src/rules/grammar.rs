//! Grammar of the keep/move rule language
//!
//! ```text
//! instruction := ["if" ws] condition ws "then" ws actions
//! condition   := match (ws "and" ws condition)?
//! match       := (quoted-string | "other") (ws "as" ws identifier)?
//! actions     := action (ws "and" ws action)*
//! action      := ("keep" | "move") (ws identifier)?
//! ```

use crate::error::SyntaxError;
use crate::manifest::Operation;
use crate::rules::combinator::{Ast, Grammar, RuleId};
use crate::rules::script::{ActionTerm, MatchTerm, Pattern};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IDENTIFIER_RE: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*").expect("valid identifier regex");
}

/// Words that end an alias position and therefore cannot be aliases
pub const KEYWORDS: &[&str] = &["if", "as", "and", "then"];

/// Reductions applied to the raw output of a grammar rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    /// One condition term with its optional alias
    Match,
    /// A term joined to the rest of the condition with `and`
    Recur,
    Action,
    Actions,
    Instruction,
}

impl Production {
    pub fn name(self) -> &'static str {
        match self {
            Production::Match => "match",
            Production::Recur => "condition",
            Production::Action => "action",
            Production::Actions => "actions",
            Production::Instruction => "instruction",
        }
    }

    pub fn reduce(self, ast: Ast, position: usize) -> Result<Ast, SyntaxError> {
        let malformed = || SyntaxError::new(position, format!("malformed {}", self.name()));
        let parts = ast.flatten();

        match self {
            Production::Match => {
                let pattern = match parts.first() {
                    Some(Ast::Quoted(text)) => Pattern::Literal(text.clone()),
                    Some(Ast::Lexeme(word)) if word == "other" => Pattern::Other,
                    _ => return Err(malformed()),
                };
                let alias = lexeme_at(&parts, 1);
                Ok(Ast::Terms(vec![MatchTerm { pattern, alias }]))
            }
            Production::Recur => {
                let mut terms = Vec::new();
                for part in parts {
                    match part {
                        Ast::Terms(more) => terms.extend(more.iter().cloned()),
                        _ => return Err(malformed()),
                    }
                }
                Ok(Ast::Terms(terms))
            }
            Production::Action => {
                let operation = lexeme_at(&parts, 0)
                    .and_then(|word| word.parse::<Operation>().ok())
                    .ok_or_else(malformed)?;
                let alias = lexeme_at(&parts, 1);
                Ok(Ast::Action(ActionTerm { operation, alias }))
            }
            Production::Actions => {
                let mut actions = Vec::new();
                for part in parts {
                    match part {
                        Ast::Action(action) => actions.push(action.clone()),
                        _ => return Err(malformed()),
                    }
                }
                Ok(Ast::Actions(actions))
            }
            Production::Instruction => {
                let mut matches = None;
                let mut actions = None;
                for part in parts {
                    match part {
                        Ast::Terms(terms) if matches.is_none() => matches = Some(terms.clone()),
                        Ast::Actions(list) if actions.is_none() => actions = Some(list.clone()),
                        _ => return Err(malformed()),
                    }
                }
                match (matches, actions) {
                    (Some(matches), Some(actions)) => Ok(Ast::Instruction { matches, actions }),
                    _ => Err(malformed()),
                }
            }
        }
    }
}

fn lexeme_at(parts: &[&Ast], index: usize) -> Option<String> {
    match parts.get(index) {
        Some(Ast::Lexeme(word)) => Some(word.clone()),
        _ => None,
    }
}

/// Build the instruction grammar, returning it with its start rule
pub fn instruction_grammar() -> Result<(Grammar, RuleId), SyntaxError> {
    let mut g = Grammar::new();
    let ws = g.whitespace();
    let identifier = g.pattern(IDENTIFIER_RE.clone(), "identifier", KEYWORDS);

    // match := (quoted | "other") (ws "as" ws identifier)?
    let quoted = g.quoted();
    let other = g.keep_literal("other");
    let subject = g.first_of(&[quoted, other]);
    let as_kw = g.literal("as");
    let alias = g.seq(&[ws, as_kw, ws, identifier]);
    let optional_alias = g.optional(alias);
    let match_body = g.seq(&[subject, optional_alias]);
    let match_expr = g.reduce(Production::Match, match_body);

    // condition := match ws "and" ws condition | match
    let and_kw = g.literal("and");
    let condition_ref = g.forward_ref();
    let recur_body = g.seq(&[match_expr, ws, and_kw, ws, condition_ref]);
    let recur = g.reduce(Production::Recur, recur_body);
    let condition = g.first_of(&[recur, match_expr]);
    g.resolve(condition_ref, condition)?;

    // action := ("keep" | "move") (ws identifier)?
    let keep = g.keep_literal("keep");
    let move_kw = g.keep_literal("move");
    let operation = g.one_of(&[keep, move_kw]);
    let target = g.seq(&[ws, identifier]);
    let optional_target = g.optional(target);
    let action_body = g.seq(&[operation, optional_target]);
    let action = g.reduce(Production::Action, action_body);

    // actions := action (ws "and" ws action)*
    let more_body = g.seq(&[ws, and_kw, ws, action]);
    let more = g.zero_or_more(more_body);
    let actions_body = g.seq(&[action, more]);
    let actions = g.reduce(Production::Actions, actions_body);

    // instruction := ("if" ws)? condition ws "then" ws actions
    let if_kw = g.literal("if");
    let if_prefix = g.seq(&[if_kw, ws]);
    let optional_if = g.optional(if_prefix);
    let then_kw = g.literal("then");
    let instruction_body = g.seq(&[optional_if, condition, ws, then_kw, ws, actions]);
    let instruction = g.reduce(Production::Instruction, instruction_body);

    g.check()?;
    Ok((g, instruction))
}
