//! Parsed rule scripts

use crate::error::{ScriptError, SyntaxError};
use crate::manifest::Operation;
use crate::rules::combinator::{Ast, Grammar, RuleId};
use crate::rules::grammar::instruction_grammar;
use std::fmt;
use tracing::debug;

/// Alias bound to the `other` remainder when the term names none
pub const DEFAULT_OTHER_ALIAS: &str = "other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Entries whose path contains this substring
    Literal(String),
    /// Entries not claimed by any literal term of the same condition
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTerm {
    pub pattern: Pattern,
    pub alias: Option<String>,
}

impl MatchTerm {
    /// Alias the term binds its entries to. `other` terms default to `other`.
    pub fn binding_alias(&self) -> Option<&str> {
        match (&self.pattern, self.alias.as_deref()) {
            (_, Some(alias)) => Some(alias),
            (Pattern::Other, None) => Some(DEFAULT_OTHER_ALIAS),
            (Pattern::Literal(_), None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTerm {
    pub operation: Operation,
    pub alias: Option<String>,
}

/// One script line: condition terms, actions and the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub matches: Vec<MatchTerm>,
    pub actions: Vec<ActionTerm>,
    pub source: String,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub instructions: Vec<Instruction>,
}

impl Script {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Parses instruction lines with the rule-language grammar
pub struct RuleParser {
    grammar: Grammar,
    start: RuleId,
}

impl RuleParser {
    pub fn new() -> Result<Self, SyntaxError> {
        let (grammar, start) = instruction_grammar()?;
        Ok(Self { grammar, start })
    }

    /// Parse one already stripped line
    pub fn parse_instruction(&self, line: &str) -> Result<Instruction, SyntaxError> {
        match self.grammar.parse(self.start, line)? {
            Ast::Instruction { matches, actions } => Ok(Instruction {
                matches,
                actions,
                source: line.to_string(),
            }),
            _ => Err(SyntaxError::new(0, "input is not an instruction")),
        }
    }

    pub fn parse_script(&self, text: &str) -> Result<Script, ScriptError> {
        let mut instructions = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = strip(raw);
            if line.is_empty() {
                continue;
            }
            let instruction = self
                .parse_instruction(line)
                .map_err(|err| ScriptError::Syntax {
                    line: index + 1,
                    column: source_column(raw, line, err.position),
                    message: err.message,
                    text: line.to_string(),
                })?;
            debug!(line = index + 1, instruction = %instruction, "Parsed instruction");
            instructions.push(instruction);
        }
        Ok(Script { instructions })
    }
}

fn is_padding(c: char) -> bool {
    c == ' ' || c == '\n' || c == '\t' || c == '\r'
}

/// Trim a script line; comment lines become empty
fn strip(line: &str) -> &str {
    let line = line.trim_matches(is_padding);
    if line.starts_with('#') {
        ""
    } else {
        line
    }
}

/// 1-based character column in `raw` of byte `position` in its stripped `line`
fn source_column(raw: &str, line: &str, position: usize) -> usize {
    let lead = raw.len() - raw.trim_start_matches(is_padding).len();
    let prefix = raw.get(..lead + position.min(line.len())).unwrap_or(raw);
    prefix.chars().count() + 1
}

/// Parse a whole script. `#` lines and blank lines are skipped.
pub fn parse_script(text: &str) -> Result<Script, ScriptError> {
    let parser = RuleParser::new().map_err(|err| ScriptError::Syntax {
        line: 0,
        column: err.position,
        message: err.message,
        text: String::new(),
    })?;
    parser.parse_script(text)
}
