//! Keep/move rule language
//!
//! A script is a list of instructions such as
//! `if "backup" as b and other then move b`. Each instruction is evaluated
//! per hash group of a manifest.

pub mod combinator;
pub mod eval;
pub mod grammar;
pub mod script;
pub mod unescape;

pub use eval::{apply_instruction, apply_script, apply_script_text};
pub use script::{parse_script, ActionTerm, Instruction, MatchTerm, Pattern, RuleParser, Script};
