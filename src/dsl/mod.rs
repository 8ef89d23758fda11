//! Text format for describing a ladder.
//!
//! Each element line names one component, how it links to the ladder built
//! so far, and its magnitude. Directives set the source and solver options.
//!
//! # Grammar Overview
//!
//! ```text
//! ladder      = { line }
//! line        = comment | directive | element | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' directive_name { argument }
//! element     = name link number [unit]
//!
//! directive_name = "frequency" | "freq" | "source" | "voltage" | "policy"
//! name        = ("R" | "L" | "C" | "XL" | "XC") { letter | digit | '_' }
//! link        = "first" | "series" | "parallel" | "f" | "s" | "p"
//! unit        = identifier
//!
//! number      = ['-'|'+'] digit+ ['.' digit*] [('e'|'E') ['-'|'+'] digit+]
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! Kind is taken from the name prefix (case-insensitive, `XL`/`XC` checked
//! before `L`/`C`). A missing unit means the base unit of the kind.
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .frequency | Source frequency in Hz | `.frequency <hz>` |
//! | .source | Source voltage (RMS) and phase | `.source <volts> [degrees]` |
//! | .policy | Zero-impedance branch handling | `.policy exclude\|dominate` |
//!
//! # Example
//!
//! ```text
//! # Series RL with a shunt capacitor
//! .frequency 60
//! .source 120
//!
//! R1  first     100  Ω
//! L1  series    10   mH
//! C1  parallel  4.7  uF
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a description string into an AST.
pub fn parse(input: &str) -> Result<LadderAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a description file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<LadderAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::LadderError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
