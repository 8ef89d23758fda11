//! Ladder representation and validation.
//!
//! This module provides the ordered component list the reducer consumes.
//! The [`Ladder`] owns the components in order and exposes the append, edit
//! and remove operations an interactive front end needs; reductions are
//! always recomputed from it.

mod ladder;
mod types;
mod validate;

pub use ladder::Ladder;
pub use types::*;
pub use validate::validate_chain;
