//! Compiled multi-pattern automaton: types and construction.

pub mod builder;
pub mod types;

pub use builder::AutomatonBuilder;
pub use types::{Automaton, AutomatonStats, State, StateId, ROOT_STATE};
