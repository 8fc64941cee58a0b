// Record types for the three input tables and the nested output view

mod types;

pub use types::*;
