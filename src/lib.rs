//! Common functionality for dualcredit.
#![warn(missing_docs)]
pub mod cli;
pub mod credits;
pub mod id;
pub mod input;
pub mod log;
pub mod model;
pub mod optimisation;
pub mod output;
pub mod regulation;
pub mod sweep;
pub mod vehicle;

#[cfg(test)]
mod fixture;
