//! Parses the meta-data workload grammar (spec §6) into an ordered
//! `Vec<ossim_core::Process>`, given the `Configuration` whose cycle
//! times resolve each operation's duration.

mod error;
mod grammar;

pub use error::WorkloadError;
pub use grammar::{load_from_path, load_from_str};
