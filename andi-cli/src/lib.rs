//! andi: drive the referral engine from a terminal.
//!
//! Every run starts from the demo data set; nothing is persisted.

pub mod cli;
pub mod settings;
