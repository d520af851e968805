//! Application layer for the Exploration context.

pub mod collection;
pub mod command_handlers;
pub mod query_handlers;
pub mod sessions;
