//! Domain layer for the Exploration context.

pub mod commands;
pub mod encounter;
pub mod navigation;
pub mod session;
pub mod trigger;
