//! L.I.F.E. Core — shared domain model and abstractions.
//!
//! This crate defines the canonical planet/sector/encounter data model and the
//! ports (durable stores, content provider, clock, RNG) that every other crate
//! depends on. It contains no infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod ids;
pub mod model;
pub mod provider;
pub mod repository;
pub mod rng;
