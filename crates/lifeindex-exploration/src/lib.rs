//! L.I.F.E. — Exploration bounded context.
//!
//! Responsible for explorer sessions, sector navigation and discovery,
//! the per-sector encounter trigger policy, the branching encounter state
//! machine, the planet collection repository and exploration logs.

pub mod application;
pub mod domain;
