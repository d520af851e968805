//! L.I.F.E. Content — turns generative-model output into domain entities.
//!
//! The adapter side ([`fence`], [`payload`], [`gemini`]) talks to the remote
//! model and parses whatever text comes back; the [`assembler`] stamps ids,
//! image references and lifecycle fields onto the parsed payload. The
//! [`local`] generator produces the same entities from built-in tables and is
//! used by [`fallback`] when the remote provider yields nothing.

pub mod assembler;
pub mod error;
pub mod fallback;
pub mod fence;
pub mod gemini;
pub mod local;
pub mod payload;
pub mod prompts;
