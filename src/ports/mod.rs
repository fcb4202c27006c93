//! Ports (trait boundaries) between the decision engines and their callers.
//!
//! The orchestration pipeline only talks to agents through [`Agent`] and
//! reports progress through [`Observer`]; strategies and output formats are
//! adapters that implement these traits.

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::Observer;
