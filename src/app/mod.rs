//! Application layer: agent configuration and the factory that builds agents.
//!
//! Agent selection happens once, at construction time: the CLI parses tokens
//! into [`AgentSpec`]s and the [`App`] container turns them into boxed
//! [`crate::ports::Agent`]s.
//!
//! # Usage
//!
//! ```
//! use boardbots::app::{AgentConfig, App};
//! use boardbots::game::{GameKind, Mark};
//!
//! let app = App::new();
//! let config = AgentConfig::new("minimax:3".parse()?).with_seed(42);
//! let agent = app.create_agent(&config, Mark::X, GameKind::ConnectFour)?;
//! # Ok::<(), boardbots::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, AgentSpec};
pub use container::App;
