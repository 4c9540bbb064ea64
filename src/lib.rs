//! GTP bridge: links a line-oriented controller stream to a Go engine.
//!
//! Implements the Go Text Protocol version 2 command surface over any
//! `BufRead`/`Write` pair. The engine side is the [`GoEngine`] trait; the
//! session itself holds no game state beyond its immutable command table.
//!
//! ```no_run
//! use std::io::{stdin, stdout};
//! use gtp_bridge::GoTextProtocol;
//!
//! # fn connect(engine: impl gtp_bridge::GoEngine) -> anyhow::Result<()> {
//! let mut session = GoTextProtocol::new(stdin().lock(), stdout().lock(), engine);
//! session.run()?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod parser;
pub mod protocol;
pub mod response;
pub mod types;

pub use engine::GoEngine;
pub use error::{Fault, SyntaxError};
pub use protocol::{CommandKind, CommandTable, GoTextProtocol, GTP_PROTOCOL_VERSION};
pub use types::{Move, Player, Score, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
