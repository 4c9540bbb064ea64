//! The GTP session: command table and dispatch loop.
//!
//! One session owns one input stream, one output stream and one engine,
//! and serves requests strictly sequentially — a response is written and
//! flushed before the next line is read. The command set is a closed enum
//! dispatched through an exhaustive match; `final_score` is the single
//! capability-gated entry, decided once at construction.

use std::io::{self, BufRead, Write};

use anyhow::anyhow;
use tracing::{debug, error};

use crate::engine::GoEngine;
use crate::error::{Fault, SyntaxError};
use crate::parser::{parse_line, sanitize, ParsedLine, Request};
use crate::response::ResponseWriter;
use crate::types::{Move, Player, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// The protocol version this crate implements.
pub const GTP_PROTOCOL_VERSION: &str = "2";

// Failure messages fixed by the GTP specification.
const UNKNOWN_COMMAND: &str = "unknown command";
const UNACCEPTABLE_SIZE: &str = "unacceptable size";
const ILLEGAL_MOVE: &str = "illegal move";

/// Whether the session keeps serving after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// The closed set of protocol commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    ProtocolVersion,
    Name,
    Version,
    KnownCommand,
    ListCommands,
    Quit,
    Boardsize,
    ClearBoard,
    Komi,
    Play,
    Genmove,
    FinalScore,
}

impl CommandKind {
    const ALL: [CommandKind; 12] = [
        CommandKind::ProtocolVersion,
        CommandKind::Name,
        CommandKind::Version,
        CommandKind::KnownCommand,
        CommandKind::ListCommands,
        CommandKind::Quit,
        CommandKind::Boardsize,
        CommandKind::ClearBoard,
        CommandKind::Komi,
        CommandKind::Play,
        CommandKind::Genmove,
        CommandKind::FinalScore,
    ];

    /// Wire name of the command.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::ProtocolVersion => "protocol_version",
            CommandKind::Name => "name",
            CommandKind::Version => "version",
            CommandKind::KnownCommand => "known_command",
            CommandKind::ListCommands => "list_commands",
            CommandKind::Quit => "quit",
            CommandKind::Boardsize => "boardsize",
            CommandKind::ClearBoard => "clear_board",
            CommandKind::Komi => "komi",
            CommandKind::Play => "play",
            CommandKind::Genmove => "genmove",
            CommandKind::FinalScore => "final_score",
        }
    }

    /// Minimum argument count, checked before any command-specific parsing.
    /// Extra arguments are ignored.
    fn min_args(self) -> usize {
        match self {
            CommandKind::KnownCommand
            | CommandKind::Boardsize
            | CommandKind::Komi
            | CommandKind::Genmove => 1,
            CommandKind::Play => 2,
            _ => 0,
        }
    }
}

/// Immutable command set for one session. `final_score` is present only
/// when the engine declared scoring capability at construction.
#[derive(Debug, Clone)]
pub struct CommandTable {
    scoring: bool,
}

impl CommandTable {
    fn new(scoring: bool) -> Self {
        CommandTable { scoring }
    }

    fn registered(&self, kind: CommandKind) -> bool {
        kind != CommandKind::FinalScore || self.scoring
    }

    /// Resolve a wire name to its command, if registered.
    pub fn lookup(&self, name: &str) -> Option<CommandKind> {
        CommandKind::ALL
            .into_iter()
            .filter(|kind| self.registered(*kind))
            .find(|kind| kind.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// All registered wire names.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        CommandKind::ALL
            .into_iter()
            .filter(|kind| self.registered(*kind))
            .map(CommandKind::name)
    }
}

/// A GTP session bound to a controller stream pair and an engine.
pub struct GoTextProtocol<R, W, E> {
    reader: R,
    writer: ResponseWriter<W>,
    engine: E,
    commands: CommandTable,
}

impl<R: BufRead, W: Write, E: GoEngine> GoTextProtocol<R, W, E> {
    /// Create a session. The engine's scoring capability is queried here,
    /// exactly once; the command table is fixed from then on.
    pub fn new(reader: R, writer: W, engine: E) -> Self {
        let commands = CommandTable::new(engine.can_score());
        GoTextProtocol {
            reader,
            writer: ResponseWriter::new(writer),
            engine,
            commands,
        }
    }

    /// The session's command table.
    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    /// Serve requests until the controller disconnects, `quit` arrives or
    /// a fatal fault occurs.
    ///
    /// Transport I/O errors end the session and are only logged — there is
    /// nobody left to answer. An engine fault is logged and returned as
    /// `Err`: engine and controller may have de-synced, so the caller must
    /// discard the connection.
    pub fn run(&mut self) -> anyhow::Result<()> {
        match self.serve() {
            Ok(()) => Ok(()),
            Err(err) => {
                if let Some(io_err) = err.downcast_ref::<io::Error>() {
                    error!("io error on controller stream, closing session: {io_err}");
                    Ok(())
                } else {
                    error!("terminating session on engine fault: {err:#}");
                    Err(err)
                }
            }
        }
    }

    fn serve(&mut self) -> anyhow::Result<()> {
        let mut raw = String::new();
        loop {
            raw.clear();
            if self.reader.read_line(&mut raw)? == 0 {
                debug!("controller closed the stream");
                return Ok(());
            }

            let line = sanitize(&raw);
            debug!("controller sent: {line:?}");

            match parse_line(&line) {
                ParsedLine::Empty => {}
                ParsedLine::Malformed { id } => self.writer.failure(id, UNKNOWN_COMMAND)?,
                ParsedLine::Request(request) => match self.dispatch(&request) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Stop) => return Ok(()),
                    Err(Fault::Recoverable(detail)) => {
                        let message =
                            format!("syntax error in command: {line}\nError was: {detail}");
                        self.writer.failure(request.id, &message)?;
                    }
                    Err(Fault::Fatal(cause)) => return Err(cause),
                },
            }
        }
    }

    fn dispatch(&mut self, request: &Request<'_>) -> Result<Flow, Fault> {
        let Some(kind) = self.commands.lookup(request.name) else {
            self.writer.failure(request.id, UNKNOWN_COMMAND)?;
            return Ok(Flow::Continue);
        };
        if request.args.len() < kind.min_args() {
            return Err(SyntaxError::new("Invalid number of arguments!").into());
        }

        let id = request.id;
        match kind {
            CommandKind::ProtocolVersion => self.writer.success(id, GTP_PROTOCOL_VERSION)?,
            CommandKind::Name => self.writer.success(id, self.engine.name())?,
            CommandKind::Version => self.writer.success(id, self.engine.version())?,
            CommandKind::KnownCommand => {
                let known = self.commands.contains(request.args[0]);
                self.writer.success(id, if known { "true" } else { "false" })?;
            }
            CommandKind::ListCommands => {
                let listing = self.commands.names().collect::<Vec<_>>().join("\n");
                self.writer.success(id, &listing)?;
            }
            CommandKind::Quit => {
                self.writer.success(id, "")?;
                return Ok(Flow::Stop);
            }
            CommandKind::Boardsize => {
                let size: i64 = request.args[0].parse().map_err(|_| {
                    SyntaxError::new(format!("Not an integer: {}!", request.args[0]))
                })?;
                // The engine is not consulted for sizes outside the
                // protocol range.
                let accepted = if (MIN_BOARD_SIZE as i64..=MAX_BOARD_SIZE as i64).contains(&size) {
                    self.engine.resize_board(size as usize)?
                } else {
                    false
                };
                if accepted {
                    self.writer.success(id, "")?;
                } else {
                    self.writer.failure(id, UNACCEPTABLE_SIZE)?;
                }
            }
            CommandKind::ClearBoard => {
                self.engine.new_game()?;
                self.writer.success(id, "")?;
            }
            CommandKind::Komi => {
                let komi: f32 = request.args[0].parse().map_err(|_| {
                    SyntaxError::new(format!("Not a float: {}!", request.args[0]))
                })?;
                self.engine.set_komi(komi)?;
                self.writer.success(id, "")?;
            }
            CommandKind::Play => {
                let player = Player::decode(request.args[0])?;
                let mv = Move::decode(request.args[1])?;
                if self.engine.add_move(mv, player)? {
                    self.writer.success(id, "")?;
                } else {
                    self.writer.failure(id, ILLEGAL_MOVE)?;
                }
            }
            CommandKind::Genmove => {
                let player = Player::decode(request.args[0])?;
                let mv = self.engine.next_move(player)?;
                self.writer.success(id, &mv.to_string())?;
            }
            CommandKind::FinalScore => {
                let Some(score) = self.engine.score()? else {
                    return Err(Fault::Fatal(anyhow!(
                        "engine advertised scoring but produced no score"
                    )));
                };
                self.writer.success(id, &score.to_string())?;
            }
        }
        Ok(Flow::Continue)
    }
}
