//! The engine collaborator contract.
//!
//! The protocol session consumes a Go robot strictly through this trait;
//! all game state (board size, komi, position) lives behind it. Every
//! method is synchronous and must tolerate any call ordering: a controller
//! may, for example, send `play` before `boardsize` — the engine should
//! treat out-of-order calls as graceful no-ops rather than panic.
//!
//! Fallible operations return `anyhow::Result`; an `Err` is an
//! unrecoverable engine fault and ends the session.

use anyhow::bail;

use crate::types::{Move, Player, Score};

pub trait GoEngine {
    /// The identity of the robot. May contain spaces, should not contain a
    /// version number. ASCII only.
    fn name(&self) -> &str;

    /// The robot's version string. ASCII only.
    fn version(&self) -> &str;

    /// Whether this engine can score finished games. Must be constant for
    /// the lifetime of the instance; the session queries it exactly once,
    /// at construction, to decide whether `final_score` is registered.
    ///
    /// When this returns `true`, [`score`](Self::score) must produce a
    /// valid [`Score`] for every game.
    fn can_score(&self) -> bool {
        false
    }

    /// Clear internal state and start a new game.
    fn new_game(&mut self) -> anyhow::Result<()>;

    /// The board size changed. Return `false` to veto an unsupported size;
    /// the session has already confined `size` to the protocol range.
    fn resize_board(&mut self, size: usize) -> anyhow::Result<bool>;

    /// Inform the robot of the komi value. Any value is allowed.
    fn set_komi(&mut self, komi: f32) -> anyhow::Result<()>;

    /// Record a move played on the board, either to replay a game to a
    /// position or to report the opponent's move. Return `false` to veto
    /// an illegal move.
    fn add_move(&mut self, mv: Move, player: Player) -> anyhow::Result<bool>;

    /// Produce the robot's next move for the given player.
    fn next_move(&mut self, player: Player) -> anyhow::Result<Move>;

    /// Compute the score of the current game. `None` where a score was
    /// promised (see [`can_score`](Self::can_score)) is treated as a fatal
    /// engine fault by the session.
    fn score(&mut self) -> anyhow::Result<Option<Score>> {
        bail!("engine does not support scoring")
    }
}

/// Forwarding impl so a caller can lend the engine to a session and keep
/// inspecting it afterwards.
impl<E: GoEngine + ?Sized> GoEngine for &mut E {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn version(&self) -> &str {
        (**self).version()
    }

    fn can_score(&self) -> bool {
        (**self).can_score()
    }

    fn new_game(&mut self) -> anyhow::Result<()> {
        (**self).new_game()
    }

    fn resize_board(&mut self, size: usize) -> anyhow::Result<bool> {
        (**self).resize_board(size)
    }

    fn set_komi(&mut self, komi: f32) -> anyhow::Result<()> {
        (**self).set_komi(komi)
    }

    fn add_move(&mut self, mv: Move, player: Player) -> anyhow::Result<bool> {
        (**self).add_move(mv, player)
    }

    fn next_move(&mut self, player: Player) -> anyhow::Result<Move> {
        (**self).next_move(player)
    }

    fn score(&mut self) -> anyhow::Result<Option<Score>> {
        (**self).score()
    }
}
