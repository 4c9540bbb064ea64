//! Failure classification for the dispatch loop.
//!
//! Two layers: [`SyntaxError`] is the leaf diagnostic produced while
//! decoding a request (its text goes to the controller verbatim), and
//! [`Fault`] is the classification threaded through dispatch. Semantic
//! rejections (`unacceptable size`, `illegal move`) never appear here;
//! handlers answer those with a fixed failure frame and carry on.

use std::io;

use thiserror::Error;

/// A malformed request: bad numeric, coordinate or color literal, or too
/// few arguments. Always recoverable; the message is sent back to the
/// controller in a `syntax error in command` frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SyntaxError(String);

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        SyntaxError(message.into())
    }
}

/// Outcome of dispatching one request when it did not complete normally.
#[derive(Debug, Error)]
pub enum Fault {
    /// The request was malformed. A failure response is sent and the
    /// session continues; this path never terminates the loop.
    #[error("syntax error: {0}")]
    Recoverable(SyntaxError),
    /// Engine or transport fault. The loop terminates without further
    /// output and the controller connection must be discarded as
    /// desynchronized.
    #[error("fatal session fault: {0}")]
    Fatal(anyhow::Error),
}

impl From<SyntaxError> for Fault {
    fn from(err: SyntaxError) -> Self {
        Fault::Recoverable(err)
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Fault::Fatal(err.into())
    }
}

impl From<anyhow::Error> for Fault {
    fn from(err: anyhow::Error) -> Self {
        Fault::Fatal(err)
    }
}
