//! Response framing.
//!
//! A frame is `(=|?)[id][ message]` terminated by a newline and a blank
//! line; the blank line marks end-of-frame, so message bodies may span
//! multiple lines. Every frame is flushed before the next request is
//! read.

use std::io::{self, Write};

use tracing::debug;

/// Writes response frames to the controller stream.
#[derive(Debug)]
pub struct ResponseWriter<W> {
    out: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(out: W) -> Self {
        ResponseWriter { out }
    }

    /// Emit a `=` frame. The message may be empty.
    pub fn success(&mut self, id: Option<u32>, message: &str) -> io::Result<()> {
        self.frame('=', id, message)
    }

    /// Emit a `?` frame. Failure frames always carry a message.
    pub fn failure(&mut self, id: Option<u32>, message: &str) -> io::Result<()> {
        debug_assert!(!message.is_empty(), "failure frame without a message");
        self.frame('?', id, message)
    }

    fn frame(&mut self, sigil: char, id: Option<u32>, message: &str) -> io::Result<()> {
        use std::fmt::Write as _;

        let mut frame = String::with_capacity(message.len() + 8);
        frame.push(sigil);
        if let Some(id) = id {
            // Infallible for String.
            let _ = write!(frame, "{id}");
        }
        if !message.is_empty() {
            frame.push(' ');
            frame.push_str(message);
        }
        frame.push_str("\n\n");

        debug!("responding: {frame:?}");
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}
