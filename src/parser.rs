//! Request line parsing.
//!
//! Grammar: `[id] command [arg]* [# comment]`. Control characters are
//! stripped before parsing (the line reader already consumed the
//! newline), everything from the first `#` on is a comment, and the
//! optional correlation id is a leading ASCII digit run that may abut the
//! command name.

/// One parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    /// Correlation id to echo in the response, if the controller sent one.
    pub id: Option<u32>,
    /// Command name, never empty.
    pub name: &'a str,
    /// Whitespace-split arguments.
    pub args: Vec<&'a str>,
}

/// Result of parsing one sanitized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Nothing left after stripping; no dispatch, no response.
    Empty,
    /// Non-empty but no recognizable command token (digits only, or an id
    /// too large for `u32`). Answered with `unknown command`.
    Malformed { id: Option<u32> },
    Request(Request<'a>),
}

/// Drop every control character. Tabs and carriage returns go with the
/// rest; the trailing newline was consumed by the line reader.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_control()).collect()
}

/// Parse one already-sanitized line.
pub fn parse_line(line: &str) -> ParsedLine<'_> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return ParsedLine::Empty;
    }

    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    let (id_str, rest) = line.split_at(digits);
    let id = if digits > 0 {
        match id_str.parse::<u32>() {
            Ok(id) => Some(id),
            // Digits beyond u32 range: no usable id, no usable command.
            Err(_) => return ParsedLine::Malformed { id: None },
        }
    } else {
        None
    };

    let mut tokens = rest.split_whitespace();
    let Some(name) = tokens.next() else {
        return ParsedLine::Malformed { id };
    };
    ParsedLine::Request(Request {
        id,
        name,
        args: tokens.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(line: &str) -> Request<'_> {
        match parse_line(line) {
            ParsedLine::Request(req) => req,
            other => panic!("expected a request, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_command() {
        let req = request("boardsize 19");
        assert_eq!(req.id, None);
        assert_eq!(req.name, "boardsize");
        assert_eq!(req.args, vec!["19"]);
    }

    #[test]
    fn test_correlation_id() {
        let req = request("42 play b d4");
        assert_eq!(req.id, Some(42));
        assert_eq!(req.name, "play");
        assert_eq!(req.args, vec!["b", "d4"]);
    }

    #[test]
    fn test_id_may_abut_command() {
        let req = request("7quit");
        assert_eq!(req.id, Some(7));
        assert_eq!(req.name, "quit");
        assert!(req.args.is_empty());
    }

    #[test]
    fn test_comment_truncation() {
        let req = request("genmove w # your turn");
        assert_eq!(req.name, "genmove");
        assert_eq!(req.args, vec!["w"]);
        assert_eq!(parse_line("# only a comment"), ParsedLine::Empty);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(parse_line(""), ParsedLine::Empty);
        assert_eq!(parse_line("   "), ParsedLine::Empty);
    }

    #[test]
    fn test_digits_only_is_malformed() {
        assert_eq!(parse_line("123"), ParsedLine::Malformed { id: Some(123) });
        assert_eq!(
            parse_line("99999999999999999999 quit"),
            ParsedLine::Malformed { id: None }
        );
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize("qu\u{7}it\r\n"), "quit");
        assert_eq!(sanitize("boardsize\t19"), "boardsize19");
    }

    #[test]
    fn test_extra_argument_whitespace() {
        let req = request("  play   b    d4  ");
        assert_eq!(req.name, "play");
        assert_eq!(req.args, vec!["b", "d4"]);
    }
}
