//! Command-line tokenization.
//!
//! Splits one raw input line into an argument vector plus a background
//! flag. Everything downstream (builtins, evaluator) works on the
//! [`ParsedLine`] and never re-reads the raw text except for display.

/// A command line split into its argument vector plus the background flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub argv: Vec<String>,
    pub background: bool,
}

impl ParsedLine {
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Splits a raw command line on whitespace. Characters enclosed in single
/// quotes form a single argument (quotes stripped). A final `&` token
/// requests background execution and is not part of the argument vector.
pub fn parse_line(line: &str) -> ParsedLine {
    let mut argv = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '\'' {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '\'' {
                    break;
                }
                token.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        argv.push(token);
    }

    let background = argv.last().is_some_and(|token| token == "&");
    if background {
        argv.pop();
    }

    ParsedLine { argv, background }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_lines_yield_no_arguments() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("   \t  ").is_empty());
    }

    #[test]
    fn splits_on_whitespace() {
        let parsed = parse_line("/bin/echo hi there");
        assert_eq!(parsed.argv, vec!["/bin/echo", "hi", "there"]);
        assert!(!parsed.background);
    }

    #[test]
    fn trailing_ampersand_sets_background() {
        let parsed = parse_line("/bin/sleep 5 &");
        assert_eq!(parsed.argv, vec!["/bin/sleep", "5"]);
        assert!(parsed.background);
    }

    #[test]
    fn ampersand_not_in_final_position_is_an_ordinary_argument() {
        let parsed = parse_line("/bin/echo a & b");
        assert_eq!(parsed.argv, vec!["/bin/echo", "a", "&", "b"]);
        assert!(!parsed.background);
    }

    #[test]
    fn single_quotes_keep_spaces_in_one_argument() {
        let parsed = parse_line("/bin/echo 'hello   world' done");
        assert_eq!(parsed.argv, vec!["/bin/echo", "hello   world", "done"]);
    }

    #[test]
    fn quoted_ampersand_is_not_a_background_marker() {
        let parsed = parse_line("/bin/echo '&'");
        assert_eq!(parsed.argv, vec!["/bin/echo", "&"]);
        assert!(!parsed.background);
    }

    #[test]
    fn lone_ampersand_is_background_with_empty_argv() {
        let parsed = parse_line("&");
        assert!(parsed.is_empty());
        assert!(parsed.background);
    }
}
