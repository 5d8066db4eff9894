use crate::regenerate::RegenerateError;

/// One non-empty line of user input that passed validation.
///
/// The text is kept exactly as typed (after trimming) because it is what gets written
/// back after `SOURCE_RECT=`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinateLine {
    pub text: String,
}

impl CoordinateLine {
    /// Check a single trimmed line of the form `x,y,w,h`.
    ///
    /// Returns `None` unless the line has exactly four comma-separated tokens that
    /// each start with an integer.
    pub fn parse(line: &str) -> Option<Self> {
        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() != 4 || !tokens.iter().all(|token| is_leading_int(token)) {
            return None;
        }
        Some(Self {
            text: line.to_owned(),
        })
    }
}

/// Split `text` into lines, drop the blank ones and validate the rest.
///
/// Order is preserved. Validation is all-or-nothing: the first malformed line aborts
/// the whole parse.
///
/// # Errors
///
/// [`RegenerateError::MalformedCoordinateLine`] naming the 1-based position of the
/// offending line among the non-empty lines.
pub fn parse_coordinate_lines(text: &str) -> Result<Vec<CoordinateLine>, RegenerateError> {
    text.lines()
        .map(trim_text)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            CoordinateLine::parse(line).ok_or_else(|| RegenerateError::MalformedCoordinateLine {
                line: i + 1,
                text: line.to_owned(),
            })
        })
        .collect()
}

/// Whitespace as browsers trim it: Unicode `White_Space` without U+0085, plus the
/// byte-order mark.
pub(crate) fn is_text_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

pub(crate) fn trim_text(s: &str) -> &str {
    s.trim_matches(is_text_whitespace)
}

/// Lenient integer check: leading whitespace, an optional sign, then at least one
/// digit. Whatever follows is ignored, so `"12px"` passes. A `0x` prefix switches to
/// hexadecimal and must be followed by a hex digit.
fn is_leading_int(token: &str) -> bool {
    let s = token.trim_start_matches(is_text_whitespace);
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => hex.starts_with(|c: char| c.is_ascii_hexdigit()),
        None => unsigned.starts_with(|c: char| c.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("42", true)]
    #[case("  7", true)]
    #[case("\u{a0}\u{feff}8", true)]
    #[case("-3", true)]
    #[case("+5", true)]
    #[case("12px", true)]
    #[case("3.9", true)]
    #[case("0x10", true)]
    #[case("-0XfF", true)]
    #[case("99999999999999999999999", true)]
    #[case("0x", false)]
    #[case("0xg", false)]
    #[case("\u{85}2", false)]
    #[case("", false)]
    #[case("   ", false)]
    #[case("-", false)]
    #[case("+-1", false)]
    #[case("px12", false)]
    #[case("- 1", false)]
    fn leading_int(#[case] token: &str, #[case] accepted: bool) {
        assert_eq!(is_leading_int(token), accepted);
    }

    #[test]
    fn parses_four_tokens() {
        let line = CoordinateLine::parse("198,0,229,162").unwrap();
        assert_eq!(line.text, "198,0,229,162");
    }

    #[test]
    fn keeps_original_text_for_lenient_tokens() {
        let line = CoordinateLine::parse("10px, 20 ,0x1e,40").unwrap();
        assert_eq!(line.text, "10px, 20 ,0x1e,40");
    }

    #[rstest]
    #[case::three_tokens("1,2,3")]
    #[case::five_tokens("1,2,3,4,5")]
    #[case::trailing_comma("1,2,3,4,")]
    #[case::empty_token("1,,3,4")]
    #[case::words("a,b,c,d")]
    #[case::spaces_only("1 2 3 4")]
    #[case::bare_hex_prefix("0x,1,2,3")]
    #[case::bad_hex_digit("0xg,1,2,3")]
    #[case::next_line_char("1,\u{85}2,3,4")]
    fn rejects_malformed_lines(#[case] line: &str) {
        assert_eq!(CoordinateLine::parse(line), None);
    }

    #[test]
    fn skips_blank_lines_and_preserves_order() {
        let lines = parse_coordinate_lines("\n  1,2,3,4  \r\n\n\t\n5,6,7,8\n").unwrap();
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["1,2,3,4", "5,6,7,8"]);
    }

    #[test]
    fn strips_byte_order_mark_from_lines() {
        let lines = parse_coordinate_lines("\u{feff}1,2,3,4\n\u{feff}\n").unwrap();
        assert_eq!(
            lines,
            vec![CoordinateLine {
                text: "1,2,3,4".to_owned()
            }]
        );
    }

    #[test]
    fn blank_input_yields_no_lines() {
        assert_eq!(parse_coordinate_lines("  \n\n ").unwrap(), Vec::new());
    }

    #[test]
    fn reports_position_of_first_bad_line() {
        let err = parse_coordinate_lines("1,2,3,4\n\n1,2,3\nx").unwrap_err();
        assert_eq!(
            err,
            RegenerateError::MalformedCoordinateLine {
                line: 2,
                text: "1,2,3".to_owned(),
            }
        );
    }
}
