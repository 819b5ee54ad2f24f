//! Line-comment removal, run before tokenizing.
//!
//! Truncation is positional: the first `//` on a line ends it, even inside a
//! quoted string. String literals in the DSL therefore cannot contain `//`.

/// Truncate every line at its first `//` and rejoin the lines with `\n`.
pub fn strip_comments(source: &str) -> String {
    source
        .lines()
        .map(strip_line)
        .collect::<Vec<&str>>()
        .join("\n")
}

/// The part of `line` before its first `//`.
pub fn strip_line(line: &str) -> &str {
    match line.find("//") {
        Some(comment) => &line[..comment],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_and_full_line_comments() {
        let src = "// header\nenum A(u8) { // open\n  X, Y\n}";
        assert_eq!(strip_comments(src), "\nenum A(u8) { \n  X, Y\n}");
    }

    #[test]
    fn stripping_is_idempotent() {
        for line in ["a // b // c", "//", "no comment", "x = 1 //// y", ""] {
            let once = strip_comments(line);
            assert_eq!(strip_comments(&once), once, "line {:?}", line);
        }
    }

    #[test]
    fn crlf_lines_are_rejoined_with_newline() {
        assert_eq!(strip_comments("a // x\r\nb\r\n"), "a \nb");
    }

    #[test]
    fn comment_marker_inside_quotes_still_truncates() {
        assert_eq!(strip_line(r#"name = "http://host""#), r#"name = "http:"#);
    }
}
