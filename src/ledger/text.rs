//! Line-oriented helpers shared by both ledgers.

/// The dominant line terminator of `text`: CRLF if any line uses it, LF otherwise.
pub fn line_ending(text: &str) -> &'static str {
    if text.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Rewrite every `\n` in `text` to `eol`, normalising existing CRLF first.
pub(crate) fn with_line_ending(text: &str, eol: &str) -> String {
    let normalised = text.replace("\r\n", "\n");
    if eol == "\n" {
        normalised
    } else {
        normalised.replace('\n', eol)
    }
}

/// Collapse blank-line runs left behind after deleting blocks.
///
/// A line holding only whitespace becomes an empty line, and any run of
/// consecutive empty lines becomes a single empty line. An unterminated
/// trailing fragment is kept as is.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_blank_run = false;

    for line in text.split_inclusive('\n') {
        let blank = line.ends_with('\n') && line.trim().is_empty();
        if !blank {
            out.push_str(line);
            in_blank_run = false;
        } else if !in_blank_run {
            out.push_str(if line.ends_with("\r\n") { "\r\n" } else { "\n" });
            in_blank_run = true;
        }
    }

    out
}
