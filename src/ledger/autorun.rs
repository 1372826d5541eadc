//! The auto-run ledger: one `COPY E,"f" ,F,"f"` line per bitmap to
//! transfer from the external drive to printer flash at boot.

use regex::Regex;
use std::sync::OnceLock;

use super::text::line_ending;

/// The copy directive for `file_name`, without indentation or terminator.
pub fn copy_directive(file_name: &str) -> String {
    format!("COPY E,\"{file_name}\" ,F,\"{file_name}\"")
}

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"COPY E,".*?" ,F,".*?""#).expect("valid regex"))
}

/// Add the copy directive for `file_name`.
///
/// Returns `None` when the exact directive is already present. Otherwise the
/// new line goes right after the line holding the last existing directive,
/// reusing that line's indentation and terminator; with no directive at all
/// it is appended at the end.
pub fn add_copy_directive(ledger: &str, file_name: &str) -> Option<String> {
    let directive = copy_directive(file_name);
    if ledger.contains(&directive) {
        return None;
    }

    let eol = line_ending(ledger);
    let Some(last) = directive_regex().find_iter(ledger).last() else {
        let mut out = ledger.to_string();
        out.push_str(eol);
        out.push_str(&directive);
        out.push_str(eol);
        return Some(out);
    };

    let line_start = ledger[..last.start()].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = ledger[line_start..last.start()]
        .chars()
        .take_while(|c| c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(ledger.len() + directive.len() + 8);
    match ledger[last.end()..].find('\n') {
        Some(offset) => {
            let insert_at = last.end() + offset + 1;
            let terminator = if ledger[..insert_at].ends_with("\r\n") {
                "\r\n"
            } else {
                "\n"
            };
            out.push_str(&ledger[..insert_at]);
            out.push_str(&indent);
            out.push_str(&directive);
            out.push_str(terminator);
            out.push_str(&ledger[insert_at..]);
        }
        None => {
            out.push_str(ledger);
            out.push_str(eol);
            out.push_str(&indent);
            out.push_str(&directive);
        }
    }

    Some(out)
}

/// Remove every line referencing `file_name` in a copy directive.
///
/// Matching is case-insensitive on `copy e,"<file_name>"`. Returns `None`
/// when no line matched.
pub fn remove_copy_directive(ledger: &str, file_name: &str) -> Option<String> {
    let needle = format!("copy e,\"{}\"", file_name.to_lowercase());
    let eol = line_ending(ledger);

    let lines: Vec<&str> = ledger
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| !line.to_lowercase().contains(&needle))
        .collect();

    if kept.len() == lines.len() {
        return None;
    }
    Some(kept.join(eol))
}
