//! The program ledger: `.BAS` print blocks and `.INI` crop blocks per code.
//!
//! A block starts at its opening marker, `DOWNLOAD F,"<CODE>.BAS"` or
//! `DOWNLOAD F,"<CODE>.INI"`, and ends at the next `EOP` sentinel.
//! For any code, the ledger holds at most one block of each kind.

use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::OnceLock;

use super::text::{collapse_blank_lines, line_ending, with_line_ending};

/// End-of-block sentinel closing every block.
pub const SENTINEL: &str = "EOP";

/// The two block types stored per template code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `.BAS` block: the print program placing the bitmap.
    Program,
    /// `.INI` block: records the crop applied to the source image.
    Init,
}

impl BlockKind {
    pub const ALL: [BlockKind; 2] = [BlockKind::Program, BlockKind::Init];

    pub fn suffix(self) -> &'static str {
        match self {
            BlockKind::Program => "BAS",
            BlockKind::Init => "INI",
        }
    }

    /// Opening marker line of this block type for `code`.
    pub fn marker(self, code: &str) -> String {
        format!("DOWNLOAD F,\"{code}.{}\"", self.suffix())
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        if suffix.eq_ignore_ascii_case("BAS") {
            Some(BlockKind::Program)
        } else if suffix.eq_ignore_ascii_case("INI") {
            Some(BlockKind::Init)
        } else {
            None
        }
    }
}

/// Placement values found in the ledger for one code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordedPlacement {
    /// `PUTBMP x, y` from the program block.
    pub position: Option<(u32, u32)>,
    /// `REM - CROPTOP = n` from the init block.
    pub crop_top: Option<u32>,
}

/// Render the `.BAS` print block for `code`.
pub fn program_block(code: &str, position_x: u32, position_y: u32) -> String {
    let file_name = format!("{}.bmp", code.to_lowercase());
    format!(
        "{marker}\n\
         \tqTphDpi$ = GETSETTING$(\"SYSTEM\",\"INFORMATION\",\"DPI\")\n\
         \tIF qTphDpi$ = \"203\" THEN\n\
         \x20       SIZE 46 mm, 46 mm\n\
         \x20       DIRECTION 1\n\
         \x20       CLS\n\
         \x20       PUTBMP {position_x}, {position_y}, \"{file_name}\", 1\n\
         \x20       PRINT VAL(qQty$)\n\
         \x20   ENDIF\n\
         {SENTINEL}",
        marker = BlockKind::Program.marker(code),
    )
}

/// Render the `.INI` block recording the crop for `code`.
pub fn init_block(code: &str, crop_top: u32) -> String {
    format!(
        "{}\nREM - CROPTOP = {crop_top}\n{SENTINEL}",
        BlockKind::Init.marker(code)
    )
}

/// Byte ranges of every `marker ... EOP` span, leftmost first, non-overlapping.
fn block_spans(text: &str, marker: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(marker) {
        let start = pos + found;
        let body_start = start + marker.len();
        let Some(sentinel) = sentinel_regex().find(&text[body_start..]) else {
            break;
        };
        let end = body_start + sentinel.end();
        spans.push(start..end);
        pos = end;
    }

    spans
}

fn strip_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for span in spans {
        out.push_str(&text[last..span.start]);
        last = span.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Delete every program block, then every init block, keyed by `code`.
fn strip_code_blocks(text: &str, code: &str) -> String {
    BlockKind::ALL.iter().fold(text.to_string(), |acc, kind| {
        let spans = block_spans(&acc, &kind.marker(code));
        if spans.is_empty() {
            acc
        } else {
            strip_spans(&acc, &spans)
        }
    })
}

/// Insert or replace the block pair for `code`.
///
/// If a program block for `code` already exists, every block of either kind
/// for `code` is removed and blank-line runs are collapsed first. The new
/// program and init blocks are then inserted right after the last line
/// holding only `EOP`, or appended when there is none.
pub fn upsert_block(ledger: &str, code: &str, program: &str, init: &str) -> String {
    let mut content = if ledger.contains(&BlockKind::Program.marker(code)) {
        collapse_blank_lines(&strip_code_blocks(ledger, code))
    } else {
        ledger.to_string()
    };

    let insertion = with_line_ending(
        &format!("\n{program}\n{init}\n"),
        line_ending(&content),
    );

    match last_sentinel_end(&content) {
        Some(idx) => content.insert_str(idx, &insertion),
        None => content.push_str(&insertion),
    }

    content
}

/// Byte offset just past the last `EOP` standing alone on its line.
fn last_sentinel_end(text: &str) -> Option<usize> {
    let mut found = None;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\r', '\n']);
        if content.trim() == SENTINEL {
            if let Some(idx) = content.find(SENTINEL) {
                found = Some(offset + idx + SENTINEL.len());
            }
        }
        offset += line.len();
    }

    found
}

/// Remove every block keyed by `code`.
///
/// Returns the input untouched (`Cow::Borrowed`) when `code` does not appear
/// anywhere in the ledger.
pub fn remove_block<'a>(ledger: &'a str, code: &str) -> Cow<'a, str> {
    if !ledger.contains(code) {
        return Cow::Borrowed(ledger);
    }
    Cow::Owned(collapse_blank_lines(&strip_code_blocks(ledger, code)))
}

fn opening_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)DOWNLOAD\s+F\s*,\s*"([^"\r\n]*)\.(BAS|INI)""#).expect("valid regex")
    })
}

fn sentinel_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bEOP\b").expect("valid regex"))
}

fn putbmp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)PUTBMP\s+(\d+)\s*,\s*(\d+)").expect("valid regex"))
}

fn croptop_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)REM\s*-\s*CROPTOP\s*=\s*(\d+)").expect("valid regex"))
}

/// A parsed block: the code as written, its kind and the text between the
/// opening marker and the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub code: &'a str,
    pub kind: BlockKind,
    pub body: &'a str,
}

/// Parse every block in the ledger, in file order.
///
/// A block body stops at its `EOP`, or at the next opening marker when the
/// sentinel is missing, so one block never reads values from the next.
pub fn blocks(text: &str) -> Vec<Block<'_>> {
    let openings: Vec<_> = opening_regex().captures_iter(text).collect();

    openings
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let code = caps.get(1)?.as_str();
            let kind = BlockKind::from_suffix(caps.get(2)?.as_str())?;

            let limit = openings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            let rest = &text[whole.end()..limit];
            let body = match sentinel_regex().find(rest) {
                Some(m) => &rest[..m.start()],
                None => rest,
            };

            Some(Block { code, kind, body })
        })
        .collect()
}

/// Positions and crop values recorded in the ledger, keyed by uppercase code.
pub fn recorded_placements(text: &str) -> BTreeMap<String, RecordedPlacement> {
    let mut placements: BTreeMap<String, RecordedPlacement> = BTreeMap::new();

    for block in blocks(text) {
        let key = block.code.to_uppercase();
        match block.kind {
            BlockKind::Program => {
                let position = putbmp_regex().captures(block.body).and_then(|caps| {
                    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
                });
                if let Some(position) = position {
                    placements.entry(key).or_default().position = Some(position);
                }
            }
            BlockKind::Init => {
                let crop = croptop_regex()
                    .captures(block.body)
                    .and_then(|caps| caps[1].parse().ok());
                if let Some(crop) = crop {
                    placements.entry(key).or_default().crop_top = Some(crop);
                }
            }
        }
    }

    placements
}
