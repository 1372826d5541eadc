//! Printer script ledgers.
//!
//! Two flat text files on the printer side reference the template bitmaps:
//!
//! - the program ledger (`Prog_Gestmag.BAS`) holds one `.BAS` print block and
//!   one `.INI` block per template code, each closed by `EOP`;
//! - the auto-run ledger (`AUTO.BAS`) holds one `COPY E,... ,F,...` line per
//!   bitmap file.
//!
//! Everything in this module is a pure transform over whole-file text. Reading
//! and writing the files is the caller's job (see `services::TemplateStore`).

pub mod autorun;
pub mod program;
pub mod text;

pub use autorun::{add_copy_directive, copy_directive, remove_copy_directive};
pub use program::{
    init_block, program_block, recorded_placements, remove_block, upsert_block, BlockKind,
    RecordedPlacement, SENTINEL,
};
pub use text::{collapse_blank_lines, line_ending};
