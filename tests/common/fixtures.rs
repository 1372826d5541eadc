//! Test fixtures and constants.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

pub const PROGRAM_LEDGER_NAME: &str = "Prog_Gestmag.BAS";
pub const AUTORUN_LEDGER_NAME: &str = "AUTO.BAS";
pub const MANUAL_NAME: &str = "manuel_brother_td4t.html";
pub const CATALOG_NAME: &str = "manuel_brother_td4t_generated.html";

/// Program ledger with a menu block and one existing template
pub const PROGRAM_LEDGER: &str = "\
DOWNLOAD F,\"MENU.BAS\"
\tINPUT \"Code\", qCode$
\tRUN qCode$ + \".BAS\"
EOP
DOWNLOAD F,\"BAR1.BAS\"
\tqTphDpi$ = GETSETTING$(\"SYSTEM\",\"INFORMATION\",\"DPI\")
\tIF qTphDpi$ = \"203\" THEN
        SIZE 46 mm, 46 mm
        DIRECTION 1
        CLS
        PUTBMP 8, 30, \"bar1.bmp\", 1
        PRINT VAL(qQty$)
    ENDIF
EOP
DOWNLOAD F,\"BAR1.INI\"
REM - CROPTOP = 12
EOP
";

/// Auto-run ledger as written by the printer tool (CRLF)
pub const AUTORUN_LEDGER: &str = "REM AUTO\r\n\tCOPY E,\"Logo_GM.bmp\" ,F,\"Logo_GM.bmp\"\r\n\tCOPY E,\"bar1.bmp\" ,F,\"bar1.bmp\"\r\nRUN \"MENU.BAS\"\r\n";

pub const MANUAL: &str = "<!DOCTYPE html>
<html>
<body>
    <div class=\"container\">
        <h1>Manuel Brother TD-4T</h1>
        <h2>📊 Catalogue des Templates (42 modèles disponibles)</h2>
        <p>outdated</p>
";

/// Solid black PNG
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Solid black PNG as the editor sends it
pub fn png_data_url(width: u32, height: u32) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png(width, height)))
}

/// `data:` URL as the editor builds it
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// PNG of pseudo-random colours; compresses badly, like a photo
pub fn noise_png(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x9E37_79B9;
    let img = RgbaImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        Rgba([r, g, b, 255])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Checkerboard of `cell`-sized squares, black first
pub fn checkerboard(width: u32, height: u32, cell: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    }))
}
