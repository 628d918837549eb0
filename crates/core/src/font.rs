//! Built-in 8x8 font.
//!
//! The sheet is 128x48 pixels: 16 columns by 6 rows of glyphs covering
//! ASCII 32..=127. Each group of four characters in the encoded data holds
//! 24 bits (6 bits per character, offset by 48) filling pixels column by
//! column.

use crate::sprite::Sprite;
use crate::types::{Pixel, GLYPH_SIZE};

/// Width of the font sheet in pixels.
pub const FONT_SHEET_WIDTH: i32 = 128;

/// Height of the font sheet in pixels.
pub const FONT_SHEET_HEIGHT: i32 = 48;

/// First character with a glyph.
pub const FIRST_GLYPH: char = ' ';

/// Last character with a glyph.
pub const LAST_GLYPH: char = '\u{7f}';

const FONT_DATA: &str = "?Q`0001oOch0o01o@F40o0<AGD4090LAGD<090@A7ch0?00O7Q`0600>00000000\
    O000000nOT0063Qo4d8>?7a14Gno94AA4gno94AaOT0>o3`oO400o7QN00000400\
    Of80001oOg<7O7moBGT7O7lABET024@aBEd714AiOdl717a_=TH013Q>00000000\
    720D000V?V5oB3Q_HdUoE7a9@DdDE4A9@DmoE4A;Hg]oM4Aj8S4D84@`00000000\
    OaPT1000Oa`^13P1@AI[?g`1@A=[OdAoHgljA4Ao?WlBA7l1710007l100000000\
    ObM6000oOfMV?3QoBDD`O7a0BDDH@5A0BDD<@5A0BGeVO5ao@CQR?5Po00000000\
    Oc``000?Ogij70PO2D]??0Ph2DUM@7i`2DTg@7lh2GUj?0TO0C1870T?00000000\
    70<4001o?P<7?1QoHg43O;`h@GT0@:@LB@d0>:@hN@L0@?aoN@<0O7ao0000?000\
    OcH0001SOglLA7mg24TnK7ln24US>0PL24U140PnOgl0>7QgOcH0K71S0000A000\
    00H00000@Dm1S007@DUSg00?OdTnH7YhOfTL<7Yh@Cl0700?@Ah0300700000000\
    <008001QL00ZA41a@6HnI<1i@FHLM81M@@0LG81?O`0nC?Y7?`0ZA7Y300080000\
    O`082000Oh0827mo6>Hn?Wmo?6HnMb11MP08@C11H`08@FP0@@0004@000000000\
    00P00001Oab00003OcKP0006@6=PMgl<@440MglH@000000`@000001P00000000\
    Ob@8@@00Ob@8@Ga13R@8Mga172@8?PAo3R@827QoOb@820@0O`0007`0000007P0\
    O`000P08Od400g`<3V=P0G`673IP0`@3>1`00P@6O`P00g`<O`000GP800000000\
    ?P9PL020O`<`N3R0@E4HC7b0@ET<ATB0@@l6C4B0O`H3N7b0?P01L3R000000020";

/// Decodes the built-in font into a sheet sprite.
///
/// Set pixels are opaque white, unset pixels are fully transparent black.
pub fn load_font() -> Sprite {
    let mut sprite = Sprite::new(FONT_SHEET_WIDTH, FONT_SHEET_HEIGHT);
    let data = FONT_DATA.as_bytes();

    let mut px = 0;
    let mut py = 0;

    for chunk in data.chunks_exact(4) {
        let sym = |i: usize| (chunk[i] as u32).wrapping_sub(48);
        let r = sym(0) << 18 | sym(1) << 12 | sym(2) << 6 | sym(3);

        for i in 0..24 {
            let k = if r & (1 << i) != 0 { 255 } else { 0 };
            sprite.set_pixel(px, py, Pixel::rgba(k, k, k, k));
            py += 1;
            if py == FONT_SHEET_HEIGHT {
                px += 1;
                py = 0;
            }
        }
    }

    sprite
}

/// Sheet origin of the glyph for `c`, or `None` when the font has no glyph.
#[inline]
pub fn glyph_origin(c: char) -> Option<(i32, i32)> {
    if !(FIRST_GLYPH..=LAST_GLYPH).contains(&c) {
        return None;
    }
    let index = c as i32 - FIRST_GLYPH as i32;
    Some(((index % 16) * GLYPH_SIZE, (index / 16) * GLYPH_SIZE))
}

/// Validates that a sprite can be used as a font sheet.
pub fn is_font_sheet(sprite: &Sprite) -> bool {
    sprite.width() >= FONT_SHEET_WIDTH && sprite.height() >= FONT_SHEET_HEIGHT
}
