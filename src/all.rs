// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! A list of all built-in graphic sets and right-hand-side tables.

use encoding_index_singlebyte as singlebyte;
use crate::registry::{GraphicSet, RhsTable, Dimension, Forward};
use crate::codec;
use crate::index::ibm_pc;

macro_rules! graphic_set(
    ($(#[$attr:meta])* var=$var:ident, dim=$dim:ident, bytes=$bytes:expr, forward=$forward:path) => (
        $(#[$attr])*
        pub static $var: GraphicSet = GraphicSet {
            dimension: Dimension::$dim,
            bytes: $bytes,
            forward: $forward,
        };
    )
);

macro_rules! upper_half_set(
    ($(#[$attr:meta])* var=$var:ident, mod=$module:ident) => (
        $(#[$attr])*
        pub static $var: GraphicSet = GraphicSet {
            dimension: Dimension::Cells96,
            bytes: 1,
            forward: {
                fn forward(index: u32) -> Forward {
                    if index >= 96 { return Forward::Unmapped; }
                    match singlebyte::$module::forward(0xa0 + index as u8) {
                        0xffff => Forward::Unmapped,
                        ch => Forward::Char(ch as u32),
                    }
                }
                forward
            },
        };
    )
);

macro_rules! rhs_table(
    (var=$var:ident, forward=$forward:path) => (
        pub static $var: RhsTable = RhsTable { forward: $forward };
    )
);

fn ascii(index: u32) -> Forward {
    if index < 94 { Forward::Char(0x21 + index) } else { Forward::Unmapped }
}

fn iso646_uk(index: u32) -> Forward {
    match index {
        0x02 => Forward::Char(0xa3),
        _ => ascii(index),
    }
}

fn jis_roman(index: u32) -> Forward {
    match index {
        0x3b => Forward::Char(0xa5),
        0x5d => Forward::Char(0x203e),
        _ => ascii(index),
    }
}

fn jis_katakana(index: u32) -> Forward {
    if index < 63 { Forward::Char(0xff61 + index) } else { Forward::Unmapped }
}

// two extra positions reached from Shift_JIS bytes 0x80 and 0xA0
fn jis_katakana_mac(index: u32) -> Forward {
    match index {
        63 => Forward::Char(0x5c),
        64 => Forward::Char(0xa0),
        _ => jis_katakana(index),
    }
}

fn latin1_upper(index: u32) -> Forward {
    if index < 96 { Forward::Char(0xa0 + index) } else { Forward::Unmapped }
}

fn latin1_rhs(code: u8) -> u16 {
    if code >= 0xa0 { code as u16 } else { 0xffff }
}

graphic_set!(
    /// ASCII (ISO-IR 6).
    var=IR006, dim=Cells94, bytes=1, forward=ascii);
graphic_set!(
    /// The British version of ISO 646 (ISO-IR 4).
    var=IR004, dim=Cells94, bytes=1, forward=iso646_uk);
graphic_set!(
    /// JIS X 0201 Roman (ISO-IR 14).
    var=IR014, dim=Cells94, bytes=1, forward=jis_roman);
graphic_set!(
    /// JIS X 0201 Katakana (ISO-IR 13).
    var=IR013, dim=Cells94, bytes=1, forward=jis_katakana);
graphic_set!(
    /// JIS X 0201 Katakana with the backslash and no-break space of Mac OS Japanese.
    var=JIS_KATAKANA_MAC, dim=Cells94, bytes=1, forward=jis_katakana_mac);
graphic_set!(
    /// JIS X 0208 (ISO-IR 87), with the vendor extensions in the unassigned rows.
    var=IR087, dim=Cells94, bytes=2, forward=codec::japanese::jisx0208);
graphic_set!(
    /// JIS X 0212 (ISO-IR 159).
    var=IR159, dim=Cells94, bytes=2, forward=codec::japanese::jisx0212);
graphic_set!(
    /// The user-defined area of Windows code page 932, as reached from Shift_JIS rows 95 and up.
    var=SJIS_EUDC, dim=Cells94, bytes=2, forward=codec::japanese::eudc);
graphic_set!(
    /// KS X 1001 (ISO-IR 149).
    var=IR149, dim=Cells94, bytes=2, forward=codec::euc::ksx1001);
graphic_set!(
    /// GB 2312 (ISO-IR 58).
    var=IR058, dim=Cells94, bytes=2, forward=codec::euc::gb2312);
graphic_set!(
    /// Unified Hangul Code extension, indexed by `lead << 8 | trail`.
    var=UHC_EXT, dim=Raw, bytes=2, forward=codec::euc::uhc_extension);
graphic_set!(
    /// GBK extension, indexed by `lead << 8 | trail`.
    var=GBK_EXT, dim=Raw, bytes=2, forward=codec::euc::gbk_extension);
graphic_set!(
    /// Big Five lead bytes 0xA1 to 0xC6.
    var=BIG5_1, dim=Cells94, bytes=2, forward=codec::tradchinese::plane1);
graphic_set!(
    /// Big Five lead bytes 0xC7 to 0xF9.
    var=BIG5_2, dim=Cells94, bytes=2, forward=codec::tradchinese::plane2);
graphic_set!(
    /// Big Five lead bytes 0x81 to 0xA0 and 0xFA to 0xFE.
    var=BIG5_X, dim=Cells94, bytes=2, forward=codec::tradchinese::extension_plane);
graphic_set!(
    /// The right-hand part of ISO 8859-1 (ISO-IR 100).
    var=IR100, dim=Cells96, bytes=1, forward=latin1_upper);
upper_half_set!(
    /// The right-hand part of ISO 8859-2 (ISO-IR 101).
    var=IR101, mod=iso_8859_2);
upper_half_set!(
    /// The right-hand part of ISO 8859-3 (ISO-IR 109).
    var=IR109, mod=iso_8859_3);
upper_half_set!(
    /// The right-hand part of ISO 8859-4 (ISO-IR 110).
    var=IR110, mod=iso_8859_4);
upper_half_set!(
    /// The right-hand part of ISO 8859-5 (ISO-IR 144).
    var=IR144, mod=iso_8859_5);
upper_half_set!(
    /// The right-hand part of ISO 8859-6 (ISO-IR 127).
    var=IR127, mod=iso_8859_6);
upper_half_set!(
    /// The right-hand part of ISO 8859-7 (ISO-IR 126).
    var=IR126, mod=iso_8859_7);
upper_half_set!(
    /// The right-hand part of ISO 8859-8 (ISO-IR 138).
    var=IR138, mod=iso_8859_8);
upper_half_set!(
    /// The right-hand part of ISO 8859-10 (ISO-IR 157).
    var=IR157, mod=iso_8859_10);
upper_half_set!(
    /// The right-hand part of ISO 8859-13 (ISO-IR 179).
    var=IR179, mod=iso_8859_13);
upper_half_set!(
    /// The right-hand part of ISO 8859-14 (ISO-IR 199).
    var=IR199, mod=iso_8859_14);
upper_half_set!(
    /// The right-hand part of ISO 8859-15 (ISO-IR 203).
    var=IR203, mod=iso_8859_15);
upper_half_set!(
    /// The right-hand part of ISO 8859-16 (ISO-IR 226).
    var=IR226, mod=iso_8859_16);

rhs_table!(var=ISO_8859_1, forward=latin1_rhs);
rhs_table!(var=ISO_8859_2, forward=singlebyte::iso_8859_2::forward);
rhs_table!(var=ISO_8859_3, forward=singlebyte::iso_8859_3::forward);
rhs_table!(var=ISO_8859_4, forward=singlebyte::iso_8859_4::forward);
rhs_table!(var=ISO_8859_5, forward=singlebyte::iso_8859_5::forward);
rhs_table!(var=ISO_8859_6, forward=singlebyte::iso_8859_6::forward);
rhs_table!(var=ISO_8859_7, forward=singlebyte::iso_8859_7::forward);
rhs_table!(var=ISO_8859_8, forward=singlebyte::iso_8859_8::forward);
rhs_table!(var=ISO_8859_10, forward=singlebyte::iso_8859_10::forward);
rhs_table!(var=ISO_8859_13, forward=singlebyte::iso_8859_13::forward);
rhs_table!(var=ISO_8859_14, forward=singlebyte::iso_8859_14::forward);
rhs_table!(var=ISO_8859_15, forward=singlebyte::iso_8859_15::forward);
rhs_table!(var=ISO_8859_16, forward=singlebyte::iso_8859_16::forward);
rhs_table!(var=IBM437, forward=ibm_pc::ibm437::forward);
rhs_table!(var=IBM850, forward=ibm_pc::ibm850::forward);
rhs_table!(var=IBM866, forward=singlebyte::ibm866::forward);
rhs_table!(var=KOI8_R, forward=singlebyte::koi8_r::forward);
rhs_table!(var=KOI8_U, forward=singlebyte::koi8_u::forward);
rhs_table!(var=MACINTOSH, forward=singlebyte::macintosh::forward);
rhs_table!(var=X_MAC_CYRILLIC, forward=singlebyte::x_mac_cyrillic::forward);
rhs_table!(var=WINDOWS_874, forward=singlebyte::windows_874::forward);
rhs_table!(var=WINDOWS_1250, forward=singlebyte::windows_1250::forward);
rhs_table!(var=WINDOWS_1251, forward=singlebyte::windows_1251::forward);
rhs_table!(var=WINDOWS_1252, forward=singlebyte::windows_1252::forward);
rhs_table!(var=WINDOWS_1253, forward=singlebyte::windows_1253::forward);
rhs_table!(var=WINDOWS_1254, forward=singlebyte::windows_1254::forward);
rhs_table!(var=WINDOWS_1255, forward=singlebyte::windows_1255::forward);
rhs_table!(var=WINDOWS_1256, forward=singlebyte::windows_1256::forward);
rhs_table!(var=WINDOWS_1257, forward=singlebyte::windows_1257::forward);
rhs_table!(var=WINDOWS_1258, forward=singlebyte::windows_1258::forward);

/// Returns a built-in graphic set by its identifier.
pub fn graphic_set(id: &str) -> Option<&'static GraphicSet> {
    let set = match id {
        "ir006" => &IR006,
        "ir004" => &IR004,
        "ir014" => &IR014,
        "ir013" => &IR013,
        "ir013-mac" => &JIS_KATAKANA_MAC,
        "ir087" => &IR087,
        "ir159" => &IR159,
        "sjis-eudc" => &SJIS_EUDC,
        "ir149" => &IR149,
        "ir058" => &IR058,
        "uhc-ext" => &UHC_EXT,
        "gbk-ext" => &GBK_EXT,
        "big5-1" => &BIG5_1,
        "big5-2" => &BIG5_2,
        "big5-x" => &BIG5_X,
        "ir100" => &IR100,
        "ir101" => &IR101,
        "ir109" => &IR109,
        "ir110" => &IR110,
        "ir144" => &IR144,
        "ir127" => &IR127,
        "ir126" => &IR126,
        "ir138" => &IR138,
        "ir157" => &IR157,
        "ir179" => &IR179,
        "ir199" => &IR199,
        "ir203" => &IR203,
        "ir226" => &IR226,
        _ => return None,
    };
    Some(set)
}

/// Returns a built-in right-hand-side table by its identifier.
pub fn rhs_table(id: &str) -> Option<&'static RhsTable> {
    let table = match id {
        "iso-8859-1" => &ISO_8859_1,
        "iso-8859-2" => &ISO_8859_2,
        "iso-8859-3" => &ISO_8859_3,
        "iso-8859-4" => &ISO_8859_4,
        "iso-8859-5" => &ISO_8859_5,
        "iso-8859-6" => &ISO_8859_6,
        "iso-8859-7" => &ISO_8859_7,
        "iso-8859-8" => &ISO_8859_8,
        "iso-8859-10" => &ISO_8859_10,
        "iso-8859-13" => &ISO_8859_13,
        "iso-8859-14" => &ISO_8859_14,
        "iso-8859-15" => &ISO_8859_15,
        "iso-8859-16" => &ISO_8859_16,
        "ibm437" => &IBM437,
        "ibm850" => &IBM850,
        "ibm866" => &IBM866,
        "koi8-r" => &KOI8_R,
        "koi8-u" => &KOI8_U,
        "macintosh" => &MACINTOSH,
        "x-mac-cyrillic" => &X_MAC_CYRILLIC,
        "windows-874" => &WINDOWS_874,
        "windows-1250" => &WINDOWS_1250,
        "windows-1251" => &WINDOWS_1251,
        "windows-1252" => &WINDOWS_1252,
        "windows-1253" => &WINDOWS_1253,
        "windows-1254" => &WINDOWS_1254,
        "windows-1255" => &WINDOWS_1255,
        "windows-1256" => &WINDOWS_1256,
        "windows-1257" => &WINDOWS_1257,
        "windows-1258" => &WINDOWS_1258,
        _ => return None,
    };
    Some(table)
}

/// Returns the identifier of the set designated by a final byte, if known.
pub fn set_for_final(kind: crate::types::SetKind, final_byte: u8) -> Option<&'static str> {
    use crate::types::SetKind::*;
    let id = match (kind, final_byte) {
        (Cells94, b'A') => "ir004",
        (Cells94, b'B') => "ir006",
        (Cells94, b'I') => "ir013",
        (Cells94, b'J') => "ir014",
        (Cells96, b'A') => "ir100",
        (Cells96, b'B') => "ir101",
        (Cells96, b'C') => "ir109",
        (Cells96, b'D') => "ir110",
        (Cells96, b'F') => "ir126",
        (Cells96, b'G') => "ir127",
        (Cells96, b'H') => "ir138",
        (Cells96, b'L') => "ir144",
        (Cells96, b'V') => "ir157",
        (Cells96, b'Y') => "ir179",
        (Cells96, b'_') => "ir199",
        (Cells96, b'b') => "ir203",
        (Cells96, b'f') => "ir226",
        (Multi94, b'A') => "ir058",
        (Multi94, b'B') => "ir087",
        (Multi94, b'C') => "ir149",
        (Multi94, b'D') => "ir159",
        _ => return None,
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso646() {
        assert_eq!(IR006.lookup(&[0x5c]), Some(vec![0x5c]));
        assert_eq!(IR004.lookup(&[0x23]), Some(vec![0xa3]));
        assert_eq!(IR014.lookup(&[0x5c]), Some(vec![0xa5]));
        assert_eq!(IR014.lookup(&[0x7e]), Some(vec![0x203e]));
        assert_eq!(IR013.lookup(&[0x21]), Some(vec![0xff61]));
        assert_eq!(IR013.lookup(&[0x5f]), Some(vec![0xff9f]));
        assert_eq!(IR013.lookup(&[0x60]), None);
        assert_eq!(JIS_KATAKANA_MAC.lookup(&[0x60]), Some(vec![0x5c]));
        assert_eq!(JIS_KATAKANA_MAC.lookup(&[0x61]), Some(vec![0xa0]));
    }

    #[test]
    fn test_upper_halves() {
        assert_eq!(IR100.lookup(&[0x20]), Some(vec![0xa0]));
        assert_eq!(IR100.lookup(&[0x69]), Some(vec![0xe9]));
        assert_eq!(IR101.lookup(&[0x21]), Some(vec![0x104]));
        assert_eq!(IR144.lookup(&[0x30]), Some(vec![0x410]));
        assert_eq!(IR203.lookup(&[0x24]), Some(vec![0x20ac]));
    }

    #[test]
    fn test_every_final_is_registered() {
        use crate::types::SetKind::*;
        for &kind in &[Cells94, Cells96, Multi94, Multi96] {
            for final_byte in 0x30..0x7f {
                if let Some(id) = set_for_final(kind, final_byte) {
                    let set = graphic_set(id).unwrap();
                    assert_eq!(set.kind(), kind, "{}", id);
                }
            }
        }
    }
}
