// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Legacy Japanese encodings based on JIS X 0208 and JIS X 0212.

use encoding_index_japanese as index;
use crate::types::{Token, DecodeError, Register, Area, Subarea};
use crate::registry::Forward;
use crate::util::{Filter, Context};
use crate::control;

/// JIS X 0208, indexed by `(row - 1) * 94 + (cell - 1)`.
pub fn jisx0208(index: u32) -> Forward {
    if index >= 94 * 94 { return Forward::Unmapped; }
    Forward::from_index(index::jis0208::forward(index as u16))
}

/// JIS X 0212, indexed by `(row - 1) * 94 + (cell - 1)`.
pub fn jisx0212(index: u32) -> Forward {
    if index >= 94 * 94 { return Forward::Unmapped; }
    Forward::from_index(index::jis0212::forward(index as u16))
}

/// Rows of the second plane reached from Shift_JIS rows 95 and up, in order.
/// Odd and even rows alternate just like in the first plane.
static PLANE2_ROWS: [u8; 26] = [
    1, 8, 3, 4, 5, 12, 13, 14, 15,
    78, 79, 80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94,
];

/// The user-defined area of Windows code page 932 (lead bytes 0xF0 to 0xF9),
/// in the layout of the second plane.
pub fn eudc(index: u32) -> Forward {
    let row = index / 94 + 1;
    let cell = index % 94;
    match PLANE2_ROWS.iter().position(|&r| r as u32 == row) {
        Some(k) if k < 20 => Forward::Char(0xe000 + k as u32 * 94 + cell),
        _ => Forward::Unmapped,
    }
}

/**
 * Shift_JIS.
 *
 * The single-byte part reads through G0 (JIS-Roman) and G2 (half-width katakana),
 * and double-byte codes are converted back to JIS rows and cells.
 * Rows 1 to 94 are addressed to G1, and rows from 95 to G3 as the second plane.
 * 0x80 and 0xA0 follow the Mac OS extension, as the backslash and the no-break space.
 */
#[derive(Clone, Debug, Default)]
pub struct ShiftJisFilter {
    lead: Option<u8>,
}

impl ShiftJisFilter {
    pub fn new() -> ShiftJisFilter {
        ShiftJisFilter { lead: None }
    }

    fn pair(&self, lead: u8, trail: u8, ctx: &mut Context) {
        let lead_offset = lead - if lead < 0xa0 { 0x81 } else { 0xc1 };
        let trail_offset = trail - if trail < 0x7f { 0x40 } else { 0x41 };
        let pointer = lead_offset as usize * 188 + trail_offset as usize;
        let row = pointer / 94 + 1;
        let cell = (pointer % 94 + 1) as u8;

        let token = if row <= 94 {
            ctx.direct(Register::G1, vec![row as u8 + 0x20, cell + 0x20], Area::GR)
        } else {
            match PLANE2_ROWS.get(row - 95) {
                Some(&row) => ctx.direct(Register::G3, vec![row + 0x20, cell + 0x20], Area::GR),
                None => Token::CharLookupMiss {
                    set: ctx.state.set_in(Register::G3).unwrap_or("").to_string(),
                    code: vec![lead, trail], area: Area::GR, subarea: Subarea::Direct(Register::G3),
                },
            }
        };
        ctx.emit(token);
    }
}

impl Filter for ShiftJisFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let byte = match token {
            Token::Word(byte) => byte,
            token => match self.lead.take() {
                Some(lead) => return ctx.backup_and_err(token, DecodeError::SjisTruncate(vec![lead])),
                None => return ctx.emit(token),
            },
        };

        if let Some(lead) = self.lead.take() {
            match byte {
                0x40..=0x7e | 0x80..=0xfc => self.pair(lead, byte, ctx),
                _ => ctx.backup_and_err(Token::Word(byte), DecodeError::SjisTruncate(vec![lead])),
            }
            return;
        }

        match byte {
            0x00..=0x1f => {
                let token = control::c0(byte, ctx.state.active_c0);
                ctx.emit(token);
            }
            0x20..=0x7f => ctx.emit_left(byte),
            0x80 | 0xa0..=0xdf => {
                let position = match byte {
                    0x80 => 0x60,
                    0xa0 => 0x61,
                    _ => byte - 0x80,
                };
                let token = ctx.direct(Register::G2, vec![position], Area::GR);
                ctx.emit(token);
            }
            0x81..=0x9f | 0xe0..=0xfd => self.lead = Some(byte),
            _ => ctx.err(DecodeError::SjisUnusedByte(byte)),
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        if let Some(lead) = self.lead.take() {
            ctx.err(DecodeError::SjisTruncate(vec![lead]));
        }
    }
}

#[cfg(test)]
mod shift_jis_tests {
    use super::*;
    use crate::types::Mode;
    use crate::testutils::{Tester, words, graph};

    #[test]
    fn test_forward() {
        assert_eq!(jisx0208(15 * 94), Forward::Char(0x4e9c));
        assert_eq!(jisx0208(94 * 94), Forward::Unmapped);
        assert_eq!(eudc(0), Forward::Char(0xe000));
        // row 8 of the second plane is the second row of the user-defined area
        assert_eq!(eudc(7 * 94), Forward::Char(0xe000 + 94));
        assert_eq!(eudc(1 * 94), Forward::Unmapped);
    }

    #[test]
    fn test_row_and_cell() {
        let mut t = Tester::in_mode(ShiftJisFilter::new(), Mode::ShiftJis);
        // ((0x82 - 0x81) * 94 * 2) + (0x4f - 0x40) is row 3, cell 16
        assert_feed!(t, words(&[0x82, 0x4f]),
                     vec![graph("ir087", &[0x23, 0x30], Area::GR, Subarea::Direct(Register::G1))]);
        assert_feed!(t, words(&[0xf0, 0x40]),
                     vec![graph("sjis-eudc", &[0x21, 0x21], Area::GR, Subarea::Direct(Register::G3))]);
        assert_feed!(t, words(&[0xfd, 0x40]),
                     vec![Token::CharLookupMiss { set: "sjis-eudc".to_string(), code: vec![0xfd, 0x40],
                                                  area: Area::GR,
                                                  subarea: Subarea::Direct(Register::G3) }]);
        assert_finish!(t, vec![]);
    }

    #[test]
    fn test_single_bytes() {
        let mut t = Tester::in_mode(ShiftJisFilter::new(), Mode::ShiftJis);
        assert_feed!(t, words(&[0x41, 0x80, 0xa0, 0xa1]),
                     vec![graph("ir014", &[0x41], Area::GL, Subarea::Direct(Register::G0)),
                          graph("ir013-mac", &[0x60], Area::GR, Subarea::Direct(Register::G2)),
                          graph("ir013-mac", &[0x61], Area::GR, Subarea::Direct(Register::G2)),
                          graph("ir013-mac", &[0x21], Area::GR, Subarea::Direct(Register::G2))]);
        assert_feed!(t, words(&[0xfe, 0xff]),
                     vec![Token::Error(DecodeError::SjisUnusedByte(0xfe)),
                          Token::Error(DecodeError::SjisUnusedByte(0xff))]);
    }

    #[test]
    fn test_truncated() {
        let mut t = Tester::in_mode(ShiftJisFilter::new(), Mode::ShiftJis);
        assert_feed!(t, words(&[0x82, 0x0a]),
                     vec![Token::Error(DecodeError::SjisTruncate(vec![0x82])),
                          control::c0(0x0a, "ir001")]);
        assert_feed!(t, words(&[0x82, 0x7f, 0x82]),
                     vec![Token::Error(DecodeError::SjisTruncate(vec![0x82])),
                          control::delete(crate::types::Origin::Byte)]);
        assert_finish!(t, vec![Token::Error(DecodeError::SjisTruncate(vec![0x82]))]);
    }

    #[test]
    fn test_truncated_by_other_token() {
        let mut t = Tester::in_mode(ShiftJisFilter::new(), Mode::ShiftJis);
        assert_feed!(t, vec![Token::Word(0x93), Token::Chcp(932), Token::Word(0x41)],
                     vec![Token::Error(DecodeError::SjisTruncate(vec![0x93])), Token::Chcp(932),
                          graph("ir014", &[0x41], Area::GL, Subarea::Direct(Register::G0))]);
    }

    #[test]
    fn test_decode_valid() {
        assert_decode!(Mode::ShiftJis, [0x41, 0x42, 0x43], "ABC");
        assert_decode!(Mode::ShiftJis, [0x5c, 0x7e], "\u{a5}\u{203e}");
        assert_decode!(Mode::ShiftJis, [0x82, 0xc9, 0x82, 0xd9, 0x82, 0xf1], "\u{306b}\u{307b}\u{3093}");
        assert_decode!(Mode::ShiftJis, [0xc6, 0xce, 0xdd], "\u{ff86}\u{ff8e}\u{ff9d}");
        assert_decode!(Mode::ShiftJis, [0x93, 0xfa, 0x96, 0x7b], "\u{65e5}\u{672c}");
        assert_decode!(Mode::ShiftJis, [0x82, 0x4f], "\u{ff10}");
        assert_decode!(Mode::ShiftJis, [0x80, 0xa0], "\\\u{a0}");
        assert_decode!(Mode::ShiftJis, [0xf0, 0x40, 0xf9, 0xfc], "\u{e000}\u{e757}");
    }

    #[test]
    fn test_decode_invalid() {
        assert_decode!(Mode::ShiftJis, [0x82, 0x41], "\u{fffd}");
        assert_errors!(Mode::ShiftJis, [0x82, 0x20, 0x41],
                       vec![DecodeError::SjisTruncate(vec![0x82])]);
        assert_decode!(Mode::ShiftJis, [0x82, 0x20, 0x41], "\u{fffd} A");
        assert_decode!(Mode::ShiftJis, [0x82], "\u{fffd}");
    }
}
