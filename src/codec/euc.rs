// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Extended Unix Code, with the Korean and simplified Chinese extensions on top of it.

use encoding_index_korean as korean;
use encoding_index_simpchinese as simpchinese;
use crate::types::{Token, DecodeError, Register, Area, Subarea};
use crate::registry::Forward;
use crate::util::{Filter, Context};
use crate::control;

/// KS X 1001, indexed by `(row - 1) * 94 + (cell - 1)`.
pub fn ksx1001(index: u32) -> Forward {
    if index >= 94 * 94 { return Forward::Unmapped; }
    let pointer = (index / 94 + 0x20) * 190 + index % 94 + 0x60;
    Forward::from_index(korean::euc_kr::forward(pointer as u16))
}

/// GB 2312, indexed by `(row - 1) * 94 + (cell - 1)`.
pub fn gb2312(index: u32) -> Forward {
    if index >= 94 * 94 { return Forward::Unmapped; }
    let pointer = (index / 94 + 0x20) * 190 + index % 94 + 0x60;
    Forward::from_index(simpchinese::gb18030::forward(pointer as u16))
}

/// Unified Hangul Code, indexed by `lead << 8 | trail`.
pub fn uhc_extension(index: u32) -> Forward {
    let (lead, trail) = (index >> 8, index & 0xff);
    match (lead, trail) {
        (0x81..=0xfe, 0x41..=0xfe) =>
            Forward::from_index(korean::euc_kr::forward(((lead - 0x81) * 190 + trail - 0x41) as u16)),
        _ => Forward::Unmapped,
    }
}

/// GBK, indexed by `lead << 8 | trail`.
pub fn gbk_extension(index: u32) -> Forward {
    let (lead, trail) = (index >> 8, index & 0xff);
    let trail = match trail {
        0x40..=0x7e => trail - 0x40,
        0x80..=0xfe => trail - 0x41,
        _ => return Forward::Unmapped,
    };
    match lead {
        0x81..=0xfe =>
            Forward::from_index(simpchinese::gb18030::forward(((lead - 0x81) * 190 + trail) as u16)),
        _ => Forward::Unmapped,
    }
}

/**
 * Extended Unix Code, modified.
 *
 * GR is G1 which may be a single- or a double-byte set. SS2 and SS3 reach G2 and G3
 * with the bytes passed on to the invocation state.
 * When G4 holds an extension plane, every byte from 0x81 to 0xFE leads a pair,
 * and a pair which is not in G1 is looked up in G4 by its raw bytes.
 */
#[derive(Clone, Debug, Default)]
pub struct EucFilter {
    lead: Option<u8>,
    /// Bytes still to be passed on after a single shift.
    single: usize,
}

impl EucFilter {
    pub fn new() -> EucFilter {
        EucFilter { lead: None, single: 0 }
    }

    fn pair(&self, lead: u8, trail: u8, ctx: &mut Context) {
        let g1_multi = ctx.set_in(Register::G1).map_or(false, |(_, set)| set.bytes > 1);
        let has_g4 = ctx.state.set_in(Register::G4).is_some();
        let token = match (lead, trail) {
            (0xa1..=0xfe, 0xa1..=0xfe) if g1_multi =>
                ctx.direct(Register::G1, vec![lead - 0x80, trail - 0x80], Area::GR),
            (_, 0x40..=0x7e) | (_, 0x80..=0xfe) if has_g4 =>
                ctx.direct(Register::G4, vec![lead, trail], Area::GR),
            _ => return ctx.backup_and_err(Token::Word(trail), DecodeError::EucTruncate(vec![lead])),
        };
        ctx.emit(token);
    }

    fn right(&mut self, byte: u8, ctx: &mut Context) {
        let g1 = ctx.set_in(Register::G1).map(|(_, set)| set.bytes);
        match g1 {
            Some(1) => {
                let token = ctx.direct(Register::G1, vec![byte - 0x80], Area::GR);
                ctx.emit(token);
            }
            Some(_) if byte > 0xa0 && byte < 0xff => self.lead = Some(byte),
            Some(_) => {
                let set = ctx.state.set_in(Register::G1).unwrap_or("").to_string();
                ctx.emit(Token::CharLookupMiss { set: set, code: vec![byte], area: Area::GR,
                                                 subarea: Subarea::Direct(Register::G1) });
            }
            None => {
                let rhs = ctx.state.active_rhs.clone().unwrap_or_default();
                let token = match ctx.registry.rhs(&rhs).and_then(|table| table.lookup(byte)) {
                    Some(ch) => Token::Char { scalars: vec![ch], set: rhs, code: vec![byte],
                                              area: Area::GR, subarea: Subarea::Rhs },
                    None => Token::CharLookupMiss { set: rhs, code: vec![byte], area: Area::GR,
                                                    subarea: Subarea::Rhs },
                };
                ctx.emit(token);
            }
        }
    }
}

impl Filter for EucFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let byte = match token {
            Token::Word(byte) => byte,
            Token::Csi(ref csi) if self.lead.is_none() && control::is_select_data_type(csi) => {
                self.single = 0;
                return control::select_data_type(csi, ctx);
            }
            token => {
                self.single = 0;
                return match self.lead.take() {
                    Some(lead) => ctx.backup_and_err(token, DecodeError::EucTruncate(vec![lead])),
                    None => ctx.emit(token),
                };
            }
        };

        if let Some(lead) = self.lead.take() {
            return self.pair(lead, byte, ctx);
        }

        if self.single > 0 {
            if byte >= 0xa0 {
                self.single -= 1;
                return ctx.emit(Token::Code(byte, Area::GR));
            }
            self.single = 0;
        }

        let has_g4 = ctx.state.set_in(Register::G4).is_some();
        match byte {
            0x00..=0x1f | 0x7f => {
                let set = ctx.state.active_c0;
                control::control_or_graphic(ctx, byte, set, control::PROTECTED);
            }
            0x20..=0x7e => ctx.emit_left(byte),
            0x81..=0xfe if has_g4 => self.lead = Some(byte),
            0x8e | 0x8f => {
                let register = if byte == 0x8e { Register::G2 } else { Register::G3 };
                self.single = ctx.set_in(register).map_or(0, |(_, set)| set.bytes);
                let token = control::c1(byte, ctx.state.active_c1);
                ctx.emit(token);
            }
            0x80..=0x9f => {
                let set = ctx.state.active_c1;
                control::control_or_graphic(ctx, byte, set, control::PROTECTED);
            }
            _ => self.right(byte, ctx),
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        self.single = 0;
        if let Some(lead) = self.lead.take() {
            ctx.err(DecodeError::EucTruncate(vec![lead]));
        }
    }
}

#[cfg(test)]
mod euc_tests {
    use super::*;
    use crate::types::Mode;
    use crate::testutils::{Tester, words, graph};

    #[test]
    fn test_forward() {
        assert_eq!(ksx1001(15 * 94), Forward::Char(0xac00));
        assert_eq!(gb2312(15 * 94), Forward::Char(0x554a));
        assert_eq!(uhc_extension(0x8141), Forward::Char(0xac02));
        assert_eq!(uhc_extension(0x8140), Forward::Unmapped);
        assert_eq!(gbk_extension(0x8140), Forward::Char(0x4e02));
        assert_eq!(gbk_extension(0x817f), Forward::Unmapped);
    }

    #[test]
    fn test_double_byte_g1() {
        let mut t = Tester::in_mode(EucFilter::new(), Mode::Euc);
        assert_feed!(t, words(&[0x41, 0xa4, 0xcb]),
                     vec![graph("ir006", &[0x41], Area::GL, Subarea::Direct(Register::G0)),
                          graph("ir087", &[0x24, 0x4b], Area::GR, Subarea::Direct(Register::G1))]);
        assert_finish!(t, vec![]);
    }

    #[test]
    fn test_single_shifts() {
        let mut t = Tester::in_mode(EucFilter::new(), Mode::Euc);
        assert_feed!(t, words(&[0x8e, 0xc6]),
                     vec![control::c1(0x8e, "ir077"), Token::Code(0xc6, Area::GR)]);
        assert_feed!(t, words(&[0x8f, 0xcb, 0xc6, 0xa4, 0xcb]),
                     vec![control::c1(0x8f, "ir077"), Token::Code(0xcb, Area::GR),
                          Token::Code(0xc6, Area::GR),
                          graph("ir087", &[0x24, 0x4b], Area::GR, Subarea::Direct(Register::G1))]);
    }

    #[test]
    fn test_truncated() {
        let mut t = Tester::in_mode(EucFilter::new(), Mode::Euc);
        assert_feed!(t, words(&[0xa4, 0x41]),
                     vec![Token::Error(DecodeError::EucTruncate(vec![0xa4])),
                          graph("ir006", &[0x41], Area::GL, Subarea::Direct(Register::G0))]);
        assert_feed!(t, words(&[0xa4]), vec![]);
        assert_finish!(t, vec![Token::Error(DecodeError::EucTruncate(vec![0xa4]))]);
    }

    #[test]
    fn test_extension_plane() {
        let mut t = Tester::new(EucFilter::new());
        t.state.docs_mode = Mode::Euc;
        t.state.designate(Register::G1, Some("ir149".to_string()), false);
        t.state.designate(Register::G4, Some("uhc-ext".to_string()), false);
        assert_feed!(t, words(&[0xb0, 0xa1, 0x81, 0x41]),
                     vec![graph("ir149", &[0x30, 0x21], Area::GR, Subarea::Direct(Register::G1)),
                          graph("uhc-ext", &[0x81, 0x41], Area::GR, Subarea::Direct(Register::G4))]);
        assert_feed!(t, words(&[0x81, 0x0a]),
                     vec![Token::Error(DecodeError::EucTruncate(vec![0x81])),
                          control::c0(0x0a, "ir001")]);
    }

    #[test]
    fn test_decode() {
        assert_decode!(Mode::Euc, [0x41, 0x5c, 0x7e], "A\\~");
        assert_decode!(Mode::Euc, [0xa4, 0xcb, 0xa4, 0xdb, 0xa4, 0xf3], "\u{306b}\u{307b}\u{3093}");
        assert_decode!(Mode::Euc, [0x8e, 0xc6, 0x8e, 0xce, 0x8e, 0xdd], "\u{ff86}\u{ff8e}\u{ff9d}");
        assert_decode!(Mode::Euc, [0xc6, 0xfc, 0xcb, 0xdc], "\u{65e5}\u{672c}");
        assert_decode!(Mode::Euc, [0x8f, 0xcb, 0xc6, 0xec, 0xb8], "\u{736c}\u{8c78}");
    }

    #[test]
    fn test_decode_code_pages() {
        assert_decode!(Mode::Euc, b"\x1b[949*p\xb0\xa1\x81\x41", "\u{ac00}\u{ac02}");
        assert_decode!(Mode::Euc, b"\x1b[936*p\xb0\xa1\x81\x40", "\u{554a}\u{4e02}");
        // without the extension plane 0x81 is a C1 control
        assert_decode!(Mode::Euc, b"\x1b[51949*p\x81\x41", "\u{81}A");
    }

    #[test]
    fn test_decode_invalid() {
        assert_errors!(Mode::Euc, [0xa4, 0x41], vec![DecodeError::EucTruncate(vec![0xa4])]);
        assert_decode!(Mode::Euc, [0xa4, 0x41], "\u{fffd}A");
        assert_decode!(Mode::Euc, [0xa4], "\u{fffd}");
    }
}
