// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! EBCDIC, with a movable 65th control code and the double-byte extension.

use log::debug;
use crate::types::{Token, ControlSequence, DecodeError, Area, Subarea, Origin};
use crate::util::{Filter, Context};
use crate::index::ebcdic::CP037;
use crate::tokenizer::Tokenizer;
use crate::control::{self, BEL, BS, HT, LF, CR, ESC, SO, SI};
use crate::codec::{docs, chcp};

/// Controls which level 2 never prints as graphics. SO and SI switch the double-byte mode.
static PROTECTED: [u8; 8] = [BEL, BS, HT, LF, CR, ESC, SO, SI];

/// True if the sequence moves the 65th control code, `CSI ? Pn * p`.
pub fn is_seek_65th(csi: &ControlSequence) -> bool {
    csi.final_byte == b'p' && csi.intermediates == b"*" && csi.private_marker() == Some(b'?')
}

/// Converts an EBCDIC byte to its ISO 8859-1 position.
/// The configured 65th control byte and 0xFF trade their places.
pub fn convert(byte: u8, the_65th_control: u8) -> u8 {
    if byte == the_65th_control {
        CP037[0xff]
    } else if byte == 0xff {
        CP037[the_65th_control as usize]
    } else {
        CP037[byte as usize]
    }
}

/**
 * EBCDIC (IBM code page 37 layout).
 *
 * Bytes are converted to ISO 8859-1 positions and then read as an eight-bit ECMA-35 code,
 * so escape and control sequences are recognized in the converted form.
 * While the double-byte mode is on (SO), bytes from 0x40 are read in pairs
 * from the double-byte plane without any conversion.
 */
#[derive(Clone, Debug, Default)]
pub struct EbcdicFilter {
    tokenizer: Tokenizer,
    lead: Option<u8>,
}

impl EbcdicFilter {
    pub fn new() -> EbcdicFilter {
        EbcdicFilter { tokenizer: Tokenizer::new(), lead: None }
    }

    fn double_byte(&self, lead: u8, trail: u8, ctx: &mut Context) {
        let set = ctx.state.dbcs_set.clone().unwrap_or_default();
        let scalars = match (lead, trail) {
            (0x40, 0x40) => Some(vec![0x3000]),
            (0x41..=0xfe, 0x41..=0xfe) => {
                let index = (lead - 0x41) as u32 * 190 + (trail - 0x41) as u32;
                ctx.registry.lookup(&set).and_then(|plane| plane.scalars(index))
            }
            _ => None,
        };
        let code = vec![lead, trail];
        ctx.emit(match scalars {
            Some(scalars) => Token::Char { scalars: scalars, set: set, code: code,
                                           area: Area::Dbcs, subarea: Subarea::Dbcs },
            None => Token::CharLookupMiss { set: set, code: code, area: Area::Dbcs,
                                            subarea: Subarea::Dbcs },
        });
    }

    /// Reads one raw byte.
    fn byte(&mut self, byte: u8, ctx: &mut Context) {
        if let Some(lead) = self.lead.take() {
            if byte >= 0x40 {
                return self.double_byte(lead, byte, ctx);
            }
            ctx.err(DecodeError::DbEbcdicTruncate(vec![lead]));
        }
        if ctx.state.in_dbcs_mode && byte >= 0x40 && self.tokenizer.is_idle() {
            self.lead = Some(byte);
            return;
        }

        let mut converted = Vec::new();
        self.tokenizer.push(convert(byte, ctx.state.the_65th_control), &mut converted);
        for token in converted {
            self.converted(token, ctx);
        }
    }

    /// Reads a token made out of converted bytes.
    fn converted(&mut self, token: Token, ctx: &mut Context) {
        match token {
            Token::Word(byte) => single_byte(byte, ctx),
            Token::Esc(esc) => match docs::lookup(&esc) {
                Some((mode, without_return)) => ctx.emit(docs::announce(&esc, mode, without_return)),
                None => ctx.emit(Token::Esc(esc)),
            },
            Token::Csi(csi) => {
                if chcp::is_select_code_page(&csi) {
                    if let Some(page) = csi.number() {
                        return chcp::select(page, csi.bytes(), ctx);
                    }
                } else if is_seek_65th(&csi) {
                    if let Some(value) = csi.number() {
                        return seek_65th(value, ctx);
                    }
                } else if control::is_select_data_type(&csi) {
                    return control::select_data_type(&csi, ctx);
                }
                ctx.emit(Token::Csi(csi));
            }
            token => ctx.emit(token),
        }
    }
}

fn seek_65th(value: u32, ctx: &mut Context) {
    if value <= 0x40 || value > 0xff {
        return ctx.err(DecodeError::Seek65thNotValid(value));
    }
    debug!("65th control code {:#04x} -> {:#04x}", ctx.state.the_65th_control, value);
    ctx.state.the_65th_control = value as u8;
    ctx.emit(Token::Set65thControl(value as u8));
}

fn single_byte(byte: u8, ctx: &mut Context) {
    let gl_is96 = ctx.state.is96[ctx.state.gl.index()];
    match byte {
        0x00..=0x1f => {
            let set = ctx.state.active_c0;
            control::control_or_graphic(ctx, byte, set, &PROTECTED);
        }
        0x20 if !gl_is96 => ctx.emit(control::space(Origin::Byte)),
        0x7f if !gl_is96 => {
            let set = ctx.state.active_c0;
            control::control_or_graphic(ctx, byte, set, &PROTECTED);
        }
        0x20..=0x7f => ctx.emit(Token::Code(byte, Area::GL)),
        0x80..=0x9f => control::control_or_graphic(ctx, byte, control::EBCDIC, &PROTECTED),
        _ => ctx.emit(Token::Code(byte, Area::GR)),
    }
}

impl Filter for EbcdicFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let bytes = match token {
            Token::Word(byte) => vec![byte],
            // ASCII framing means nothing here
            Token::Esc(ref esc) => esc.bytes(),
            Token::Csi(ref csi) => csi.bytes(),
            token => {
                if let Some(lead) = self.lead.take() {
                    return ctx.backup_and_err(token, DecodeError::DbEbcdicTruncate(vec![lead]));
                }
                return ctx.emit(token);
            }
        };
        for byte in bytes {
            self.byte(byte, ctx);
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        let mut converted = Vec::new();
        self.tokenizer.finish(&mut converted);
        for token in converted {
            self.converted(token, ctx);
        }
        if let Some(lead) = self.lead.take() {
            ctx.err(DecodeError::DbEbcdicTruncate(vec![lead]));
        }
    }
}

#[cfg(test)]
mod ebcdic_tests {
    use super::*;
    use crate::types::Mode;
    use crate::registry::{Registry, BuiltinRegistry, GraphicSet, RhsTable, Dimension, Forward};
    use crate::label::BuiltinCodePages;
    use crate::decoder::{Decoder, DecoderOptions};
    use crate::testutils::{Tester, words, errors, text};

    fn test_plane(index: u32) -> Forward {
        Forward::Char(0xac00 + index)
    }

    static TEST_PLANE: GraphicSet = GraphicSet { dimension: Dimension::Raw, bytes: 2, forward: test_plane };

    struct DbcsRegistry;

    impl Registry for DbcsRegistry {
        fn lookup(&self, id: &str) -> Option<&GraphicSet> {
            if id == "test-dbcs" { Some(&TEST_PLANE) } else { BuiltinRegistry.lookup(id) }
        }
        fn rhs(&self, id: &str) -> Option<&RhsTable> { BuiltinRegistry.rhs(id) }
    }

    fn run_dbcs(input: &[u8]) -> Vec<Token> {
        let options = DecoderOptions { mode: Mode::Ebcdic, code_page: None };
        let mut d = Decoder::with_options(&DbcsRegistry, &BuiltinCodePages, options).unwrap();
        d.state_mut().dbcs_set = Some("test-dbcs".to_string());
        let mut output = Vec::new();
        d.feed_bytes(input, &mut output);
        d.finish(&mut output);
        output
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert(0xc1, 0xff), b'A');
        assert_eq!(convert(0xff, 0xff), 0x9f);
        assert_eq!(convert(0x41, 0xff), 0xa0);
        assert_eq!(convert(0xff, 0x41), 0xa0);
        assert_eq!(convert(0x41, 0x41), 0x9f);
    }

    #[test]
    fn test_areas() {
        let mut t = Tester::in_mode(EbcdicFilter::new(), Mode::Ebcdic);
        assert_feed!(t, words(&[0xc1, 0x40, 0x51, 0x25, 0x15]),
                     vec![Token::Code(0x41, Area::GL), control::space(Origin::Byte),
                          Token::Code(0xe9, Area::GR), control::c0(0x0a, "ir001"),
                          control::c1(0x85, control::EBCDIC)]);
        assert_feed!(t, words(&[0x08, 0xff]),
                     vec![control::c1(0x97, control::EBCDIC), control::c1(0x9f, control::EBCDIC)]);
        assert_finish!(t, vec![]);
    }

    #[test]
    fn test_seek_65th() {
        let mut t = Tester::in_mode(EbcdicFilter::new(), Mode::Ebcdic);
        // ESC [ ? 6 5 * p, in EBCDIC
        assert_feed!(t, words(&[0x27, 0xba, 0x6f, 0xf6, 0xf5, 0x5c, 0x97, 0xff, 0x41]),
                     vec![Token::Set65thControl(0x41), Token::Code(0xa0, Area::GR),
                          control::c1(0x9f, control::EBCDIC)]);
        assert_eq!(t.state.the_65th_control, 0x41);
        // ESC [ ? 6 4 * p is not valid
        assert_feed!(t, words(&[0x27, 0xba, 0x6f, 0xf6, 0xf4, 0x5c, 0x97]),
                     vec![Token::Error(DecodeError::Seek65thNotValid(64))]);
        assert_eq!(t.state.the_65th_control, 0x41);
    }

    #[test]
    fn test_docs() {
        let mut t = Tester::in_mode(EbcdicFilter::new(), Mode::Ebcdic);
        // ESC % @
        assert_feed!(t, words(&[0x27, 0x6c, 0x7c]),
                     vec![Token::Rdocs { mode: Mode::Ecma35, without_return: false,
                                         bytes: vec![0x1b, 0x25, 0x40] }]);
    }

    #[test]
    fn test_raw_escape_is_not_framing() {
        let mut t = Tester::in_mode(EbcdicFilter::new(), Mode::Ebcdic);
        // EBCDIC 0x1B is a C1 control, and 0x7C is @
        assert_feed!(t, vec![Token::Esc(crate::types::Escape::new(b"", 0x7c))],
                     vec![control::c1(0x8f, control::EBCDIC), Token::Code(0x40, Area::GL)]);
    }

    #[test]
    fn test_decode() {
        assert_decode!(Mode::Ebcdic, [0xc8, 0x85, 0x93, 0x93, 0x96, 0x40, 0x51], "Hello \u{e9}");
        assert_decode!(Mode::Ebcdic, [0xf1, 0x25, 0xf2], "1\n2");
        // ESC % @ returns to ECMA-35
        assert_decode!(Mode::Ebcdic, [0xc1, 0x27, 0x6c, 0x7c, 0x41], "AA");
    }

    #[test]
    fn test_decode_65th() {
        assert_decode!(Mode::Ebcdic, [0xff], "\u{9f}");
        assert_decode!(Mode::Ebcdic, [0x27, 0xba, 0x6f, 0xf6, 0xf5, 0x5c, 0x97, 0xff, 0x41],
                       "\u{a0}\u{9f}");
    }

    #[test]
    fn test_double_byte() {
        let tokens = run_dbcs(&[0x0e, 0x40, 0x40, 0x42, 0x43, 0x0f, 0xc1]);
        assert_eq!(errors(&tokens), vec![]);
        assert_eq!(text(&tokens), "\u{3000}\u{acc0}A");

        let tokens = run_dbcs(&[0x0e, 0x42, 0x0f, 0xc1]);
        assert_eq!(errors(&tokens), vec![DecodeError::DbEbcdicTruncate(vec![0x42])]);
        assert_eq!(text(&tokens), "\u{fffd}A");

        let tokens = run_dbcs(&[0x0e, 0x42]);
        assert_eq!(errors(&tokens), vec![DecodeError::DbEbcdicTruncate(vec![0x42])]);
    }

    #[test]
    fn test_double_byte_state() {
        let mut t = Tester::in_mode(EbcdicFilter::new(), Mode::Ebcdic);
        t.state.in_dbcs_mode = true;
        assert_feed!(t, words(&[0x40, 0x40]),
                     vec![Token::Char { scalars: vec![0x3000], set: String::new(),
                                        code: vec![0x40, 0x40], area: Area::Dbcs,
                                        subarea: Subarea::Dbcs }]);
        assert_feed!(t, words(&[0x42, 0x43]),
                     vec![Token::CharLookupMiss { set: String::new(), code: vec![0x42, 0x43],
                                                  area: Area::Dbcs, subarea: Subarea::Dbcs }]);
        assert_feed!(t, vec![Token::Word(0x42), Token::Chcp(37)],
                     vec![Token::Error(DecodeError::DbEbcdicTruncate(vec![0x42])),
                          Token::Chcp(37)]);
    }
}
