// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Control functions and the C0 graphics levels.

use log::debug;
use crate::types::{Token, Control, ControlSequence, DecodeError, Origin, Area, Subarea};
use crate::util::Context;
use crate::label;

pub const BEL: u8 = 0x07;
pub const BS: u8 = 0x08;
pub const HT: u8 = 0x09;
pub const LF: u8 = 0x0a;
pub const CR: u8 = 0x0d;
pub const SO: u8 = 0x0e;
pub const SI: u8 = 0x0f;
pub const ESC: u8 = 0x1b;
pub const DEL: u8 = 0x7f;

/// Controls which level 2 never prints as graphics.
pub const PROTECTED: &'static [u8] = &[BEL, BS, HT, LF, CR, ESC];

static C0_NAMES: [&'static str; 32] = [
    "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL",
    "BS", "HT", "LF", "VT", "FF", "CR", "SO", "SI",
    "DLE", "DC1", "DC2", "DC3", "DC4", "NAK", "SYN", "ETB",
    "CAN", "EM", "SUB", "ESC", "IS4", "IS3", "IS2", "IS1",
];

static C1_NAMES: [&'static str; 32] = [
    "PAD", "HOP", "BPH", "NBH", "IND", "NEL", "SSA", "ESA",
    "HTS", "HTJ", "VTS", "PLD", "PLU", "RI", "SS2", "SS3",
    "DCS", "PU1", "PU2", "STS", "CCH", "MW", "SPA", "EPA",
    "SOS", "SGCI", "SCI", "CSI", "ST", "OSC", "PM", "APC",
];

/// The control set of EBCDIC after conversion, which differs in the C1 area.
pub const EBCDIC: &'static str = "ebcdic";

/// Independent control functions, `ESC Fs`.
pub const INDEPENDENT: &'static str = "fs";

/// Returns the mnemonic of a C0 control, DEL or C1 control.
pub fn name(code: u8, set: &str) -> &'static str {
    match (code, set) {
        (0x97, EBCDIC) => "GE",
        (0x9f, EBCDIC) => "EO",
        (0x00..=0x1f, _) => C0_NAMES[code as usize],
        (0x80..=0x9f, _) => C1_NAMES[(code - 0x80) as usize],
        (DEL, _) => "DEL",
        (0x20, _) => "SP",
        _ => "",
    }
}

fn make(code: u8, origin: Origin, area: Area, set: &'static str) -> Token {
    Token::Ctrl(Control { name: name(code, set), origin: origin, code: code, area: area, set: set })
}

/// Makes a C0 control (or DEL) read from a byte.
pub fn c0(code: u8, set: &'static str) -> Token {
    make(code, Origin::Byte, Area::CL, set)
}

/// Makes a C1 control read from a byte.
pub fn c1(code: u8, set: &'static str) -> Token {
    make(code, Origin::Byte, Area::CR, set)
}

/// Makes a C1 control read from an `ESC Fe` sequence.
pub fn c1_escape(code: u8, set: &'static str) -> Token {
    make(code, Origin::Escape, Area::CR, set)
}

/// Makes a C0 control, DEL or C1 control decoded from a Unicode form.
pub fn unicode(code: u8) -> Token {
    if code >= 0x80 {
        make(code, Origin::Unicode, Area::CR, "ir077")
    } else {
        make(code, Origin::Unicode, Area::CL, "ir001")
    }
}

/// Makes a locking shift read from an `ESC Fs` sequence, like `ESC n` for LS2.
pub fn independent(name: &'static str, final_byte: u8) -> Token {
    Token::Ctrl(Control { name: name, origin: Origin::Escape, code: final_byte, area: Area::GL,
                          set: INDEPENDENT })
}

/// Makes SPACE, which is a control function when the set in GL has 94 cells.
pub fn space(origin: Origin) -> Token {
    Token::Ctrl(Control { name: "SP", origin: origin, code: 0x20, area: Area::GL, set: "ir006" })
}

/// Makes DELETE, which is a control function when the set in GL has 94 cells.
pub fn delete(origin: Origin) -> Token {
    Token::Ctrl(Control { name: "DEL", origin: origin, code: DEL, area: Area::GL, set: "ir006" })
}

/// Emits the control at `code` (a C0 control, DEL or a C1 control), or its graphic
/// replacement if the C0 graphics level says so.
///
/// | level | C0                      | DEL     | C1                |
/// |-------|-------------------------|---------|-------------------|
/// | 0, 1  | control                 | control | control           |
/// | 2     | graphic unless protected| graphic | right-hand side   |
/// | 3     | control                 | control | right-hand side   |
/// | 4     | graphic except ESC      | graphic | right-hand side   |
///
/// A position without a replacement still emits the control.
pub fn control_or_graphic(ctx: &mut Context, code: u8, set: &'static str, protected: &[u8]) {
    let level = ctx.state.c0_graphics_mode;
    let replacement = match code {
        0x00..=0x1f | DEL => {
            let printed = match level {
                2 => code == DEL || !protected.contains(&code),
                4 => code != ESC,
                _ => false,
            };
            if printed {
                let table = label::c0_graphics(ctx.state, ctx.pages);
                let index = if code == DEL { 32 } else { code as usize };
                match table[index] {
                    0xffff => None,
                    ch => Some((ch as u32, Area::CL, Subarea::C0Graphic, "c0-graphics".to_string())),
                }
            } else {
                None
            }
        }
        0x80..=0x9f if level >= 2 => {
            let rhs = ctx.state.active_rhs.clone();
            rhs.and_then(|id| {
                let ch = ctx.registry.rhs(&id)?.lookup(code)?;
                Some((ch, Area::CR, Subarea::Rhs, id))
            })
        }
        _ => None,
    };

    match replacement {
        Some((ch, area, subarea, set)) => {
            ctx.emit(Token::Char { scalars: vec![ch], set: set, code: vec![code],
                                   area: area, subarea: subarea });
        }
        None if code >= 0x80 => ctx.emit(c1(code, set)),
        None => ctx.emit(c0(code, set)),
    }
}

/// True if the sequence is "select digital printed data type", `CSI Ps ) p`.
pub fn is_select_data_type(csi: &ControlSequence) -> bool {
    csi.final_byte == b'p' && csi.intermediates == b")" && csi.private_marker().is_none()
}

/// Changes the C0 graphics level. Unknown levels leave the state unchanged.
pub fn select_data_type(csi: &ControlSequence, ctx: &mut Context) {
    match csi.numbers().as_ref().map(|v| &v[..]) {
        Some(&[level]) if level <= 4 => {
            debug!("C0 graphics level {} -> {}", ctx.state.c0_graphics_mode, level);
            ctx.state.c0_graphics_mode = level as u8;
            ctx.emit(Token::C0GraphicsMode(level as u8));
        }
        Some(&[level]) => ctx.err(DecodeError::UnknownC0GraphicsMode(level)),
        // `CSI ) p` reads as level 0
        Some(&[]) => {
            ctx.state.c0_graphics_mode = 0;
            ctx.emit(Token::C0GraphicsMode(0));
        }
        _ => ctx.err(DecodeError::UnknownC0GraphicsMode(u32::max_value())),
    }
}

#[cfg(test)]
mod control_tests {
    use super::*;
    use crate::types::{DecoderState, Mode};
    use crate::registry::BuiltinRegistry;
    use crate::label::{BuiltinCodePages, CodePages};

    fn run(level: u8, page: u32, code: u8, protected: &[u8]) -> Vec<Token> {
        let mut state = DecoderState::new();
        let cp = BuiltinCodePages.lookup(page).unwrap();
        label::apply(&mut state, &BuiltinRegistry, page, cp);
        state.docs_mode = cp.mode;
        state.c0_graphics_mode = level;
        let mut output = Vec::new();
        {
            let mut ctx = Context::new(&mut state, &BuiltinRegistry, &BuiltinCodePages, &mut output);
            control_or_graphic(&mut ctx, code, "ir001", protected);
        }
        output
    }

    fn scalar(tokens: &[Token]) -> Option<u32> {
        match tokens {
            [Token::Char { scalars, .. }] => Some(scalars[0]),
            _ => None,
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(name(0x00, "ir001"), "NUL");
        assert_eq!(name(0x1b, "ir001"), "ESC");
        assert_eq!(name(0x8e, "ir077"), "SS2");
        assert_eq!(name(0x9b, "ir077"), "CSI");
        assert_eq!(name(0x97, EBCDIC), "GE");
        assert_eq!(name(0x9f, EBCDIC), "EO");
        assert_eq!(name(0x9f, "ir077"), "APC");
        assert_eq!(name(DEL, "ir001"), "DEL");
    }

    #[test]
    fn test_literal_levels() {
        assert_eq!(run(1, 437, 0x01, PROTECTED), vec![c0(0x01, "ir001")]);
        assert_eq!(run(0, 437, 0x85, PROTECTED), vec![c1(0x85, "ir001")]);
        assert_eq!(run(1, 437, 0x85, PROTECTED), vec![c1(0x85, "ir001")]);
        assert_eq!(run(3, 437, 0x01, PROTECTED), vec![c0(0x01, "ir001")]);
    }

    #[test]
    fn test_terminal_level() {
        assert_eq!(scalar(&run(2, 437, 0x01, PROTECTED)), Some(0x263a));
        assert_eq!(scalar(&run(2, 437, DEL, PROTECTED)), Some(0x2302));
        assert_eq!(run(2, 437, LF, PROTECTED), vec![c0(LF, "ir001")]);
        assert_eq!(run(2, 437, ESC, PROTECTED), vec![c0(ESC, "ir001")]);
        // NUL has no IBM PC glyph
        assert_eq!(run(2, 437, 0x00, PROTECTED), vec![c0(0x00, "ir001")]);
        assert_eq!(scalar(&run(2, 437, 0x80, PROTECTED)), Some(0xc7));
    }

    #[test]
    fn test_all_but_escape() {
        assert_eq!(scalar(&run(4, 28591, LF, PROTECTED)), Some(0x240a));
        assert_eq!(run(4, 28591, ESC, PROTECTED), vec![c0(ESC, "ir001")]);
        // ISO 8859-1 has no graphics in the C1 area
        assert_eq!(run(4, 28591, 0x85, PROTECTED), vec![c1(0x85, "ir001")]);
        assert_eq!(scalar(&run(3, 1252, 0x80, PROTECTED)), Some(0x20ac));
    }

    #[test]
    fn test_select_data_type() {
        let mut state = DecoderState::new();
        state.docs_mode = Mode::PlainExtAscii;
        let mut output = Vec::new();
        {
            let mut ctx = Context::new(&mut state, &BuiltinRegistry, &BuiltinCodePages, &mut output);
            let csi = ControlSequence::new(b"4", b")", b'p');
            assert!(is_select_data_type(&csi));
            select_data_type(&csi, &mut ctx);
            select_data_type(&ControlSequence::new(b"7", b")", b'p'), &mut ctx);
        }
        assert_eq!(state.c0_graphics_mode, 4);
        assert_eq!(output, vec![Token::C0GraphicsMode(4),
                                Token::Error(DecodeError::UnknownC0GraphicsMode(7))]);
        assert!(!is_select_data_type(&ControlSequence::new(b"4", b"*", b'p')));
    }
}
