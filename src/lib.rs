// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

/*!

# Rust-ecma35

A streaming decoder for byte streams structured by ECMA-35 (ISO/IEC 2022),
together with the vendor and mainframe schemes which can be announced from it.

## Simple Usage

To decode a byte sequence with designations and shifts:

~~~~ {.rust}
use ecma35::{decode, DecoderTrap};

assert_eq!(decode(b"\x1b$B$K$[$s\x1b(B!", DecoderTrap::Strict),
           Ok("\u{306b}\u{307b}\u{3093}!".to_string()));
assert_eq!(decode(b"\x1b$)C\x0e0!\x0f", DecoderTrap::Strict),
           Ok("\u{ac00}".to_string()));
~~~~

To decode a byte sequence with invalid sequences:

~~~~ {.rust}
use ecma35::{decode, DecoderTrap, DecodeError};

// a Shift_JIS lead byte cut off by the end of input
assert_eq!(decode(b"\x1b%1A\x82", DecoderTrap::Strict),
           Err(DecodeError::SjisTruncate(vec![0x82])));
assert_eq!(decode(b"\x1b%1A\x82", DecoderTrap::Replace), Ok("A\u{fffd}".to_string()));
assert_eq!(decode(b"\x1b%1A\x82", DecoderTrap::Ignore), Ok("A".to_string()));
~~~~

To see every token, including the announcements and the designations:

~~~~ {.rust}
use ecma35::{Decoder, Token};
use ecma35::registry::BuiltinRegistry;
use ecma35::label::BuiltinCodePages;

let mut decoder = Decoder::new(&BuiltinRegistry, &BuiltinCodePages);
let mut tokens = Vec::new();
decoder.feed_bytes(b"\x1b[437*p\xe9", &mut tokens);
decoder.finish(&mut tokens);
assert!(tokens.contains(&Token::Chcp(437)));
assert!(tokens.iter().any(|t| match *t {
    Token::Char { ref scalars, .. } => scalars == &[0x398],
    _ => false,
}));
~~~~

## Detailed Usage

**`Decoder`** is a chain of filters, each consuming and producing `Token`s.
Raw bytes are split into words, escape sequences and control sequences first.
Announcements of another coding system (DOCS, `ESC % F`) and code page selections
(`CSI Pn * p`) then switch the filter of the active coding system,
which turns words into controls and codes of the four areas.
Designations, locking and single shifts decide which graphic set each code belongs to,
and the final stage looks the positions up in the registry.

Errors never stop the decoder. They are reported in-band as `Token::Error`,
and the byte which interrupted a sequence is always read again.

Tables come from two traits, `registry::Registry` for graphic sets and
`label::CodePages` for code pages. `BuiltinRegistry` and `BuiltinCodePages`
cover the built-in tables; callers can supply their own, e.g. for double-byte EBCDIC.

## Supported Coding Systems

* ECMA-35 in seven and eight bits, with any built-in 94, 96 and 94^n sets
* UTF-8 (`ESC % G`) with CESU-8 surrogate pairs
* Shift_JIS (`ESC % 1`, code page 932)
* Big Five (`ESC % 2`, code page 950)
* EUC and its extensions (`ESC % 3`, code pages 51932, 51949, 949, 51936 and 936)
* Plain extended ASCII (`ESC % 4`, IBM PC, Windows, Macintosh, KOI8 and ISO 8859 code pages)
* EBCDIC (`ESC % / 5`, code page 37) with an optional double-byte plane
* UTF-EBCDIC (`ESC % / 6`, code page 1210)

Other coding systems which can be announced (UCS-2, UCS-4, UTF-16, UTF-1, SCSU and raw)
are recognized, but their words pass through undecoded.

*/

#![crate_name = "ecma35"]
#![crate_type = "lib"]

pub use ecma35_types as types;

pub use self::types::{Token, Mode, Register, Area, Subarea, SetKind, Origin, Control,
                      Escape, ControlSequence, UcsForm, DecodeError, DecoderTrap,
                      DecoderState}; // reexport
pub use self::decoder::{Decoder, DecoderOptions};

#[cfg(test)] #[macro_use] mod testutils;
mod util;

pub mod registry;
pub mod all;
/// Tables for the conversions not covered by the `encoding-index-*` crates. Semi-internal.
pub mod index;
pub mod label;
pub mod control;
pub mod tokenizer;
pub mod decoder;

/// Stages and mode filters.
pub mod codec {
    pub mod docs;
    pub mod chcp;
    pub mod ecma35;
    pub mod utf_8;
    pub mod japanese;
    pub mod tradchinese;
    pub mod euc;
    pub mod singlebyte;
    pub mod ebcdic;
    pub mod utf_ebcdic;
    pub mod designation;
    pub mod invocation;
    pub mod graphic;
}

use self::registry::{Registry, BuiltinRegistry};
use self::label::{CodePages, BuiltinCodePages};

/// True if a control function is consumed by the decoder and has no character code to render.
fn is_shift(name: &str) -> bool {
    match name {
        "SO" | "SI" | "SS2" | "SS3" | "LSI" | "GE" => true,
        _ => name.starts_with("LS"),
    }
}

/// Renders a token stream to `output`.
///
/// Characters and control codes are written; shifts, announcements and directives are not.
/// Errors, unresolved positions and undecoded words are handled by `trap`.
pub fn render(tokens: &[Token], trap: DecoderTrap, output: &mut String) -> Result<(), DecodeError> {
    for token in tokens {
        let err = match *token {
            Token::Char { ref scalars, .. } => {
                output.extend(scalars.iter().map(|&ch| util::as_char(ch)));
                continue;
            }
            Token::Ucs { scalar, .. } => {
                output.push(util::as_char(scalar));
                continue;
            }
            Token::Ctrl(ref ctrl) => {
                if !is_shift(ctrl.name) {
                    output.push(ctrl.code as char);
                }
                continue;
            }
            Token::Esc(ref esc) => {
                output.extend(esc.bytes().into_iter().map(|b| b as char));
                continue;
            }
            Token::Csi(ref csi) => {
                output.extend(csi.bytes().into_iter().map(|b| b as char));
                continue;
            }
            Token::Error(ref err) => err.clone(),
            Token::CharLookupMiss { ref set, ref code, .. } =>
                DecodeError::UndefGraph { set: set.clone(), code: code.clone() },
            Token::Word(byte) => DecodeError::UndefGraph { set: String::new(), code: vec![byte] },
            _ => continue,
        };
        match trap {
            DecoderTrap::Strict => return Err(err),
            DecoderTrap::Replace => output.push('\u{fffd}'),
            DecoderTrap::Ignore => {}
        }
    }
    Ok(())
}

/// Decodes a byte sequence with the built-in tables, starting in ECMA-35.
pub fn decode(input: &[u8], trap: DecoderTrap) -> Result<String, DecodeError> {
    decode_with(input, trap, &BuiltinRegistry, &BuiltinCodePages, DecoderOptions::default())
}

/// Decodes a byte sequence with given tables and options.
pub fn decode_with(input: &[u8], trap: DecoderTrap, registry: &dyn Registry, pages: &dyn CodePages,
                   options: DecoderOptions) -> Result<String, DecodeError> {
    let mut decoder = Decoder::with_options(registry, pages, options)?;
    let mut tokens = Vec::new();
    decoder.feed_bytes(input, &mut tokens);
    decoder.finish(&mut tokens);
    let mut ret = String::new();
    render(&tokens, trap, &mut ret)?;
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode(b"caf\xe9", DecoderTrap::Strict), Ok("caf\u{e9}".to_string()));
        assert_eq!(decode(b"\x1b%G\xe6\xbc\xa2\xe5\xad\x97", DecoderTrap::Strict),
                   Ok("\u{6f22}\u{5b57}".to_string()));
        assert_eq!(decode(b"a\x0d\x0ab\x09", DecoderTrap::Strict), Ok("a\r\nb\t".to_string()));
    }

    #[test]
    fn test_traps() {
        // 0xFF never occurs in UTF-8
        let input = b"\x1b%G\xff!";
        assert!(decode(input, DecoderTrap::Strict).is_err());
        assert_eq!(decode(input, DecoderTrap::Replace), Ok("\u{fffd}!".to_string()));
        assert_eq!(decode(input, DecoderTrap::Ignore), Ok("!".to_string()));
    }

    #[test]
    fn test_lookup_miss() {
        // 0x2F7E is not assigned in JIS X 0208
        assert_eq!(decode(b"\x1b$B/~", DecoderTrap::Strict),
                   Err(DecodeError::UndefGraph { set: "ir087".to_string(), code: vec![0x2f, 0x7e] }));
        assert_eq!(decode(b"\x1b$B/~", DecoderTrap::Replace), Ok("\u{fffd}".to_string()));
    }

    #[test]
    fn test_undecoded_words() {
        assert_eq!(decode(b"\x1b%/@\x00A", DecoderTrap::Ignore), Ok("".to_string()));
        assert_eq!(decode(b"\x1b%/@\x00A", DecoderTrap::Strict),
                   Err(DecodeError::UndefGraph { set: String::new(), code: vec![0x00] }));
    }

    #[test]
    fn test_shifts_are_silent() {
        assert_eq!(decode(b"\x1b*I\x1bn\x31\x1bN\x32\x0e", DecoderTrap::Strict),
                   Ok("\u{ff71}\u{ff72}".to_string()));
    }

    #[test]
    fn test_decode_with() {
        let options = DecoderOptions { mode: Mode::Ecma35, code_page: Some(950) };
        assert_eq!(decode_with(b"\xa4\xa4", DecoderTrap::Strict, &BuiltinRegistry, &BuiltinCodePages,
                               options),
                   Ok("\u{4e2d}".to_string()));
        let options = DecoderOptions { mode: Mode::Ecma35, code_page: Some(7) };
        assert_eq!(decode_with(b"", DecoderTrap::Strict, &BuiltinRegistry, &BuiltinCodePages,
                               options),
                   Err(DecodeError::UnrecognizedCodePage(7)));
    }
}
