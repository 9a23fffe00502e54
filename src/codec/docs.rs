// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Designate Other Coding System.

use log::debug;
use crate::types::{Token, Escape, Mode};
use crate::util::{Filter, Context};

/// Returns the coding system announced by a DOCS escape sequence,
/// and whether it is entered without the standard return.
pub fn lookup(esc: &Escape) -> Option<(Mode, bool)> {
    let entry = match (&esc.intermediates[..], esc.final_byte) {
        (b"%", b'@') => (Mode::Ecma35, false),
        (b"%", b'G') => (Mode::Utf8, false),
        (b"%/", b'G') | (b"%/", b'H') | (b"%/", b'I') => (Mode::Utf8, true),
        (b"%/", b'@') | (b"%/", b'C') | (b"%/", b'E') => (Mode::Ucs2, true),
        (b"%/", b'A') | (b"%/", b'D') | (b"%/", b'F') => (Mode::Ucs4, true),
        (b"%/", b'J') | (b"%/", b'K') | (b"%/", b'L') => (Mode::Utf16, true),
        (b"%", b'B') => (Mode::Utf1, false),

        // private use
        (b"%", b'1') => (Mode::ShiftJis, false),
        (b"%", b'2') => (Mode::BigFive, false),
        (b"%", b'3') => (Mode::Euc, false),
        (b"%", b'4') => (Mode::PlainExtAscii, false),
        (b"%/", b'0') => (Mode::Raw, true),
        (b"%/", b'5') => (Mode::Ebcdic, true),
        (b"%/", b'6') => (Mode::UtfEbcdic, true),
        (b"%/", b'7') => (Mode::Scsu, true),
        _ => return None,
    };
    Some(entry)
}

/// Makes the directive announcing a coding system.
pub fn announce(esc: &Escape, mode: Mode, without_return: bool) -> Token {
    debug!("DOCS {:02x?} announces {}", esc.bytes(), mode);
    Token::Rdocs { mode: mode, without_return: without_return, bytes: esc.bytes() }
}

/// Replaces DOCS escape sequences with `Rdocs` directives.
///
/// Coding systems which do not frame escape sequences in ASCII bytes
/// recognize DOCS by themselves, so the announcer stands aside for them.
///
/// The announcer keeps no state. `without_return` is only reported in the directive;
/// a later `ESC % @` is honored in any coding system which can still express it.
#[derive(Clone, Debug, Default)]
pub struct DocsAnnouncer;

impl Filter for DocsAnnouncer {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        match token {
            Token::Esc(ref esc) if ctx.state.docs_mode.is_ascii_framed() => {
                if let Some((mode, without_return)) = lookup(esc) {
                    ctx.emit(announce(esc, mode, without_return));
                    return;
                }
            }
            _ => {}
        }
        ctx.emit(token);
    }
}
