// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Designations and the other escape sequences of ECMA-35.

use log::debug;
use crate::types::{Token, Escape, Register, SetKind, Area};
use crate::util::{Filter, Context};
use crate::control;
use crate::all;

/// Returns the register and the kind a designation escape sequence targets.
pub fn target(esc: &Escape) -> Option<(Register, SetKind)> {
    let g = |i: u8| Register::from_index(i as usize);
    match (&esc.intermediates[..], esc.final_byte) {
        (&[i], _) if i >= b'(' && i <= b'+' => Some((g(i - b'(')?, SetKind::Cells94)),
        (&[i], _) if i >= b',' && i <= b'/' => Some((g(i - b',')?, SetKind::Cells96)),
        // the legacy forms without an intermediate byte for G0
        (b"$", b'@') | (b"$", b'A') | (b"$", b'B') => Some((Register::G0, SetKind::Multi94)),
        (&[b'$', i], _) if i >= b'(' && i <= b'+' => Some((g(i - b'(')?, SetKind::Multi94)),
        (&[b'$', i], _) if i >= b',' && i <= b'/' => Some((g(i - b',')?, SetKind::Multi96)),
        _ => None,
    }
}

/// Returns the identifier of the set with given final byte.
/// Unregistered sets get a synthesized identifier like `g94n-Z`.
pub fn set_id(kind: SetKind, final_byte: u8) -> String {
    match all::set_for_final(kind, final_byte) {
        Some(id) => id.to_string(),
        None => {
            let prefix = match kind {
                SetKind::Cells94 => "g94",
                SetKind::Cells96 => "g96",
                SetKind::Multi94 => "g94n",
                SetKind::Multi96 => "g96n",
            };
            format!("{}-{}", prefix, final_byte as char)
        }
    }
}

/**
 * Interprets the escape sequences which do not switch the coding system.
 *
 * - Designations (`ESC ( F` and so on) update the registers and become `Desig`.
 * - `ESC ! @` and `ESC " C` select the standard C0 and C1 sets.
 * - `ESC Fe` is the 7-bit form of a C1 control.
 * - `ESC n`, `ESC o`, `ESC ~`, `ESC }` and `ESC |` are locking shifts.
 *
 * Anything else is passed unchanged.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct Designator;

impl Filter for Designator {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let esc = match token {
            Token::Esc(esc) => esc,
            token => return ctx.emit(token),
        };

        if let Some((register, kind)) = target(&esc) {
            let set = set_id(kind, esc.final_byte);
            debug!("designating {} into {}", set, register);
            ctx.state.designate(register, Some(set.clone()), kind.is96());
            return ctx.emit(Token::Desig { register: register, kind: kind, set: set });
        }

        let token = match (&esc.intermediates[..], esc.final_byte) {
            (b"!", b'@') => {
                debug!("C0 controls {} -> ir001", ctx.state.active_c0);
                ctx.state.active_c0 = "ir001";
                Token::ControlSet { area: Area::CL, set: "ir001" }
            }
            (b"\"", b'C') => {
                debug!("C1 controls {} -> ir077", ctx.state.active_c1);
                ctx.state.active_c1 = "ir077";
                Token::ControlSet { area: Area::CR, set: "ir077" }
            }
            (b"", f @ 0x40..=0x5f) => control::c1_escape(f + 0x40, ctx.state.active_c1),
            (b"", b'n') => control::independent("LS2", b'n'),
            (b"", b'o') => control::independent("LS3", b'o'),
            (b"", b'~') => control::independent("LS1R", b'~'),
            (b"", b'}') => control::independent("LS2R", b'}'),
            (b"", b'|') => control::independent("LS3R", b'|'),
            _ => Token::Esc(esc),
        };
        ctx.emit(token);
    }
}

#[cfg(test)]
mod designation_tests {
    use super::*;
    use crate::testutils::Tester;

    fn esc(intermediates: &[u8], final_byte: u8) -> Token {
        Token::Esc(Escape::new(intermediates, final_byte))
    }

    fn desig(register: Register, kind: SetKind, set: &str) -> Token {
        Token::Desig { register: register, kind: kind, set: set.to_string() }
    }

    #[test]
    fn test_target() {
        assert_eq!(target(&Escape::new(b"(", b'B')), Some((Register::G0, SetKind::Cells94)));
        assert_eq!(target(&Escape::new(b"+", b'I')), Some((Register::G3, SetKind::Cells94)));
        assert_eq!(target(&Escape::new(b"-", b'A')), Some((Register::G1, SetKind::Cells96)));
        assert_eq!(target(&Escape::new(b"$", b'B')), Some((Register::G0, SetKind::Multi94)));
        assert_eq!(target(&Escape::new(b"$)", b'C')), Some((Register::G1, SetKind::Multi94)));
        assert_eq!(target(&Escape::new(b"$/", b'Z')), Some((Register::G3, SetKind::Multi96)));
        assert_eq!(target(&Escape::new(b"%", b'G')), None);
        assert_eq!(target(&Escape::new(b"$", b'C')), None);
    }

    #[test]
    fn test_set_id() {
        assert_eq!(set_id(SetKind::Cells94, b'J'), "ir014");
        assert_eq!(set_id(SetKind::Multi94, b'D'), "ir159");
        assert_eq!(set_id(SetKind::Cells94, b'Z'), "g94-Z");
        assert_eq!(set_id(SetKind::Multi96, b'A'), "g96n-A");
    }

    #[test]
    fn test_designate() {
        let mut t = Tester::new(Designator);
        assert_feed!(t, vec![esc(b"$)", b'C'), esc(b"*", b'I'), esc(b".", b'F')],
                     vec![desig(Register::G1, SetKind::Multi94, "ir149"),
                          desig(Register::G2, SetKind::Cells94, "ir013"),
                          desig(Register::G2, SetKind::Cells96, "ir126")]);
        assert_eq!(t.state.set_in(Register::G1), Some("ir149"));
        assert_eq!(t.state.set_in(Register::G2), Some("ir126"));
        assert_eq!(t.state.is96, [false, false, true, false, false]);
        assert_finish!(t, vec![]);
    }

    #[test]
    fn test_control_sets() {
        let mut t = Tester::new(Designator);
        t.state.active_c0 = "ir104";
        t.state.active_c1 = "ir105";
        assert_feed!(t, vec![esc(b"!", b'@'), esc(b"\"", b'C'), esc(b"!", b'A')],
                     vec![Token::ControlSet { area: Area::CL, set: "ir001" },
                          Token::ControlSet { area: Area::CR, set: "ir077" },
                          esc(b"!", b'A')]);
        assert_eq!(t.state.active_c0, "ir001");
        assert_eq!(t.state.active_c1, "ir077");
    }

    #[test]
    fn test_control_escapes() {
        let mut t = Tester::new(Designator);
        assert_feed!(t, vec![esc(b"", b'N'), esc(b"", b'n'), esc(b"", b'|')],
                     vec![control::c1_escape(0x8e, "ir077"), control::independent("LS2", b'n'),
                          control::independent("LS3R", b'|')]);
        assert_feed!(t, vec![esc(b"", b'c'), esc(b"%", b'G')],
                     vec![esc(b"", b'c'), esc(b"%", b'G')]);
    }
}
