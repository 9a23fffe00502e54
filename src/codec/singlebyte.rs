// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! ASCII-based single-byte code pages.

use crate::types::{Token, Area, Subarea};
use crate::util::{Filter, Context};
use crate::control;

/// Looks a byte in 0x80 to 0xFF up from the active right-hand-side table.
pub fn rhs_char(ctx: &Context, byte: u8) -> Token {
    let rhs = ctx.state.active_rhs.clone().unwrap_or_default();
    match ctx.registry.rhs(&rhs).and_then(|table| table.lookup(byte)) {
        Some(ch) => Token::Char { scalars: vec![ch], set: rhs, code: vec![byte],
                                  area: Area::GR, subarea: Subarea::Rhs },
        None => Token::CharLookupMiss { set: rhs, code: vec![byte], area: Area::GR,
                                        subarea: Subarea::Rhs },
    }
}

/**
 * A single-byte code page with ASCII (or whatever G0 holds) in the lower half.
 *
 * The C0 graphics level decides whether control positions print as graphics;
 * level 0 further strips every byte to seven bits, like a terminal on a seven-bit line.
 */
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainExtAsciiFilter;

impl Filter for PlainExtAsciiFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let byte = match token {
            Token::Word(byte) => byte,
            Token::Csi(ref csi) if control::is_select_data_type(csi) => {
                return control::select_data_type(csi, ctx);
            }
            token => return ctx.emit(token),
        };

        let byte = if ctx.state.c0_graphics_mode == 0 { byte & 0x7f } else { byte };
        match byte {
            0x00..=0x1f | 0x7f => {
                let set = ctx.state.active_c0;
                control::control_or_graphic(ctx, byte, set, control::PROTECTED);
            }
            0x20..=0x7e => ctx.emit_left(byte),
            0x80..=0x9f => {
                let set = ctx.state.active_c1;
                control::control_or_graphic(ctx, byte, set, control::PROTECTED);
            }
            _ => {
                let token = rhs_char(ctx, byte);
                ctx.emit(token);
            }
        }
    }
}
