// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! ECMA-35 itself, the eight-bit code structure.

use crate::types::{Token, Area, Origin};
use crate::util::{Filter, Context};
use crate::control;

/**
 * The eight-bit ECMA-35 code structure.
 *
 * Bytes are only split into the four areas here; which set each graphic byte
 * belongs to is decided later by the invocation state.
 * SPACE and DELETE are control functions unless the set invoked into GL has 96 cells.
 */
#[derive(Clone, Debug, Default)]
pub struct Ecma35Filter;

impl Filter for Ecma35Filter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let byte = match token {
            Token::Word(byte) => byte,
            token => return ctx.emit(token),
        };
        let gl_is96 = ctx.state.is96[ctx.state.gl.index()];
        let token = match byte {
            0x00..=0x1f => control::c0(byte, ctx.state.active_c0),
            0x20 if !gl_is96 => control::space(Origin::Byte),
            0x7f if !gl_is96 => control::delete(Origin::Byte),
            0x20..=0x7f => Token::Code(byte, Area::GL),
            0x80..=0x9f => control::c1(byte, ctx.state.active_c1),
            _ => Token::Code(byte, Area::GR),
        };
        ctx.emit(token);
    }
}
