// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Legacy traditional Chinese encodings.

use encoding_index_tradchinese as index;
use crate::types::{Token, DecodeError, Register, Area};
use crate::registry::Forward;
use crate::util::{Filter, Context};
use crate::control;

/// Cells per lead byte.
const TRAILS: u32 = 157;

static TWO_LETTERS: [&'static [u32]; 4] = [
    &[0x00ca, 0x0304], &[0x00ca, 0x030c], &[0x00ea, 0x0304], &[0x00ea, 0x030c],
];

fn big5(pointer: u32) -> Forward {
    match index::big5::forward(pointer as u16) {
        ch @ 0..=3 => Forward::Seq(TWO_LETTERS[ch as usize]),
        ch => Forward::from_index(ch),
    }
}

/// Big Five lead bytes 0xA1 to 0xC6 as a 94^2 plane.
pub fn plane1(index: u32) -> Forward {
    if index >= 0x26 * TRAILS { return Forward::Unmapped; }
    big5((0xa1 - 0x81) * TRAILS + index)
}

/// Big Five lead bytes 0xC7 to 0xF9 as a 94^2 plane.
pub fn plane2(index: u32) -> Forward {
    if index >= 0x33 * TRAILS { return Forward::Unmapped; }
    big5((0xc7 - 0x81) * TRAILS + index)
}

/// Big Five lead bytes 0x81 to 0xA0, then 0xFA to 0xFE, as a 94^2 plane.
pub fn extension_plane(index: u32) -> Forward {
    if index < 0x20 * TRAILS {
        big5(index)
    } else if index < 0x25 * TRAILS {
        big5((0xfa - 0x81) * TRAILS + index - 0x20 * TRAILS)
    } else {
        Forward::Unmapped
    }
}

/// Returns the register and the offset into its plane for a lead byte.
fn plane_of(lead: u8) -> (Register, u32) {
    match lead {
        0xa1..=0xc6 => (Register::G1, (lead - 0xa1) as u32),
        0xc7..=0xf9 => (Register::G2, (lead - 0xc7) as u32),
        0x81..=0xa0 => (Register::G3, (lead - 0x81) as u32),
        _ => (Register::G3, (lead - 0xfa) as u32 + 0x20),
    }
}

/**
 * Big Five.
 *
 * Double-byte codes are spread over three 94^2 planes: G1 and G2 hold
 * the two levels of common characters, and G3 the vendor extensions
 * below and above them. Positions within a plane follow the Big Five order.
 */
#[derive(Clone, Debug, Default)]
pub struct BigFiveFilter {
    lead: Option<u8>,
}

impl BigFiveFilter {
    pub fn new() -> BigFiveFilter {
        BigFiveFilter { lead: None }
    }
}

impl Filter for BigFiveFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let byte = match token {
            Token::Word(byte) => byte,
            token => match self.lead.take() {
                Some(lead) => return ctx.backup_and_err(token, DecodeError::Big5Truncate(vec![lead])),
                None => return ctx.emit(token),
            },
        };

        if let Some(lead) = self.lead.take() {
            let trail = match byte {
                0x40..=0x7e => (byte - 0x40) as u32,
                0xa1..=0xfe => (byte - 0x62) as u32,
                _ => return ctx.backup_and_err(Token::Word(byte),
                                               DecodeError::Big5Truncate(vec![lead])),
            };
            let (register, offset) = plane_of(lead);
            let offset = offset * TRAILS + trail;
            let code = vec![0x21 + (offset / 94) as u8, 0x21 + (offset % 94) as u8];
            // an unmapped pair with an ASCII trail gives the trail back
            let mapped = ctx.set_in(register).map_or(false, |(_, set)| set.lookup(&code).is_some());
            if !mapped && byte < 0x80 {
                return ctx.backup_and_err(Token::Word(byte), DecodeError::Big5Truncate(vec![lead]));
            }
            let token = ctx.direct(register, code, Area::GR);
            return ctx.emit(token);
        }

        match byte {
            0x00..=0x1f => {
                let token = control::c0(byte, ctx.state.active_c0);
                ctx.emit(token);
            }
            0x20..=0x7f => ctx.emit_left(byte),
            0x80 | 0xff => ctx.err(DecodeError::Big5UnusedByte(byte)),
            _ => self.lead = Some(byte),
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        if let Some(lead) = self.lead.take() {
            ctx.err(DecodeError::Big5Truncate(vec![lead]));
        }
    }
}
