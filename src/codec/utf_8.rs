// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! UTF-8, the universal encoding.

use crate::types::{Token, DecodeError, UcsForm};
use crate::util::{Filter, Context};
use crate::control;

/// Emits a decoded scalar value. Control codes become control functions.
pub fn emit_scalar(ctx: &mut Context, scalar: u32, label: &'static str, form: UcsForm) {
    match scalar {
        0x00..=0x1f | 0x7f..=0x9f => ctx.emit(control::unicode(scalar as u8)),
        _ => ctx.emit(Token::Ucs { scalar: scalar, label: label, form: form }),
    }
}

/// Returns the number of bytes in the shortest form of a value.
fn min_units(value: u32) -> usize {
    match value {
        0..=0x7f => 1,
        0x80..=0x7ff => 2,
        0x800..=0xffff => 3,
        0x10000..=0x1fffff => 4,
        0x200000..=0x3ffffff => 5,
        _ => 6,
    }
}

/**
 * UTF-8 (UCS Transformation Format, 8-bit).
 *
 * The original, ISO 10646 definition is decoded, so five- and six-byte sequences
 * are read in full before being rejected as beyond U+10FFFF.
 * Overlong sequences are reported but still give their scalar value,
 * and surrogates are handed to the final resolution for pairing.
 */
#[derive(Clone, Debug)]
pub struct Utf8Filter {
    queue: Vec<u8>,
    units: usize,
    first: bool,
}

impl Utf8Filter {
    pub fn new() -> Utf8Filter {
        Utf8Filter { queue: Vec::new(), units: 0, first: true }
    }

    fn complete(&mut self, ctx: &mut Context) {
        let bytes = std::mem::replace(&mut self.queue, Vec::new());
        let n = self.units;
        self.units = 0;

        let mut value = (bytes[0] & (0x7f >> n)) as u32;
        for &c in &bytes[1..] {
            value = (value << 6) | (c & 0x3f) as u32;
        }

        let mut form = UcsForm::Normal;
        if n > min_units(value) {
            ctx.err(DecodeError::Utf8Overlong { bytes: bytes.clone(), scalar: value });
            form = UcsForm::Overlong;
        }
        if value > 0x10ffff {
            ctx.err(DecodeError::Utf8Beyond { bytes: bytes, value: value });
        } else if value >= 0xd800 && value <= 0xdfff {
            ctx.emit(Token::Cesu { scalar: value, width: n as u8 });
        } else if self.first && value == 0xfeff {
            ctx.emit(Token::Bom);
        } else {
            emit_scalar(ctx, value, "UTF-8", form);
        }
        self.first = false;
    }
}

impl Default for Utf8Filter {
    fn default() -> Utf8Filter { Utf8Filter::new() }
}

impl Filter for Utf8Filter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let byte = match token {
            Token::Word(byte) => byte,
            token => {
                if !self.queue.is_empty() {
                    let queue = std::mem::replace(&mut self.queue, Vec::new());
                    self.units = 0;
                    return ctx.backup_and_err(token, DecodeError::Utf8Truncate(queue));
                }
                return ctx.emit(token);
            }
        };

        if !self.queue.is_empty() {
            if byte & 0xc0 == 0x80 {
                self.queue.push(byte);
                if self.queue.len() == self.units {
                    self.complete(ctx);
                }
            } else {
                let queue = std::mem::replace(&mut self.queue, Vec::new());
                self.units = 0;
                ctx.backup_and_err(Token::Word(byte), DecodeError::Utf8Truncate(queue));
            }
            return;
        }

        match byte {
            0x00..=0x7f => {
                emit_scalar(ctx, byte as u32, "UTF-8", UcsForm::Normal);
                self.first = false;
            }
            0x80..=0xbf | 0xfe | 0xff => ctx.err(DecodeError::Utf8Isolate(byte)),
            _ => {
                self.units = (!byte).leading_zeros() as usize;
                self.queue.push(byte);
            }
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        if !self.queue.is_empty() {
            let queue = std::mem::replace(&mut self.queue, Vec::new());
            self.units = 0;
            ctx.err(DecodeError::Utf8Truncate(queue));
        }
    }
}
