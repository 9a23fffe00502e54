// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! UTF-EBCDIC, a UTF-8 lookalike over the EBCDIC invariants.

use crate::types::{Token, DecodeError, UcsForm};
use crate::util::{Filter, Context};
use crate::index::ebcdic::UTF_EBCDIC;
use crate::codec::utf_8::emit_scalar;

/// Returns the number of units in the shortest form of a value.
fn min_units(value: u64) -> usize {
    match value {
        0..=0x9f => 1,
        0xa0..=0x3ff => 2,
        0x400..=0x3fff => 3,
        0x4000..=0x3ffff => 4,
        0x40000..=0x3fffff => 5,
        0x400000..=0x3ffffff => 6,
        0x4000000..=0x3fffffff => 7,
        _ => 8,
    }
}

/**
 * UTF-EBCDIC.
 *
 * Bytes are first converted to the intermediate "I8" form, which works like UTF-8
 * except that continuations (0xA0 to 0xBF) carry five bits each
 * and everything below 0xA0 stands for itself.
 * Errors report the original bytes. The leads 0xFE and 0xFF start seven and eight
 * units, whose values can exceed 32 bits, so values are collected in 64 bits.
 */
#[derive(Clone, Debug)]
pub struct UtfEbcdicFilter {
    /// Original bytes of the pending sequence.
    queue: Vec<u8>,
    value: u64,
    units: usize,
    first: bool,
}

impl UtfEbcdicFilter {
    pub fn new() -> UtfEbcdicFilter {
        UtfEbcdicFilter { queue: Vec::new(), value: 0, units: 0, first: true }
    }

    fn take_queue(&mut self) -> Vec<u8> {
        self.units = 0;
        self.value = 0;
        std::mem::replace(&mut self.queue, Vec::new())
    }

    fn complete(&mut self, ctx: &mut Context) {
        let n = self.units;
        let value = self.value;
        let bytes = self.take_queue();

        let mut form = UcsForm::Normal;
        if n > min_units(value) && value <= 0x10ffff {
            if value == 0 {
                ctx.err(DecodeError::UtfEbcdicOverlongNull(bytes.clone()));
            } else {
                ctx.err(DecodeError::UtfEbcdicOverlong { bytes: bytes.clone(), scalar: value as u32 });
            }
            form = UcsForm::Overlong;
        }
        if value > 0x10ffff {
            ctx.err(DecodeError::UtfEbcdicBeyond { bytes: bytes, value: value });
            self.first = false;
            return;
        }
        let value = value as u32;
        if value >= 0xd800 && value <= 0xdfff {
            ctx.emit(Token::Cesu { scalar: value, width: n as u8 });
        } else if self.first && value == 0xfeff {
            ctx.emit(Token::Bom);
        } else {
            emit_scalar(ctx, value, "UTF-EBCDIC", form);
        }
        self.first = false;
    }

    /// Reads one raw byte.
    fn byte(&mut self, byte: u8, ctx: &mut Context) {
        let unit = UTF_EBCDIC[byte as usize];

        if !self.queue.is_empty() {
            if unit >= 0xa0 && unit < 0xc0 {
                self.queue.push(byte);
                self.value = (self.value << 5) | (unit & 0x1f) as u64;
                if self.queue.len() == self.units {
                    self.complete(ctx);
                }
                return;
            }
            // the interrupting byte is read again below
            let queue = self.take_queue();
            ctx.err(DecodeError::UtfEbcdicTruncate(queue));
        }

        match unit {
            0x00..=0x9f => {
                emit_scalar(ctx, unit as u32, "UTF-EBCDIC", UcsForm::Normal);
                self.first = false;
            }
            0xa0..=0xbf => ctx.err(DecodeError::UtfEbcdicIsolate(byte)),
            _ => {
                let n = (!unit).leading_zeros() as usize;
                let mask = if n >= 7 { 0 } else { 0x7f >> n };
                self.units = n;
                self.value = (unit & mask) as u64;
                self.queue.push(byte);
            }
        }
    }
}

impl Default for UtfEbcdicFilter {
    fn default() -> UtfEbcdicFilter { UtfEbcdicFilter::new() }
}

impl Filter for UtfEbcdicFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        let bytes = match token {
            Token::Word(byte) => vec![byte],
            // ASCII framing means nothing here
            Token::Esc(ref esc) => esc.bytes(),
            Token::Csi(ref csi) => csi.bytes(),
            token => {
                if !self.queue.is_empty() {
                    let queue = self.take_queue();
                    return ctx.backup_and_err(token, DecodeError::UtfEbcdicTruncate(queue));
                }
                return ctx.emit(token);
            }
        };
        for byte in bytes {
            self.byte(byte, ctx);
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        if !self.queue.is_empty() {
            let queue = self.take_queue();
            ctx.err(DecodeError::UtfEbcdicTruncate(queue));
        }
    }
}
