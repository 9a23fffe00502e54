// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Internal utilities.

use std::char;
use crate::types::{Token, DecodeError, DecoderState, Register, Area, Subarea, Origin};
use crate::registry::{Registry, GraphicSet};
use crate::label::CodePages;
use crate::control;

/// Conversion to `char`. Surrogates and out-of-range values become U+FFFD.
pub fn as_char(ch: u32) -> char {
    char::from_u32(ch).unwrap_or('\u{fffd}')
}

/// A helper struct for stateful filters.
///
/// Every call to `Filter::step` receives a fresh helper which collects the output
/// and at most one token to be fed back to the same filter.
pub struct StatefulFilterHelper<'a> {
    /// The state shared by all stages.
    pub state: &'a mut DecoderState,
    /// The character set registry.
    pub registry: &'a dyn Registry,
    /// The code page table.
    pub pages: &'a dyn CodePages,
    output: &'a mut Vec<Token>,
    backup: Option<Token>,
}

pub type Context<'a> = StatefulFilterHelper<'a>;

impl<'a> StatefulFilterHelper<'a> {
    pub fn new(state: &'a mut DecoderState, registry: &'a dyn Registry,
               pages: &'a dyn CodePages, output: &'a mut Vec<Token>) -> StatefulFilterHelper<'a> {
        StatefulFilterHelper { state: state, registry: registry, pages: pages,
                               output: output, backup: None }
    }

    /// Makes a helper sharing the state but writing to another buffer.
    pub fn with_output<'b>(&'b mut self, output: &'b mut Vec<Token>) -> StatefulFilterHelper<'b> {
        StatefulFilterHelper { state: &mut *self.state, registry: self.registry,
                               pages: self.pages, output: output, backup: None }
    }

    /// Writes one token to the output.
    #[inline(always)]
    pub fn emit(&mut self, token: Token) {
        self.output.push(token);
    }

    /// Writes an error token to the output.
    #[inline(always)]
    pub fn err(&mut self, err: DecodeError) {
        self.output.push(Token::Error(err));
    }

    /// Writes an error token and retains `token` to be fed again after this step.
    ///
    /// This implements "prepending the token to the stream", so that a token
    /// interrupting a multi-byte sequence is never lost.
    #[inline(always)]
    pub fn backup_and_err(&mut self, token: Token, err: DecodeError) {
        self.err(err);
        self.backup(token);
    }

    /// Retains `token` to be fed again after this step.
    #[inline(always)]
    pub fn backup(&mut self, token: Token) {
        debug_assert!(self.backup.is_none(), "only one token can be fed back");
        self.backup = Some(token);
    }

    /// Takes the retained token out if any.
    pub fn take_backup(&mut self) -> Option<Token> {
        self.backup.take()
    }

    /// Makes a position addressed to the set in given register, bypassing the invocation.
    pub fn direct(&self, register: Register, code: Vec<u8>, area: Area) -> Token {
        let set = self.state.set_in(register).unwrap_or("").to_string();
        Token::Graph { set: set, code: code, area: area, subarea: Subarea::Direct(register) }
    }

    /// Emits a byte in 0x20 to 0x7F through G0.
    /// SPACE and DELETE are control functions unless G0 has 96 cells.
    pub fn emit_left(&mut self, byte: u8) {
        let token = match byte {
            0x20 if !self.state.is96[0] => control::space(Origin::Byte),
            0x7f if !self.state.is96[0] => control::delete(Origin::Byte),
            _ => self.direct(Register::G0, vec![byte], Area::GL),
        };
        self.emit(token);
    }

    /// Returns the identifier and the descriptor of the set in given register.
    pub fn set_in(&self, register: Register) -> Option<(&str, &GraphicSet)> {
        let id = self.state.set_in(register)?;
        self.registry.lookup(id).map(|set| (id, set))
    }
}

/// A stage of the decoder pipeline.
pub trait Filter {
    /// Consumes one token, writing zero or more tokens to `ctx`.
    /// Tokens which the filter does not recognize should be emitted unchanged.
    fn step(&mut self, token: Token, ctx: &mut Context);

    /// Flushes any pending sequence at the end of the input.
    fn finish(&mut self, _ctx: &mut Context) {}
}

/// Feeds one token to the filter, including any token it retains for reconsumption.
pub fn feed<F: Filter + ?Sized>(filter: &mut F, token: Token, state: &mut DecoderState,
                                registry: &dyn Registry, pages: &dyn CodePages,
                                output: &mut Vec<Token>) {
    let mut next = Some(token);
    while let Some(token) = next {
        let mut ctx = StatefulFilterHelper::new(&mut *state, registry, pages, &mut *output);
        filter.step(token, &mut ctx);
        next = ctx.take_backup();
    }
}

/// Flushes the filter at the end of the input.
pub fn finish<F: Filter + ?Sized>(filter: &mut F, state: &mut DecoderState,
                                  registry: &dyn Registry, pages: &dyn CodePages,
                                  output: &mut Vec<Token>) {
    let backup = {
        let mut ctx = StatefulFilterHelper::new(&mut *state, registry, pages, &mut *output);
        filter.finish(&mut ctx);
        ctx.take_backup()
    };
    if let Some(token) = backup {
        feed(filter, token, state, registry, pages, output);
    }
}
