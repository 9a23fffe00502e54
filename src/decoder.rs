// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! The decoder pipeline.

use log::{debug, warn};
use crate::types::{Token, Mode, DecodeError, DecoderState};
use crate::util::{self, Filter, Context};
use crate::registry::Registry;
use crate::label::{self, CodePages};
use crate::tokenizer::Tokenizer;
use crate::codec::docs::DocsAnnouncer;
use crate::codec::chcp::ChcpAnnouncer;
use crate::codec::ecma35::Ecma35Filter;
use crate::codec::utf_8::Utf8Filter;
use crate::codec::japanese::ShiftJisFilter;
use crate::codec::tradchinese::BigFiveFilter;
use crate::codec::ebcdic::EbcdicFilter;
use crate::codec::utf_ebcdic::UtfEbcdicFilter;
use crate::codec::euc::EucFilter;
use crate::codec::singlebyte::PlainExtAsciiFilter;
use crate::codec::designation::Designator;
use crate::codec::invocation::InvocationResolver;
use crate::codec::graphic::GraphicResolver;

/// Initial configuration of a decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderOptions {
    /// The coding system at the beginning of the stream.
    pub mode: Mode,
    /// The code page applied at the beginning of the stream, which may change the coding system.
    pub code_page: Option<u32>,
}

impl Default for DecoderOptions {
    fn default() -> DecoderOptions {
        DecoderOptions { mode: Mode::Ecma35, code_page: None }
    }
}

/// Resets the state for given coding system and applies its default code page, if any.
pub fn activate(state: &mut DecoderState, mode: Mode, registry: &dyn Registry, pages: &dyn CodePages) {
    debug!("activating {} (was {})", mode, state.docs_mode);
    *state = DecoderState { docs_mode: mode, ..DecoderState::new() };
    if let Some(id) = pages.default_page(mode) {
        if let Some(page) = pages.lookup(id) {
            label::apply(state, registry, id, page);
        }
    }
}

/// The filter of the active coding system.
#[derive(Clone, Debug)]
enum ActiveFilter {
    Ecma35(Ecma35Filter),
    Utf8(Utf8Filter),
    ShiftJis(ShiftJisFilter),
    BigFive(BigFiveFilter),
    Ebcdic(EbcdicFilter),
    UtfEbcdic(UtfEbcdicFilter),
    Euc(EucFilter),
    PlainExtAscii(PlainExtAsciiFilter),
    /// Coding systems without a filter; their words pass through.
    Passthrough,
}

impl ActiveFilter {
    fn for_mode(mode: Mode) -> ActiveFilter {
        match mode {
            Mode::Ecma35 => ActiveFilter::Ecma35(Ecma35Filter),
            Mode::Utf8 => ActiveFilter::Utf8(Utf8Filter::new()),
            Mode::ShiftJis => ActiveFilter::ShiftJis(ShiftJisFilter::new()),
            Mode::BigFive => ActiveFilter::BigFive(BigFiveFilter::new()),
            Mode::Ebcdic => ActiveFilter::Ebcdic(EbcdicFilter::new()),
            Mode::UtfEbcdic => ActiveFilter::UtfEbcdic(UtfEbcdicFilter::new()),
            Mode::Euc => ActiveFilter::Euc(EucFilter::new()),
            Mode::PlainExtAscii => ActiveFilter::PlainExtAscii(PlainExtAsciiFilter),
            Mode::Utf16 | Mode::Ucs2 | Mode::Ucs4 | Mode::Utf1 | Mode::Scsu | Mode::Raw => {
                warn!("no filter for {}, passing words through", mode);
                ActiveFilter::Passthrough
            }
        }
    }
}

impl Filter for ActiveFilter {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        match *self {
            ActiveFilter::Ecma35(ref mut f) => f.step(token, ctx),
            ActiveFilter::Utf8(ref mut f) => f.step(token, ctx),
            ActiveFilter::ShiftJis(ref mut f) => f.step(token, ctx),
            ActiveFilter::BigFive(ref mut f) => f.step(token, ctx),
            ActiveFilter::Ebcdic(ref mut f) => f.step(token, ctx),
            ActiveFilter::UtfEbcdic(ref mut f) => f.step(token, ctx),
            ActiveFilter::Euc(ref mut f) => f.step(token, ctx),
            ActiveFilter::PlainExtAscii(ref mut f) => f.step(token, ctx),
            ActiveFilter::Passthrough => ctx.emit(token),
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        match *self {
            ActiveFilter::Ecma35(ref mut f) => f.finish(ctx),
            ActiveFilter::Utf8(ref mut f) => f.finish(ctx),
            ActiveFilter::ShiftJis(ref mut f) => f.finish(ctx),
            ActiveFilter::BigFive(ref mut f) => f.finish(ctx),
            ActiveFilter::Ebcdic(ref mut f) => f.finish(ctx),
            ActiveFilter::UtfEbcdic(ref mut f) => f.finish(ctx),
            ActiveFilter::Euc(ref mut f) => f.finish(ctx),
            ActiveFilter::PlainExtAscii(ref mut f) => f.finish(ctx),
            ActiveFilter::Passthrough => {}
        }
    }
}

/// Stages after the tokenizer, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Docs,
    Chcp,
    Mode,
    Designation,
    Invocation,
    Graphic,
    Output,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::Docs => Stage::Chcp,
            Stage::Chcp => Stage::Mode,
            Stage::Mode => Stage::Designation,
            Stage::Designation => Stage::Invocation,
            Stage::Invocation => Stage::Graphic,
            Stage::Graphic | Stage::Output => Stage::Output,
        }
    }
}

/**
 * A streaming decoder.
 *
 * Bytes go through the tokenizer, the DOCS and code page announcers, the filter of
 * the active coding system, the designation, the invocation and the final graphic
 * resolution, in this order. Every token is carried through the whole chain before
 * the next one enters, so a stage always sees the state left by the tokens before it.
 *
 * The decoder owns its state; tables are borrowed from the registry and the code page table.
 */
pub struct Decoder<'r> {
    registry: &'r dyn Registry,
    pages: &'r dyn CodePages,
    state: DecoderState,
    tokenizer: Tokenizer,
    docs: DocsAnnouncer,
    chcp: ChcpAnnouncer,
    mode: ActiveFilter,
    designator: Designator,
    invocation: InvocationResolver,
    graphic: GraphicResolver,
}

impl<'r> Decoder<'r> {
    /// Makes a decoder starting in ECMA-35.
    pub fn new(registry: &'r dyn Registry, pages: &'r dyn CodePages) -> Decoder<'r> {
        let mut state = DecoderState::new();
        activate(&mut state, Mode::Ecma35, registry, pages);
        Decoder {
            registry: registry,
            pages: pages,
            state: state,
            tokenizer: Tokenizer::new(),
            docs: DocsAnnouncer,
            chcp: ChcpAnnouncer,
            mode: ActiveFilter::for_mode(Mode::Ecma35),
            designator: Designator,
            invocation: InvocationResolver::new(),
            graphic: GraphicResolver::new(),
        }
    }

    /// Makes a decoder with given options.
    /// The code page, if any, decides the initial coding system instead of `options.mode`.
    pub fn with_options(registry: &'r dyn Registry, pages: &'r dyn CodePages,
                        options: DecoderOptions) -> Result<Decoder<'r>, DecodeError> {
        let mut decoder = Decoder::new(registry, pages);
        let mode = match options.code_page {
            Some(id) => pages.lookup(id).ok_or(DecodeError::UnrecognizedCodePage(id))?.mode,
            None => options.mode,
        };
        activate(&mut decoder.state, mode, registry, pages);
        decoder.mode = ActiveFilter::for_mode(mode);
        if let Some(id) = options.code_page {
            if let Some(page) = pages.lookup(id) {
                label::apply(&mut decoder.state, registry, id, page);
            }
        }
        Ok(decoder)
    }

    /// Returns the shared state.
    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Returns the shared state for modification, e.g. to select a double-byte EBCDIC plane.
    pub fn state_mut(&mut self) -> &mut DecoderState {
        &mut self.state
    }

    /// Feeds a token as if it were read by the tokenizer.
    pub fn feed(&mut self, token: Token, output: &mut Vec<Token>) {
        self.pump(Stage::Docs, token, output);
    }

    /// Feeds raw bytes.
    pub fn feed_bytes(&mut self, input: &[u8], output: &mut Vec<Token>) {
        let mut tokens = Vec::new();
        for &byte in input {
            self.tokenizer.push(byte, &mut tokens);
            for token in tokens.drain(..) {
                self.pump(Stage::Docs, token, output);
            }
        }
    }

    /// Flushes every stage at the end of the input.
    pub fn finish(&mut self, output: &mut Vec<Token>) {
        let mut tokens = Vec::new();
        self.tokenizer.finish(&mut tokens);
        for token in tokens {
            self.pump(Stage::Docs, token, output);
        }

        let mut stage = Stage::Docs;
        while stage != Stage::Output {
            let mut flushed = Vec::new();
            {
                let (state, registry, pages) = (&mut self.state, self.registry, self.pages);
                match stage {
                    Stage::Docs => util::finish(&mut self.docs, state, registry, pages, &mut flushed),
                    Stage::Chcp => util::finish(&mut self.chcp, state, registry, pages, &mut flushed),
                    Stage::Mode => util::finish(&mut self.mode, state, registry, pages, &mut flushed),
                    Stage::Designation =>
                        util::finish(&mut self.designator, state, registry, pages, &mut flushed),
                    Stage::Invocation =>
                        util::finish(&mut self.invocation, state, registry, pages, &mut flushed),
                    Stage::Graphic => util::finish(&mut self.graphic, state, registry, pages, &mut flushed),
                    Stage::Output => unreachable!(),
                }
            }
            for token in flushed {
                self.pump(stage.next(), token, output);
            }
            stage = stage.next();
        }
    }

    /// Carries a token from given stage to the end of the chain.
    fn pump(&mut self, stage: Stage, token: Token, output: &mut Vec<Token>) {
        if stage == Stage::Output {
            return output.push(token);
        }
        if stage == Stage::Mode {
            if let Token::Rdocs { .. } | Token::Chcp(_) = token {
                return self.directive(token, output);
            }
        }

        let mut emitted = Vec::new();
        {
            let (state, registry, pages) = (&mut self.state, self.registry, self.pages);
            match stage {
                Stage::Docs => util::feed(&mut self.docs, token, state, registry, pages, &mut emitted),
                Stage::Chcp => util::feed(&mut self.chcp, token, state, registry, pages, &mut emitted),
                Stage::Mode => util::feed(&mut self.mode, token, state, registry, pages, &mut emitted),
                Stage::Designation =>
                    util::feed(&mut self.designator, token, state, registry, pages, &mut emitted),
                Stage::Invocation =>
                    util::feed(&mut self.invocation, token, state, registry, pages, &mut emitted),
                Stage::Graphic => util::feed(&mut self.graphic, token, state, registry, pages, &mut emitted),
                Stage::Output => unreachable!(),
            }
        }
        for token in emitted {
            match token {
                // the active filter may announce another coding system by itself
                Token::Rdocs { .. } | Token::Chcp(_) if stage == Stage::Mode => self.directive(token, output),
                token => self.pump(stage.next(), token, output),
            }
        }
    }

    /// Acts on a coding system switch or a code page selection at the mode stage.
    fn directive(&mut self, token: Token, output: &mut Vec<Token>) {
        match token {
            Token::Rdocs { mode, .. } => {
                let mut flushed = Vec::new();
                util::finish(&mut self.mode, &mut self.state, self.registry, self.pages, &mut flushed);
                for token in flushed {
                    self.pump(Stage::Designation, token, output);
                }
                activate(&mut self.state, mode, self.registry, self.pages);
                self.mode = ActiveFilter::for_mode(mode);
            }
            Token::Chcp(id) => {
                let pages = self.pages;
                if let Some(page) = pages.lookup(id) {
                    label::apply(&mut self.state, self.registry, id, page);
                }
            }
            _ => {}
        }
        self.pump(Stage::Designation, token, output);
    }
}
