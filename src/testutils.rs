// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Helpers and macros for testing.

use crate::types::{Token, Mode, DecodeError, DecoderState, DecoderTrap, Area, Subarea};
use crate::util::{self, Filter};
use crate::registry::BuiltinRegistry;
use crate::label::BuiltinCodePages;
use crate::decoder::{self, Decoder, DecoderOptions};

/// A single filter with a state of its own.
pub struct Tester<F> {
    pub filter: F,
    pub state: DecoderState,
}

impl<F: Filter> Tester<F> {
    /// Starts with the ECMA-35 defaults.
    pub fn new(filter: F) -> Tester<F> {
        Tester { filter: filter, state: DecoderState::new() }
    }

    /// Starts in given coding system, with its default code page applied.
    pub fn in_mode(filter: F, mode: Mode) -> Tester<F> {
        let mut state = DecoderState::new();
        decoder::activate(&mut state, mode, &BuiltinRegistry, &BuiltinCodePages);
        Tester { filter: filter, state: state }
    }

    pub fn feed(&mut self, input: Vec<Token>) -> Vec<Token> {
        let mut output = Vec::new();
        for token in input {
            util::feed(&mut self.filter, token, &mut self.state,
                       &BuiltinRegistry, &BuiltinCodePages, &mut output);
        }
        output
    }

    pub fn finish(&mut self) -> Vec<Token> {
        let mut output = Vec::new();
        util::finish(&mut self.filter, &mut self.state,
                     &BuiltinRegistry, &BuiltinCodePages, &mut output);
        output
    }
}

pub fn words(bytes: &[u8]) -> Vec<Token> {
    bytes.iter().map(|&b| Token::Word(b)).collect()
}

pub fn graph(set: &str, code: &[u8], area: Area, subarea: Subarea) -> Token {
    Token::Graph { set: set.to_string(), code: code.to_vec(), area: area, subarea: subarea }
}

pub fn chr(scalars: &[u32], set: &str, code: &[u8], area: Area, subarea: Subarea) -> Token {
    Token::Char { scalars: scalars.to_vec(), set: set.to_string(), code: code.to_vec(),
                  area: area, subarea: subarea }
}

/// Runs the whole pipeline, starting in given coding system.
pub fn run(mode: Mode, input: &[u8]) -> Vec<Token> {
    let options = DecoderOptions { mode: mode, code_page: None };
    let mut d = Decoder::with_options(&BuiltinRegistry, &BuiltinCodePages, options)
        .expect("no code page was given");
    let mut output = Vec::new();
    d.feed_bytes(input, &mut output);
    d.finish(&mut output);
    output
}

/// Collects the errors in a token stream.
pub fn errors(tokens: &[Token]) -> Vec<DecodeError> {
    tokens.iter().filter_map(|t| match *t {
        Token::Error(ref e) => Some(e.clone()),
        _ => None,
    }).collect()
}

/// Renders a token stream, replacing errors with U+FFFD.
pub fn text(tokens: &[Token]) -> String {
    let mut ret = String::new();
    crate::render(tokens, DecoderTrap::Replace, &mut ret).expect("replacement never fails");
    ret
}

macro_rules! assert_feed(
    ($this:expr, $input:expr, $output:expr) => ({
        let output = $this.feed($input);
        let expected: Vec<$crate::types::Token> = $output;
        assert!(output == expected,
                "feed should emit {:?}, but instead emitted {:?}", expected, output);
    })
);

macro_rules! assert_finish(
    ($this:expr, $output:expr) => ({
        let output = $this.finish();
        let expected: Vec<$crate::types::Token> = $output;
        assert!(output == expected,
                "finish should emit {:?}, but instead emitted {:?}", expected, output);
    })
);

macro_rules! assert_decode(
    ($mode:expr, $input:expr, $output:expr) => ({
        let input: Vec<u8> = $input.to_vec();
        let tokens = $crate::testutils::run($mode, &input);
        let output = $crate::testutils::text(&tokens);
        assert!(output == $output,
                "decoding {:02x?} should give {:?}, but instead gave {:?} from {:?}",
                input, $output, output, tokens);
    })
);

macro_rules! assert_errors(
    ($mode:expr, $input:expr, $errors:expr) => ({
        let input: Vec<u8> = $input.to_vec();
        let tokens = $crate::testutils::run($mode, &input);
        let errors = $crate::testutils::errors(&tokens);
        let expected: Vec<$crate::types::DecodeError> = $errors;
        assert!(errors == expected,
                "decoding {:02x?} should report {:?}, but instead reported {:?}",
                input, expected, errors);
    })
);
