// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Splitting raw bytes into words, escape sequences and control sequences.

use crate::types::{Token, Escape, ControlSequence};

#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    Ground,
    /// After ESC and zero or more intermediate bytes.
    Escape(Vec<u8>),
    /// After `ESC [`, with parameter and intermediate bytes so far.
    Csi(Vec<u8>, Vec<u8>),
}

/// A streaming tokenizer.
///
/// Bytes of a malformed sequence are flushed as plain words,
/// and the byte which broke the sequence is read again from the ground state.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    state: State,
}

impl Tokenizer {
    pub fn new() -> Tokenizer {
        Tokenizer { state: State::Ground }
    }

    /// True if no sequence is pending.
    pub fn is_idle(&self) -> bool {
        self.state == State::Ground
    }

    /// Reads one byte.
    pub fn push(&mut self, byte: u8, output: &mut Vec<Token>) {
        let state = std::mem::replace(&mut self.state, State::Ground);
        let next = match state {
            State::Ground if byte == 0x1b => State::Escape(Vec::new()),
            State::Ground => {
                output.push(Token::Word(byte));
                State::Ground
            }

            State::Escape(ref im) if im.is_empty() && byte == b'[' => State::Csi(Vec::new(), Vec::new()),
            State::Escape(mut im) => match byte {
                0x20..=0x2f => {
                    im.push(byte);
                    State::Escape(im)
                }
                0x30..=0x7e => {
                    output.push(Token::Esc(Escape { intermediates: im, final_byte: byte }));
                    State::Ground
                }
                _ => {
                    output.push(Token::Word(0x1b));
                    output.extend(im.into_iter().map(Token::Word));
                    return self.push(byte, output);
                }
            },

            State::Csi(mut params, mut im) => match byte {
                0x30..=0x3f if im.is_empty() => {
                    params.push(byte);
                    State::Csi(params, im)
                }
                0x20..=0x2f => {
                    im.push(byte);
                    State::Csi(params, im)
                }
                0x40..=0x7e => {
                    output.push(Token::Csi(ControlSequence { params: params, intermediates: im,
                                                             final_byte: byte }));
                    State::Ground
                }
                _ => {
                    output.push(Token::Word(0x1b));
                    output.push(Token::Word(b'['));
                    output.extend(params.into_iter().map(Token::Word));
                    output.extend(im.into_iter().map(Token::Word));
                    return self.push(byte, output);
                }
            },
        };
        self.state = next;
    }

    /// Reads a slice of bytes.
    pub fn push_all(&mut self, input: &[u8], output: &mut Vec<Token>) {
        for &byte in input {
            self.push(byte, output);
        }
    }

    /// Flushes a pending partial sequence as words.
    pub fn finish(&mut self, output: &mut Vec<Token>) {
        match std::mem::replace(&mut self.state, State::Ground) {
            State::Ground => {}
            State::Escape(im) => {
                output.push(Token::Word(0x1b));
                output.extend(im.into_iter().map(Token::Word));
            }
            State::Csi(params, im) => {
                output.push(Token::Word(0x1b));
                output.push(Token::Word(b'['));
                output.extend(params.into_iter().map(Token::Word));
                output.extend(im.into_iter().map(Token::Word));
            }
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Tokenizer { Tokenizer::new() }
}
