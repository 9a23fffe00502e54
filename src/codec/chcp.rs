// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! In-band code page selection.

use log::debug;
use crate::types::{Token, ControlSequence, DecodeError};
use crate::util::{Filter, Context};

/// True if the sequence selects a code page, `CSI Pn * p`.
pub fn is_select_code_page(csi: &ControlSequence) -> bool {
    csi.final_byte == b'p' && csi.intermediates == b"*" && csi.private_marker().is_none()
}

/// Announces a code page, switching the coding system first if the page needs another one.
/// An unknown page is reported and otherwise ignored.
pub fn select(page: u32, bytes: Vec<u8>, ctx: &mut Context) {
    let mode = match ctx.pages.lookup(page) {
        Some(cp) => cp.mode,
        None => {
            ctx.err(DecodeError::UnrecognizedCodePage(page));
            return;
        }
    };
    if mode != ctx.state.docs_mode {
        debug!("code page {} switches {} to {}", page, ctx.state.docs_mode, mode);
        ctx.emit(Token::Rdocs { mode: mode, without_return: !mode.is_ascii_framed(), bytes: bytes });
    }
    ctx.emit(Token::Chcp(page));
}

/// Replaces code page selections with `Chcp` directives.
#[derive(Clone, Debug, Default)]
pub struct ChcpAnnouncer;

impl Filter for ChcpAnnouncer {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        if let Token::Csi(ref csi) = token {
            if ctx.state.docs_mode.is_ascii_framed() && is_select_code_page(csi) {
                if let Some(page) = csi.number() {
                    select(page, csi.bytes(), ctx);
                    return;
                }
            }
        }
        ctx.emit(token);
    }
}
