// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Invocation of graphic sets by locking and single shifts.

use log::trace;
use crate::types::{Token, Control, DecodeError, Register, Area, Subarea, Mode, Origin};
use crate::util::{Filter, Context};
use crate::control;

static LS_NAMES: [&'static str; 8] = ["LS0", "LS1", "LS2", "LS3", "LS4", "LS5", "LS6", "LS7"];
static LSR_NAMES: [&'static str; 8] = ["LS0R", "LS1R", "LS2R", "LS3R", "LS4R", "LS5R", "LS6R", "LS7R"];

/// What a control function does to the invocation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shift {
    /// Invokes the register with given number into GL or GR.
    Locking(usize, Area),
    Single(usize),
    ShiftOut,
    ShiftIn,
    /// The locking-shift introducer, whose trailer selects a locking shift.
    Introducer,
    /// The EBCDIC graphic escape, which reaches G3 for one byte.
    GraphicEscape,
}

fn shift_of(name: &str) -> Option<Shift> {
    match name {
        "SO" => return Some(Shift::ShiftOut),
        "SI" => return Some(Shift::ShiftIn),
        "LSI" => return Some(Shift::Introducer),
        "GE" => return Some(Shift::GraphicEscape),
        _ => {}
    }
    if name.starts_with("LS") {
        let (digits, area) = if name.ends_with('R') {
            (&name[2..name.len() - 1], Area::GR)
        } else {
            (&name[2..], Area::GL)
        };
        digits.parse().ok().map(|n| Shift::Locking(n, area))
    } else if name.starts_with("SS") {
        name[2..].parse().ok().map(Shift::Single)
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    Idle,
    /// Redirecting `expected - received` more codes into a register.
    Single { register: Register, set: String, expected: usize, received: usize, area: Option<Area> },
    /// After the locking-shift introducer.
    Introduced(Control),
    /// After the graphic escape.
    GraphicEscape,
}

/**
 * Resolves `Code` tokens into positions of the invoked or shifted register.
 *
 * Locking shifts change `gl` and `gr` (or the double-byte mode of EBCDIC) and pass through.
 * A single shift redirects as many following codes as its set has bytes per character,
 * all of them from the same area.
 */
#[derive(Clone, Debug)]
pub struct InvocationResolver {
    state: State,
}

impl InvocationResolver {
    pub fn new() -> InvocationResolver {
        InvocationResolver { state: State::Idle }
    }

    fn locking(&mut self, ctrl: Control, n: usize, area: Area, ctx: &mut Context) {
        let register = match Register::from_index(n) {
            Some(register) => register,
            None => return ctx.err(DecodeError::NoSuchRegister { control: ctrl.name }),
        };
        trace!("{} invokes {} into {:?}", ctrl.name, register, area);
        match area {
            Area::GR => ctx.state.gr = register,
            _ => ctx.state.gl = register,
        }
        ctx.emit(Token::Ctrl(ctrl));
    }

    fn single(&mut self, ctrl: Control, n: usize, ctx: &mut Context) {
        let register = match Register::from_index(n) {
            Some(register) => register,
            None => return ctx.err(DecodeError::NoSuchRegister { control: ctrl.name }),
        };
        let (set, bytes) = match ctx.set_in(register) {
            Some((id, set)) => (id.to_string(), set.bytes),
            None => return ctx.err(DecodeError::IndeterminateSingle { control: ctrl.name,
                                                                      register: register }),
        };
        trace!("{} shifts {} bytes into {}", ctrl.name, bytes, register);
        self.state = State::Single { register: register, set: set, expected: bytes,
                                     received: 0, area: None };
        ctx.emit(Token::Ctrl(ctrl));
    }

    fn control(&mut self, ctrl: Control, ctx: &mut Context) {
        match shift_of(ctrl.name) {
            Some(Shift::Locking(n, area)) => self.locking(ctrl, n, area, ctx),
            Some(Shift::Single(n)) => self.single(ctrl, n, ctx),
            Some(Shift::ShiftOut) | Some(Shift::ShiftIn) => {
                let out = ctrl.name == "SO";
                if ctx.state.docs_mode == Mode::Ebcdic {
                    trace!("double-byte mode {}", if out { "on" } else { "off" });
                    ctx.state.in_dbcs_mode = out;
                } else {
                    ctx.state.gl = if out { Register::G1 } else { Register::G0 };
                    trace!("{} invokes {} into GL", ctrl.name, ctx.state.gl);
                }
                ctx.emit(Token::Ctrl(ctrl));
            }
            Some(Shift::Introducer) => self.state = State::Introduced(ctrl),
            Some(Shift::GraphicEscape) => {
                self.state = State::GraphicEscape;
                ctx.emit(Token::Ctrl(ctrl));
            }
            None => ctx.emit(Token::Ctrl(ctrl)),
        }
    }
}

impl Default for InvocationResolver {
    fn default() -> InvocationResolver { InvocationResolver::new() }
}

impl Filter for InvocationResolver {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => {}

            State::Single { register, set, expected, received, area } => {
                match token {
                    Token::Code(byte, a) if area.map_or(true, |area| area == a) => {
                        let graph = Token::Graph { set: set.clone(), code: vec![byte & 0x7f], area: a,
                                                   subarea: Subarea::Shifted(register) };
                        if received + 1 < expected {
                            self.state = State::Single { register: register, set: set, expected: expected,
                                                         received: received + 1, area: Some(a) };
                        }
                        return ctx.emit(graph);
                    }
                    // nothing was redirected yet, so the first shift stays
                    Token::Ctrl(ref ctrl) if received == 0 &&
                                             matches!(shift_of(ctrl.name), Some(Shift::Single(_))) => {
                        self.state = State::Single { register: register, set: set, expected: expected,
                                                     received: received, area: area };
                        return ctx.err(DecodeError::RedundantSingleShift { control: ctrl.name });
                    }
                    token => {
                        let err = DecodeError::SingleTruncate { register: register, expected: expected,
                                                                received: received };
                        return ctx.backup_and_err(token, err);
                    }
                }
            }

            State::Introduced(ctrl) => {
                if let Token::Code(byte, area) = token {
                    let n = (byte & 0x0f) as usize;
                    let name = if n < 8 { LS_NAMES[n] } else { LSR_NAMES[n - 8] };
                    let shift = Control { name: name, code: byte, area: area, ..ctrl };
                    let area = if n < 8 { Area::GL } else { Area::GR };
                    return self.locking(shift, n % 8, area, ctx);
                }
                // without a trailer the introducer stays as it is
                ctx.emit(Token::Ctrl(ctrl));
            }

            State::GraphicEscape => {
                if let Token::Code(byte, area) = token {
                    let set = ctx.state.set_in(Register::G3).unwrap_or("").to_string();
                    return ctx.emit(Token::Graph { set: set, code: vec![byte & 0x7f], area: area,
                                                   subarea: Subarea::Shifted(Register::G3) });
                }
            }
        }

        match token {
            Token::Code(byte, area) => {
                let register = ctx.state.invoked(area);
                let set = ctx.state.set_in(register).unwrap_or("").to_string();
                ctx.emit(Token::Graph { set: set, code: vec![byte & 0x7f], area: area,
                                        subarea: Subarea::Invoked(register) });
            }
            Token::Ctrl(ctrl) => self.control(ctrl, ctx),
            Token::Desig { register, kind, set } => {
                ctx.state.is96[register.index()] = kind.is96();
                ctx.emit(Token::Desig { register: register, kind: kind, set: set });
            }
            Token::Ucs { scalar: 0x20, .. } => ctx.emit(control::space(Origin::Unicode)),
            Token::Ucs { scalar: 0x7f, .. } => ctx.emit(control::delete(Origin::Unicode)),
            token => ctx.emit(token),
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        if let State::Single { register, expected, received, .. } =
                std::mem::replace(&mut self.state, State::Idle) {
            ctx.err(DecodeError::SingleTruncate { register: register, expected: expected,
                                                  received: received });
        }
    }
}
