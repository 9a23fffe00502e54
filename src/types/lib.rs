// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

/*!
 * Interface to the token alphabet of the ECMA-35 decoder pipeline.
 *
 * This is a separate crate so that external registries and token consumers
 * can depend on the shared vocabulary without pulling the built-in tables.
 * Every type here is re-exported from the main `ecma35` crate.
 *
 * # Tokens
 *
 * The pipeline is a chain of filters over [`Token`](./enum.Token.html)s.
 * Raw input enters as `Word`, `Esc` and `Csi` tokens;
 * fully resolved output leaves as `Char`, `Ucs`, `Ctrl` and `Error` tokens,
 * interleaved with informational directives (`Desig`, `Rdocs`, `Chcp` and so on)
 * that downstream consumers are free to ignore.
 *
 * # State
 *
 * All stages coordinate through a single [`DecoderState`](./struct.DecoderState.html)
 * that is exclusively owned by one decode session.
 */

use std::fmt;
use thiserror::Error;

/// Part of the code table a code was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Area {
    /// C0 control area, 0x00 to 0x1F.
    CL,
    /// Left graphic area, 0x20 to 0x7F.
    GL,
    /// C1 control area, 0x80 to 0x9F.
    CR,
    /// Right graphic area, 0xA0 to 0xFF.
    GR,
    /// A double-byte plane outside the ECMA-35 code structure.
    Dbcs,
}

/// A working register which holds a designated graphic set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Register {
    G0,
    G1,
    G2,
    G3,
    /// Only used by the modified EUC family.
    G4,
}

impl Register {
    /// All registers in the index order.
    pub const ALL: [Register; 5] = [Register::G0, Register::G1, Register::G2,
                                    Register::G3, Register::G4];

    /// Returns an index to `DecoderState::registers`.
    #[inline]
    pub fn index(self) -> usize { self as usize }

    /// Returns a register with given index if any.
    pub fn from_index(index: usize) -> Option<Register> {
        Register::ALL.get(index).cloned()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "G{}", self.index())
    }
}

/// How a graphic position reached its register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Subarea {
    /// Invoked into GL or GR by a locking shift.
    Invoked(Register),
    /// Redirected by a single shift or a graphic escape.
    Shifted(Register),
    /// Addressed to the register directly by a mode filter.
    Direct(Register),
    /// Looked up from the single-byte right-hand-side table.
    Rhs,
    /// A control position printed as a graphic character.
    C0Graphic,
    /// Looked up from a double-byte EBCDIC plane.
    Dbcs,
}

/// Shape of a designated graphic set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetKind {
    Cells94,
    Cells96,
    Multi94,
    Multi96,
}

impl SetKind {
    /// True if the set uses the 96-cell convention.
    pub fn is96(self) -> bool {
        match self {
            SetKind::Cells96 | SetKind::Multi96 => true,
            SetKind::Cells94 | SetKind::Multi94 => false,
        }
    }
}

/// Where a control function was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// A single byte in the C0 or C1 area.
    Byte,
    /// An `ESC Fe` or `ESC Fs` sequence.
    Escape,
    /// A scalar value which was already decoded from a Unicode form.
    Unicode,
}

/// A control function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Control {
    /// The mnemonic, e.g. `"LF"` or `"SS2"`.
    pub name: &'static str,
    pub origin: Origin,
    /// The position within its control set, e.g. 0x8E for SS2.
    pub code: u8,
    pub area: Area,
    /// The identifier of the control set this function was taken from.
    pub set: &'static str,
}

/// An escape sequence, `ESC I* F`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Escape {
    /// Intermediate bytes in 0x20 to 0x2F.
    pub intermediates: Vec<u8>,
    /// A final byte in 0x30 to 0x7E.
    pub final_byte: u8,
}

impl Escape {
    pub fn new(intermediates: &[u8], final_byte: u8) -> Escape {
        Escape { intermediates: intermediates.to_vec(), final_byte: final_byte }
    }

    /// Returns the original bytes including the leading ESC.
    pub fn bytes(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(self.intermediates.len() + 2);
        ret.push(0x1b);
        ret.extend_from_slice(&self.intermediates);
        ret.push(self.final_byte);
        ret
    }
}

/// A control sequence, `CSI P* I* F`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ControlSequence {
    /// Parameter bytes in 0x30 to 0x3F.
    pub params: Vec<u8>,
    /// Intermediate bytes in 0x20 to 0x2F.
    pub intermediates: Vec<u8>,
    /// A final byte in 0x40 to 0x7E.
    pub final_byte: u8,
}

impl ControlSequence {
    pub fn new(params: &[u8], intermediates: &[u8], final_byte: u8) -> ControlSequence {
        ControlSequence { params: params.to_vec(), intermediates: intermediates.to_vec(),
                          final_byte: final_byte }
    }

    /// Returns the original bytes including the leading `ESC [`.
    pub fn bytes(&self) -> Vec<u8> {
        let mut ret = vec![0x1b, b'['];
        ret.extend_from_slice(&self.params);
        ret.extend_from_slice(&self.intermediates);
        ret.push(self.final_byte);
        ret
    }

    /// Returns the private parameter marker (`<`, `=`, `>` or `?`) if any.
    pub fn private_marker(&self) -> Option<u8> {
        match self.params.first() {
            Some(&c) if c >= 0x3c && c <= 0x3f => Some(c),
            _ => None,
        }
    }

    /// Parses the parameter string after the private marker as decimal numbers
    /// separated by semicolons. An empty parameter reads as zero.
    pub fn numbers(&self) -> Option<Vec<u32>> {
        let params = match self.private_marker() {
            Some(_) => &self.params[1..],
            None => &self.params[..],
        };
        if params.is_empty() { return Some(Vec::new()); }
        let mut ret = Vec::new();
        for part in params.split(|&c| c == b';') {
            let mut value: u32 = 0;
            for &c in part {
                match c {
                    b'0'..=b'9' => {
                        value = value.checked_mul(10)?.checked_add((c - b'0') as u32)?;
                    }
                    _ => return None,
                }
            }
            ret.push(value);
        }
        Some(ret)
    }

    /// Returns the sole numeric parameter if the sequence has exactly one.
    pub fn number(&self) -> Option<u32> {
        match self.numbers() {
            Some(ref v) if v.len() == 1 => Some(v[0]),
            _ => None,
        }
    }
}

/// Coding systems reachable through DOCS or a code page selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// ECMA-35 itself.
    Ecma35,
    Utf8,
    Utf16,
    Ucs2,
    Ucs4,
    Utf1,
    Scsu,
    /// Bytes with no interpretation.
    Raw,
    ShiftJis,
    BigFive,
    Ebcdic,
    UtfEbcdic,
    /// EUC with a possibly single-byte G1 and an optional G4 extension.
    Euc,
    /// An ASCII-based single-byte code page.
    PlainExtAscii,
}

impl Mode {
    /// Returns the canonical name of the coding system.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Ecma35 => "ecma-35",
            Mode::Utf8 => "utf-8",
            Mode::Utf16 => "utf-16",
            Mode::Ucs2 => "ucs-2",
            Mode::Ucs4 => "ucs-4",
            Mode::Utf1 => "utf-1",
            Mode::Scsu => "scsu",
            Mode::Raw => "raw",
            Mode::ShiftJis => "shift_jis",
            Mode::BigFive => "big5",
            Mode::Ebcdic => "ebcdic",
            Mode::UtfEbcdic => "utf-ebcdic",
            Mode::Euc => "euc",
            Mode::PlainExtAscii => "plainextascii",
        }
    }

    /// True if escape and control sequences of the coding system are framed in ASCII bytes.
    pub fn is_ascii_framed(self) -> bool {
        match self {
            Mode::Ebcdic | Mode::UtfEbcdic => false,
            _ => true,
        }
    }

    /// Returns a coding system for given name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Mode> {
        let name = name.trim().to_ascii_lowercase();
        let mode = match &name[..] {
            "ecma-35" | "ecma35" | "iso-2022" | "iso2022" => Mode::Ecma35,
            "utf-8" | "utf8" => Mode::Utf8,
            "utf-16" | "utf16" => Mode::Utf16,
            "ucs-2" | "ucs2" => Mode::Ucs2,
            "ucs-4" | "ucs4" => Mode::Ucs4,
            "utf-1" | "utf1" => Mode::Utf1,
            "scsu" => Mode::Scsu,
            "raw" => Mode::Raw,
            "shift_jis" | "shift-jis" | "sjis" => Mode::ShiftJis,
            "big5" | "big-five" | "bigfive" => Mode::BigFive,
            "ebcdic" => Mode::Ebcdic,
            "utf-ebcdic" | "utfebcdic" => Mode::UtfEbcdic,
            "euc" => Mode::Euc,
            "plainextascii" | "plain-extended-ascii" => Mode::PlainExtAscii,
            _ => return None,
        };
        Some(mode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a decoded scalar value was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UcsForm {
    Normal,
    /// Encoded in more units than needed; an error precedes it.
    Overlong,
    /// Paired from two surrogate code points.
    Paired,
}

/// The token alphabet flowing between the stages of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// A raw input byte.
    Word(u8),
    /// An escape sequence.
    Esc(Escape),
    /// A control sequence.
    Csi(ControlSequence),
    /// A graphic byte in GL or GR which is yet to be invoked.
    Code(u8, Area),
    /// A control function.
    Ctrl(Control),
    /// A designation of a graphic set into a register.
    Desig { register: Register, kind: SetKind, set: String },
    /// A (possibly partial) position in the set held by a register.
    /// Code bytes are in 0x20 to 0x7F, except for raw extension planes.
    Graph { set: String, code: Vec<u8>, area: Area, subarea: Subarea },
    /// A resolved character. Some positions map to several scalar values.
    Char { scalars: Vec<u32>, set: String, code: Vec<u8>, area: Area, subarea: Subarea },
    /// A valid position with no assigned character.
    CharLookupMiss { set: String, code: Vec<u8>, area: Area, subarea: Subarea },
    /// A recoverable decoding error.
    Error(DecodeError),
    /// A switch to another coding system.
    Rdocs { mode: Mode, without_return: bool, bytes: Vec<u8> },
    /// A code page selection, after its coding system (if different) got activated.
    Chcp(u32),
    /// A scalar value decoded from a Unicode form.
    Ucs { scalar: u32, label: &'static str, form: UcsForm },
    /// A surrogate code point which awaits pairing.
    Cesu { scalar: u32, width: u8 },
    /// A byte order mark at the beginning of the stream.
    Bom,
    /// The EBCDIC 65th control code got moved to given byte.
    Set65thControl(u8),
    /// The C0 graphics level got changed.
    C0GraphicsMode(u8),
    /// A control set got selected for the C0 (`CL`) or C1 (`CR`) area.
    ControlSet { area: Area, set: &'static str },
}

/// Recoverable errors reported in the token stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
pub enum DecodeError {
    #[error("incomplete Shift_JIS sequence {0:02x?}")]
    SjisTruncate(Vec<u8>),
    #[error("unused Shift_JIS byte {0:#04x}")]
    SjisUnusedByte(u8),
    #[error("incomplete Big Five sequence {0:02x?}")]
    Big5Truncate(Vec<u8>),
    #[error("unused Big Five byte {0:#04x}")]
    Big5UnusedByte(u8),
    #[error("incomplete double-byte EBCDIC sequence {0:02x?}")]
    DbEbcdicTruncate(Vec<u8>),
    #[error("incomplete UTF-EBCDIC sequence {0:02x?}")]
    UtfEbcdicTruncate(Vec<u8>),
    #[error("isolated UTF-EBCDIC trailing byte {0:#04x}")]
    UtfEbcdicIsolate(u8),
    #[error("overlong UTF-EBCDIC sequence {bytes:02x?} for U+{scalar:04X}")]
    UtfEbcdicOverlong { bytes: Vec<u8>, scalar: u32 },
    #[error("overlong UTF-EBCDIC sequence {0:02x?} for U+0000")]
    UtfEbcdicOverlongNull(Vec<u8>),
    #[error("UTF-EBCDIC sequence {bytes:02x?} decodes to {value:#x} beyond U+10FFFF")]
    UtfEbcdicBeyond { bytes: Vec<u8>, value: u64 },
    #[error("incomplete UTF-8 sequence {0:02x?}")]
    Utf8Truncate(Vec<u8>),
    #[error("isolated UTF-8 trailing byte {0:#04x}")]
    Utf8Isolate(u8),
    #[error("overlong UTF-8 sequence {bytes:02x?} for U+{scalar:04X}")]
    Utf8Overlong { bytes: Vec<u8>, scalar: u32 },
    #[error("UTF-8 sequence {bytes:02x?} decodes to {value:#x} beyond U+10FFFF")]
    Utf8Beyond { bytes: Vec<u8>, value: u32 },
    #[error("incomplete EUC sequence {0:02x?}")]
    EucTruncate(Vec<u8>),
    #[error("no character at {code:02x?} in {set}")]
    UndefGraph { set: String, code: Vec<u8> },
    #[error("{control} shifts into {register} which holds no known set")]
    IndeterminateSingle { control: &'static str, register: Register },
    #[error("redundant single shift {control}")]
    RedundantSingleShift { control: &'static str },
    #[error("single shift into {register} interrupted after {received} of {expected} bytes")]
    SingleTruncate { register: Register, expected: usize, received: usize },
    #[error("{control} names a register beyond G4")]
    NoSuchRegister { control: &'static str },
    #[error("unrecognized code page {0}")]
    UnrecognizedCodePage(u32),
    #[error("unknown C0 graphics mode {0}")]
    UnknownC0GraphicsMode(u32),
    #[error("{0:#x} cannot hold the 65th control code")]
    Seek65thNotValid(u32),
    #[error("incomplete code {code:02x?} in {set}")]
    IncompleteGraphic { set: String, code: Vec<u8> },
    #[error("unpaired surrogate U+{0:04X}")]
    LoneSurrogate(u32),
}

/// Error handling policy for the string-producing interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderTrap {
    /// Stops at the first error.
    Strict,
    /// Writes U+FFFD in place of each error.
    Replace,
    /// Silently skips errors.
    Ignore,
}

/**
 * The state shared by every stage of one decode session.
 *
 * Mode filters initialize the fields they care about when an `Rdocs` activates them;
 * `DecoderState::new` gives the ECMA-35 defaults, which is ASCII in G0 invoked to GL
 * and ISO 8859-1 in G1 invoked to GR.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderState {
    /// The active coding system.
    pub docs_mode: Mode,
    /// Bytes per code unit. Always 1 for now.
    pub byte_width: usize,
    pub gl: Register,
    pub gr: Register,
    /// Set identifiers designated into G0 to G4.
    pub registers: [Option<String>; 5],
    /// Whether each designated set uses the 96-cell convention.
    pub is96: [bool; 5],
    pub active_c0: &'static str,
    pub active_c1: &'static str,
    /// The single-byte right-hand-side table.
    pub active_rhs: Option<String>,
    /// The active code page, if selected by a code page or a coding system default.
    pub code_page: Option<u32>,
    pub c0_graphics_mode: u8,
    pub in_dbcs_mode: bool,
    pub dbcs_set: Option<String>,
    pub the_65th_control: u8,
}

impl DecoderState {
    pub fn new() -> DecoderState {
        DecoderState {
            docs_mode: Mode::Ecma35,
            byte_width: 1,
            gl: Register::G0,
            gr: Register::G1,
            registers: [Some("ir006".to_string()), Some("ir100".to_string()), None, None, None],
            is96: [false, true, false, false, false],
            active_c0: "ir001",
            active_c1: "ir077",
            active_rhs: None,
            code_page: None,
            c0_graphics_mode: 1,
            in_dbcs_mode: false,
            dbcs_set: None,
            the_65th_control: 0xff,
        }
    }

    /// Returns the identifier of the set in given register.
    pub fn set_in(&self, register: Register) -> Option<&str> {
        self.registers[register.index()].as_ref().map(|s| &s[..])
    }

    /// Returns the register invoked into given graphic area.
    pub fn invoked(&self, area: Area) -> Register {
        match area {
            Area::GR => self.gr,
            _ => self.gl,
        }
    }

    /// Replaces the set in given register.
    pub fn designate(&mut self, register: Register, set: Option<String>, is96: bool) {
        self.registers[register.index()] = set;
        self.is96[register.index()] = is96;
    }
}

impl Default for DecoderState {
    fn default() -> DecoderState { DecoderState::new() }
}
