// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! An interface for retrieving the defaults of a coding system from a numeric code page.

use log::debug;
use crate::types::{DecoderState, Mode, Register};
use crate::registry::Registry;
use crate::index::ibm_pc::{self, C0Graphics};

/// What a code page selects.
#[derive(Clone, Copy)]
pub struct CodePage {
    /// The coding system the page belongs to.
    pub mode: Mode,
    /// Sets designated into G0 to G4.
    pub registers: [Option<&'static str>; 5],
    pub gl: Register,
    pub gr: Register,
    /// The right-hand-side table, if any.
    pub rhs: Option<&'static str>,
    /// The double-byte EBCDIC plane, if any.
    pub dbcs: Option<&'static str>,
    /// Graphic replacements of the C0 controls. Defaults to the IBM PC glyphs.
    pub c0_graphics: Option<&'static C0Graphics>,
    /// The initial C0 graphics level.
    pub c0_graphics_mode: u8,
}

impl CodePage {
    const fn new(mode: Mode, registers: [Option<&'static str>; 5]) -> CodePage {
        CodePage { mode: mode, registers: registers, gl: Register::G0, gr: Register::G1,
                   rhs: None, dbcs: None, c0_graphics: None, c0_graphics_mode: 1 }
    }

    const fn plain(rhs: &'static str, c0_graphics: &'static C0Graphics) -> CodePage {
        CodePage { mode: Mode::PlainExtAscii,
                   registers: [Some("ir006"), None, None, None, None],
                   gl: Register::G0, gr: Register::G1, rhs: Some(rhs), dbcs: None,
                   c0_graphics: Some(c0_graphics), c0_graphics_mode: 3 }
    }

    /// Returns the graphic replacements of the C0 controls.
    pub fn c0_graphics(&self) -> &'static C0Graphics {
        self.c0_graphics.unwrap_or(&ibm_pc::IBM_PC_GLYPHS)
    }
}

/// The code page table contract.
pub trait CodePages {
    /// Returns the code page with given identifier.
    fn lookup(&self, page: u32) -> Option<&CodePage>;

    /// Returns the page a coding system selects when activated without a code page.
    fn default_page(&self, mode: Mode) -> Option<u32>;
}

/// The built-in code page table.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinCodePages;

const ECMA35_REGISTERS: [Option<&'static str>; 5] = [Some("ir006"), Some("ir100"), None, None, None];

static PAGES: &'static [(u32, CodePage)] = &[
    (37, CodePage { rhs: Some("iso-8859-1"), ..CodePage::new(Mode::Ebcdic, ECMA35_REGISTERS) }),
    (1210, CodePage::new(Mode::UtfEbcdic, ECMA35_REGISTERS)),
    (932, CodePage::new(Mode::ShiftJis,
                        [Some("ir014"), Some("ir087"), Some("ir013-mac"), Some("sjis-eudc"), None])),
    (950, CodePage::new(Mode::BigFive,
                        [Some("ir006"), Some("big5-1"), Some("big5-2"), Some("big5-x"), None])),
    (51932, CodePage::new(Mode::Euc,
                          [Some("ir006"), Some("ir087"), Some("ir013"), Some("ir159"), None])),
    (51949, CodePage::new(Mode::Euc, [Some("ir006"), Some("ir149"), None, None, None])),
    (949, CodePage::new(Mode::Euc, [Some("ir006"), Some("ir149"), None, None, Some("uhc-ext")])),
    (51936, CodePage::new(Mode::Euc, [Some("ir006"), Some("ir058"), None, None, None])),
    (936, CodePage::new(Mode::Euc, [Some("ir006"), Some("ir058"), None, None, Some("gbk-ext")])),
    (65001, CodePage::new(Mode::Utf8, ECMA35_REGISTERS)),
    (437, CodePage::plain("ibm437", &ibm_pc::IBM_PC_GLYPHS)),
    (850, CodePage::plain("ibm850", &ibm_pc::IBM_PC_GLYPHS)),
    (866, CodePage::plain("ibm866", &ibm_pc::IBM_PC_GLYPHS)),
    (874, CodePage::plain("windows-874", &ibm_pc::CONTROL_PICTURES)),
    (1250, CodePage::plain("windows-1250", &ibm_pc::CONTROL_PICTURES)),
    (1251, CodePage::plain("windows-1251", &ibm_pc::CONTROL_PICTURES)),
    (1252, CodePage::plain("windows-1252", &ibm_pc::CONTROL_PICTURES)),
    (1253, CodePage::plain("windows-1253", &ibm_pc::CONTROL_PICTURES)),
    (1254, CodePage::plain("windows-1254", &ibm_pc::CONTROL_PICTURES)),
    (1255, CodePage::plain("windows-1255", &ibm_pc::CONTROL_PICTURES)),
    (1256, CodePage::plain("windows-1256", &ibm_pc::CONTROL_PICTURES)),
    (1257, CodePage::plain("windows-1257", &ibm_pc::CONTROL_PICTURES)),
    (1258, CodePage::plain("windows-1258", &ibm_pc::CONTROL_PICTURES)),
    (10000, CodePage::plain("macintosh", &ibm_pc::CONTROL_PICTURES)),
    (10007, CodePage::plain("x-mac-cyrillic", &ibm_pc::CONTROL_PICTURES)),
    (20866, CodePage::plain("koi8-r", &ibm_pc::CONTROL_PICTURES)),
    (21866, CodePage::plain("koi8-u", &ibm_pc::CONTROL_PICTURES)),
    (28591, CodePage::plain("iso-8859-1", &ibm_pc::CONTROL_PICTURES)),
    (28592, CodePage::plain("iso-8859-2", &ibm_pc::CONTROL_PICTURES)),
    (28593, CodePage::plain("iso-8859-3", &ibm_pc::CONTROL_PICTURES)),
    (28594, CodePage::plain("iso-8859-4", &ibm_pc::CONTROL_PICTURES)),
    (28595, CodePage::plain("iso-8859-5", &ibm_pc::CONTROL_PICTURES)),
    (28596, CodePage::plain("iso-8859-6", &ibm_pc::CONTROL_PICTURES)),
    (28597, CodePage::plain("iso-8859-7", &ibm_pc::CONTROL_PICTURES)),
    (28598, CodePage::plain("iso-8859-8", &ibm_pc::CONTROL_PICTURES)),
    (28600, CodePage::plain("iso-8859-10", &ibm_pc::CONTROL_PICTURES)),
    (28603, CodePage::plain("iso-8859-13", &ibm_pc::CONTROL_PICTURES)),
    (28604, CodePage::plain("iso-8859-14", &ibm_pc::CONTROL_PICTURES)),
    (28605, CodePage::plain("iso-8859-15", &ibm_pc::CONTROL_PICTURES)),
    (28606, CodePage::plain("iso-8859-16", &ibm_pc::CONTROL_PICTURES)),
];

impl CodePages for BuiltinCodePages {
    fn lookup(&self, page: u32) -> Option<&CodePage> {
        PAGES.iter().find(|&&(id, _)| id == page).map(|&(_, ref cp)| cp)
    }

    fn default_page(&self, mode: Mode) -> Option<u32> {
        match mode {
            Mode::ShiftJis => Some(932),
            Mode::BigFive => Some(950),
            Mode::Ebcdic => Some(37),
            Mode::UtfEbcdic => Some(1210),
            Mode::Euc => Some(51932),
            Mode::PlainExtAscii => Some(437),
            Mode::Utf8 => Some(65001),
            _ => None,
        }
    }
}

/// Applies the defaults of a code page to the state.
///
/// The coding system is not changed; the caller is responsible for activating
/// `page.mode` beforehand.
pub fn apply(state: &mut DecoderState, registry: &dyn Registry, id: u32, page: &CodePage) {
    debug!("applying code page {} ({})", id, page.mode);
    for (i, &set) in page.registers.iter().enumerate() {
        let is96 = set.and_then(|set| registry.lookup(set)).map_or(false, |set| set.is96());
        state.registers[i] = set.map(|set| set.to_string());
        state.is96[i] = is96;
    }
    state.gl = page.gl;
    state.gr = page.gr;
    state.active_rhs = page.rhs.map(|rhs| rhs.to_string());
    state.dbcs_set = page.dbcs.map(|dbcs| dbcs.to_string());
    state.c0_graphics_mode = page.c0_graphics_mode;
    state.code_page = Some(id);
}

/// Returns the C0 graphic replacements in effect for the state.
pub fn c0_graphics(state: &DecoderState, pages: &dyn CodePages) -> &'static C0Graphics {
    state.code_page
        .and_then(|id| pages.lookup(id))
        .map_or(&ibm_pc::IBM_PC_GLYPHS, |page| page.c0_graphics())
}
