// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! The character set registry.
//!
//! The pipeline never owns any character table; it asks a `Registry` for
//! a graphic set by its identifier (mostly the ISO-IR registration number,
//! like `ir087` for JIS X 0208) or for a single-byte right-hand-side table
//! by its code page name. A registry is immutable and can be shared freely.

use crate::types::SetKind;
use crate::all;

/// Number of cells in each byte of a graphic set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    /// Positions 0x21 to 0x7E.
    Cells94,
    /// Positions 0x20 to 0x7F.
    Cells96,
    /// Whole bytes, for extension planes addressed by their raw lead and trail bytes.
    Raw,
}

/// The mapping of a single position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Forward {
    Unmapped,
    Char(u32),
    /// A sequence of scalar values, for positions without a precomposed form.
    Seq(&'static [u32]),
}

impl Forward {
    /// Makes a mapping out of an index table value, where 0xffff means no mapping.
    pub fn from_index(ch: u32) -> Forward {
        if ch == 0xffff { Forward::Unmapped } else { Forward::Char(ch) }
    }
}

/// A graphic set descriptor.
#[derive(Clone, Copy)]
pub struct GraphicSet {
    pub dimension: Dimension,
    /// Bytes per character, 1 to 3.
    pub bytes: usize,
    /// Maps a linear index to the characters.
    pub forward: fn(u32) -> Forward,
}

impl GraphicSet {
    /// True if the set uses the 96-cell convention.
    pub fn is96(&self) -> bool {
        self.dimension == Dimension::Cells96
    }

    /// Returns the kind used in designations of this set.
    pub fn kind(&self) -> SetKind {
        match (self.dimension, self.bytes) {
            (Dimension::Cells94, 1) | (Dimension::Raw, 1) => SetKind::Cells94,
            (Dimension::Cells96, 1) => SetKind::Cells96,
            (Dimension::Cells94, _) | (Dimension::Raw, _) => SetKind::Multi94,
            (Dimension::Cells96, _) => SetKind::Multi96,
        }
    }

    /// Converts position bytes (in 0x20 to 0x7F) to a linear index.
    /// Returns `None` for a code of wrong length or out of the cells.
    ///
    /// Raw sets take whole bytes, so `[lead, trail]` gives `lead << 8 | trail`.
    pub fn index(&self, code: &[u8]) -> Option<u32> {
        if code.len() != self.bytes { return None; }
        let (first, cells) = match self.dimension {
            Dimension::Cells94 => (0x21u8, 94u32),
            Dimension::Cells96 => (0x20u8, 96u32),
            Dimension::Raw => (0u8, 256u32),
        };
        let mut index = 0;
        for &c in code {
            if c < first || (c - first) as u32 >= cells { return None; }
            index = index * cells + (c - first) as u32;
        }
        Some(index)
    }

    /// Returns the characters at given linear index.
    pub fn scalars(&self, index: u32) -> Option<Vec<u32>> {
        match (self.forward)(index) {
            Forward::Unmapped => None,
            Forward::Char(ch) => Some(vec![ch]),
            Forward::Seq(seq) => Some(seq.to_vec()),
        }
    }

    /// Returns the characters at given position bytes.
    pub fn lookup(&self, code: &[u8]) -> Option<Vec<u32>> {
        self.index(code).and_then(|index| self.scalars(index))
    }
}

/// A table for the upper 128 positions of a single-byte code page.
#[derive(Clone, Copy)]
pub struct RhsTable {
    /// Maps a byte in 0x80 to 0xFF to a BMP character, or 0xffff.
    pub forward: fn(u8) -> u16,
}

impl RhsTable {
    /// Returns the graphic character at given byte.
    /// Bytes below 0x80 and C1 control characters give `None`.
    pub fn lookup(&self, byte: u8) -> Option<u32> {
        if byte < 0x80 { return None; }
        match (self.forward)(byte) {
            0xffff => None,
            ch if ch >= 0x80 && ch < 0xa0 => None,
            ch => Some(ch as u32),
        }
    }
}

/// The registry contract.
pub trait Registry {
    /// Returns the graphic set with given identifier.
    fn lookup(&self, id: &str) -> Option<&GraphicSet>;

    /// Returns the right-hand-side table with given identifier.
    fn rhs(&self, id: &str) -> Option<&RhsTable>;
}

/// The registry of built-in tables in the `all` module.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinRegistry;

impl Registry for BuiltinRegistry {
    fn lookup(&self, id: &str) -> Option<&GraphicSet> { all::graphic_set(id) }
    fn rhs(&self, id: &str) -> Option<&RhsTable> { all::rhs_table(id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index() {
        let ascii = BuiltinRegistry.lookup("ir006").unwrap();
        assert_eq!(ascii.index(&[0x21]), Some(0));
        assert_eq!(ascii.index(&[0x7e]), Some(93));
        assert_eq!(ascii.index(&[0x20]), None);
        assert_eq!(ascii.index(&[0x7f]), None);
        assert_eq!(ascii.index(&[0x21, 0x21]), None);

        let latin1 = BuiltinRegistry.lookup("ir100").unwrap();
        assert!(latin1.is96());
        assert_eq!(latin1.index(&[0x20]), Some(0));
        assert_eq!(latin1.index(&[0x7f]), Some(95));

        let jis = BuiltinRegistry.lookup("ir087").unwrap();
        assert_eq!(jis.kind(), SetKind::Multi94);
        assert_eq!(jis.index(&[0x21, 0x21]), Some(0));
        assert_eq!(jis.index(&[0x22, 0x21]), Some(94));

        let uhc = BuiltinRegistry.lookup("uhc-ext").unwrap();
        assert_eq!(uhc.index(&[0x81, 0x41]), Some(0x8141));
        assert_eq!(uhc.index(&[0x81]), None);
    }

    #[test]
    fn test_lookup() {
        let jis = BuiltinRegistry.lookup("ir087").unwrap();
        assert_eq!(jis.lookup(&[0x30, 0x21]), Some(vec![0x4e9c]));
        assert_eq!(jis.lookup(&[0x22, 0x2f]), None);
        assert!(BuiltinRegistry.lookup("no-such-set").is_none());
    }

    #[test]
    fn test_rhs() {
        let latin1 = BuiltinRegistry.rhs("iso-8859-1").unwrap();
        assert_eq!(latin1.lookup(0xe9), Some(0xe9));
        assert_eq!(latin1.lookup(0x85), None);
        assert_eq!(latin1.lookup(0x41), None);
        let cp437 = BuiltinRegistry.rhs("ibm437").unwrap();
        assert_eq!(cp437.lookup(0x80), Some(0xc7));
        assert_eq!(cp437.lookup(0xdb), Some(0x2588));
    }
}
