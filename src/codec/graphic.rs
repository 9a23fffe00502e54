// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Final resolution of graphic positions and surrogates.

use crate::types::{Token, DecodeError, Area, Subarea, Mode, UcsForm};
use crate::util::{Filter, Context};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Partial {
    set: String,
    code: Vec<u8>,
    area: Area,
    subarea: Subarea,
}

/**
 * Turns `Graph` positions into characters by looking them up from the registry.
 *
 * Positions arrive either whole (from the mode filters) or one byte at a time
 * (from the invocation), and the latter are collected up to the byte count of the set.
 * Surrogates from the Unicode forms are paired here as well.
 */
#[derive(Clone, Debug, Default)]
pub struct GraphicResolver {
    partial: Option<Partial>,
    /// A high surrogate waiting for its low half.
    high: Option<u32>,
}

impl GraphicResolver {
    pub fn new() -> GraphicResolver {
        GraphicResolver { partial: None, high: None }
    }

    fn resolve(&mut self, set: String, code: Vec<u8>, area: Area, subarea: Subarea, ctx: &mut Context) {
        let bytes = match ctx.registry.lookup(&set) {
            Some(graphics) => graphics.bytes,
            None => return ctx.emit(Token::CharLookupMiss { set: set, code: code, area: area,
                                                            subarea: subarea }),
        };
        if code.len() < bytes {
            self.partial = Some(Partial { set: set, code: code, area: area, subarea: subarea });
            return;
        }
        let scalars = ctx.registry.lookup(&set).and_then(|graphics| graphics.lookup(&code));
        ctx.emit(match scalars {
            Some(scalars) => Token::Char { scalars: scalars, set: set, code: code, area: area,
                                           subarea: subarea },
            None => Token::CharLookupMiss { set: set, code: code, area: area, subarea: subarea },
        });
    }

    fn surrogate(&mut self, scalar: u32, ctx: &mut Context) {
        if scalar < 0xdc00 {
            if let Some(high) = self.high.replace(scalar) {
                ctx.err(DecodeError::LoneSurrogate(high));
            }
            return;
        }
        match self.high.take() {
            Some(high) => {
                let label = if ctx.state.docs_mode == Mode::UtfEbcdic { "UTF-EBCDIC" } else { "CESU-8" };
                let scalar = 0x10000 + ((high - 0xd800) << 10) + (scalar - 0xdc00);
                ctx.emit(Token::Ucs { scalar: scalar, label: label, form: UcsForm::Paired });
            }
            None => ctx.err(DecodeError::LoneSurrogate(scalar)),
        }
    }
}

impl Filter for GraphicResolver {
    fn step(&mut self, token: Token, ctx: &mut Context) {
        if let Some(partial) = self.partial.take() {
            match token {
                Token::Graph { set, mut code, area, subarea }
                        if set == partial.set && subarea == partial.subarea && area == partial.area => {
                    let mut joined = partial.code;
                    joined.append(&mut code);
                    return self.resolve(set, joined, partial.area, subarea, ctx);
                }
                token => {
                    let err = DecodeError::IncompleteGraphic { set: partial.set, code: partial.code };
                    return ctx.backup_and_err(token, err);
                }
            }
        }

        if let Some(high) = self.high {
            match token {
                Token::Cesu { .. } => {}
                _ => {
                    self.high = None;
                    ctx.err(DecodeError::LoneSurrogate(high));
                }
            }
        }

        match token {
            Token::Graph { set, code, area, subarea } => self.resolve(set, code, area, subarea, ctx),
            Token::Cesu { scalar, .. } => self.surrogate(scalar, ctx),
            token => ctx.emit(token),
        }
    }

    fn finish(&mut self, ctx: &mut Context) {
        if let Some(partial) = self.partial.take() {
            ctx.err(DecodeError::IncompleteGraphic { set: partial.set, code: partial.code });
        }
        if let Some(high) = self.high.take() {
            ctx.err(DecodeError::LoneSurrogate(high));
        }
    }
}

#[cfg(test)]
mod graphic_tests {
    use super::*;
    use crate::types::Register;
    use crate::testutils::{Tester, graph, chr};

    #[test]
    fn test_single_byte() {
        let mut t = Tester::new(GraphicResolver::new());
        assert_feed!(t, vec![graph("ir006", &[0x41], Area::GL, Subarea::Invoked(Register::G0)),
                             graph("ir100", &[0x69], Area::GR, Subarea::Invoked(Register::G1))],
                     vec![chr(&[0x41], "ir006", &[0x41], Area::GL, Subarea::Invoked(Register::G0)),
                          chr(&[0xe9], "ir100", &[0x69], Area::GR, Subarea::Invoked(Register::G1))]);
        assert_finish!(t, vec![]);
    }

    #[test]
    fn test_collected() {
        let mut t = Tester::new(GraphicResolver::new());
        let shifted = Subarea::Shifted(Register::G3);
        assert_feed!(t, vec![graph("ir159", &[0x4b], Area::GR, shifted)], vec![]);
        assert_feed!(t, vec![graph("ir159", &[0x46], Area::GR, shifted)],
                     vec![chr(&[0x736c], "ir159", &[0x4b, 0x46], Area::GR, shifted)]);
        assert_feed!(t, vec![graph("ir087", &[0x24, 0x4b], Area::GR, Subarea::Direct(Register::G1))],
                     vec![chr(&[0x306b], "ir087", &[0x24, 0x4b], Area::GR, Subarea::Direct(Register::G1))]);
    }

    #[test]
    fn test_incomplete() {
        let mut t = Tester::new(GraphicResolver::new());
        let invoked = Subarea::Invoked(Register::G0);
        t.state.designate(Register::G0, Some("ir087".to_string()), false);
        assert_feed!(t, vec![graph("ir087", &[0x24], Area::GL, invoked), Token::Bom],
                     vec![Token::Error(DecodeError::IncompleteGraphic { set: "ir087".to_string(),
                                                                         code: vec![0x24] }),
                          Token::Bom]);
        assert_feed!(t, vec![graph("ir087", &[0x24], Area::GL, invoked)], vec![]);
        assert_finish!(t, vec![Token::Error(DecodeError::IncompleteGraphic { set: "ir087".to_string(),
                                                                             code: vec![0x24] })]);
    }

    #[test]
    fn test_areas_not_joined() {
        let mut t = Tester::new(GraphicResolver::new());
        let invoked = Subarea::Invoked(Register::G1);
        assert_feed!(t, vec![graph("ir087", &[0x24], Area::GL, invoked),
                             graph("ir087", &[0x4b], Area::GR, invoked)],
                     vec![Token::Error(DecodeError::IncompleteGraphic { set: "ir087".to_string(),
                                                                         code: vec![0x24] })]);
        // the second byte starts a code of its own
        assert_finish!(t, vec![Token::Error(DecodeError::IncompleteGraphic { set: "ir087".to_string(),
                                                                             code: vec![0x4b] })]);
    }

    #[test]
    fn test_lookup_miss() {
        let mut t = Tester::new(GraphicResolver::new());
        let direct = Subarea::Direct(Register::G1);
        assert_feed!(t, vec![graph("ir087", &[0x22, 0x2f], Area::GR, direct),
                             graph("g94-Z", &[0x41], Area::GL, direct),
                             graph("", &[0x41], Area::GL, direct)],
                     vec![Token::CharLookupMiss { set: "ir087".to_string(), code: vec![0x22, 0x2f],
                                                  area: Area::GR, subarea: direct },
                          Token::CharLookupMiss { set: "g94-Z".to_string(), code: vec![0x41],
                                                  area: Area::GL, subarea: direct },
                          Token::CharLookupMiss { set: String::new(), code: vec![0x41],
                                                  area: Area::GL, subarea: direct }]);
    }

    #[test]
    fn test_multiple_scalars() {
        let mut t = Tester::new(GraphicResolver::new());
        let direct = Subarea::Direct(Register::G1);
        // 0x8862 in Big Five, 7 * 157 + 34 = 12 * 94 + 5 into the extension plane
        assert_feed!(t, vec![graph("big5-x", &[0x2d, 0x26], Area::GR, direct)],
                     vec![chr(&[0xca, 0x304], "big5-x", &[0x2d, 0x26], Area::GR, direct)]);
    }

    #[test]
    fn test_surrogates() {
        let mut t = Tester::new(GraphicResolver::new());
        let paired = Token::Ucs { scalar: 0x10400, label: "CESU-8", form: UcsForm::Paired };
        assert_feed!(t, vec![Token::Cesu { scalar: 0xd801, width: 3 },
                             Token::Cesu { scalar: 0xdc00, width: 3 }],
                     vec![paired]);
        assert_feed!(t, vec![Token::Cesu { scalar: 0xdc00, width: 3 }],
                     vec![Token::Error(DecodeError::LoneSurrogate(0xdc00))]);
        assert_feed!(t, vec![Token::Cesu { scalar: 0xd801, width: 3 },
                             Token::Cesu { scalar: 0xd802, width: 3 }, Token::Bom],
                     vec![Token::Error(DecodeError::LoneSurrogate(0xd801)),
                          Token::Error(DecodeError::LoneSurrogate(0xd802)), Token::Bom]);
        assert_feed!(t, vec![Token::Cesu { scalar: 0xd801, width: 3 }], vec![]);
        assert_finish!(t, vec![Token::Error(DecodeError::LoneSurrogate(0xd801))]);
    }
}
