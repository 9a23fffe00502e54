// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

//! Tables which the `encoding-index-*` crates do not provide.

pub mod ebcdic;
pub mod ibm_pc;
