// This is a part of rust-ecma35.
// Copyright (c) 2026, rust-ecma35 contributors.
// See README.md and LICENSE.txt for details.

use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use ecma35::{Decoder, DecoderOptions, DecoderTrap, Mode, Token};
use ecma35::registry::BuiltinRegistry;
use ecma35::label::BuiltinCodePages;
use getopts::Options;

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let mut opts = Options::new();
    opts.optopt("m", "mode", "set initial coding system (e.g. ecma-35, utf-8, shift_jis, ebcdic)", "NAME");
    opts.optopt("p", "code-page", "set initial code page", "NUMBER");
    opts.optopt("e", "error-policy", "set error policy (one of strict, ignore, replace)", "POLICY");
    opts.optflag("t", "tokens", "print every token instead of the decoded text");
    opts.optopt("o", "output", "output file", "FILE");
    opts.optflag("h", "help", "print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => panic!("{}", e),
    };
    if matches.opt_present("h") {
        println!("{}", opts.usage("Decodes an ECMA-35 byte stream using rust-ecma35."));
        return;
    }

    let mode = match matches.opt_str("m").as_ref().map(|s| &s[..]) {
        Some(name) => match Mode::from_name(name) {
            Some(mode) => mode,
            None => panic!("invalid coding system name {}", name),
        },
        None => Mode::Ecma35,
    };
    let code_page = match matches.opt_str("p").as_ref().map(|s| &s[..]) {
        Some(page) => match page.parse() {
            Ok(page) => Some(page),
            Err(_) => panic!("invalid code page {}", page),
        },
        None => None,
    };
    let trap = match matches.opt_str("e").as_ref().map(|s| &s[..]) {
        Some("strict") | None => DecoderTrap::Strict,
        Some("ignore") => DecoderTrap::Ignore,
        Some("replace") => DecoderTrap::Replace,
        Some(s) => panic!("invalid error policy {}", s),
    };

    let mut input = match matches.free.first().map(|s| &s[..]) {
        Some("-") | None => Box::new(io::stdin()) as Box<dyn Read>,
        Some(f) => Box::new(File::open(f).unwrap()) as Box<dyn Read>,
    };
    let mut output = match matches.opt_str("o").as_ref().map(|s| &s[..]) {
        Some("-") | None => Box::new(io::stdout()) as Box<dyn Write>,
        Some(f) => Box::new(File::create(f).unwrap()) as Box<dyn Write>,
    };

    let options = DecoderOptions { mode: mode, code_page: code_page };
    let mut decoder = match Decoder::with_options(&BuiltinRegistry, &BuiltinCodePages, options) {
        Ok(decoder) => decoder,
        Err(e) => panic!("decoder error: {}", e),
    };

    let mut buf = [0u8; 4096];
    let mut tokens: Vec<Token> = Vec::new();
    loop {
        let n = input.read(&mut buf).unwrap();
        if n == 0 {
            decoder.finish(&mut tokens);
        } else {
            decoder.feed_bytes(&buf[..n], &mut tokens);
        }

        if matches.opt_present("t") {
            for token in tokens.drain(..) {
                writeln!(output, "{:?}", token).unwrap();
            }
        } else {
            let mut text = String::new();
            if let Err(e) = ecma35::render(&tokens, trap, &mut text) {
                panic!("decoder error: {}", e);
            }
            tokens.clear();
            output.write_all(text.as_bytes()).unwrap();
        }

        if n == 0 {
            break;
        }
    }
}
