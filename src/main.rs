// Copyright 2026 The fst-dump Project Contributors
// released under BSD 3-Clause License

use fst_dump::{dump_fst, DumpOptions};
use std::path::Path;

const USAGE: &str = "Usage: ./fst <file.fst>";

fn main() {
    // one positional argument, anything after it is ignored
    let Some(path) = std::env::args_os().nth(1) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    let stdout = std::io::stdout().lock();
    let stderr = std::io::stderr().lock();
    if let Err(err) = dump_fst(Path::new(&path), &DumpOptions::default(), stdout, stderr) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
