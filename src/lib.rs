// Copyright 2026 The fst-dump Project Contributors
// released under BSD 3-Clause License

//! Dump value changes from an FST wavedump to stdout.
//!
//! The heavy lifting, parsing and decompressing the FST container, is done by
//! the `fst-reader` crate. This crate is only the driver: it opens the file,
//! prints `MaxHandle` and `VarCount`, and streams the value changes of the
//! selected signal handles as `Time: <t> id: <h> value: <v>` lines. Each
//! failure category maps to a distinct process exit code.

mod dump;

pub use dump::{dump_fst, DumpError, DumpOptions, DEFAULT_HANDLE};
