// Copyright 2026 The fst-dump Project Contributors
// released under BSD 3-Clause License
// Single-pass value-change extraction from an FST file.

use fst_reader::{
    FstFilter, FstHierarchyEntry, FstReader, FstSignalHandle, FstSignalValue, FstVarType,
};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, Write};
use std::path::Path;

/// The signal handle extracted when no explicit selection is configured.
pub const DEFAULT_HANDLE: u32 = 2;

/// One failure category per stage of the run. The display string is the
/// diagnostic line printed to stderr; underlying reader detail is discarded.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("Error opening file")]
    Open,
    #[error("Hierarchy iteration error")]
    Hierarchy,
    #[error("Block iteration error")]
    Blocks,
}

impl DumpError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DumpError::Open => 2,
            DumpError::Hierarchy => 3,
            DumpError::Blocks => 4,
        }
    }
}

/// Which signal handles to extract. Handles are the 1-based ids assigned by
/// the reader in hierarchy declaration order.
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub handles: Vec<u32>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            handles: vec![DEFAULT_HANDLE],
        }
    }
}

/// Facts collected from the single hierarchy walk: whether the walk delivered
/// anything at all, and which handles can be printed as text.
#[derive(Debug, Default)]
struct HierarchyScan {
    entries: usize,
    printable: Vec<u32>,
}

impl HierarchyScan {
    /// A handle is printable when its payload is fixed-width text.
    fn record_var(&mut self, tpe: FstVarType, length: u32, handle: u32) {
        // length 0 marks a variable-length signal
        if length > 0 && !is_real(tpe) && !self.printable.contains(&handle) {
            self.printable.push(handle);
        }
    }

    /// Intersect the requested handles with the printable ones. Handles that
    /// never appeared in the hierarchy are dropped, as are variable-length
    /// and real-valued signals, which produce no value-change lines.
    fn select(&self, wanted: &[u32]) -> Vec<FstSignalHandle> {
        wanted
            .iter()
            .filter(|h| self.printable.contains(h))
            .map(|&h| FstSignalHandle::from_index((h - 1) as usize))
            .collect()
    }
}

fn is_real(tpe: FstVarType) -> bool {
    matches!(
        tpe,
        FstVarType::Real
            | FstVarType::RealParameter
            | FstVarType::RealTime
            | FstVarType::ShortReal
    )
}

fn scan_hierarchy<R: BufRead + Seek>(
    reader: &mut FstReader<R>,
) -> Result<HierarchyScan, DumpError> {
    let mut scan = HierarchyScan::default();
    reader
        .read_hierarchy(|entry| {
            scan.entries += 1;
            if let FstHierarchyEntry::Var {
                tpe, length, handle, ..
            } = entry
            {
                scan.record_var(tpe, length, handle.get_index() as u32 + 1);
            }
        })
        .map_err(|_| DumpError::Hierarchy)?;
    Ok(scan)
}

/// Open `path`, print the two summary lines and all value changes for the
/// selected handles to `out`, with progress lines going to `progress`.
///
/// Write failures on either sink are ignored; partial output that was already
/// flushed stays where it is. The reader context is dropped on return.
pub fn dump_fst(
    path: &Path,
    options: &DumpOptions,
    mut out: impl Write,
    mut progress: impl Write,
) -> Result<(), DumpError> {
    let _ = writeln!(progress, "Opening {}", path.display());
    let file = File::open(path).map_err(|_| DumpError::Open)?;
    let mut reader = FstReader::open(BufReader::new(file)).map_err(|_| DumpError::Open)?;

    let _ = writeln!(progress, "Reading hierarchy");
    let scan = scan_hierarchy(&mut reader)?;
    if scan.entries == 0 {
        return Err(DumpError::Hierarchy);
    }

    let header = reader.get_header();
    let _ = writeln!(out, "MaxHandle: {}", header.max_handle);
    let _ = writeln!(out, "VarCount: {}", header.var_count);

    // unlimited time range, mask enabled for the selected handles only
    let filter = FstFilter::filter_signals(scan.select(&options.handles));

    let _ = writeln!(progress, "Reading blocks");
    reader
        .read_signals(&filter, |time, handle, value| {
            // real payloads have no text form and are consumed silently,
            // matching their exclusion from the selection above
            if let FstSignalValue::String(bytes) = value {
                let _ = writeln!(
                    out,
                    "Time: {} id: {} value: {}",
                    time,
                    handle.get_index() + 1,
                    String::from_utf8_lossy(bytes)
                );
            }
        })
        .map_err(|_| DumpError::Blocks)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(DumpError::Open.exit_code(), 2);
        assert_eq!(DumpError::Hierarchy.exit_code(), 3);
        assert_eq!(DumpError::Blocks.exit_code(), 4);
    }

    #[test]
    fn diagnostic_lines() {
        assert_eq!(DumpError::Open.to_string(), "Error opening file");
        assert_eq!(DumpError::Hierarchy.to_string(), "Hierarchy iteration error");
        assert_eq!(DumpError::Blocks.to_string(), "Block iteration error");
    }

    #[test]
    fn default_selection_is_handle_two() {
        assert_eq!(DumpOptions::default().handles, [DEFAULT_HANDLE]);
    }

    #[test]
    fn selection_drops_unknown_handles() {
        let scan = HierarchyScan {
            entries: 5,
            printable: vec![1, 2, 3],
        };
        assert_eq!(scan.select(&[2]).len(), 1);
        assert_eq!(scan.select(&[2])[0].get_index(), 1);
        assert!(scan.select(&[7]).is_empty());
        assert_eq!(scan.select(&[3, 7, 1]).len(), 2);
    }

    #[test]
    fn scan_drops_varlen_and_real_handles() {
        let mut scan = HierarchyScan::default();
        scan.record_var(FstVarType::Wire, 1, 1);
        scan.record_var(FstVarType::GenericString, 0, 2); // variable length
        scan.record_var(FstVarType::Real, 8, 3);
        scan.record_var(FstVarType::Wire, 1, 1); // alias, same handle again
        assert_eq!(scan.printable, [1]);
        assert_eq!(scan.select(&[1]).len(), 1);
        assert!(scan.select(&[2, 3]).is_empty());
    }

    #[test]
    fn real_var_types() {
        assert!(is_real(FstVarType::Real));
        assert!(is_real(FstVarType::RealTime));
        assert!(!is_real(FstVarType::Wire));
        assert!(!is_real(FstVarType::Logic));
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let mut out = Vec::new();
        let mut progress = Vec::new();
        let res = dump_fst(
            Path::new("does/not/exist.fst"),
            &DumpOptions::default(),
            &mut out,
            &mut progress,
        );
        assert!(matches!(res, Err(DumpError::Open)));
        assert!(out.is_empty());
        assert_eq!(progress, b"Opening does/not/exist.fst\n");
    }
}
