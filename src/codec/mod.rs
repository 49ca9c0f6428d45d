// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reading and writing digraphs as text, one record per line.
//!
//! Input files hold digraph6 records (graph6 is also accepted, read as a
//! symmetric digraph). A file may start with a `>>digraph6<<` or `>>graph6<<`
//! header, directly in front of the first record or on a line of its own.

pub mod digraph6;

use std::io::{BufRead, Write};

use crate::errors::{GsinksError, Result};
use crate::graph::Digraph;

pub use digraph6::{decode, encode};

const HEADERS: [&[u8]; 2] = [b">>digraph6<<", b">>graph6<<"];

/// Iterator over the digraphs in a line-oriented input.
///
/// Blank lines are skipped. Decoding errors carry the 1-based line number.
pub struct Digraph6Reader<R> {
    input: R,
    line: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> Digraph6Reader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: 0,
            buffer: Vec::new(),
        }
    }

    /// Line number of the most recently read record.
    pub fn line(&self) -> usize {
        self.line
    }

    fn read_record(&mut self) -> Result<Option<Digraph>> {
        loop {
            self.buffer.clear();
            if self.input.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let mut record = self.buffer.as_slice();
            while let [rest @ .., b'\n' | b'\r'] = record {
                record = rest;
            }
            if let Some(rest) = HEADERS.iter().find_map(|h| record.strip_prefix(*h)) {
                record = rest;
            }
            if record.is_empty() {
                continue;
            }
            let line = self.line;
            return decode(record)
                .map(Some)
                .map_err(|source| GsinksError::Decode { line, source });
        }
    }
}

impl<R: BufRead> Iterator for Digraph6Reader<R> {
    type Item = Result<Digraph>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Writes digraph6 records, one per line.
pub struct Digraph6Writer<W: Write> {
    output: W,
    written: u64,
}

impl<W: Write> Digraph6Writer<W> {
    pub fn new(output: W) -> Self {
        Self { output, written: 0 }
    }

    pub fn write(&mut self, graph: &Digraph) -> Result<()> {
        writeln!(self.output, "{}", encode(graph))?;
        self.written += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DecodeError;

    #[test]
    fn test_reader_skips_header_and_blank_lines() {
        let input = ">>digraph6<<&AO\n\n&BP_\r\n";
        let graphs: Vec<Digraph> = Digraph6Reader::new(input.as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[1].order(), 3);
    }

    #[test]
    fn test_header_on_its_own_line() {
        let input = ">>digraph6<<\n&AO\n";
        let graphs: Vec<Digraph> = Digraph6Reader::new(input.as_bytes())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(graphs, vec![Digraph::from_edges(2, &[(0, 1)]).unwrap()]);
    }

    #[test]
    fn test_error_names_the_line() {
        let input = "&AO\n&A!\n";
        let results: Vec<Result<Digraph>> = Digraph6Reader::new(input.as_bytes()).collect();
        assert!(results[0].is_ok());
        match &results[1] {
            Err(GsinksError::Decode { line, source }) => {
                assert_eq!(*line, 2);
                assert!(matches!(source, DecodeError::InvalidByte { .. }));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_byte_is_a_decode_error() {
        let input: &[u8] = b"&AO\n&A\xff\n";
        let results: Vec<Result<Digraph>> = Digraph6Reader::new(input).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(GsinksError::Decode { line, source }) => {
                assert_eq!(*line, 2);
                assert!(matches!(
                    source,
                    DecodeError::InvalidByte { byte: 0xff, .. }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_line_tracks_blank_lines() {
        let mut reader = Digraph6Reader::new(&b"\n&AO\n\n\n&BP_\n"[..]);
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.line(), 2);
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.line(), 5);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_writer() {
        let mut writer = Digraph6Writer::new(Vec::new());
        writer
            .write(&Digraph::from_edges(2, &[(0, 1)]).unwrap())
            .unwrap();
        writer.write(&Digraph::new(1).unwrap()).unwrap();
        assert_eq!(writer.written(), 2);
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap(), "&AO\n&@?\n");
    }
}
