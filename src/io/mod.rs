//! Persistence for control grids and model meshes.
//!
//! All readers and writers are generic over `std::io` traits so they
//! work against files, sockets and in-memory buffers alike; the scene
//! layer decides where the bytes go.

pub mod grid;
pub mod off;

use std::io::{self, BufRead};

/// Line iterator that skips blank and `#`-comment lines, keeping track
/// of 1-based line numbers for error reporting.
struct ContentLines<'a, R: BufRead> {
    reader: &'a mut R,
    line_no: usize,
}

impl<'a, R: BufRead> ContentLines<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self { reader, line_no: 0 }
    }

    fn next_content(&mut self) -> io::Result<Option<(usize, String)>> {
        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Ok(Some((self.line_no, trimmed.to_string())));
        }
    }
}
