use crate::error::SourceError;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Open an access log for a streaming scan.
pub fn open_log(path: &Path) -> Result<LogLines<BufReader<File>>, SourceError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SourceError::LogNotFound {
            path: path.to_path_buf(),
        },
        _ => SourceError::LogOpen {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(LogLines::new(BufReader::new(file)))
}

/// Lines of a reader, one at a time, decoded as lossy UTF-8.
///
/// Invalid bytes become replacement characters instead of ending the scan.
/// A read error ends the iteration after logging it.
pub struct LogLines<R> {
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let mut end = self.buf.len();
                while end > 0 && matches!(self.buf[end - 1], b'\n' | b'\r') {
                    end -= 1;
                }
                Some(String::from_utf8_lossy(&self.buf[..end]).into_owned())
            }
            Err(err) => {
                self.done = true;
                tracing::warn!(error = %err, "stopped reading access log");
                None
            }
        }
    }
}
