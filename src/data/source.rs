//! Re-readable text sources for delimited metadata.

use crate::error::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A line-oriented text source that can be reset to its start.
///
/// Scanning passes (such as directive detection) read from the current
/// position and then call [`TextSource::rewind`] so the full parse sees
/// every line again.
pub trait TextSource: BufRead {
    /// Reset the read position to the first byte.
    fn rewind(&mut self) -> Result<()>;
}

/// A file on disk.
#[derive(Debug)]
pub struct PathSource {
    path: PathBuf,
    reader: BufReader<File>,
}

impl PathSource {
    /// Open a file for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = BufReader::new(File::open(&path)?);
        Ok(Self { path, reader })
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for PathSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for PathSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

impl TextSource for PathSource {
    fn rewind(&mut self) -> Result<()> {
        // Seeking a BufReader discards its buffer as well.
        self.reader.seek(SeekFrom::Start(0))?;
        Ok(())
    }
}

/// An in-memory text buffer.
#[derive(Debug, Clone)]
pub struct BufferSource {
    cursor: Cursor<Vec<u8>>,
}

impl BufferSource {
    /// Wrap a string.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            cursor: Cursor::new(text.into().into_bytes()),
        }
    }
}

impl Read for BufferSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for BufferSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt)
    }
}

impl TextSource for BufferSource {
    fn rewind(&mut self) -> Result<()> {
        self.cursor.set_position(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_buffer_rewind() {
        let mut source = BufferSource::new("a\nb\n");
        let mut text = String::new();
        source.read_to_string(&mut text).unwrap();
        assert_eq!(text, "a\nb\n");

        source.rewind().unwrap();
        let mut line = String::new();
        source.read_line(&mut line).unwrap();
        assert_eq!(line, "a\n");
    }

    #[test]
    fn test_path_rewind() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "header").unwrap();
        writeln!(file, "row").unwrap();
        file.flush().unwrap();

        let mut source = PathSource::open(file.path()).unwrap();
        assert_eq!(source.path(), file.path());
        let first: Vec<String> = source.by_ref().lines().map(|l| l.unwrap()).collect();
        assert_eq!(first, vec!["header", "row"]);

        source.rewind().unwrap();
        let second: Vec<String> = source.by_ref().lines().map(|l| l.unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_open_missing_file() {
        assert!(PathSource::open("/definitely/not/here.tsv").is_err());
    }
}
