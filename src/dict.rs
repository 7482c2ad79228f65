//! A dictionary held entirely in memory and persisted to a flat text file.
//!
//! The store file has one entry per line:
//!
//! ```text
//! word:definition
//! ```
//!
//! An empty definition (`word:`) is allowed.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::debug;

const SEPARATOR: char = ':';

/// A dictionary backed by some persistent store.
pub trait PersistentDictionary {
    /// Loads the dictionary from its store, discarding anything in memory.
    fn open(&mut self) -> io::Result<()>;

    /// Writes the dictionary back to its store.
    fn close(&mut self) -> io::Result<()>;
}

/// An ordered dictionary persisted as `key:value` lines.
///
/// Map operations are available through `Deref` to the underlying
/// [`BTreeMap`], so entries are always written back in key order.
#[derive(Clone, Debug)]
pub struct Dictionary {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Dictionary {
    /// Creates an empty dictionary stored at `path`. Nothing is read until
    /// [`PersistentDictionary::open`] is called.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), entries: BTreeMap::new() }
    }

    /// The store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the content with the records read from `reader`.
    pub fn load<R: BufRead>(&mut self, mut reader: R) -> io::Result<()> {
        self.entries.clear();
        let mut buf = String::new();
        loop {
            buf.clear();
            if read_line(&mut reader, &mut buf)? == 0 {
                break;
            }
            if let Some((key, value)) = parse_record(&buf) {
                self.entries.insert(key.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    /// Writes one `key:value` line per entry, in key order.
    pub fn save<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for (key, value) in &self.entries {
            writeln!(writer, "{}{}{}", key, SEPARATOR, value)?;
        }
        Ok(())
    }
}

impl PersistentDictionary for Dictionary {
    fn open(&mut self) -> io::Result<()> {
        match File::open(&self.path) {
            Ok(file) => self.load(BufReader::new(file))?,
            Err(e) if e.kind() == ErrorKind::NotFound => self.entries.clear(),
            Err(e) => return Err(e),
        }
        debug!(path = %self.path.display(), entries = self.entries.len(), "dictionary loaded");
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        self.save(&mut writer)?;
        writer.flush()?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "dictionary flushed");
        Ok(())
    }
}

impl Deref for Dictionary {
    type Target = BTreeMap<String, String>;
    fn deref(&self) -> &Self::Target { &self.entries }
}

impl DerefMut for Dictionary {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.entries }
}

/// Splits a line on the first separator. Blank lines carry no record; a line
/// without a separator is a key with an empty value.
fn parse_record(line: &str) -> Option<(&str, &str)> {
    if line.trim().is_empty() {
        None
    } else {
        Some(line.split_once(SEPARATOR).unwrap_or((line, "")))
    }
}

fn read_line<R>(reader: &mut R, buf: &mut String) -> io::Result<usize>
where
    R: BufRead,
{
    const LINE_FEED: char = '\n';
    const CARRIAGE_RETURN: char = '\r';

    let n = reader.read_line(buf)?;
    if buf.ends_with(LINE_FEED) {
        buf.pop();
        if buf.ends_with(CARRIAGE_RETURN) {
            buf.pop();
        }
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn tmp_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[rstest]
    #[case("word:def", Some(("word", "def")))]
    #[case("word:", Some(("word", "")))]
    #[case("word", Some(("word", "")))]
    #[case("url:http://x", Some(("url", "http://x")))]
    #[case(":value", Some(("", "value")))]
    #[case("", None)]
    #[case(" \t ", None)]
    fn test_parse_record(#[case] line: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(parse_record(line), expected);
    }

    #[test]
    fn test_load() {
        let data = b"\
b:second
a:first\r

c
a:again
" as &[u8];
        let mut dict = Dictionary::new("unused");
        dict.insert("stale".to_string(), "x".to_string());
        dict.load(data).unwrap();

        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get("a").map(String::as_str), Some("again"));
        assert_eq!(dict.get("b").map(String::as_str), Some("second"));
        assert_eq!(dict.get("c").map(String::as_str), Some(""));
        assert!(!dict.contains_key("stale"));
    }

    #[test]
    fn test_load_invalid_utf8() {
        let mut dict = Dictionary::new("unused");
        let err = dict.load(&b"k:\xff\n"[..]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_save() {
        let mut dict = Dictionary::new("unused");
        dict.insert("zebra".to_string(), "animal".to_string());
        dict.insert("apple".to_string(), String::new());
        let mut out = Vec::new();
        dict.save(&mut out).unwrap();
        assert_eq!(out, b"apple:\nzebra:animal\n");
    }

    #[rstest]
    fn test_open_missing_file(tmp_dir: tempfile::TempDir) {
        let mut dict = Dictionary::new(tmp_dir.path().join("dict.txt"));
        dict.insert("k".to_string(), "v".to_string());
        dict.open().unwrap();
        assert!(dict.is_empty());
    }

    #[rstest]
    fn test_persist(tmp_dir: tempfile::TempDir) {
        let path = tmp_dir.path().join("dict.txt");
        std::fs::write(&path, "old:entry\n").unwrap();

        let mut dict = Dictionary::new(&path);
        dict.open().unwrap();
        dict.insert("new".to_string(), "a:b".to_string());
        dict.remove("old");
        dict.close().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new:a:b\n");

        let mut reopened = Dictionary::new(&path);
        reopened.open().unwrap();
        assert_eq!(*reopened, *dict);
    }
}
