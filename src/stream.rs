//! Small byte-stream helpers.

use std::io::{self, BufReader, BufWriter, Error, ErrorKind, Read, Write};

use byteorder::{BigEndian, ReadBytesExt};

const QUOTE: u8 = b'"';
const NUMBER_WIDTH: usize = 5;

/// Returns the bytes between the first two quote characters (`"`).
///
/// Returns `None` if the stream has no quote at all, or if it has a single
/// quote with nothing after it. When the closing quote is missing, everything
/// from the opening quote to the end of the stream is returned.
pub fn get_quoted<R: Read>(input: R) -> io::Result<Option<Vec<u8>>> {
    let mut bytes = input.bytes();

    loop {
        match bytes.next().transpose()? {
            None => return Ok(None),
            Some(QUOTE) => break,
            Some(_) => {}
        }
    }

    let mut quoted = Vec::new();
    loop {
        match bytes.next().transpose()? {
            None if quoted.is_empty() => return Ok(None),
            None | Some(QUOTE) => return Ok(Some(quoted)),
            Some(b) => quoted.push(b),
        }
    }
}

/// Reads until `end_mark` is consumed and returns the text before it, or the
/// whole remaining text if the mark never shows up.
///
/// The input is read one byte at a time, so nothing past the mark is
/// consumed. Pass a buffered reader if `input` is slow to read from.
pub fn read_until<R: Read>(mut input: R, end_mark: &str) -> io::Result<String> {
    let mark = end_mark.as_bytes();
    let mut buf = Vec::new();

    if !mark.is_empty() {
        loop {
            match input.read_u8() {
                Ok(b) => buf.push(b),
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e),
            }
            if buf.ends_with(mark) {
                buf.truncate(buf.len() - mark.len());
                break;
            }
        }
    }

    String::from_utf8(buf).map_err(|e| Error::new(ErrorKind::InvalidData, e))
}

/// Copies `input` to `output`, dropping every occurrence of `bad_byte`.
///
/// The output is flushed and then dropped. Returns the number of bytes
/// written.
pub fn filter_out<R: Read, W: Write>(input: R, output: W, bad_byte: u8) -> io::Result<u64> {
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut written = 0;

    for b in reader.by_ref().bytes() {
        let b = b?;
        if b != bad_byte {
            writer.write_all(&[b])?;
            written += 1;
        }
    }
    writer.flush()?;
    Ok(written)
}

/// Reads an unsigned 40-bit integer stored as five bytes, most-significant
/// first. Returns `None` if the stream ends before five bytes are read.
pub fn read_number<R: Read>(mut input: R) -> io::Result<Option<u64>> {
    match input.read_uint::<BigEndian>(NUMBER_WIDTH) {
        Ok(n) => Ok(Some(n)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}
