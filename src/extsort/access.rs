//! Random access to a file viewed as an array of fixed-width elements.

use std::fmt::Debug;
use std::io::{self, Error, ErrorKind, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt, WriteBytesExt};

/// A seekable byte resource that can be read and written one unit at a time.
///
/// Sorting code only talks to this trait, so any `Read + Write + Seek` handle
/// (a [`std::fs::File`], a `&mut File`, an in-memory [`io::Cursor`]) can be
/// sorted in place.
pub trait RandomAccess {
    /// Total length of the resource in bytes.
    fn len(&mut self) -> io::Result<u64>;

    /// Moves the cursor to `offset` bytes from the start.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Reads the byte under the cursor and advances it.
    /// Returns `None` at end of data.
    fn read_unit(&mut self) -> io::Result<Option<u8>>;

    /// Writes one byte under the cursor and advances it.
    fn write_unit(&mut self, value: u8) -> io::Result<()>;
}

impl<T> RandomAccess for T
where
    T: Read + Write + Seek,
{
    fn len(&mut self) -> io::Result<u64> {
        self.seek(SeekFrom::End(0))
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        match self.read_u8() {
            Ok(b) => Ok(Some(b)),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_unit(&mut self, value: u8) -> io::Result<()> {
        self.write_u8(value)
    }
}

/// A logical element stored at a fixed stride inside a file.
pub trait Element {
    /// Number of bytes occupied by one element, i.e. the stride.
    const WIDTH: u64;

    type Value: Ord + Copy + Debug;

    /// Number of whole elements in a file of `len` bytes. Trailing bytes that
    /// do not form a complete element are not counted.
    fn count(len: u64) -> u64 {
        len / Self::WIDTH
    }

    /// Reads the element at `index`.
    fn read_from<F: RandomAccess + ?Sized>(file: &mut F, index: u64) -> io::Result<Self::Value>;

    /// Overwrites the element at `index`.
    fn write_to<F: RandomAccess + ?Sized>(
        file: &mut F,
        index: u64,
        value: Self::Value,
    ) -> io::Result<()>;
}

/// One unsigned byte per element.
#[derive(Clone, Copy, Debug)]
pub struct Byte;

/// An unsigned 24-bit integer per element, most-significant byte first.
#[derive(Clone, Copy, Debug)]
pub struct TriByte;

/// Largest value a [`TriByte`] element can hold.
pub const TRI_BYTE_MAX: u32 = 0xFF_FFFF;

impl Element for Byte {
    const WIDTH: u64 = 1;
    type Value = u8;

    fn read_from<F: RandomAccess + ?Sized>(file: &mut F, index: u64) -> io::Result<u8> {
        file.seek_to(index)?;
        read_unit_at(file, index)
    }

    fn write_to<F: RandomAccess + ?Sized>(file: &mut F, index: u64, value: u8) -> io::Result<()> {
        file.seek_to(index)?;
        file.write_unit(value)
    }
}

impl Element for TriByte {
    const WIDTH: u64 = 3;
    type Value = u32;

    fn read_from<F: RandomAccess + ?Sized>(file: &mut F, index: u64) -> io::Result<u32> {
        let offset = index * Self::WIDTH;
        file.seek_to(offset)?;
        let mut buf = [0u8; 3];
        for (i, b) in buf.iter_mut().enumerate() {
            *b = read_unit_at(file, offset + i as u64)?;
        }
        Ok(BigEndian::read_u24(&buf))
    }

    fn write_to<F: RandomAccess + ?Sized>(file: &mut F, index: u64, value: u32) -> io::Result<()> {
        if value > TRI_BYTE_MAX {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("value {:#x} does not fit in 24 bits", value),
            ));
        }
        let mut buf = [0u8; 3];
        BigEndian::write_u24(&mut buf, value);
        file.seek_to(index * Self::WIDTH)?;
        for b in buf {
            file.write_unit(b)?;
        }
        Ok(())
    }
}

fn read_unit_at<F: RandomAccess + ?Sized>(file: &mut F, offset: u64) -> io::Result<u8> {
    file.read_unit()?.ok_or_else(|| {
        Error::new(
            ErrorKind::UnexpectedEof,
            format!("unexpected end of data at offset {}", offset),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_unit_at_end() {
        let mut file = Cursor::new(vec![7u8]);
        file.seek_to(0).unwrap();
        assert_eq!(file.read_unit().unwrap(), Some(7));
        assert_eq!(file.read_unit().unwrap(), None);
        assert_eq!(file.len().unwrap(), 1);
    }

    #[test]
    fn test_tri_byte_encoding() {
        let mut file = Cursor::new(vec![0x12, 0x34, 0x56, 0xAB, 0xCD, 0xEF, 0x01]);
        assert_eq!(TriByte::count(file.len().unwrap()), 2);
        assert_eq!(TriByte::read_from(&mut file, 0).unwrap(), 0x123456);
        assert_eq!(TriByte::read_from(&mut file, 1).unwrap(), 0xABCDEF);

        TriByte::write_to(&mut file, 0, 0x00FF01).unwrap();
        assert_eq!(file.get_ref(), &vec![0x00, 0xFF, 0x01, 0xAB, 0xCD, 0xEF, 0x01]);
    }

    #[test]
    fn test_tri_byte_rejects_wide_values() {
        let mut file = Cursor::new(vec![0u8; 3]);
        let err = TriByte::write_to(&mut file, 0, 0x0100_0000).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(file.get_ref(), &vec![0u8; 3]);
    }

    #[test]
    fn test_short_element_is_eof_error() {
        let mut file = Cursor::new(vec![1u8, 2]);
        let err = TriByte::read_from(&mut file, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert!(err.to_string().contains("offset 2"));
    }
}
