mod access;
mod sort;

pub use access::{Byte, Element, RandomAccess, TriByte, TRI_BYTE_MAX};
pub use sort::{sort_bytes, sort_tri_bytes, Algorithm, FileSorter, FileSorterBuilder, SortStats};
