//! In-place external sorting of random-access files, plus a few stream and
//! dictionary utilities.
//!
//! The sorters treat a file as an array of fixed-width unsigned values and
//! sort it without ever reading it into memory:
//!
//! ```no_run
//! use std::fs::OpenOptions;
//!
//! let mut file = OpenOptions::new().read(true).write(true).open("data.bin")?;
//! extfile_utils::sort_bytes(&mut file)?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod dict;
pub mod extsort;
pub mod stream;

pub use dict::{Dictionary, PersistentDictionary};
pub use extsort::{sort_bytes, sort_tri_bytes};
