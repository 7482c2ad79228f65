use crate::extsort::access::{Byte, Element, RandomAccess, TriByte};

use std::io;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// In-place sorting algorithm. Both keep at most two elements in memory.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Adjacent compare-and-swap passes.
    #[default]
    Bubble,
    /// Select the minimum of the unsorted tail and swap it into place.
    Selection,
}

/// Counters collected while sorting a file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SortStats {
    /// Number of logical elements in the file.
    pub elements: u64,
    /// Number of outer passes performed.
    pub passes: u64,
    pub comparisons: u64,
    pub swaps: u64,
}

/// Configures how files are sorted in place.
#[derive(Clone, Debug)]
pub struct FileSorterBuilder {
    algorithm: Algorithm,
    early_exit: bool,
}

impl Default for FileSorterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSorterBuilder {
    pub fn new() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            early_exit: false,
        }
    }

    /// Sets the sorting algorithm. Defaults to [`Algorithm::Bubble`].
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Stops bubble sort after the first pass that swaps nothing.
    ///
    /// The file ends up with the same content either way; this only saves
    /// passes over input that is already (nearly) sorted. Ignored by
    /// [`Algorithm::Selection`].
    pub fn with_early_exit(mut self, early_exit: bool) -> Self {
        self.early_exit = early_exit;
        self
    }

    pub fn build(self) -> FileSorter {
        FileSorter {
            algorithm: self.algorithm,
            early_exit: self.early_exit,
        }
    }
}

/// Sorts files in place, treating them as arrays of [`Element`]s.
///
/// Only seek, single-byte read and single-byte write are used. The file is
/// never loaded into memory, its length never changes and the handle is left
/// open for the caller.
#[derive(Clone, Debug)]
pub struct FileSorter {
    algorithm: Algorithm,
    early_exit: bool,
}

impl FileSorter {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Sorts the bytes of `file` as unsigned 8-bit values.
    pub fn sort_bytes<F: RandomAccess + ?Sized>(&self, file: &mut F) -> io::Result<SortStats> {
        self.sort::<Byte, F>(file)
    }

    /// Sorts `file` as unsigned 24-bit big-endian values. When the length is
    /// not a multiple of 3 the trailing bytes are left untouched.
    pub fn sort_tri_bytes<F: RandomAccess + ?Sized>(&self, file: &mut F) -> io::Result<SortStats> {
        self.sort::<TriByte, F>(file)
    }

    /// Sorts the whole elements of type `E` stored in `file`.
    ///
    /// # Errors
    /// Any seek, read or write failure aborts the sort. Swaps already written
    /// stay in the file, and a swap cut off halfway leaves one element
    /// duplicated. The file length never changes.
    pub fn sort<E, F>(&self, file: &mut F) -> io::Result<SortStats>
    where
        E: Element,
        F: RandomAccess + ?Sized,
    {
        let len = file.len()?;
        let n = E::count(len);
        debug!(
            len,
            elements = n,
            width = E::WIDTH,
            algorithm = ?self.algorithm,
            "sorting file in place"
        );

        let stats = match self.algorithm {
            Algorithm::Bubble => bubble_sort::<E, F>(file, n, self.early_exit)?,
            Algorithm::Selection => selection_sort::<E, F>(file, n)?,
        };

        debug!(
            passes = stats.passes,
            comparisons = stats.comparisons,
            swaps = stats.swaps,
            "file sorted"
        );
        Ok(stats)
    }
}

/// Sorts the bytes of `file` in place with the default sorter.
pub fn sort_bytes<F: RandomAccess + ?Sized>(file: &mut F) -> io::Result<SortStats> {
    FileSorterBuilder::new().build().sort_bytes(file)
}

/// Sorts the 24-bit big-endian values of `file` in place with the default sorter.
pub fn sort_tri_bytes<F: RandomAccess + ?Sized>(file: &mut F) -> io::Result<SortStats> {
    FileSorterBuilder::new().build().sort_tri_bytes(file)
}

fn bubble_sort<E, F>(file: &mut F, n: u64, early_exit: bool) -> io::Result<SortStats>
where
    E: Element,
    F: RandomAccess + ?Sized,
{
    let mut stats = SortStats { elements: n, ..SortStats::default() };

    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - i - 1 {
            let a = E::read_from(file, j)?;
            let b = E::read_from(file, j + 1)?;
            stats.comparisons += 1;
            if a > b {
                E::write_to(file, j, b)?;
                E::write_to(file, j + 1, a)?;
                stats.swaps += 1;
                swapped = true;
            }
        }
        stats.passes += 1;
        trace!(pass = i, swapped, "bubble pass");

        if early_exit && !swapped {
            break;
        }
    }
    Ok(stats)
}

fn selection_sort<E, F>(file: &mut F, n: u64) -> io::Result<SortStats>
where
    E: Element,
    F: RandomAccess + ?Sized,
{
    let mut stats = SortStats { elements: n, ..SortStats::default() };

    for i in 0..n.saturating_sub(1) {
        let first = E::read_from(file, i)?;
        let mut min = first;
        let mut min_idx = i;
        for j in i + 1..n {
            let v = E::read_from(file, j)?;
            stats.comparisons += 1;
            if v < min {
                min = v;
                min_idx = j;
            }
        }
        if min_idx != i {
            E::write_to(file, i, min)?;
            E::write_to(file, min_idx, first)?;
            stats.swaps += 1;
        }
        stats.passes += 1;
        trace!(pass = i, min_idx, "selection pass");
    }
    Ok(stats)
}
