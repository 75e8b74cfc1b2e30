//! Machine image loading.
//!
//! An image is an ordered list of `(address, value)` pairs. This module
//! provides:
//! 1. **Parsing:** The text form, one entry per line, either `value` (next
//!    sequential address) or `address value` (explicit address, after which
//!    numbering continues from `address + 1`). `#` starts a comment.
//! 2. **File loading:** Reading and parsing an image from disk.
//! 3. **Installation:** Writing every pair through the memory's two-phase
//!    store and resetting the machine.
//!
//! The trailing `-1` produced by the assembler is kept as an ordinary word.
//! It is not an opcode, so execution that reaches it halts.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::addr::to_index;
use crate::common::{LoadError, Region, SimResult, Word};
use crate::core::ControlUnit;

/// A program image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    entries: Vec<(Word, Word)>,
}

impl Image {
    /// Builds an image placing `words` at addresses `0..`.
    pub fn from_words(words: &[Word]) -> Self {
        Self {
            entries: (0..).zip(words.iter().copied()).collect(),
        }
    }

    /// Builds an image from explicit pairs.
    pub fn from_entries(entries: Vec<(Word, Word)>) -> Self {
        Self { entries }
    }

    /// Parses the text form.
    ///
    /// # Returns
    ///
    /// `LoadError::Parse` naming the first line that is neither a single
    /// word nor an `address value` pair.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut entries = Vec::new();
        let mut next: Word = 0;
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or_default().trim();
            if line.is_empty() {
                continue;
            }
            let err = || LoadError::Parse {
                line: idx + 1,
                text: raw.trim().to_owned(),
            };
            let fields = line
                .split_whitespace()
                .map(str::parse::<Word>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| err())?;
            let (address, value) = match fields.as_slice() {
                [value] => (next, *value),
                [address, value] => (*address, *value),
                _ => return Err(err()),
            };
            entries.push((address, value));
            next = address.saturating_add(1);
        }
        Ok(Self { entries })
    }

    /// Reads and parses an image file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let image = Self::parse(&text)?;
        debug!(path = %path.display(), entries = image.len(), "image read");
        Ok(image)
    }

    /// The `(address, value)` pairs in load order.
    pub fn entries(&self) -> &[(Word, Word)] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the image has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lays the image out as a dense word array starting at address 0.
    ///
    /// Gaps read as 0. Later entries win over earlier ones for the same
    /// address.
    ///
    /// # Returns
    ///
    /// `OutOfBoundsAddress` for any address outside a memory of `size`
    /// words, before anything is allocated.
    pub fn to_cells(&self, size: usize) -> SimResult<Vec<Word>> {
        let indices = self
            .entries
            .iter()
            .map(|&(address, _)| to_index(Region::Main, address, size))
            .collect::<SimResult<Vec<_>>>()?;
        let mut cells = vec![0; indices.iter().max().map_or(0, |max| max + 1)];
        for (idx, &(_, value)) in indices.into_iter().zip(&self.entries) {
            cells[idx] = value;
        }
        Ok(cells)
    }

    /// Installs the image into `cu` and resets it.
    ///
    /// Memory cells not named by the image keep their previous contents.
    pub fn load_into(&self, cu: &mut ControlUnit) -> SimResult<()> {
        cu.load(self.entries.iter().copied())
    }
}
