//! Page range parsing for page removal

use crate::types::*;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A validated 1-based inclusive page range such as `9-25`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Parse `<start>-<end>` with `1 <= start <= end`
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || ComposeError::InvalidRange(input.to_string());

        let (start, end) = input.split_once('-').ok_or_else(invalid)?;
        let start: u32 = start.trim().parse().map_err(|_| invalid())?;
        let end: u32 = end.trim().parse().map_err(|_| invalid())?;

        if start == 0 || start > end {
            return Err(invalid());
        }

        Ok(Self { start, end })
    }

    /// First page, 1-based
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last page, 1-based
    pub fn end(&self) -> u32 {
        self.end
    }

    /// The same range as 0-based page indices
    pub fn indices(&self) -> RangeInclusive<usize> {
        (self.start as usize - 1)..=(self.end as usize - 1)
    }

    /// 1-based page numbers in the range that exist in a document of `page_count` pages
    pub(crate) fn existing_pages(&self, page_count: u32) -> Vec<u32> {
        (self.start..=self.end.min(page_count)).collect()
    }
}

impl FromStr for PageRange {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        PageRange::parse(s)
    }
}
