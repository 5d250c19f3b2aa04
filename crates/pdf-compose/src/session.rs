//! Ordered input list owned by the interface layer

use crate::options::ComposeOptions;
use crate::types::*;
use std::path::{Path, PathBuf};

/// Inputs and destination for one merge, edited by the user between runs
#[derive(Debug, Clone, Default)]
pub struct Session {
    items: Vec<SourceItem>,
    destination: Option<PathBuf>,
    pub options: ComposeOptions,
}

impl Session {
    pub fn new(options: ComposeOptions) -> Self {
        Self {
            items: Vec::new(),
            destination: None,
            options,
        }
    }

    pub fn items(&self) -> &[SourceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>) {
        self.items.push(SourceItem::new(path));
    }

    pub fn extend<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.items.extend(paths.into_iter().map(SourceItem::new));
    }

    /// Swap the item at `index` with the one before it
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.items.len() {
            return false;
        }
        self.items.swap(index - 1, index);
        true
    }

    /// Swap the item at `index` with the one after it
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.items.len() {
            return false;
        }
        self.items.swap(index, index + 1);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<SourceItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove several items at once; indices refer to the list before removal
    pub fn remove_many(&mut self, indices: &[usize]) -> Vec<SourceItem> {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut removed: Vec<SourceItem> = sorted
            .into_iter()
            .rev()
            .filter_map(|index| self.remove(index))
            .collect();
        removed.reverse();
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn set_destination(&mut self, path: impl Into<PathBuf>) {
        self.destination = Some(path.into());
    }

    /// Check everything a merge needs before touching any file
    pub fn validate(&self) -> Result<&Path> {
        if self.items.is_empty() {
            return Err(ComposeError::Config("No input files specified".to_string()));
        }
        self.options.validate()?;
        self.destination
            .as_deref()
            .ok_or_else(|| ComposeError::Config("No output file specified".to_string()))
    }

    /// Merge the current inputs into the destination
    pub fn merge(&self) -> Result<BatchResult> {
        let destination = self.validate()?;
        crate::compose::merge_to_file(&self.items, &self.options, destination)
    }
}
