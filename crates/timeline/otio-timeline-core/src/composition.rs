//! Shared behaviour of items that hold children.
//!
//! Implementors decide how children are laid out in time
//! (`range_of_child_at_index`, `natural_duration`); everything else is
//! provided here in terms of those.

use hashbrown::HashMap;
use otio_opentime_core::{RationalTime, TimeRange};

use crate::error::{ErrorKind, OtioError};
use crate::ids::ItemId;
use crate::item::{Composable, ItemBase};

/// Map a possibly negative index onto `[0, len]`, counting negative values
/// from the end.
pub fn adjusted_index(index: i64, len: usize) -> usize {
    let len_i = len as i64;
    let adjusted = if index < 0 { index + len_i } else { index };
    adjusted.clamp(0, len_i) as usize
}

pub trait Composition {
    fn base(&self) -> &ItemBase;
    fn base_mut(&mut self) -> &mut ItemBase;
    fn children(&self) -> &[Composable];
    fn children_mut(&mut self) -> &mut Vec<Composable>;

    /// Schema name used in log and error messages.
    fn composition_kind(&self) -> &'static str;

    /// Range of child `index` in this composition's own time frame.
    fn range_of_child_at_index(&self, index: usize) -> Result<TimeRange, OtioError>;

    /// Range of child `index` after clipping to this composition's source range.
    fn trimmed_range_of_child_at_index(&self, index: usize) -> Result<TimeRange, OtioError>;

    /// Duration implied by the children alone. Only called with at least one child.
    fn natural_duration(&self) -> Result<RationalTime, OtioError>;

    /// Ranges of every child keyed by identity.
    fn range_of_all_children(&self) -> Result<HashMap<ItemId, TimeRange>, OtioError> {
        let mut out = HashMap::with_capacity(self.children().len());
        for (i, child) in self.children().iter().enumerate() {
            out.insert(child.id(), self.range_of_child_at_index(i)?);
        }
        Ok(out)
    }

    fn available_range(&self) -> Result<TimeRange, OtioError> {
        if let Some(sr) = self.base().source_range {
            return Ok(sr);
        }
        if self.children().is_empty() {
            return Err(OtioError::new(
                ErrorKind::CannotComputeAvailableRange,
                format!(
                    "{} '{}' has no children and no source range",
                    self.composition_kind(),
                    self.base().name
                ),
            ));
        }
        Ok(TimeRange::from_duration(self.natural_duration()?))
    }

    fn trimmed_range(&self) -> Result<TimeRange, OtioError> {
        match self.base().source_range {
            Some(sr) => Ok(sr),
            None => self.available_range(),
        }
    }

    /// Clip `child_range` to the source range, if any. `None` when they do
    /// not overlap.
    fn trim_child_range(&self, child_range: TimeRange) -> Option<TimeRange> {
        let Some(sr) = self.base().source_range else {
            return Some(child_range);
        };
        let past_end = sr.start_time >= child_range.end_time_exclusive();
        let before_start = sr.end_time_exclusive() <= child_range.start_time;
        if past_end || before_start {
            return None;
        }
        let mut trimmed = child_range;
        if trimmed.start_time < sr.start_time {
            trimmed =
                TimeRange::range_from_start_end_time(sr.start_time, trimmed.end_time_exclusive());
        }
        if trimmed.end_time_exclusive() > sr.end_time_exclusive() {
            trimmed =
                TimeRange::range_from_start_end_time(trimmed.start_time, sr.end_time_exclusive());
        }
        Some(trimmed)
    }

    fn len(&self) -> usize {
        self.children().len()
    }

    fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    fn child_at(&self, index: usize) -> Result<&Composable, OtioError> {
        self.children()
            .get(index)
            .ok_or_else(|| OtioError::illegal_index(index, self.children().len()))
    }

    fn index_of_child(&self, id: ItemId) -> Result<usize, OtioError> {
        self.children()
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| {
                OtioError::new(
                    ErrorKind::NotAChildOf,
                    format!(
                        "item {id} is not a child of {} '{}'",
                        self.composition_kind(),
                        self.base().name
                    ),
                )
            })
    }

    fn has_child(&self, id: ItemId) -> bool {
        self.children().iter().any(|c| c.id() == id)
    }

    fn range_of_child(&self, id: ItemId) -> Result<TimeRange, OtioError> {
        self.range_of_child_at_index(self.index_of_child(id)?)
    }

    fn append_child(&mut self, child: impl Into<Composable>) -> Result<(), OtioError>
    where
        Self: Sized,
    {
        let at = self.children().len();
        self.insert_child(at, child)
    }

    /// Insert at `index`, clamped to `[0, len]`.
    fn insert_child(&mut self, index: usize, child: impl Into<Composable>) -> Result<(), OtioError>
    where
        Self: Sized,
    {
        let child = child.into();
        self.reject_if_parented(&child, None)?;
        let at = index.min(self.children().len());
        log::debug!(
            "{} '{}': insert {} {} at {at}",
            self.composition_kind(),
            self.base().name,
            child.schema_name(),
            child.id()
        );
        self.children_mut().insert(at, child);
        Ok(())
    }

    /// Replace the child at `index`, returning the old one.
    fn set_child(
        &mut self,
        index: usize,
        child: impl Into<Composable>,
    ) -> Result<Composable, OtioError>
    where
        Self: Sized,
    {
        let child = child.into();
        let len = self.children().len();
        if index >= len {
            return Err(OtioError::illegal_index(index, len));
        }
        self.reject_if_parented(&child, Some(index))?;
        Ok(std::mem::replace(&mut self.children_mut()[index], child))
    }

    fn remove_child(&mut self, index: usize) -> Result<Composable, OtioError> {
        let len = self.children().len();
        if index >= len {
            return Err(OtioError::illegal_index(index, len));
        }
        let removed = self.children_mut().remove(index);
        log::debug!(
            "{} '{}': removed {} at {index}",
            self.composition_kind(),
            self.base().name,
            removed.id()
        );
        Ok(removed)
    }

    fn clear_children(&mut self) {
        self.children_mut().clear();
    }

    #[doc(hidden)]
    fn reject_if_parented(
        &self,
        child: &Composable,
        replacing: Option<usize>,
    ) -> Result<(), OtioError> {
        let id = child.id();
        if id == self.base().id {
            return Err(OtioError::new(
                ErrorKind::ObjectCycle,
                format!("{} {id} cannot contain itself", self.composition_kind()),
            ));
        }
        let clash = self
            .children()
            .iter()
            .enumerate()
            .any(|(i, c)| Some(i) != replacing && c.id() == id);
        if clash {
            log::warn!(
                "{} '{}': rejected {id}, already a child",
                self.composition_kind(),
                self.base().name
            );
            return Err(OtioError::new(
                ErrorKind::ChildAlreadyParented,
                format!("item {id} already belongs to this {}", self.composition_kind()),
            ));
        }
        Ok(())
    }
}
