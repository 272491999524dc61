//! Stack: children superimposed at a shared origin.
//!
//! Every child starts at zero in the stack's frame, so the stack lasts as long
//! as its longest child. Children are not ordered by precedence here; later
//! children conventionally draw on top, which is a rendering concern.

use otio_opentime_core::{RationalTime, TimeRange};
use serde::{Deserialize, Serialize};

use crate::any::AnyDictionary;
use crate::composition::Composition;
use crate::config::Config;
use crate::effect::Effect;
use crate::error::{ErrorKind, OtioError};
use crate::ids::ItemId;
use crate::item::{Composable, ItemBase};
use crate::marker::Marker;
use crate::serialization::SerializableObject;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Stack.1")]
pub struct Stack {
    #[serde(flatten)]
    pub base: ItemBase,
    #[serde(default)]
    pub children: Vec<Composable>,
}

impl Stack {
    pub fn new(
        name: impl Into<String>,
        source_range: Option<TimeRange>,
        metadata: AnyDictionary,
        effects: Vec<Effect>,
        markers: Vec<Marker>,
    ) -> Self {
        let stack = Self {
            base: ItemBase {
                source_range,
                metadata,
                effects,
                markers,
                ..ItemBase::named(name)
            },
            children: Vec::new(),
        };
        log::debug!("stack '{}' created as {}", stack.base.name, stack.base.id);
        stack
    }

    pub fn id(&self) -> ItemId {
        self.base.id
    }

    /// Parse a document whose root is a stack, honouring `config.strict_schemas`.
    pub fn from_json_with(input: &str, config: &Config) -> Result<Self, OtioError> {
        match Composable::from_json_with(input, config)? {
            Composable::Stack(stack) => Ok(stack),
            other => Err(OtioError::new(
                ErrorKind::TypeMismatch,
                format!("expected a Stack document, found {}", other.schema_name()),
            )),
        }
    }

    pub fn deep_copy(&self) -> Self {
        let mut copy = self.clone();
        copy.refresh_ids();
        copy
    }

    pub(crate) fn refresh_ids(&mut self) {
        self.base.id = ItemId::fresh();
        self.children.iter_mut().for_each(Composable::refresh_ids);
    }
}

impl Composition for Stack {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn children(&self) -> &[Composable] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Composable> {
        &mut self.children
    }

    fn composition_kind(&self) -> &'static str {
        "Stack"
    }

    fn range_of_child_at_index(&self, index: usize) -> Result<TimeRange, OtioError> {
        let duration = self.child_at(index)?.duration()?;
        Ok(TimeRange::new(RationalTime::new(0.0, duration.rate), duration))
    }

    fn trimmed_range_of_child_at_index(&self, index: usize) -> Result<TimeRange, OtioError> {
        let range = self.range_of_child_at_index(index)?;
        Ok(match self.base.source_range {
            Some(sr) => TimeRange::new(sr.start_time, range.duration.min(sr.duration)),
            None => range,
        })
    }

    fn natural_duration(&self) -> Result<RationalTime, OtioError> {
        let mut longest: Option<RationalTime> = None;
        for child in &self.children {
            let d = child.duration()?;
            longest = Some(match longest {
                Some(current) => current.max(d),
                None => d,
            });
        }
        Ok(longest.unwrap_or_default())
    }
}

impl SerializableObject for Stack {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gap::Gap;

    fn rt(v: f64) -> RationalTime {
        RationalTime::new(v, 24.0)
    }

    fn stack_of(durations: &[f64]) -> Stack {
        let mut s = Stack::default();
        for d in durations {
            s.append_child(Gap::with_duration(rt(*d))).unwrap();
        }
        s
    }

    #[test]
    fn children_share_the_origin() {
        let s = stack_of(&[10.0, 30.0, 20.0]);
        for i in 0..3 {
            assert_eq!(s.range_of_child_at_index(i).unwrap().start_time, rt(0.0));
        }
        assert_eq!(s.available_range().unwrap(), TimeRange::new(rt(0.0), rt(30.0)));
    }

    #[test]
    fn source_range_bounds_trimmed_children() {
        let mut s = stack_of(&[10.0, 30.0]);
        s.base.source_range = Some(TimeRange::new(rt(5.0), rt(15.0)));
        assert_eq!(
            s.trimmed_range_of_child_at_index(0).unwrap(),
            TimeRange::new(rt(5.0), rt(10.0))
        );
        assert_eq!(
            s.trimmed_range_of_child_at_index(1).unwrap(),
            TimeRange::new(rt(5.0), rt(15.0))
        );
    }

    #[test]
    fn child_longer_than_the_bound_keeps_its_extent() {
        let mut s = stack_of(&[30.0]);
        let bound = TimeRange::new(rt(5.0), rt(15.0));
        s.base.source_range = Some(bound);

        assert_eq!(
            s.range_of_child_at_index(0).unwrap(),
            TimeRange::new(rt(0.0), rt(30.0))
        );
        let trimmed = s.trimmed_range_of_child_at_index(0).unwrap();
        assert_eq!(trimmed, bound);
        assert!(s.available_range().unwrap().contains_range(&trimmed));
    }

    #[test]
    fn empty_stack_has_no_available_range() {
        let err = Stack::default().available_range().unwrap_err();
        assert_eq!(err.kind, ErrorKind::CannotComputeAvailableRange);
    }

    #[test]
    fn duplicate_child_is_rejected() {
        let mut s = Stack::default();
        let gap = Gap::with_duration(rt(1.0));
        s.append_child(gap.clone()).unwrap();
        let err = s.append_child(gap).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ChildAlreadyParented);
        assert_eq!(s.len(), 1);
    }
}
