//! Equality grouping in first-encountered order.

use std::collections::HashMap;

use crate::value::Value;

/// A distinct value and the positions holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueGroup<'a> {
    /// First occurrence of the value.
    pub value: &'a Value,
    pub positions: Vec<usize>,
}

impl ValueGroup<'_> {
    pub fn count(&self) -> usize {
        self.positions.len()
    }
}

/// Groups `values` by equality, in order of first appearance.
///
/// Missing values are either dropped or grouped per [`NullKind`](crate::NullKind),
/// so `None` and `NaN` end up in separate groups.
pub fn group_values(values: &[Value], skip_nulls: bool) -> Vec<ValueGroup<'_>> {
    let mut slots = HashMap::new();
    let mut groups: Vec<ValueGroup<'_>> = Vec::new();
    for (position, value) in values.iter().enumerate() {
        if skip_nulls && value.is_null() {
            continue;
        }
        let slot = *slots.entry(value.key()).or_insert_with(|| {
            groups.push(ValueGroup {
                value,
                positions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].positions.push(position);
    }
    groups
}
