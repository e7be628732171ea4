use std::sync::Arc;

use crate::{LabelSet, WeightSet};

/// The context of an automaton: the label set its transitions are labeled with and the weight
/// set its weights are drawn from. Contexts are immutable and cheap to clone, copies of an
/// automaton share their context.
#[derive(Debug, PartialEq)]
pub struct Context<L, W> {
    inner: Arc<(L, W)>,
}

impl<L, W> Clone for Context<L, W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: LabelSet, W: WeightSet> Context<L, W> {
    /// Creates a new context from the given label set and weight set.
    pub fn new(labelset: L, weightset: W) -> Self {
        Self {
            inner: Arc::new((labelset, weightset)),
        }
    }

    /// The label set.
    pub fn labelset(&self) -> &L {
        &self.inner.0
    }

    /// The weight set.
    pub fn weightset(&self) -> &W {
        &self.inner.1
    }

    /// A description such as `lan_char(ab), z`.
    pub fn name(&self) -> String {
        format!("{}, {}", self.labelset().name(), self.weightset().name())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn context_name() {
        let ctx = Context::new(NullableSet::of_size(2), ZMin);
        assert_eq!(ctx.name(), "lan_char(ab), zmin");
        assert_eq!(ctx.clone(), ctx);
    }
}
