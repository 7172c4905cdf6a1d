use std::num::NonZeroUsize;

/// Circular index over a non-empty scene list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SceneNavigator {
    index: usize,
    count: NonZeroUsize,
}

impl SceneNavigator {
    pub(crate) fn new(count: NonZeroUsize) -> Self {
        Self { index: 0, count }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn count(&self) -> usize {
        self.count.get()
    }

    pub(crate) fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.count.get();
        self.index
    }

    pub(crate) fn prev(&mut self) -> usize {
        let count = self.count.get();
        self.index = (self.index + count - 1) % count;
        self.index
    }
}
