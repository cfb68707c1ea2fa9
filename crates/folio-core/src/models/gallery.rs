//! Cursor over a project's images for the detail view

/// Wrap-around position within an image sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Current index, or `None` when there are no images
    #[must_use]
    pub const fn current(&self) -> Option<usize> {
        if self.len == 0 {
            None
        } else {
            Some(self.index)
        }
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to an index; out-of-range values are ignored
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}
