//! Active-section tracking for the landing page navigation.

/// Landing page sections, top to bottom
pub const NAV_SECTIONS: [&str; 7] = [
    "home",
    "about",
    "experience",
    "education",
    "skills",
    "projects",
    "contact",
];

/// Height of the fixed header, added to the scroll position
pub const HEADER_OFFSET: f64 = 100.0;

const SCROLLED_THRESHOLD: f64 = 50.0;

/// Vertical extent of a rendered section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Half-open: a point on the bottom edge belongs to the next section.
    #[must_use]
    pub fn contains(&self, point: f64) -> bool {
        point >= self.top && point < self.top + self.height
    }
}

#[derive(Debug, Clone)]
pub struct SectionTracker {
    ids: Vec<String>,
    offset: f64,
    active: String,
}

impl Default for SectionTracker {
    fn default() -> Self {
        Self::new(NAV_SECTIONS)
    }
}

impl SectionTracker {
    /// Track `ids` in page order; the first one starts active.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let active = ids.first().cloned().unwrap_or_default();
        Self {
            ids,
            offset: HEADER_OFFSET,
            active,
        }
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn active(&self) -> &str {
        &self.active
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Recompute the active section for `scroll_y`.
    ///
    /// `span_of` reports where each section currently sits; sections it
    /// cannot place are skipped. When no section contains the point the
    /// previous one stays active.
    pub fn on_scroll(&mut self, scroll_y: f64, span_of: impl Fn(&str) -> Option<SectionSpan>) -> &str {
        let point = scroll_y + self.offset;
        let hit = self
            .ids
            .iter()
            .find(|id| span_of(id).is_some_and(|span| span.contains(point)));

        if let Some(id) = hit {
            if *id != self.active {
                tracing::trace!("Active section: {}", id);
                self.active.clone_from(id);
            }
        }
        &self.active
    }
}

/// Whether the header should switch to its scrolled style.
#[must_use]
pub fn header_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(id: &str) -> Option<SectionSpan> {
        match id {
            "home" => Some(SectionSpan::new(0.0, 500.0)),
            "about" => Some(SectionSpan::new(500.0, 700.0)),
            _ => None,
        }
    }

    #[test]
    fn starts_on_first_section() {
        assert_eq!(SectionTracker::default().active(), "home");
        assert_eq!(SectionTracker::new(Vec::<String>::new()).active(), "");
    }

    #[test]
    fn point_inside_span_activates_section() {
        let mut tracker = SectionTracker::new(["home", "about"]);
        assert_eq!(tracker.on_scroll(500.0, spans), "about");
        assert_eq!(tracker.on_scroll(0.0, spans), "home");
    }

    #[test]
    fn point_outside_every_span_keeps_previous() {
        let mut tracker = SectionTracker::new(["home", "about"]);
        tracker.on_scroll(500.0, spans);
        assert_eq!(tracker.on_scroll(1_200.0, spans), "about");
    }

    #[test]
    fn span_end_is_exclusive() {
        let span = SectionSpan::new(0.0, 500.0);
        assert!(span.contains(0.0));
        assert!(!span.contains(500.0));
    }

    #[test]
    fn offset_is_configurable() {
        let mut tracker = SectionTracker::new(["home", "about"]).with_offset(0.0);
        assert_eq!(tracker.on_scroll(450.0, spans), "home");
    }

    #[test]
    fn header_turns_scrolled_past_fifty() {
        assert!(!header_is_scrolled(50.0));
        assert!(header_is_scrolled(50.5));
    }
}
