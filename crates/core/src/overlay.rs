//! The citation detail overlay.

/// What the overlay currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlayState {
    /// Whether the overlay is shown.
    pub visible: bool,
    /// The title, which is the citation label.
    pub title: String,
    /// The excerpt text, or the not-found text.
    pub body: String,
    /// Link to the full source document.
    pub external_link: String,
}

/// Where a click on the open overlay landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayRegion {
    /// Inside the content box.
    Content,
    /// On the backdrop around the content box.
    Outside,
}

/// Controls the single overlay. Opening replaces whatever is shown.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    state: OverlayState,
}

impl Overlay {
    /// Shows the overlay with the given content.
    pub fn open<T, B, L>(&mut self, title: T, body: B, external_link: L)
    where
        T: Into<String>,
        B: Into<String>,
        L: Into<String>,
    {
        self.state = OverlayState {
            visible: true,
            title: title.into(),
            body: body.into(),
            external_link: external_link.into(),
        };
    }

    /// Hides the overlay. The last content is kept but not shown.
    #[inline]
    pub fn close(&mut self) {
        self.state.visible = false;
    }

    /// Handles a click while the overlay is open. Clicking outside the
    /// content box closes it.
    #[inline]
    pub fn click(&mut self, region: OverlayRegion) {
        if region == OverlayRegion::Outside {
            self.close();
        }
    }

    /// Returns the current state.
    #[inline]
    pub fn state(&self) -> &OverlayState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_replaces() {
        let mut overlay = Overlay::default();
        overlay.open("doc1", "first", "/documents/doc1");
        overlay.open("doc2", "second", "/documents/doc2");

        let state = overlay.state();
        assert!(state.visible);
        assert_eq!(state.title, "doc2");
        assert_eq!(state.body, "second");
        assert_eq!(state.external_link, "/documents/doc2");
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut overlay = Overlay::default();
        overlay.close();
        assert!(!overlay.state().visible);

        overlay.open("doc1", "text", "/documents/doc1");
        overlay.close();
        overlay.close();
        assert!(!overlay.state().visible);
    }

    #[test]
    fn test_click_outside_closes() {
        let mut overlay = Overlay::default();
        overlay.open("doc1", "text", "/documents/doc1");
        overlay.click(OverlayRegion::Content);
        assert!(overlay.state().visible);
        overlay.click(OverlayRegion::Outside);
        assert!(!overlay.state().visible);
    }
}
