//! Heads-up display state.

/// Cached "HP: n" label that only reports a change when the value moves.
///
/// # Examples
///
/// ```
/// use skirmish::hud::HpLabel;
///
/// let mut label = HpLabel::default();
/// assert_eq!(label.refresh(10), Some("HP: 10"));
/// assert_eq!(label.refresh(10), None);
/// assert_eq!(label.refresh(9), Some("HP: 9"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HpLabel {
    cached: Option<u32>,
    text: String,
}

impl HpLabel {
    /// Updates the label for `hp`. Returns the new text only if it changed.
    pub fn refresh(&mut self, hp: u32) -> Option<&str> {
        if self.cached == Some(hp) {
            return None;
        }
        self.cached = Some(hp);
        self.text = format!("HP: {hp}");
        Some(&self.text)
    }

    /// The current text, empty before the first refresh.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
