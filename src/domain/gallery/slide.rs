// SPDX-License-Identifier: MPL-2.0
//! Displayed content of one gallery slide.

/// Image and caption shown by the overlay for one slide.
///
/// Values are normalized on construction: the alt text loses the
/// accessibility marker the server renderer prepends to activation links,
/// and the caption is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Slide {
    image_source: String,
    image_alt_text: String,
    caption_text: String,
}

impl Slide {
    /// Builds a slide from raw markup values.
    ///
    /// `alt_prefix` is removed once from the alt text, wherever it first
    /// occurs. Missing values become empty strings.
    #[must_use]
    pub fn new(
        image_source: Option<&str>,
        image_alt_text: Option<&str>,
        caption_text: Option<&str>,
        alt_prefix: &str,
    ) -> Self {
        Self {
            image_source: image_source.unwrap_or_default().to_string(),
            image_alt_text: strip_alt_prefix(image_alt_text.unwrap_or_default(), alt_prefix),
            caption_text: caption_text.unwrap_or_default().trim().to_string(),
        }
    }

    #[must_use]
    pub fn image_source(&self) -> &str {
        &self.image_source
    }

    #[must_use]
    pub fn image_alt_text(&self) -> &str {
        &self.image_alt_text
    }

    #[must_use]
    pub fn caption_text(&self) -> &str {
        &self.caption_text
    }

    /// Returns true if the slide has a non-empty caption.
    #[must_use]
    pub fn has_caption(&self) -> bool {
        !self.caption_text.is_empty()
    }
}

fn strip_alt_prefix(alt: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return alt.to_string();
    }
    alt.replacen(prefix, "", 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "View image: ";

    #[test]
    fn alt_prefix_is_stripped() {
        let slide = Slide::new(Some("a.jpg"), Some("View image: Sunset"), None, PREFIX);
        assert_eq!(slide.image_alt_text(), "Sunset");
    }

    #[test]
    fn alt_without_prefix_is_unchanged() {
        let slide = Slide::new(Some("a.jpg"), Some("Sunset over the bay"), None, PREFIX);
        assert_eq!(slide.image_alt_text(), "Sunset over the bay");
    }

    #[test]
    fn only_first_prefix_occurrence_is_removed() {
        let slide = Slide::new(None, Some("View image: View image: x"), None, PREFIX);
        assert_eq!(slide.image_alt_text(), "View image: x");
    }

    #[test]
    fn whitespace_caption_becomes_empty() {
        let slide = Slide::new(Some("a.jpg"), Some(""), Some("  \n\t "), PREFIX);
        assert_eq!(slide.caption_text(), "");
        assert!(!slide.has_caption());
    }

    #[test]
    fn caption_is_trimmed() {
        let slide = Slide::new(Some("a.jpg"), None, Some("  Harbour at dawn \n"), PREFIX);
        assert_eq!(slide.caption_text(), "Harbour at dawn");
    }

    #[test]
    fn missing_values_default_to_empty() {
        let slide = Slide::new(None, None, None, PREFIX);
        assert_eq!(slide, Slide::default());
    }
}
