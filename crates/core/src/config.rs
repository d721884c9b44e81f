//! Texts and links the chat shows to the user.

/// Fixed texts shown by the chat.
///
/// Defaults are English; [`ChatStrings::turkish`] provides a Turkish set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatStrings {
    /// Text of the placeholder shown while a request is in flight.
    pub placeholder: String,
    /// Text of the bot entry appended when a request fails.
    pub apology: String,
    /// Overlay body for a citation without an excerpt.
    pub excerpt_not_found: String,
    /// Heading above the citation chips of a bot entry.
    pub sources_title: String,
}

impl Default for ChatStrings {
    fn default() -> Self {
        Self {
            placeholder: "Thinking...".to_owned(),
            apology: "⚠️ Something went wrong. Please check your connection \
                      and try again."
                .to_owned(),
            excerpt_not_found: "No specific text was found for this source."
                .to_owned(),
            sources_title: "📚 Sources:".to_owned(),
        }
    }
}

impl ChatStrings {
    /// Turkish texts.
    pub fn turkish() -> Self {
        Self {
            placeholder: "Düşünüyor...".to_owned(),
            apology: "⚠️ Bir hata oluştu. Lütfen bağlantınızı kontrol edip \
                      tekrar deneyin."
                .to_owned(),
            excerpt_not_found: "Bu kaynak için özel metin bulunamadı."
                .to_owned(),
            sources_title: "📚 Kaynaklar:".to_owned(),
        }
    }
}

/// Forms links to the full source documents.
///
/// The link is only ever shown, the chat never fetches it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentLinks {
    prefix: String,
}

impl Default for DocumentLinks {
    #[inline]
    fn default() -> Self {
        Self::with_prefix("/documents/")
    }
}

impl DocumentLinks {
    /// Creates links rooted at `prefix`, e.g. `https://host/documents`.
    #[inline]
    pub fn with_prefix<S: Into<String>>(prefix: S) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// Returns the link for the document with the given label.
    #[inline]
    pub fn link_for(&self, label: &str) -> String {
        format!("{}{label}", self.prefix)
    }
}
