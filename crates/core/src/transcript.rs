//! The ordered list of entries shown in the conversation.

use std::fmt::{self, Display};
use std::slice;

/// Identifies one entry in a [`TranscriptStore`].
///
/// Handles are never reused within a store, so a handle to a removed
/// entry stays dead forever.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle(u64);

impl Display for EntryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// Who an entry is from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// A message typed by the user. Rendered as literal text.
    User,
    /// A reply from the answering service, or an apology if the request
    /// failed. Rendered as markdown.
    Bot,
    /// The transient "thinking" entry shown while a request is in flight.
    Placeholder,
}

/// A label referencing a cited source document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CitationRef {
    /// The source label.
    pub label: String,
}

impl From<String> for CitationRef {
    #[inline]
    fn from(label: String) -> Self {
        Self { label }
    }
}

impl From<&str> for CitationRef {
    #[inline]
    fn from(label: &str) -> Self {
        Self {
            label: label.to_owned(),
        }
    }
}

/// An entry that is about to be appended to a [`TranscriptStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryDraft {
    role: Role,
    text: String,
    citations: Vec<CitationRef>,
}

impl EntryDraft {
    /// A user message.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            citations: vec![],
        }
    }

    /// A bot message with the given citations.
    #[inline]
    pub fn bot<S, I>(text: S, citations: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator,
        I::Item: Into<CitationRef>,
    {
        Self {
            role: Role::Bot,
            text: text.into(),
            citations: citations.into_iter().map(Into::into).collect(),
        }
    }

    /// A placeholder showing the given text.
    #[inline]
    pub fn placeholder<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::Placeholder,
            text: text.into(),
            citations: vec![],
        }
    }
}

/// One entry of the transcript.
///
/// Entries are never mutated once appended. Replacing an entry means
/// removing it and appending a new one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    handle: EntryHandle,
    role: Role,
    text: String,
    citations: Vec<CitationRef>,
}

impl MessageEntry {
    /// Returns the handle assigned when this entry was appended.
    #[inline]
    pub fn handle(&self) -> EntryHandle {
        self.handle
    }

    /// Returns who this entry is from.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the raw text of this entry.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the citations attached to this entry, in display order.
    #[inline]
    pub fn citations(&self) -> &[CitationRef] {
        &self.citations
    }
}

/// Ordered, append-only store of transcript entries.
///
/// The only way to take an entry out is [`TranscriptStore::remove`],
/// which the exchange controller uses to drop the placeholder.
#[derive(Clone, Debug, Default)]
pub struct TranscriptStore {
    entries: Vec<MessageEntry>,
    next_handle: u64,
}

impl TranscriptStore {
    /// Appends an entry and returns its handle.
    pub fn append(&mut self, draft: EntryDraft) -> EntryHandle {
        let handle = EntryHandle(self.next_handle);
        self.next_handle += 1;

        let EntryDraft {
            role,
            text,
            citations,
        } = draft;
        self.entries.push(MessageEntry {
            handle,
            role,
            text,
            citations,
        });
        handle
    }

    /// Removes the entry with the given handle, keeping the order of the
    /// others. Unknown handles are ignored.
    pub fn remove(&mut self, handle: EntryHandle) -> Option<MessageEntry> {
        let idx = self.entries.iter().position(|e| e.handle == handle)?;
        Some(self.entries.remove(idx))
    }

    /// Returns the entry with the given handle.
    #[inline]
    pub fn get(&self, handle: EntryHandle) -> Option<&MessageEntry> {
        self.entries.iter().find(|e| e.handle == handle)
    }

    /// Returns the current entries in insertion order.
    ///
    /// The iterator is cheap to clone, so a renderer can walk the entries
    /// as many times as it needs.
    #[inline]
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    /// Returns the current entries as a slice, in insertion order.
    #[inline]
    pub fn as_slice(&self) -> &[MessageEntry] {
        &self.entries
    }

    /// Returns the number of entries with the given role.
    #[inline]
    pub fn count(&self, role: Role) -> usize {
        self.entries.iter().filter(|e| e.role == role).count()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator over the entries of a [`TranscriptStore`].
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    inner: slice::Iter<'a, MessageEntry>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a MessageEntry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl<'a> IntoIterator for &'a TranscriptStore {
    type Item = &'a MessageEntry;
    type IntoIter = Entries<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}
