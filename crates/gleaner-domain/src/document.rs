//! Source documents and the chunks cut from them

/// The text a project was created from.
///
/// Immutable once constructed; notes refer to character offsets into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
    char_len: usize,
}

impl SourceDocument {
    /// Create a document from its text
    ///
    /// # Examples
    ///
    /// ```
    /// use gleaner_domain::SourceDocument;
    ///
    /// let doc = SourceDocument::new("naïve café");
    /// assert_eq!(doc.len(), 10);
    /// ```
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self { text, char_len }
    }

    /// The full text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.char_len
    }

    /// True if the document has no characters
    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// True if the document contains nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<String> for SourceDocument {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for SourceDocument {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A window of a [`SourceDocument`] sized for one oracle call.
///
/// `base_offset` is the character index of `text`'s first character within
/// the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Window text
    pub text: String,

    /// Character index of `text[0]` in the document
    pub base_offset: usize,
}

impl Chunk {
    /// Create a chunk
    pub fn new(text: impl Into<String>, base_offset: usize) -> Self {
        Self {
            text: text.into(),
            base_offset,
        }
    }

    /// Length of the window in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character index one past the window's last character
    pub fn end_offset(&self) -> usize {
        self.base_offset + self.char_len()
    }
}
