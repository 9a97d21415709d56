use serde::{Deserialize, Serialize};

/// One searchable snippet of lesson text, owned by a page.
///
/// Titles are unique within a corpus and double as display keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonEntry {
    pub title: String,
    pub content: String,
    pub page: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl LessonEntry {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        page: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            page: page.into(),
            keywords: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}
