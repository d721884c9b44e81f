use serde::{Deserialize, Serialize};

/// A complete answer from the answering service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    /// The answer text, in markdown.
    pub answer: String,
    /// Labels of the cited source documents, in display order.
    #[serde(default)]
    pub sources: Vec<String>,
    /// The text passages the answer was grounded on.
    #[serde(default)]
    pub chunks: Vec<Excerpt>,
    /// An optional classification of the question, if the service
    /// provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}

impl ChatAnswer {
    /// Creates an answer without any citations.
    #[inline]
    pub fn text_only<S: Into<String>>(answer: S) -> Self {
        Self {
            answer: answer.into(),
            ..Default::default()
        }
    }

    /// Adds a cited source label.
    #[inline]
    pub fn with_source<S: Into<String>>(mut self, label: S) -> Self {
        self.sources.push(label.into());
        self
    }

    /// Adds an excerpt.
    #[inline]
    pub fn with_chunk(mut self, chunk: Excerpt) -> Self {
        self.chunks.push(chunk);
        self
    }
}

/// The underlying passage behind one citation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    /// Label of the source this passage was taken from.
    pub source: String,
    /// The passage itself.
    pub text: String,
    /// Retrieval score of the passage, if the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Excerpt {
    /// Creates an excerpt without a score.
    #[inline]
    pub fn new<S1: Into<String>, S2: Into<String>>(source: S1, text: S2) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_citations_default_to_empty() {
        let answer: ChatAnswer =
            serde_json::from_value(json!({ "answer": "Hello" })).unwrap();
        assert_eq!(answer, ChatAnswer::text_only("Hello"));
    }

    #[test]
    fn test_full_answer() {
        let answer: ChatAnswer = serde_json::from_value(json!({
            "answer": "The deadline is June 1.",
            "sources": ["doc1"],
            "chunks": [
                { "source": "doc1", "text": "Deadline: June 1.", "score": 0.82 }
            ],
            "intent": "ACADEMIC_READY"
        }))
        .unwrap();
        assert_eq!(answer.sources, vec!["doc1".to_owned()]);
        assert_eq!(answer.chunks[0].text, "Deadline: June 1.");
        assert_eq!(answer.chunks[0].score, Some(0.82));
        assert_eq!(answer.intent.as_deref(), Some("ACADEMIC_READY"));
    }
}
