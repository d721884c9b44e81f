use citechat_service::{ChatAnswer, ChatRequest, Excerpt};
use serde::{Deserialize, Serialize};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatResponseBody {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub intent: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Chunk {
    pub source: String,
    pub text: String,
    #[serde(default)]
    pub score: Option<f64>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatRequestBody {
    message: String,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &ChatRequest) -> ChatRequestBody {
    ChatRequestBody {
        message: req.message.clone(),
    }
}

pub fn decode_answer(body: &[u8]) -> serde_json::Result<ChatAnswer> {
    let body: ChatResponseBody = serde_json::from_slice(body)?;
    Ok(ChatAnswer {
        answer: body.answer,
        sources: body.sources,
        chunks: body
            .chunks
            .into_iter()
            .map(|c| Excerpt {
                source: c.source,
                text: c.text,
                score: c.score,
            })
            .collect(),
        intent: body.intent,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let body = create_request(&ChatRequest::new("What is the deadline?"));
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "message": "What is the deadline?" })
        );
    }

    #[test]
    fn test_decode_answer() {
        let body = br#"{
            "answer": "The deadline is June 1.",
            "sources": ["doc1", "doc2"],
            "chunks": [
                { "source": "doc1", "text": "Deadline: June 1.", "score": 0.9 },
                { "source": "doc2", "text": "Late fees apply." }
            ],
            "intent": "ACADEMIC_READY"
        }"#;
        let answer = decode_answer(body).unwrap();
        assert_eq!(answer.answer, "The deadline is June 1.");
        assert_eq!(answer.sources, ["doc1", "doc2"]);
        assert_eq!(answer.chunks.len(), 2);
        assert_eq!(answer.chunks[0].score, Some(0.9));
        assert_eq!(answer.chunks[1].score, None);
        assert_eq!(answer.intent.as_deref(), Some("ACADEMIC_READY"));
    }

    #[test]
    fn test_decode_bare_answer() {
        let answer = decode_answer(br#"{ "answer": "Write a message." }"#)
            .unwrap();
        assert_eq!(answer, ChatAnswer::text_only("Write a message."));
    }

    #[test]
    fn test_decode_rejects_missing_answer() {
        assert!(decode_answer(br#"{ "sources": [] }"#).is_err());
        assert!(decode_answer(b"<html></html>").is_err());
    }
}
