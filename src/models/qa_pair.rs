// file: src/models/qa_pair.rs
// description: question/answer record parsed from the model's structured reply
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

impl QaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deserialize_list() {
        let raw = r#"[{"question": "Q1", "answer": "A1"}, {"question": "Q2", "answer": "A2"}]"#;
        let pairs: Vec<QaPair> = serde_json::from_str(raw).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], QaPair::new("Q1", "A1"));
    }

    #[test]
    fn test_rejects_missing_fields() {
        let raw = r#"[{"question": "Q1"}]"#;
        let parsed: Result<Vec<QaPair>, _> = serde_json::from_str(raw);
        assert!(parsed.is_err());
    }
}
