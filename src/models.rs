use serde::{Deserialize, Serialize};

/// A stored trivia question
///
/// The owning category is stored in the `category_id` column but travels
/// over the wire as `category`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i64,
}

/// A stored category row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub category_type: String,
}

/// Category as returned by the API, with the ids of the questions it owns
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub category_type: String,
    pub questions: Vec<i64>,
}

impl CategoryResponse {
    pub fn new(category: Category, questions: Vec<i64>) -> Self {
        Self {
            id: category.id,
            category_type: category.category_type,
            questions,
        }
    }
}

/// Validated input for creating or fully replacing a question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: i32,
    pub category: i64,
}

/// Validated partial edit; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<i32>,
    pub category: Option<i64>,
}

impl QuestionPatch {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.difficulty.is_none()
            && self.category.is_none()
    }
}

/// Validated input for the quiz endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    pub previous_questions: Vec<i64>,
    pub quiz_category: Option<i64>,
}

/// A page of questions together with the total number of matches
#[derive(Debug, Clone, Default)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: i64,
}

/// Page selection for list endpoints; `None` means everything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// SQL OFFSET for this page, clamped to `i64::MAX` for huge page numbers
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// SQL LIMIT for this page
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_question_serialization() {
        let question = Question {
            id: 1,
            question: "What is the heaviest organ in the human body?".to_string(),
            answer: "The Liver".to_string(),
            difficulty: 4,
            category: 1,
        };

        assert_eq!(
            serde_json::to_value(&question).unwrap(),
            json!({
                "id": 1,
                "question": "What is the heaviest organ in the human body?",
                "answer": "The Liver",
                "difficulty": 4,
                "category": 1
            })
        );
    }

    #[test]
    fn test_category_response_uses_type_key() {
        let category = Category {
            id: 3,
            category_type: "Geography".to_string(),
        };
        let value = serde_json::to_value(CategoryResponse::new(category, vec![3, 7])).unwrap();

        assert_eq!(value["type"], "Geography");
        assert_eq!(value["questions"], json!([3, 7]));
    }

    #[test]
    fn test_page_offsets() {
        let page = PageRequest::new(3, 10);
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 10);
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
    }

    #[test]
    fn test_page_offset_saturates() {
        assert_eq!(PageRequest::new(i64::MAX, 10).offset(), i64::MAX);
        assert_eq!(PageRequest::new(i64::MAX, 1).offset(), i64::MAX - 1);
    }

    #[test]
    fn test_empty_patch() {
        assert!(QuestionPatch::default().is_empty());
        let patch = QuestionPatch {
            answer: Some("Agra".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
