use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A book record as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub topic: String,
    /// Optional column added by a later backend migration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_published: Option<i32>,
}

/// A reader record as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reader {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    /// Optional column added by a later backend migration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A loan record as returned by the loan details endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    #[serde(default)]
    pub id: i64,
    pub reader_id: i64,
    pub book_id: i64,
}

/// Payload for creating a book. Field names and values go over the
/// wire verbatim; the server assigns the identifier.
#[derive(Debug, Clone, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub topic: String,
}

/// Payload for registering a reader
#[derive(Debug, Clone, Serialize)]
pub struct NewReader {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Payload for issuing a loan. Identifiers are integers and dates
/// serialize as ISO calendar strings (YYYY-MM-DD).
#[derive(Debug, Clone, Serialize)]
pub struct NewLoan {
    pub reader_id: i64,
    pub book_id: i64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_serializes_fields_verbatim() {
        let book = NewBook {
            title: "The Trial".to_string(),
            author: "Franz Kafka".to_string(),
            publisher: "Verlag Die Schmiede".to_string(),
            topic: "Fiction".to_string(),
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["title"], "The Trial");
        assert_eq!(value["author"], "Franz Kafka");
        assert_eq!(value["publisher"], "Verlag Die Schmiede");
        assert_eq!(value["topic"], "Fiction");
        assert_eq!(value.as_object().unwrap().len(), 4);
    }

    #[test]
    fn new_loan_serializes_ids_as_integers_and_dates_as_iso() {
        let loan = NewLoan {
            reader_id: 7,
            book_id: 42,
            issue_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        };

        let value = serde_json::to_value(&loan).unwrap();
        assert_eq!(value["reader_id"], 7);
        assert_eq!(value["book_id"], 42);
        assert_eq!(value["issue_date"], "2025-03-01");
        assert_eq!(value["due_date"], "2025-03-15");
    }

    #[test]
    fn book_deserializes_without_optional_columns() {
        let json = r#"{"id": 3, "title": "Dune", "author": "Frank Herbert",
                       "publisher": "Chilton", "topic": "SF"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 3);
        assert_eq!(book.year_published, None);
    }

    #[test]
    fn book_tolerates_missing_id() {
        // Some list endpoints serialize ORM rows with extra or missing
        // columns; the id default keeps older payloads readable.
        let json = r#"{"title": "Dune", "author": "Frank Herbert",
                       "publisher": "Chilton", "topic": "SF", "year_published": 1965}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 0);
        assert_eq!(book.year_published, Some(1965));
    }
}
