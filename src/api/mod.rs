//! HTTP client for the library REST service
//!
//! One `ApiClient` is constructed at startup from [`Config`] and shared
//! by the TUI screens and the CLI commands. Every operation issues
//! exactly one request; there are no retries and no cancellation.

pub mod error;

pub use error::ApiError;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::models::{Book, Loan, NewBook, NewLoan, NewReader, Reader};

/// Library service endpoints, relative to the configured base URL
pub struct LibraryApi;

impl LibraryApi {
    /// Book creation and listing
    pub const BOOKS: &'static str = "/books/";
    /// Book search by author/topic
    pub const BOOK_SEARCH: &'static str = "/books/search/";
    /// Reader creation and listing
    pub const READERS: &'static str = "/readers/";
    /// Loan creation
    pub const LOANS: &'static str = "/loans/";
    /// Loan listing with book/reader references resolved server-side
    pub const LOAN_DETAILS: &'static str = "/loans/details/";
}

/// Body of a successful create response. The transport status code is
/// the success signal; the message is used purely for display.
#[derive(Debug, Deserialize)]
struct CreatedBody {
    #[serde(default)]
    message: Option<String>,
}

/// FastAPI-style error body (`detail` on HTTPException, `message` on
/// some handlers)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client bound to one library service instance
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;

        let http = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a book. Returns the server's display message.
    pub async fn create_book(&self, book: &NewBook) -> Result<String, ApiError> {
        self.create(LibraryApi::BOOKS, book, "Book added").await
    }

    /// Register a reader. Returns the server's display message.
    pub async fn create_reader(&self, reader: &NewReader) -> Result<String, ApiError> {
        self.create(LibraryApi::READERS, reader, "Reader added").await
    }

    /// Issue a loan. Returns the server's display message.
    pub async fn create_loan(&self, loan: &NewLoan) -> Result<String, ApiError> {
        self.create(LibraryApi::LOANS, loan, "Book issued").await
    }

    /// Fetch one page of the book catalog
    pub async fn list_books(&self, skip: usize, limit: usize) -> Result<Vec<Book>, ApiError> {
        self.fetch_list(LibraryApi::BOOKS, &page_query(skip, limit)).await
    }

    /// Search books by author and/or topic
    pub async fn search_books(
        &self,
        author: Option<&str>,
        topic: Option<&str>,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Book>, ApiError> {
        let mut query = page_query(skip, limit);
        if let Some(author) = author {
            query.push(("author", author.to_string()));
        }
        if let Some(topic) = topic {
            query.push(("topic", topic.to_string()));
        }
        self.fetch_list(LibraryApi::BOOK_SEARCH, &query).await
    }

    /// Fetch one page of registered readers
    pub async fn list_readers(&self, skip: usize, limit: usize) -> Result<Vec<Reader>, ApiError> {
        self.fetch_list(LibraryApi::READERS, &page_query(skip, limit)).await
    }

    /// Fetch one page of loans
    pub async fn loan_details(&self, skip: usize, limit: usize) -> Result<Vec<Loan>, ApiError> {
        self.fetch_list(LibraryApi::LOAN_DETAILS, &page_query(skip, limit)).await
    }

    /// Shared POST path for the three create operations
    async fn create<T: Serialize>(
        &self,
        path: &str,
        payload: &T,
        fallback_message: &str,
    ) -> Result<String, ApiError> {
        debug!("POST {}", path);

        let response = self.http.post(self.url(path)).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let created: CreatedBody =
                serde_json::from_str(&body).map_err(|source| ApiError::Decode {
                    endpoint: path.to_string(),
                    source,
                })?;
            let message = created
                .message
                .unwrap_or_else(|| fallback_message.to_string());
            info!("POST {} succeeded: {}", path, message);
            Ok(message)
        } else {
            let message = rejection_message(&body);
            warn!("POST {} rejected with status {}: {}", path, status, message);
            Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Shared GET path for list endpoints
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        debug!("GET {} {:?}", path, query);

        let response = self.http.get(self.url(path)).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(|source| ApiError::Decode {
                endpoint: path.to_string(),
                source,
            })
        } else {
            Err(ApiError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            })
        }
    }
}

fn page_query(skip: usize, limit: usize) -> Vec<(&'static str, String)> {
    vec![("skip", skip.to_string()), ("limit", limit.to_string())]
}

/// Extract a human-readable message from an error response body
fn rejection_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .detail
            .or(parsed.message)
            .unwrap_or_else(|| "request failed".to_string()),
        Err(_) => "request failed".to_string(),
    }
}
