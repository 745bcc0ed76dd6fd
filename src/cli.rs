//! Non-interactive CLI commands: print output and exit

use anyhow::Result;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{NewBook, NewLoan, NewReader};

#[derive(Subcommand)]
pub enum Commands {
    /// Add a book to the catalog
    AddBook {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        #[arg(long)]
        publisher: String,

        #[arg(long)]
        topic: String,
    },

    /// Register a reader
    AddReader {
        #[arg(long)]
        name: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        phone: String,
    },

    /// Issue a book to a reader
    IssueLoan {
        #[arg(long)]
        reader_id: i64,

        #[arg(long)]
        book_id: i64,

        /// Issue date (YYYY-MM-DD)
        #[arg(long)]
        issue_date: NaiveDate,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: NaiveDate,
    },

    /// List a page of the book catalog
    ListBooks {
        #[arg(long, default_value = "0")]
        skip: usize,

        /// Records per page (defaults to the configured page limit)
        #[arg(long)]
        limit: Option<usize>,

        /// Filter by author (uses the search endpoint)
        #[arg(long)]
        author: Option<String>,

        /// Filter by topic (uses the search endpoint)
        #[arg(long)]
        topic: Option<String>,
    },

    /// List registered readers
    ListReaders {
        #[arg(long, default_value = "0")]
        skip: usize,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// List loans
    ListLoans {
        #[arg(long, default_value = "0")]
        skip: usize,

        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Execute one CLI command against the configured backend
pub async fn run_command(command: Commands, config: &Config) -> Result<()> {
    let api = ApiClient::new(config)?;

    match command {
        Commands::AddBook {
            title,
            author,
            publisher,
            topic,
        } => {
            let message = api
                .create_book(&NewBook {
                    title,
                    author,
                    publisher,
                    topic,
                })
                .await?;
            println!("{}", message);
        }

        Commands::AddReader {
            name,
            address,
            phone,
        } => {
            let message = api
                .create_reader(&NewReader {
                    name,
                    address,
                    phone,
                })
                .await?;
            println!("{}", message);
        }

        Commands::IssueLoan {
            reader_id,
            book_id,
            issue_date,
            due_date,
        } => {
            if due_date < issue_date {
                return Err(anyhow::anyhow!("--due-date must not be before --issue-date"));
            }
            let message = api
                .create_loan(&NewLoan {
                    reader_id,
                    book_id,
                    issue_date,
                    due_date,
                })
                .await?;
            println!("{}", message);
        }

        Commands::ListBooks {
            skip,
            limit,
            author,
            topic,
        } => {
            let limit = limit.unwrap_or(config.page_limit);
            let books = if author.is_some() || topic.is_some() {
                api.search_books(author.as_deref(), topic.as_deref(), skip, limit)
                    .await?
            } else {
                api.list_books(skip, limit).await?
            };

            if books.is_empty() {
                println!("No books found");
                return Ok(());
            }

            println!(
                "{:<6} {:<32} {:<24} {:<20} {:<16}",
                "ID", "Title", "Author", "Publisher", "Topic"
            );
            println!("{}", "-".repeat(100));
            for book in &books {
                println!(
                    "{:<6} {:<32} {:<24} {:<20} {:<16}",
                    book.id,
                    truncate_string(&book.title, 30),
                    truncate_string(&book.author, 22),
                    truncate_string(&book.publisher, 18),
                    truncate_string(&book.topic, 14)
                );
            }
            println!();
            println!("Total: {} books (offset {})", books.len(), skip);
        }

        Commands::ListReaders { skip, limit } => {
            let limit = limit.unwrap_or(config.page_limit);
            let readers = api.list_readers(skip, limit).await?;

            if readers.is_empty() {
                println!("No readers found");
                return Ok(());
            }

            println!(
                "{:<6} {:<28} {:<32} {:<16}",
                "ID", "Name", "Address", "Phone"
            );
            println!("{}", "-".repeat(84));
            for reader in &readers {
                println!(
                    "{:<6} {:<28} {:<32} {:<16}",
                    reader.id,
                    truncate_string(&reader.name, 26),
                    truncate_string(&reader.address, 30),
                    truncate_string(&reader.phone, 14)
                );
            }
            println!();
            println!("Total: {} readers (offset {})", readers.len(), skip);
        }

        Commands::ListLoans { skip, limit } => {
            let limit = limit.unwrap_or(config.page_limit);
            let loans = api.loan_details(skip, limit).await?;

            if loans.is_empty() {
                println!("No loans found");
                return Ok(());
            }

            println!("{:<6} {:<12} {:<12}", "ID", "Reader ID", "Book ID");
            println!("{}", "-".repeat(32));
            for loan in &loans {
                println!("{:<6} {:<12} {:<12}", loan.id, loan.reader_id, loan.book_id);
            }
            println!();
            println!("Total: {} loans (offset {})", loans.len(), skip);
        }
    }

    Ok(())
}

/// Truncate string to specified length with ellipsis. Counts
/// characters, not bytes, so non-ASCII values truncate cleanly.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_string("Dune", 30), "Dune");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_string("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_string(&"ä".repeat(20), 8), "äääää...");
        assert_eq!(truncate_string("ääää", 8), "ääää");
    }
}
