//! Deterministic keyword responder used when no generative backend is configured.

use crate::lookup::RecordLookup;
use crate::models::Book;
use shelf_core::AppResult;
use shelf_llm::ChatMessage;

/// Reply when the message carries no usable keywords.
pub const HELP_MESSAGE: &str = "I can help you find books! Try asking me about genres like 'science fiction', 'mystery', or author names.";

/// Most books listed in one reply.
pub const MAX_SUGGESTIONS: usize = 5;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

const STOP_WORDS: &[&str] = &[
    "the",
    "a",
    "an",
    "and",
    "or",
    "but",
    "in",
    "on",
    "at",
    "to",
    "for",
    "book",
    "books",
    "show",
    "find",
    "search",
    "looking",
    "want",
    "need",
    "me",
    "i",
    "about",
    "any",
    "some",
    "recommend",
    "recommendation",
];

/// Text of a reply plus the ids it cites, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub cited_ids: Vec<i64>,
}

/// Lowercased, de-duplicated keywords longer than two characters, minus stop words.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();

    for word in lowered.split_whitespace() {
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }

    keywords
}

/// Answer the last message of `history` from the catalog.
///
/// The last message is used whatever its role.
pub fn respond(history: &[ChatMessage], lookup: &dyn RecordLookup) -> AppResult<ChatReply> {
    let last = history.last().map(|m| m.content.as_str()).unwrap_or("");
    let keywords = extract_keywords(last);

    if keywords.is_empty() {
        return Ok(ChatReply {
            text: HELP_MESSAGE.to_string(),
            cited_ids: Vec::new(),
        });
    }

    let books = lookup.books_matching_any(&keywords, MAX_SUGGESTIONS)?;
    tracing::debug!(
        "Keyword responder: {:?} matched {} books",
        keywords,
        books.len()
    );

    if books.is_empty() {
        return Ok(ChatReply {
            text: format!(
                "I couldn't find any books matching '{}'. Try different keywords or browse the full catalog!",
                keywords.join(", ")
            ),
            cited_ids: Vec::new(),
        });
    }

    Ok(ChatReply {
        text: render_listing(&books),
        cited_ids: books.iter().map(|b| b.id).collect(),
    })
}

fn render_listing(books: &[Book]) -> String {
    let mut out = format!(
        "I found {} book(s) that might interest you:\n\n",
        books.len()
    );

    for book in books {
        let mut line = format!("📚 **{}** by {}", book.title, book.author);
        if let Some(genre) = book.genre.as_deref().filter(|g| !g.is_empty()) {
            line.push_str(&format!(" ({})", genre));
        }
        if let Some(year) = book.year {
            line.push_str(&format!(" - {}", year));
        }
        line.push_str(&format!("\n   {}\n\n", preview(book.description.as_deref())));
        out.push_str(&line);
    }

    out
}

fn preview(description: Option<&str>) -> String {
    match description {
        None => "No description available".to_string(),
        Some(text) if text.chars().count() > DESCRIPTION_PREVIEW_CHARS => {
            let cut: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{}...", cut)
        }
        Some(text) => text.to_string(),
    }
}
