use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::IdentifiedBook;

/// Matches a fenced block with an optional language tag on the opening fence
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:[A-Za-z0-9_+-]*[ \t]*\r?\n)?(.*?)```").expect("valid fence pattern")
});

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Model output is not a JSON array")]
    NotAnArray,
    #[error("Book {index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("Book {index} is missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("Book {index} has invalid `{field}`: expected {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
    #[error("Book {index} has confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange { index: usize, value: f64 },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse the model's reply into books, keeping the model's order.
///
/// A surrounding code fence is stripped first. Anything else that does not
/// match the expected shape is an error rather than an empty list.
pub fn parse_vlm_response(text: &str) -> ParseResult<Vec<IdentifiedBook>> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body)?;

    let Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_book(index, item))
        .collect()
}

/// Contents of the first fenced block, or the trimmed text if there is none
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();

    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(text, |m| m.as_str().trim())
}

fn parse_book(index: usize, item: &Value) -> ParseResult<IdentifiedBook> {
    let obj = item.as_object().ok_or(ParseError::NotAnObject { index })?;

    let title = match obj.get("title") {
        None | Some(Value::Null) => {
            return Err(ParseError::MissingField {
                index,
                field: "title",
            })
        }
        Some(Value::String(title)) => title.clone(),
        Some(_) => {
            return Err(ParseError::InvalidField {
                index,
                field: "title",
                expected: "a string",
            })
        }
    };

    let confidence = match obj.get("confidence") {
        None | Some(Value::Null) => {
            return Err(ParseError::MissingField {
                index,
                field: "confidence",
            })
        }
        Some(Value::Number(n)) => n.as_f64().ok_or(ParseError::InvalidField {
            index,
            field: "confidence",
            expected: "a number",
        })?,
        Some(_) => {
            return Err(ParseError::InvalidField {
                index,
                field: "confidence",
                expected: "a number",
            })
        }
    };

    if !(0.0..=1.0).contains(&confidence) {
        return Err(ParseError::ConfidenceOutOfRange {
            index,
            value: confidence,
        });
    }

    Ok(IdentifiedBook {
        title,
        author: optional_string(obj, index, "author")?,
        series: optional_string(obj, index, "series")?,
        isbn: optional_string(obj, index, "isbn")?,
        confidence,
        notes: optional_string(obj, index, "notes")?,
    })
}

fn optional_string(
    obj: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> ParseResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ParseError::InvalidField {
            index,
            field,
            expected: "a string or null",
        }),
    }
}
