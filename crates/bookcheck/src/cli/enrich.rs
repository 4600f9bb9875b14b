use anyhow::Result;
use bookcheck_core::{enrich_with_isbn, Settings};
use serde_json::json;

use super::output;

pub async fn run(
    settings: &Settings,
    title: &str,
    author: Option<&str>,
    isbn: Option<&str>,
    json: bool,
) -> Result<()> {
    let found = enrich_with_isbn(&settings.open_library, title, author, isbn).await;

    if json {
        return output::print_json(&json!({
            "title": title,
            "author": author,
            "isbn": found,
        }));
    }

    println!("Title:  {title:?}");
    if let Some(author) = author {
        println!("Author: {author:?}");
    }
    println!("ISBN:   {}", found.as_deref().unwrap_or("(not found)"));
    Ok(())
}
