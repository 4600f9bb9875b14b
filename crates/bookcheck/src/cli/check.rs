use std::path::Path;

use anyhow::Result;
use bookcheck_core::{BookChecker, Settings};

use super::output;

pub async fn run(settings: &Settings, image: &Path, json: bool) -> Result<()> {
    let checker = BookChecker::from_settings(settings)?;
    let response = checker.check_image(image).await;
    checker.close();
    let response = response?;

    if json {
        output::print_json(&response)
    } else {
        print!("{}", output::format_book_results(&response.books));
        Ok(())
    }
}
