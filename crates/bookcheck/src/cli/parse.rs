use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use bookcheck_core::parse_vlm_response;

use super::output;

pub fn run(file: &Path, json: bool) -> Result<()> {
    let text = read_input(file)?;
    let books = parse_vlm_response(&text)
        .with_context(|| format!("{} does not hold a valid book list", file.display()))?;

    if json {
        output::print_json(&books)
    } else {
        print!("{}", output::format_books(&books));
        Ok(())
    }
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}
