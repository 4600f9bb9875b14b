use std::path::Path;

use anyhow::Result;
use bookcheck_core::{Settings, VisionClient};

use super::output;

pub async fn run(settings: &Settings, image: &Path, json: bool) -> Result<()> {
    let client = VisionClient::new(settings.vision.clone())?;
    let books = client.identify_books(image).await;
    client.close();
    let books = books?;

    if json {
        output::print_json(&books)
    } else {
        print!("{}", output::format_books(&books));
        Ok(())
    }
}
