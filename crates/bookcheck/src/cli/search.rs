use anyhow::{bail, Result};
use bookcheck_core::{CatalogueClient, CatalogueQuery, Settings};

use super::{output, QueryArgs, SearchArgs};

pub async fn run(settings: &Settings, args: SearchArgs, json: bool) -> Result<()> {
    let query = query_from(args.query)?;
    let page_size = args.page_size.unwrap_or(settings.catalogue.page_size);

    let client = CatalogueClient::new(settings.catalogue.clone())?;
    let results = client.search(&query, args.page, page_size).await;
    client.close();

    if json {
        output::print_json(&results)
    } else {
        let label = format!("Search: {query} (page {})", args.page);
        print!("{}", output::format_library_results(&label, &results));
        Ok(())
    }
}

fn query_from(args: QueryArgs) -> Result<CatalogueQuery> {
    let query = match args {
        QueryArgs { title: Some(t), .. } => CatalogueQuery::title(t),
        QueryArgs { author: Some(a), .. } => CatalogueQuery::author(a),
        QueryArgs { isbn: Some(i), .. } => CatalogueQuery::isbn(i),
        QueryArgs { keyword: Some(k), .. } => CatalogueQuery::keyword(k),
        _ => bail!("one of --title, --author, --isbn or --keyword is required"),
    };
    Ok(query)
}
