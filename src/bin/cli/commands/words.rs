use anyhow::Result;

use flashword_lib::words::{parse_tag_input, SortOrder};

use crate::app::{user_error, App};
use crate::render::terminal::render_word;
use crate::{OutputFormat, SortArg};

pub async fn run_add(
    app: &mut App,
    word: String,
    definition: String,
    tags: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    let tags = tags.map(parse_tag_input).unwrap_or_default();
    let id = app
        .session
        .add_word(word, definition, tags)
        .await
        .map_err(user_error)?;
    let entry = app.find_word(&id.to_string())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => println!("Added '{}' ({})", entry.word, entry.id),
    }
    Ok(())
}

pub fn run_list(
    app: &mut App,
    tags: Option<&str>,
    sort: Option<SortArg>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    if let Some(sort) = sort {
        app.session.sort(match sort {
            SortArg::Asc => SortOrder::DateAsc,
            SortArg::Desc => SortOrder::DateDesc,
            SortArg::Random => SortOrder::Random,
            SortArg::Marked => SortOrder::Marked,
        });
    }
    // A tag filter replaces any sort order
    if let Some(query) = tags {
        app.session.filter_by_tags(query);
    }

    let store = app.session.store();
    let shown = store.displayed();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&shown)?),
        OutputFormat::Plain => {
            if shown.is_empty() {
                println!("No words found.");
                return Ok(());
            }
            for entry in &shown {
                println!("{}\n", render_word(entry, use_color));
            }
            println!("{} of {} words", shown.len(), store.len());
        }
    }
    Ok(())
}

pub async fn run_delete(app: &mut App, id: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_word(id)?;
    let removed = app.session.delete_word(entry.id).await.map_err(user_error)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&removed)?),
        OutputFormat::Plain => println!("Deleted '{}'", removed.word),
    }
    Ok(())
}

pub async fn run_clear(app: &mut App, format: &OutputFormat) -> Result<()> {
    let count = app.session.delete_all().await.map_err(user_error)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "deleted": count })),
        OutputFormat::Plain => println!("Deleted {} words", count),
    }
    Ok(())
}

pub fn run_mark(app: &mut App, id: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_word(id)?;
    let marked = app.session.toggle_bookmark(entry.id).map_err(user_error)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "id": entry.id.to_string(), "isMarked": marked })
        ),
        OutputFormat::Plain => {
            let state = if marked { "Bookmarked" } else { "Removed bookmark from" };
            println!("{} '{}'", state, entry.word);
        }
    }
    Ok(())
}

pub fn run_tags(app: &App, format: &OutputFormat) -> Result<()> {
    let tags = app.session.store().unique_tags();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tags)?),
        OutputFormat::Plain => {
            if tags.is_empty() {
                println!("No tags found.");
                return Ok(());
            }
            for tag in &tags {
                println!("#{}", tag);
            }
            println!("\n{} tags total", tags.len());
        }
    }
    Ok(())
}

pub fn run_open(app: &App, uri: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let (entry, position) = app.session.open_deep_link(uri).map_err(user_error)?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "word": entry, "position": position })
        ),
        OutputFormat::Plain => {
            println!("{}", render_word(&entry, use_color));
            if let Some(position) = position {
                let total = app.session.store().displayed().len();
                println!("\nCard {} of {}", position + 1, total);
            }
        }
    }
    Ok(())
}
