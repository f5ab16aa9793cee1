//! One-shot article and tag commands.

use super::confirm;
use crate::render;
use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::DefaultEditor;
use shiori_application::AppContext;

/// Fetches and prints the article list.
pub async fn list(context: &AppContext) -> Result<()> {
    context
        .library
        .load_all()
        .await
        .context("Failed to fetch articles")?;
    render::article_list(&context.library.articles().await);
    Ok(())
}

/// Saves a new article built from the command-line arguments.
///
/// `tags` selects existing tag ids; each `new_tags` entry is created inline
/// first and joins the selection automatically, like the form's inline
/// tag-creation button.
pub async fn add(
    context: &AppContext,
    url: String,
    title: String,
    memo: String,
    tags: Vec<i64>,
    new_tags: Vec<String>,
) -> Result<()> {
    let library = &context.library;
    library.set_draft_url(url).await;
    library.set_draft_title(title).await;
    library.set_draft_memo(memo).await;
    for id in tags {
        library.toggle_tag_selection(id).await;
    }
    for name in new_tags {
        library.set_draft_tag_name(name).await;
        library
            .create_tag()
            .await
            .context("Failed to create the tag")?;
    }

    library
        .submit_draft()
        .await
        .context("Failed to save the article")?;
    println!("{}", "Article saved.".bright_green());
    Ok(())
}

/// Toggles the read/unread flag of one article.
pub async fn toggle(context: &AppContext, id: i64) -> Result<()> {
    let library = &context.library;
    library
        .load_all()
        .await
        .context("Failed to fetch articles")?;
    library
        .toggle_read(id)
        .await
        .context("Failed to update the read status")?;

    let now_read = library
        .articles()
        .await
        .iter()
        .find(|article| article.id == id)
        .map(|article| article.is_read)
        .unwrap_or(false);
    if now_read {
        println!("{}", "Marked as read.".bright_green());
    } else {
        println!("{}", "Marked as unread.".bright_green());
    }
    Ok(())
}

/// Deletes one article after an explicit yes/no confirmation.
///
/// Declining the prompt sends nothing; `--yes` skips the prompt for
/// scripted use.
pub async fn delete(context: &AppContext, id: i64, yes: bool) -> Result<()> {
    let confirmed = yes || prompt_confirmation("Really delete this article? [y/N] ")?;
    let deleted = confirm::delete_if_confirmed(&context.library, id, confirmed)
        .await
        .context("Failed to delete the article")?;
    if deleted {
        println!("{}", "Article deleted.".bright_green());
    } else {
        println!("{}", "Cancelled.".bright_black());
    }
    Ok(())
}

/// Fetches and prints the tag list.
pub async fn tag_list(context: &AppContext) -> Result<()> {
    let library = &context.library;
    library.load_all().await.context("Failed to fetch tags")?;
    render::tag_list(&library.tags().await, &library.draft().await);
    Ok(())
}

/// Creates a new tag.
pub async fn tag_new(context: &AppContext, name: String) -> Result<()> {
    let library = &context.library;
    library.set_draft_tag_name(name).await;
    let tag = library
        .create_tag()
        .await
        .context("Failed to create the tag")?;
    println!("{}", format!("Tag '{}' created (id {}).", tag.name, tag.id).bright_green());
    Ok(())
}

fn prompt_confirmation(question: &str) -> Result<bool> {
    let mut editor = DefaultEditor::new()?;
    let answer = editor.readline(question)?;
    Ok(confirm::is_affirmative(&answer))
}
