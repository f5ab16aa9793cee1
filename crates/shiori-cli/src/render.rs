//! Colored terminal rendering of articles and tags.

use colored::Colorize;
use shiori_core::article::{Article, ArticleDraft, Tag};

/// Prints the article list the way the original page rendered it: a read
/// marker, the title linking to the URL, the memo, and the tag chips.
pub fn article_list(articles: &[Article]) {
    if articles.is_empty() {
        println!("{}", "No articles saved yet.".bright_black());
        return;
    }

    for article in articles {
        let marker = if article.is_read {
            "[read]".bright_black()
        } else {
            "[unread]".yellow()
        };
        let title = if article.is_read {
            article.title.strikethrough().bright_black()
        } else {
            article.title.bold().bright_blue()
        };
        println!("{:>4}  {} {}", article.id, marker, title);
        println!("      {}", article.url.underline().blue());
        if let Some(memo) = article.memo.as_deref().filter(|m| !m.is_empty()) {
            println!("      {}", memo);
        }
        if !article.tags.is_empty() {
            let names: Vec<&str> = article.tags.iter().map(|tag| tag.name.as_str()).collect();
            println!("      {}", format!("#{}", names.join(" #")).cyan());
        }
        println!();
    }
}

/// Prints all tags, marking the ones selected in the draft.
pub fn tag_list(tags: &[Tag], draft: &ArticleDraft) {
    if tags.is_empty() {
        println!("{}", "No tags yet.".bright_black());
        return;
    }
    for tag in tags {
        let checked = if draft.is_tag_selected(tag.id) {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        println!("{:>4}  {} {}", tag.id, checked, tag.name);
    }
}

/// Prints the current draft form state.
pub fn draft(draft: &ArticleDraft, tags: &[Tag]) {
    println!("{}", "New article draft".bold());
    println!("  url:   {}", or_empty(&draft.url));
    println!("  title: {}", or_empty(&draft.title));
    println!("  memo:  {}", or_empty(&draft.memo));
    let selected: Vec<String> = tags
        .iter()
        .filter(|tag| draft.is_tag_selected(tag.id))
        .map(|tag| tag.name.clone())
        .collect();
    if selected.is_empty() {
        println!("  tags:  {}", "(none)".bright_black());
    } else {
        println!("  tags:  {}", format!("#{}", selected.join(" #")).cyan());
    }
}

fn or_empty(value: &str) -> colored::ColoredString {
    if value.is_empty() {
        "(empty)".bright_black()
    } else {
        value.normal()
    }
}
