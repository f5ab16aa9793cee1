//! Interactive article view.
//!
//! The shell plays the role of the original single page: one `Library` held
//! for the whole session, a draft form edited line by line, and per-article
//! actions that re-fetch the list on success. Mutation failures print one
//! red line and leave the previous state (and the draft) in place.

use super::confirm;
use crate::render;
use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use shiori_application::AppContext;

const HELP: &str = "\
Commands:
  ls                 show the article list
  reload             re-fetch articles and tags
  url <value>        set the draft URL
  title <value>      set the draft title
  memo <value>       set the draft memo
  tag <id>           toggle a tag in the draft selection
  newtag <name>      create a tag and select it
  tags               show all tags with selection marks
  draft              show the current draft
  save               submit the draft
  read <id>          toggle read/unread
  rm <id>            delete an article (asks for confirmation)
  help               show this help
  quit               exit";

/// Runs the interactive shell until `quit` or EOF.
pub async fn run(context: &AppContext) -> Result<()> {
    let library = &context.library;

    println!("{}", "=== shiori ===".bright_magenta().bold());
    if !context.session.is_logged_in() {
        println!(
            "{}",
            "Not logged in; the backend will likely reject requests.".yellow()
        );
    }
    println!("{}", "Type 'help' for commands.".bright_black());
    println!("{}", "Loading...".bright_black());
    if library.load_all().await.is_err() {
        println!("{}", "Failed to load articles and tags.".red());
    } else {
        render::article_list(&library.articles().await);
    }

    let mut editor = DefaultEditor::new()?;

    loop {
        let readline = editor.readline(">> ");
        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(&line);

        let (command, rest) = match trimmed.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "ls" | "list" => render::article_list(&library.articles().await),
            "reload" => {
                if library.load_all().await.is_err() {
                    println!("{}", "Failed to load articles and tags.".red());
                } else {
                    render::article_list(&library.articles().await);
                }
            }
            "url" => library.set_draft_url(rest).await,
            "title" => library.set_draft_title(rest).await,
            "memo" => library.set_draft_memo(rest).await,
            "tag" => match rest.parse::<i64>() {
                Ok(id) => {
                    library.toggle_tag_selection(id).await;
                    render::tag_list(&library.tags().await, &library.draft().await);
                }
                Err(_) => println!("{}", "Usage: tag <id>".red()),
            },
            "newtag" => {
                library.set_draft_tag_name(rest).await;
                match library.create_tag().await {
                    Ok(tag) => {
                        println!("{}", format!("Tag '{}' created and selected.", tag.name).bright_green());
                    }
                    Err(e) if e.is_validation() => {
                        println!("{}", "Enter a tag name.".red());
                    }
                    Err(_) => println!("{}", "Failed to create the tag.".red()),
                }
            }
            "tags" => render::tag_list(&library.tags().await, &library.draft().await),
            "draft" => render::draft(&library.draft().await, &library.tags().await),
            "save" => match library.submit_draft().await {
                Ok(()) => {
                    println!("{}", "Article saved.".bright_green());
                    render::article_list(&library.articles().await);
                }
                Err(e) if e.is_validation() => {
                    println!("{}", "URL and title are required.".red());
                }
                Err(_) => println!("{}", "Failed to save the article.".red()),
            },
            "read" => match rest.parse::<i64>() {
                Ok(id) => match library.toggle_read(id).await {
                    Ok(()) => render::article_list(&library.articles().await),
                    Err(e) if e.is_not_found() => {
                        println!("{}", "No such article.".red());
                    }
                    Err(_) => println!("{}", "Failed to update the read status.".red()),
                },
                Err(_) => println!("{}", "Usage: read <id>".red()),
            },
            "rm" => match rest.parse::<i64>() {
                Ok(id) => {
                    let answer = editor.readline("Really delete this article? [y/N] ")?;
                    let confirmed = confirm::is_affirmative(&answer);
                    match confirm::delete_if_confirmed(library, id, confirmed).await {
                        Ok(true) => render::article_list(&library.articles().await),
                        Ok(false) => println!("{}", "Cancelled.".bright_black()),
                        Err(_) => println!("{}", "Failed to delete the article.".red()),
                    }
                }
                Err(_) => println!("{}", "Usage: rm <id>".red()),
            },
            _ => println!("{}", "Unknown command, try 'help'.".bright_black()),
        }
    }

    library.close();
    println!("{}", "Goodbye!".bright_green());
    Ok(())
}
