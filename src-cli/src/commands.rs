//! Command handlers

use anyhow::{Context, Result};
use serde_json::Value;

use newsdesk_core::{Article, Method, NewsDesk, TimelineView, User};

pub async fn run(desk: &NewsDesk, command: crate::args::Command) -> Result<()> {
    use crate::args::Command;

    match command {
        Command::Register {
            email,
            name,
            password,
        } => {
            let user = desk.register(&email, &name, &password).await?;
            println!("Registered and signed in as {}", describe(&user));
        }
        Command::Login { email, password } => {
            let user = desk.login(&email, &password).await?;
            println!("Signed in as {}", describe(&user));
        }
        Command::Logout => {
            desk.logout();
            println!("Signed out");
        }
        Command::Whoami => match desk.refresh().await {
            Some(user) => println!("{}", describe(&user)),
            None => match desk.session().snapshot().error {
                Some(error) => anyhow::bail!(error),
                None => println!("Not signed in"),
            },
        },
        Command::Call { method, path, body } => {
            let method = Method::from_bytes(method.to_uppercase().as_bytes())
                .with_context(|| format!("Invalid HTTP method: {method}"))?;
            let body = body
                .map(|b| serde_json::from_str::<Value>(&b))
                .transpose()
                .context("Request body is not valid JSON")?;

            let response = desk.call(method, &path, body).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Search { query } => {
            let articles = desk.search(&query).await?;
            print_articles(&articles);
        }
        Command::Ask { query } => {
            println!("{}", desk.ask(&query).await);
        }
        Command::Timeline { topic } => print_timeline(&desk.timeline(&topic).await)?,
    }

    Ok(())
}

fn describe(user: &User) -> String {
    format!("{} <{}> (id {})", user.username, user.email, user.id)
}

fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles found");
        return;
    }

    for article in articles {
        println!("{}", article.title);
        if let Some(published) = &article.published_at {
            println!("  {published}");
        }
        println!("  {}", article.url);
    }
}

fn print_timeline(view: &TimelineView) -> Result<()> {
    match view {
        TimelineView::Events { events, note } => {
            if let Some(note) = note {
                println!("{note}\n");
            }
            for event in events {
                println!("{}  {}", event.date, event.summary);
                for source in &event.sources {
                    println!("    {}", source.name.as_deref().unwrap_or(&source.url));
                }
            }
            Ok(())
        }
        TimelineView::Empty(message) => {
            println!("{message}");
            Ok(())
        }
        TimelineView::Failed(message) | TimelineView::Invalid(message) => {
            anyhow::bail!("{message}")
        }
    }
}
