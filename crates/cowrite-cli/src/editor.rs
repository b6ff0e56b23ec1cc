//! Interactive editing loop
//!
//! The terminal stands in for the editing surface: entered lines are
//! appended to the document as local edits, remote operations replace the
//! rendered buffer. Connection loss ends the loop; reopening the document
//! starts a fresh session.

use anyhow::{Context, Result};
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use cowrite_api::ApiClient;
use cowrite_core::ContentStore;
use cowrite_protocol::Operation;
use cowrite_session::{SessionEvent, SyncSession};

pub async fn run(api: &ApiClient, ws_url: &str, token: &str, document_id: &str) -> Result<()> {
    let document = api
        .get_document(document_id)
        .await
        .context("Failed to load document")?;

    let mut store = ContentStore::new();
    store.seed(
        document.content_snapshot.clone().unwrap_or_default(),
        document.current_revision,
    );

    let mut session = SyncSession::open(ws_url, document_id, token)?;
    let mut events = session.events().expect("event stream already taken");

    println!();
    println!("{}", document.title.bold());
    println!(
        "{}",
        format!(
            "owner {} · revision {}",
            document.owner_username, document.current_revision
        )
        .dimmed()
    );
    println!("{}", "○ connecting...".yellow());
    render(store.content());
    println!("{}", "Type to append a line, :help for commands.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(SessionEvent::Connected) => {
                        println!("{}", "● connected".green());
                    }
                    Some(SessionEvent::CollaboratorJoined(username)) => {
                        println!("{}", format!("{} joined", username).cyan());
                    }
                    Some(SessionEvent::RemoteOperation(operation)) => {
                        apply_remote(&mut store, &operation);
                    }
                    Some(SessionEvent::Disconnected) | None => {
                        println!(
                            "{}",
                            "○ not connected, reopen the document to resume".yellow()
                        );
                        break;
                    }
                }
            }

            line = lines.next_line() => {
                match line? {
                    Some(input) => {
                        if let Some(command) = input.strip_prefix(':') {
                            if !handle_command(command, api, &session, document_id).await {
                                break;
                            }
                        } else if !input.is_empty() {
                            let mut content = store.content().to_owned();
                            if !content.is_empty() && !content.ends_with('\n') {
                                content.push('\n');
                            }
                            content.push_str(&input);
                            if let Some(change) = store.note_local_change(&content) {
                                session.send(Operation::from(change));
                            }
                        }
                    }
                    None => break, // stdin closed
                }
            }
        }
    }

    session.close();
    Ok(())
}

/// Replace the rendered buffer under the echo-suppression bracket.
fn apply_remote(store: &mut ContentStore, operation: &Operation) {
    let content = match &operation.content {
        Some(content) => content,
        None => return,
    };

    store.begin_remote_apply();
    render(content);
    store.end_remote_apply(content);

    match &operation.username {
        Some(username) => println!("{}", format!("updated by {}", username).cyan()),
        None => println!("{}", "updated by a collaborator".cyan()),
    }
}

async fn handle_command(
    command: &str,
    api: &ApiClient,
    session: &SyncSession,
    document_id: &str,
) -> bool {
    let (name, rest) = match command.split_once(' ') {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match name {
        "quit" | "q" => return false,
        "users" => {
            let users = session.collaborators();
            if users.is_empty() {
                println!("{}", "nobody else is here".dimmed());
            } else {
                println!("{}", users.join(", ").cyan());
            }
        }
        "title" => {
            if rest.is_empty() {
                println!("{}", "usage: :title <new title>".dimmed());
            } else {
                match api.update_title(document_id, rest).await {
                    Ok(doc) => println!("{}", format!("title is now \"{}\"", doc.title).green()),
                    Err(e) => eprintln!("{} {}", "error:".red(), e),
                }
            }
        }
        "ask" => {
            if rest.is_empty() {
                println!("{}", "usage: :ask <question>".dimmed());
            } else {
                match api.chat(document_id, rest).await {
                    Ok(reply) => println!("{}", reply.answer),
                    Err(e) => eprintln!("{} {}", "error:".red(), e),
                }
            }
        }
        "help" => print_help(),
        _ => println!("{}", format!("unknown command :{}, try :help", name).dimmed()),
    }

    true
}

fn render(content: &str) {
    println!("{}", "────────────────────────────────".dimmed());
    if content.is_empty() {
        println!("{}", "(empty document)".dimmed());
    } else {
        println!("{}", content);
    }
    println!("{}", "────────────────────────────────".dimmed());
}

fn print_help() {
    println!(
        r#"
{}
  <text>            Append a line to the document
  :users            Show connected collaborators
  :title <title>    Rename the document
  :ask <question>   Ask about the document
  :help             Show this help
  :quit             Close the document
"#,
        "Editing commands".cyan().bold(),
    );
}
