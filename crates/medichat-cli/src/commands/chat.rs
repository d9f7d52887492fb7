//! Interactive chat loop.

use anyhow::Result;
use medichat_application::{SessionController, SessionView};
use medichat_core::MedichatError;
use medichat_core::auth::EnvCredentialProvider;
use medichat_core::conversation::MessageRole;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  /new              start a fresh conversation
  /open <id>        switch to a conversation
  /list             list conversations
  /rename <id> <t>  rename a conversation
  /delete <id>      delete a conversation
  /help             show this help
  /quit             exit";

pub async fn run(controller: &SessionController, conversation: Option<&str>) -> Result<()> {
    if let Err(e) = controller.initialize(conversation).await {
        return Err(surface(e));
    }

    let view = controller.view().await;
    match &view.conversation_id {
        Some(id) => println!("Resuming conversation {}", id),
        None => println!("New conversation. Type a message, or /help for commands."),
    }
    let mut printed = print_new(&view, 0);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();

        if let Some(command) = line.strip_prefix('/') {
            match handle_command(controller, command).await? {
                LoopAction::Quit => return Ok(()),
                LoopAction::Redraw => {
                    printed = print_new(&controller.view().await, 0);
                }
                LoopAction::Continue => {}
            }
            continue;
        }

        if let Err(e) = controller.send_text(&line).await {
            return Err(surface(e));
        }
        printed = print_new(&controller.view().await, printed);
    }
    Ok(())
}

enum LoopAction {
    Continue,
    Redraw,
    Quit,
}

async fn handle_command(controller: &SessionController, command: &str) -> Result<LoopAction> {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("quit") | Some("q") => Ok(LoopAction::Quit),
        Some("help") => {
            println!("{}", HELP);
            Ok(LoopAction::Continue)
        }
        Some("new") => {
            controller.start_new_chat().await;
            println!("Started a new conversation.");
            Ok(LoopAction::Continue)
        }
        Some("open") => match parts.next() {
            Some(id) => match controller.select_conversation(id).await {
                Ok(()) => {
                    let view = controller.view().await;
                    match &view.conversation_id {
                        Some(id) => println!("Switched to conversation {}", id),
                        None => println!("Conversation not found, started fresh."),
                    }
                    Ok(LoopAction::Redraw)
                }
                Err(e) => Err(surface(e)),
            },
            None => {
                println!("Usage: /open <id>");
                Ok(LoopAction::Continue)
            }
        },
        Some("list") => {
            super::conversations::list(controller).await?;
            Ok(LoopAction::Continue)
        }
        Some("rename") => {
            let id = parts.next();
            let title = parts.collect::<Vec<_>>().join(" ");
            match id {
                Some(id) if !title.is_empty() => {
                    super::conversations::rename(controller, id, &title).await?;
                }
                _ => println!("Usage: /rename <id> <title>"),
            }
            Ok(LoopAction::Continue)
        }
        Some("delete") => match parts.next() {
            Some(id) => {
                super::conversations::delete(controller, id).await?;
                Ok(LoopAction::Redraw)
            }
            None => {
                println!("Usage: /delete <id>");
                Ok(LoopAction::Continue)
            }
        },
        _ => {
            println!("Unknown command. {}", HELP);
            Ok(LoopAction::Continue)
        }
    }
}

/// Prints transcript messages not shown yet and returns the new count.
fn print_new(view: &SessionView, printed: usize) -> usize {
    for message in view.transcript.messages().iter().skip(printed) {
        let speaker = match message.role {
            MessageRole::User => "you",
            MessageRole::Assistant => "assistant",
        };
        println!("[{}] {}", speaker, message.content);
    }
    view.transcript.len()
}

fn surface(e: MedichatError) -> anyhow::Error {
    if e.is_unauthorized() {
        anyhow::anyhow!(
            "Not logged in. Set {} to a valid token and try again.",
            EnvCredentialProvider::TOKEN_VAR
        )
    } else {
        anyhow::Error::new(e)
    }
}
