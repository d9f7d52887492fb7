//! One-shot conversation management commands.

use anyhow::{Context, Result};
use medichat_application::SessionController;

pub async fn list(controller: &SessionController) -> Result<()> {
    let summaries = controller
        .list_conversations()
        .await
        .context("Failed to list conversations")?;

    if summaries.is_empty() {
        println!("No conversations yet.");
        return Ok(());
    }

    for summary in summaries {
        let last = summary.last_message_text.as_deref().unwrap_or("");
        println!("{}  {}  {}  {}", summary.id, summary.updated_at, summary.title, last);
    }
    Ok(())
}

pub async fn rename(controller: &SessionController, id: &str, title: &str) -> Result<()> {
    controller
        .rename_conversation(id, title)
        .await
        .with_context(|| format!("Failed to rename conversation '{}'", id))?;
    println!("Renamed {} to \"{}\"", id, title);
    Ok(())
}

pub async fn delete(controller: &SessionController, id: &str) -> Result<()> {
    controller
        .delete_conversation(id)
        .await
        .with_context(|| format!("Failed to delete conversation '{}'", id))?;
    println!("Deleted {}", id);
    Ok(())
}
