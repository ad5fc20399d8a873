//! Interactive terminal session against a single conversation.

use anyhow::Result;
use psitone_core::AffectParameters;
use psitone_memory::Conversation;
use psitone_reasoning::ResponseEngine;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;
use tracing::error;

/// Psi-Theory parameters held for the whole session, each 0–7.
#[derive(clap::Args, Debug, Clone)]
pub struct ChatArgs {
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    valence: i64,
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    arousal: i64,
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    selection_threshold: i64,
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    resolution: i64,
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    goal_directedness: i64,
    #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
    securing_rate: i64,
}

impl ChatArgs {
    fn parameters(&self) -> Result<AffectParameters> {
        Ok(AffectParameters::new(
            self.valence,
            self.arousal,
            self.selection_threshold,
            self.resolution,
            self.goal_directedness,
            self.securing_rate,
        )?)
    }
}

pub async fn run(
    engine: Arc<ResponseEngine>,
    conversation: Arc<Conversation>,
    args: ChatArgs,
) -> Result<()> {
    let params = args.parameters()?;
    let mut rl = DefaultEditor::new()?;

    println!("Psitone online. Type 'quit' to exit, 'history' to show the conversation.");

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        if trimmed == "history" {
            let history = conversation.flatten_history().await;
            if history.is_empty() {
                println!("(no turns yet)\n");
            } else {
                println!("{}\n", history);
            }
            continue;
        }

        match engine.respond(&conversation, &params, trimmed).await {
            Ok(out) => {
                println!(
                    "\n{}\n[sadness {}/5, anger {}/5]\n",
                    out.response, out.emotions.sadness, out.emotions.anger
                );
            }
            Err(e) => {
                error!("Turn failed: {}", e);
                println!("\n[{} error]: {}\n", e.kind(), e);
            }
        }
    }

    Ok(())
}
