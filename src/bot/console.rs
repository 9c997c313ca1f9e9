//! Line-oriented stdin/stdout transport.
//!
//! Each input line is one message from the default requester. A leading
//! `@<id>` speaks as another user, which is handy for trying out per-user
//! history from a single terminal:
//!
//! ```text
//! /gen Roblox
//! @42 /gen 1
//! @42 /stats
//! ```
use super::{NickBot, Requester};
use crate::metrics;
use anyhow::Result;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Split an optional `@<id>` sender override off the front of `line`.
pub fn split_sender<'a>(default: &Requester, line: &'a str) -> (Requester, &'a str) {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('@') {
        let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if let Ok(id) = id.parse() {
            return (Requester::new(id), text.trim_start());
        }
    }
    (default.clone(), line)
}

/// Serve the bot on stdin/stdout until EOF or Ctrl-C.
pub async fn run(bot: &mut NickBot, default: Requester) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed");
                    break;
                };
                let (from, text) = split_sender(&default, &line);
                match bot.handle_message(&from, text) {
                    Ok(Some(reply)) => {
                        stdout.write_all(reply.as_bytes()).await?;
                        stdout.write_all(b"\n\n").await?;
                        stdout.flush().await?;
                    }
                    Ok(None) => {}
                    Err(e) => warn!("handling message from {} failed: {e:?}", from.id),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
                break;
            }
        }
    }

    let snap = metrics::snapshot();
    info!(
        "Shutting down: {} commands, {} rate limited, {} nicknames, {} favorites",
        snap.commands_handled,
        snap.commands_rate_limited,
        snap.nicknames_generated,
        snap.favorites_marked
    );
    Ok(())
}
