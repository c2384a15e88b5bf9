// src/services/conversation.rs
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::transport::Transport;
use crate::error::ChatError;
use crate::message::{ChatRequest, ChatResponse};

pub const PROMPT: &str = ">> ";
pub const SENTINEL: &str = "bye";
pub const REPLY_LABEL: &str = "chatbot: ";
pub const REQUEST_ERROR: &str = "Got a request error, did you start the server?";

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed the sentinel.
    Bye,
    /// Input reached EOF.
    InputClosed,
    /// A request failed or its reply could not be read.
    RequestFailed,
}

/// Send one message and return the chatbot's reply text.
pub async fn ask<T: Transport>(transport: &T, text: &str) -> Result<String, ChatError> {
    // A single String field always serializes.
    let body = serde_json::to_vec(&ChatRequest::new(text))?;
    let raw = transport.post(body).await?;
    let reply: ChatResponse = serde_json::from_str(&raw)?;
    Ok(reply.message)
}

/// Prompt, read a line, forward it, print the reply; repeat until `bye`,
/// EOF or the first failed request. Only console I/O errors are returned
/// as `Err`.
pub async fn run_conversation<R, W, T>(
    input: &mut R,
    output: &mut W,
    transport: &T,
) -> io::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    T: Transport,
{
    let mut buf = Vec::new();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            debug!("input closed");
            return Ok(SessionEnd::InputClosed);
        }

        // Invalid UTF-8 is replaced rather than rejected; every line is a message.
        let line = String::from_utf8_lossy(&buf);
        let text = strip_line_ending(&line);
        if text == SENTINEL {
            debug!("sentinel received");
            return Ok(SessionEnd::Bye);
        }

        debug!(len = text.len(), "sending message");
        match ask(transport, text).await {
            Ok(reply) => {
                output
                    .write_all(format!("{REPLY_LABEL}{reply}\n").as_bytes())
                    .await?;
            }
            Err(err) => {
                debug!(error = %err, "chatbot request failed");
                output
                    .write_all(format!("{REQUEST_ERROR}\n").as_bytes())
                    .await?;
                output.flush().await?;
                return Ok(SessionEnd::RequestFailed);
            }
        }
    }
}

// Only the terminator is removed; surrounding whitespace is part of the message.
fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_terminator() {
        assert_eq!(strip_line_ending("bye\n"), "bye");
        assert_eq!(strip_line_ending("bye\r\n"), "bye");
        assert_eq!(strip_line_ending(" bye \n"), " bye ");
        assert_eq!(strip_line_ending("bye"), "bye");
        assert_eq!(strip_line_ending("\n"), "");
    }
}
