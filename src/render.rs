//! Human-readable rendering of chat completion responses.

use std::io::{self, Write};

use crate::llm::ChatResponse;

/// Write a human-readable representation of `response` to `out`.
///
/// The primary candidate's content is the payload; service metadata goes on
/// a trailing footer line built from whichever fields the response carried.
/// Additional candidates are surfaced as a count, not dumped. Borrows only:
/// the response can be inspected again afterward.
pub fn render<W: Write>(response: &ChatResponse, out: &mut W) -> io::Result<()> {
    match response.primary() {
        Some(message) => writeln!(out, "{}", message.content)?,
        None => writeln!(out, "(no completion returned)")?,
    }

    let footer = footer(response);
    if !footer.is_empty() {
        writeln!(out)?;
        writeln!(out, "{footer}")?;
    }

    Ok(())
}

fn footer(response: &ChatResponse) -> String {
    let mut parts = Vec::new();

    if let Some(ref id) = response.id {
        parts.push(id.clone());
    }
    if let Some(ref model) = response.model {
        parts.push(model.clone());
    }
    if let Some(finish) = response
        .choices
        .first()
        .and_then(|choice| choice.finish_reason.as_deref())
    {
        parts.push(finish.to_string());
    }
    if let Some(usage) = response.usage {
        parts.push(format!(
            "{} prompt + {} completion = {} tokens",
            usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
        ));
    }
    if response.choices.len() > 1 {
        parts.push(format!("+{} more candidates", response.choices.len() - 1));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("[{}]", parts.join(" | "))
    }
}
