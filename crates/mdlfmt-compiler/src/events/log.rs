//! Event logs: one JSON-encoded `Event` per line.

use super::Event;

#[derive(Debug, thiserror::Error)]
pub enum EventLogError {
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Parse an event log. Blank lines are ignored; line numbers are 1-based.
pub fn parse_event_log(text: &str) -> Result<Vec<Event>, EventLogError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).map_err(|source| EventLogError::Malformed {
                line: i + 1,
                source,
            })
        })
        .collect()
}

pub fn to_event_log(events: &[Event]) -> Result<String, EventLogError> {
    let mut out = String::new();
    for event in events {
        out.push_str(&serde_json::to_string(event)?);
        out.push('\n');
    }
    Ok(out)
}
