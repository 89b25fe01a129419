use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use mdlfmt_compiler::Event;
use mdlfmt_compiler::events::parse_event_log;

use super::convert::ConvertError;

/// Sidecar holding the recorded events of `source`: `X.mdl` → `X.mdl.events`.
pub fn sidecar_path(source: &Path) -> PathBuf {
    let mut name = OsString::from(source.as_os_str());
    name.push(".events");
    PathBuf::from(name)
}

/// Load the recorded events of `source`.
///
/// A recorded `file_begin`/`file_end` pair around the body is dropped; the
/// translator issues its own with the source path.
pub fn load_events(source: &Path) -> Result<Vec<Event>, ConvertError> {
    let path = sidecar_path(source);
    let text = fs::read_to_string(&path).map_err(|source| ConvertError::Read {
        path: path.clone(),
        source,
    })?;
    let mut events =
        parse_event_log(&text).map_err(|source| ConvertError::EventLog { path, source })?;

    if matches!(events.first(), Some(Event::FileBegin { .. }))
        && matches!(events.last(), Some(Event::FileEnd))
    {
        events.pop();
        events.remove(0);
    }
    Ok(events)
}
