use std::collections::HashMap;
use std::fs;
use std::path::Path;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};

/// Overwrites the text content of every element whose tag name has an entry
/// in `updates`, at any depth and for every occurrence, leaving all other
/// content untouched. Tags with no entry pass through byte-for-byte; tags
/// listed in `updates` but absent from the document are silently skipped.
///
/// The replacement document is composed fully in memory and written back in
/// one operation, so a failure mid-rewrite leaves the file in its
/// pre-rewrite state.
pub fn rewrite_fields(path: &Path, updates: &HashMap<String, String>) -> Result<()> {
    let source = fs::read_to_string(path)
        .map_err(|e| Error::io("failed to read annotation document", path, e))?;

    let rewritten = rewrite_document(&source, updates).map_err(|e| Error::MalformedDocument {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, rewritten).map_err(|e| Error::WriteFailure {
        path: path.to_path_buf(),
        source: e,
    })
}

fn rewrite_document(
    source: &str,
    updates: &HashMap<String, String>,
) -> std::result::Result<Vec<u8>, quick_xml::Error> {
    let mut reader = Reader::from_str(source);
    let mut writer = Writer::new(Vec::new());
    // Set while positioned inside an element whose text is being replaced.
    let mut replacing = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                writer.write_event(Event::Start(e))?;
                if let Some(value) = updates.get(&tag) {
                    writer.write_event(Event::Text(BytesText::new(value)))?;
                    replacing = true;
                } else {
                    replacing = false;
                }
            }
            Event::Text(t) => {
                if !replacing {
                    writer.write_event(Event::Text(t))?;
                }
            }
            Event::End(e) => {
                replacing = false;
                writer.write_event(Event::End(e))?;
            }
            Event::Empty(e) => {
                // An empty element with a pending update gains the new text:
                // <filename/> becomes <filename>value</filename>.
                let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some(value) = updates.get(&tag) {
                    let end = e.to_end().into_owned();
                    writer.write_event(Event::Start(e))?;
                    writer.write_event(Event::Text(BytesText::new(value)))?;
                    writer.write_event(Event::End(end))?;
                } else {
                    writer.write_event(Event::Empty(e))?;
                }
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    Ok(writer.into_inner())
}
