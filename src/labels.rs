use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::utils::{self, ANNOTATION_EXT};

/// Reads the optional labels file, one label per line. A missing or
/// unreadable file disables label counting rather than failing the run.
pub fn read_labels_file(path: &Path) -> Option<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let labels: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
            if labels.is_empty() {
                None
            } else {
                Some(labels)
            }
        }
        Err(e) => {
            warn!(
                "labels file {} not readable, skipping label count: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Counts occurrences of each requested label across every `<name>` element
/// in every annotation under `annotation_dir`. Labels not requested are
/// ignored; a document that fails to parse aborts the whole count so a
/// partial tally is never reported as complete.
pub fn count_labels(annotation_dir: &Path, labels: &[String]) -> Result<HashMap<String, usize>> {
    let mut counts: HashMap<String, usize> =
        labels.iter().map(|label| (label.clone(), 0)).collect();

    for xml_path in utils::find_files(annotation_dir, &[ANNOTATION_EXT], true)? {
        let source = fs::read_to_string(&xml_path)
            .map_err(|e| Error::io("failed to read annotation document", &xml_path, e))?;
        count_document(&source, &mut counts).map_err(|e| Error::MalformedDocument {
            path: xml_path.clone(),
            source: e,
        })?;
    }

    Ok(counts)
}

fn count_document(
    source: &str,
    counts: &mut HashMap<String, usize>,
) -> std::result::Result<(), quick_xml::Error> {
    let mut reader = Reader::from_str(source);
    let mut in_name = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => in_name = e.name().as_ref() == b"name",
            Event::Text(t) if in_name => {
                let text = t.unescape()?;
                if let Some(count) = counts.get_mut(text.trim()) {
                    *count += 1;
                }
            }
            Event::End(_) => in_name = false,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(())
}
