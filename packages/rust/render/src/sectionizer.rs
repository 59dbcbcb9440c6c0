//! Splits generated prose into named sections by heading detection.
//!
//! The generator is asked for `## `-headed sections in a fixed order, but
//! its output is not validated, so the scan is defensive: known headings
//! open a section, unknown headings close one, and text outside any known
//! section is discarded.

use docsmith_shared::{SectionMap, SectionSpec};

/// Split `text` into the sections named by `sections`.
///
/// Line scan, in order:
/// - a line starting with `## <known heading>` flushes the open section
///   into the map, then opens that heading's section with a fresh buffer;
///   a repeated heading therefore overwrites its earlier capture (last
///   write wins);
/// - any other line starting with `##` flushes and closes the open section;
/// - other lines accumulate into the open section, if any.
///
/// The final open section is flushed at end of input. Captured text is
/// trimmed. Headings arriving out of the expected order still capture.
pub fn sectionize(text: &str, sections: &[SectionSpec]) -> SectionMap {
    let mut map = SectionMap::new();
    let mut current: Option<&'static str> = None;
    let mut buffer: Vec<&str> = Vec::new();

    fn flush(map: &mut SectionMap, current: &mut Option<&'static str>, buffer: &mut Vec<&str>) {
        if let Some(key) = current.take() {
            if !buffer.is_empty() {
                map.insert(key, buffer.join("\n").trim());
            }
        }
        buffer.clear();
    }

    for line in text.lines() {
        let known = sections
            .iter()
            .find(|spec| matches_heading(line, spec.heading));

        if let Some(spec) = known {
            flush(&mut map, &mut current, &mut buffer);
            current = Some(spec.key);
        } else if line.starts_with("##") {
            flush(&mut map, &mut current, &mut buffer);
        } else if current.is_some() {
            buffer.push(line);
        }
    }

    flush(&mut map, &mut current, &mut buffer);
    map
}

/// Prefix match, like the tooling this replaces: `## Examples of usage`
/// still opens the `Examples` section.
fn matches_heading(line: &str, heading: &str) -> bool {
    line.strip_prefix("## ")
        .is_some_and(|rest| rest.starts_with(heading))
}
