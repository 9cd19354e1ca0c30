//! In-memory zip archives for integration tests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Builds a zip from `(name, contents)` pairs; `None` contents add a directory entry.
pub fn build(entries: &[(&str, Option<&str>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, contents) in entries {
        match contents {
            Some(text) => {
                zip.start_file(*name, options).expect("start_file");
                zip.write_all(text.as_bytes()).expect("write entry");
            }
            None => zip.add_directory(*name, options).expect("add_directory"),
        }
    }
    zip.finish().expect("finish zip").into_inner()
}
