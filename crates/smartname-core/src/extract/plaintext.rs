use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::{truncate_chars, ContentExtractor, ExtractedContent};

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// Reads the head of a text or source file.
pub struct PlaintextExtractor {
    pub max_chars: usize,
}

impl ContentExtractor for PlaintextExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent> {
        let file = File::open(path).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            message: format!("failed to open text file: {source}"),
        })?;

        let text = read_head_lossy(file, self.max_chars).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            message: format!("failed to read text file: {source}"),
        })?;
        Ok(ExtractedContent::Text(text))
    }
}

/// Decodes UTF-8 from `reader` until `max_chars` characters are collected or
/// the input ends. Invalid byte sequences are skipped and do not count.
fn read_head_lossy<R: Read>(mut reader: R, max_chars: usize) -> io::Result<String> {
    let mut text = String::new();
    let mut collected = 0;
    let mut pending: Vec<u8> = Vec::new();
    let mut buffer = vec![0_u8; READ_CHUNK_BYTES];

    while collected < max_chars {
        let read = match reader.read(&mut buffer) {
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        let at_eof = read == 0;
        pending.extend_from_slice(&buffer[..read]);

        // A multi-byte char may be split across reads; hold its prefix back.
        let mut carry = Vec::new();
        let mut chunks = pending.utf8_chunks().peekable();
        while let Some(chunk) = chunks.next() {
            text.push_str(chunk.valid());
            collected += chunk.valid().chars().count();
            if !at_eof && chunks.peek().is_none() {
                carry.extend_from_slice(chunk.invalid());
            }
        }
        pending = carry;

        if at_eof {
            break;
        }
    }

    Ok(truncate_chars(&text, max_chars))
}
