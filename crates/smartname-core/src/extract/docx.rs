use std::io::Read;
use std::path::Path;

use dotext::doc::MsDoc;
use dotext::Docx;

use crate::error::{Error, Result};
use crate::extract::{truncate_chars, ContentExtractor, ExtractedContent};

pub struct DocxExtractor {
    pub max_chars: usize,
}

impl ContentExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent> {
        let mut docx = Docx::open(path).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            message: format!("failed to open DOCX file: {source}"),
        })?;

        let mut text = String::new();
        docx.read_to_string(&mut text)
            .map_err(|source| Error::Extraction {
                path: path.to_path_buf(),
                message: format!("failed to read DOCX text: {source}"),
            })?;

        Ok(ExtractedContent::Text(truncate_chars(
            text.trim(),
            self.max_chars,
        )))
    }
}
