pub mod docx;
pub mod image;
pub mod pdf;
pub mod plaintext;
pub mod pptx;
pub mod video;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::classify::{MediaKind, SourceFile};
use crate::config::GeneralConfig;
use crate::error::{Error, Result};

/// Bounded content sampled from a file, ready to send to the model.
#[derive(Debug)]
pub enum ExtractedContent {
    Text(String),
    Image(ImageSource),
}

/// Where the bytes of an image payload live.
///
/// A `Raster` is a temporary file owned by this value; it is deleted when the
/// value is dropped.
#[derive(Debug)]
pub enum ImageSource {
    File(PathBuf),
    Raster(NamedTempFile),
}

impl ImageSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) => path,
            Self::Raster(file) => file.path(),
        }
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        let path = self.path();
        fs::read(path).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            message: format!("failed to read image payload: {source}"),
        })
    }
}

impl ExtractedContent {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }
}

/// Limits applied while sampling file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSettings {
    pub max_text_chars: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self::from(&GeneralConfig::default())
    }
}

impl From<&GeneralConfig> for ExtractSettings {
    fn from(config: &GeneralConfig) -> Self {
        Self {
            max_text_chars: config.max_text_chars,
        }
    }
}

/// Produces the model payload for one kind of file.
pub trait ContentExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent>;
}

/// Returns the extractor for a media kind, or `None` when the kind is unsupported.
pub fn extractor_for(
    kind: MediaKind,
    settings: &ExtractSettings,
) -> Option<Box<dyn ContentExtractor>> {
    let max_chars = settings.max_text_chars;
    let extractor: Box<dyn ContentExtractor> = match kind {
        MediaKind::Image => Box::new(self::image::ImageExtractor),
        MediaKind::Text => Box::new(plaintext::PlaintextExtractor { max_chars }),
        MediaKind::Pdf => Box::new(pdf::PdfExtractor { max_chars }),
        MediaKind::Docx => Box::new(docx::DocxExtractor { max_chars }),
        MediaKind::Pptx => Box::new(pptx::PptxExtractor { max_chars }),
        MediaKind::Video => Box::new(video::VideoExtractor),
        MediaKind::Unsupported => return None,
    };
    Some(extractor)
}

/// Extract the model payload for a classified file.
pub fn extract_content(file: &SourceFile, settings: &ExtractSettings) -> Result<ExtractedContent> {
    let Some(extractor) = extractor_for(file.kind(), settings) else {
        return Err(Error::Extraction {
            path: file.path().to_path_buf(),
            message: "no extractor available for this file type".to_string(),
        });
    };

    let content = extractor.extract(file.path())?;
    if let ExtractedContent::Text(text) = &content {
        if text.trim().is_empty() {
            return Err(Error::Extraction {
                path: file.path().to_path_buf(),
                message: "file contains no text".to_string(),
            });
        }
    }

    Ok(content)
}

pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
