use std::path::Path;

use crate::error::Result;
use crate::extract::{ContentExtractor, ExtractedContent, ImageSource};

/// Hands image files to the vision model as they are.
pub struct ImageExtractor;

impl ContentExtractor for ImageExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent> {
        Ok(ExtractedContent::Image(ImageSource::File(path.to_path_buf())))
    }
}
