use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::{ContentExtractor, ExtractedContent};

/// Video files are recognized but frame sampling is not implemented.
pub struct VideoExtractor;

impl ContentExtractor for VideoExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent> {
        Err(Error::Extraction {
            path: path.to_path_buf(),
            message: "video frame extraction is not supported".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_yields_no_content() {
        let result = VideoExtractor.extract(Path::new("clip.mp4"));
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }
}
