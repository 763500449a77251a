use std::fmt;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "csv", "json", "xml", "py", "java", "c", "cpp", "html", "css", "js", "ipynb",
];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Handling strategy for a file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Text,
    Pdf,
    Docx,
    Pptx,
    Video,
    Unsupported,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Image => "image",
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Video => "video",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}

/// Maps an extension (without the dot, any case) to a media kind.
pub fn classify_extension(extension: &str) -> MediaKind {
    let extension = extension.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => MediaKind::Pdf,
        "docx" => MediaKind::Docx,
        "pptx" => MediaKind::Pptx,
        ext if IMAGE_EXTENSIONS.contains(&ext) => MediaKind::Image,
        ext if TEXT_EXTENSIONS.contains(&ext) => MediaKind::Text,
        ext if VIDEO_EXTENSIONS.contains(&ext) => MediaKind::Video,
        _ => MediaKind::Unsupported,
    }
}

/// A file in the target directory together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    extension: String,
    kind: MediaKind,
}

impl SourceFile {
    pub fn classify(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();
        let kind = if extension.is_empty() {
            MediaKind::Unsupported
        } else {
            classify_extension(&extension)
        };

        Self {
            path: path.to_path_buf(),
            extension,
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Extension exactly as it appears on disk, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_ignores_extension_case() {
        assert_eq!(classify_extension("png"), MediaKind::Image);
        assert_eq!(classify_extension("PNG"), MediaKind::Image);
        assert_eq!(classify_extension("Pdf"), MediaKind::Pdf);
    }

    #[test]
    fn maps_each_table_entry() {
        for ext in ["png", "jpg", "jpeg", "webp", "gif"] {
            assert_eq!(classify_extension(ext), MediaKind::Image, "{ext}");
        }
        for ext in [
            "txt", "md", "csv", "json", "xml", "py", "java", "c", "cpp", "html", "css", "js",
            "ipynb",
        ] {
            assert_eq!(classify_extension(ext), MediaKind::Text, "{ext}");
        }
        assert_eq!(classify_extension("docx"), MediaKind::Docx);
        assert_eq!(classify_extension("pptx"), MediaKind::Pptx);
        assert_eq!(classify_extension("mov"), MediaKind::Video);
    }

    #[test]
    fn unknown_extensions_are_unsupported() {
        assert_eq!(classify_extension("exe"), MediaKind::Unsupported);
        assert_eq!(classify_extension("rs"), MediaKind::Unsupported);
        assert_eq!(classify_extension(""), MediaKind::Unsupported);
    }

    #[test]
    fn source_file_keeps_extension_verbatim() {
        let file = SourceFile::classify(Path::new("/tmp/photos/IMG_0001.JPG"));
        assert_eq!(file.extension(), "JPG");
        assert_eq!(file.kind(), MediaKind::Image);
        assert_eq!(file.file_name(), "IMG_0001.JPG");
    }

    #[test]
    fn files_without_extension_are_unsupported() {
        assert_eq!(
            SourceFile::classify(Path::new("Makefile")).kind(),
            MediaKind::Unsupported
        );
        assert_eq!(
            SourceFile::classify(Path::new(".bashrc")).kind(),
            MediaKind::Unsupported
        );
    }
}
