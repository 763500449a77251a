use std::path::Path;

use ::image::{DynamicImage, ImageFormat, RgbaImage};
use pdfium_render::prelude::{PdfPage, PdfRenderConfig, Pdfium};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::extract::{truncate_chars, ContentExtractor, ExtractedContent, ImageSource};

/// Pages with fewer trimmed characters than this are treated as scans.
pub const TEXT_LAYER_THRESHOLD: usize = 50;
const RASTER_SCALE: f32 = 2.0;

/// Samples the first page of a PDF, as text when it has a text layer and as a
/// rendered JPEG otherwise.
pub struct PdfExtractor {
    pub max_chars: usize,
}

impl ContentExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent> {
        let text = first_page_text(path)?;
        route_first_page(path, &text, self.max_chars, || render_first_page(path))
    }
}

/// Page one's embedded text. A file the text reader cannot parse yields an
/// empty string so the page is rasterized instead.
fn first_page_text(path: &Path) -> Result<String> {
    match pdf_extract::extract_text_by_pages(path) {
        Ok(pages) => match pages.into_iter().next() {
            Some(text) => Ok(text),
            None => Err(Error::EmptyDocument {
                path: path.to_path_buf(),
            }),
        },
        Err(err) => {
            tracing::debug!(path = %path.display(), %err, "pdf: text extraction failed");
            Ok(String::new())
        }
    }
}

fn has_text_layer(text: &str) -> bool {
    text.trim().chars().count() >= TEXT_LAYER_THRESHOLD
}

fn route_first_page<F>(
    path: &Path,
    text: &str,
    max_chars: usize,
    rasterize: F,
) -> Result<ExtractedContent>
where
    F: FnOnce() -> Result<NamedTempFile>,
{
    let trimmed = text.trim();
    if has_text_layer(trimmed) {
        tracing::debug!(
            path = %path.display(),
            chars = trimmed.chars().count(),
            "pdf: using embedded text"
        );
        return Ok(ExtractedContent::Text(truncate_chars(trimmed, max_chars)));
    }

    tracing::debug!(
        path = %path.display(),
        chars = trimmed.chars().count(),
        "pdf: text layer too small, rasterizing first page"
    );
    let raster = rasterize()?;
    Ok(ExtractedContent::Image(ImageSource::Raster(raster)))
}

fn render_first_page(path: &Path) -> Result<NamedTempFile> {
    let pdfium = bind_pdfium(path)?;
    let document = pdfium
        .load_pdf_from_file(path, None)
        .map_err(|source| extraction_error(path, format!("failed to open PDF: {source}")))?;

    let pages = document.pages();
    if pages.len() == 0 {
        return Err(Error::EmptyDocument {
            path: path.to_path_buf(),
        });
    }
    let page = pages.get(0).map_err(|source| {
        extraction_error(path, format!("failed to load first PDF page: {source}"))
    })?;

    render_page_to_jpeg(path, &page)
}

fn render_page_to_jpeg(path: &Path, page: &PdfPage<'_>) -> Result<NamedTempFile> {
    let render_config = PdfRenderConfig::new().scale_page_by_factor(RASTER_SCALE);
    let bitmap = page
        .render_with_config(&render_config)
        .map_err(|source| extraction_error(path, format!("failed to render PDF page: {source}")))?;

    let width = u32::try_from(bitmap.width()).unwrap_or_default();
    let height = u32::try_from(bitmap.height()).unwrap_or_default();
    let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
        extraction_error(path, "rendered bitmap does not match its dimensions".to_string())
    })?;

    let raster = tempfile::Builder::new()
        .prefix("smartname-page-")
        .suffix(".jpg")
        .tempfile()
        .map_err(|source| {
            extraction_error(path, format!("failed to create raster file: {source}"))
        })?;

    DynamicImage::ImageRgba8(rgba)
        .to_rgb8()
        .save_with_format(raster.path(), ImageFormat::Jpeg)
        .map_err(|source| extraction_error(path, format!("failed to write raster: {source}")))?;

    Ok(raster)
}

fn bind_pdfium(path: &Path) -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|source| extraction_error(path, format!("failed to load pdfium library: {source}")))?;

    Ok(Pdfium::new(bindings))
}

fn extraction_error(path: &Path, message: String) -> Error {
    Error::Extraction {
        path: path.to_path_buf(),
        message,
    }
}
