use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::extract::{truncate_chars, ContentExtractor, ExtractedContent};

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const SLIDE_SUFFIX: &str = ".xml";

/// Collects the text of every slide, in slide order.
pub struct PptxExtractor {
    pub max_chars: usize,
}

impl ContentExtractor for PptxExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedContent> {
        let file = File::open(path).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            message: format!("failed to open PPTX file: {source}"),
        })?;

        let mut archive = ZipArchive::new(file).map_err(|source| Error::Extraction {
            path: path.to_path_buf(),
            message: format!("failed to read PPTX archive: {source}"),
        })?;

        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| slide_number(name).map(|number| (number, name.to_string())))
            .collect();
        slides.sort_unstable();

        let mut text = String::new();
        for (_, name) in slides {
            let mut entry = archive.by_name(&name).map_err(|source| Error::Extraction {
                path: path.to_path_buf(),
                message: format!("failed to open {name} in PPTX: {source}"),
            })?;

            let mut xml = String::new();
            entry
                .read_to_string(&mut xml)
                .map_err(|source| Error::Extraction {
                    path: path.to_path_buf(),
                    message: format!("failed to read {name} in PPTX: {source}"),
                })?;

            let slide_text = strip_xml_tags(&xml);
            if !slide_text.is_empty() {
                text.push_str(&slide_text);
                text.push('\n');
            }

            if text.chars().count() >= self.max_chars {
                break;
            }
        }

        Ok(ExtractedContent::Text(truncate_chars(
            text.trim(),
            self.max_chars,
        )))
    }
}

fn slide_number(entry_name: &str) -> Option<u32> {
    entry_name
        .strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(SLIDE_SUFFIX)?
        .parse()
        .ok()
}

fn strip_xml_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    decode_xml_entities(&out)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_xml_entities(input: &str) -> String {
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
