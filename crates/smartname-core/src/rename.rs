//! Per-file rename pipeline: classify, extract, suggest, normalize, rename.
//!
//! Files are processed one at a time and no single file can abort the batch.
//! Nothing here guards the directory against a second concurrent run; callers
//! must not point two runs at the same directory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::casing::{tokenize_words, CasingStyle};
use crate::classify::{MediaKind, SourceFile};
use crate::error::Result;
use crate::extract::{extract_content, ExtractSettings, ExtractedContent};
use crate::gateway::SuggestionGateway;
use crate::sanitize::sanitize_filename;
use crate::scanner::scan_directory;

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub model: String,
    pub case: CasingStyle,
    pub execute: bool,
    pub extract: ExtractSettings,
}

/// A computed destination for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub original: PathBuf,
    pub base_name: String,
    pub extension: String,
}

impl RenamePlan {
    pub fn original_file_name(&self) -> String {
        self.original
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn new_file_name(&self) -> String {
        format!("{}.{}", self.base_name, self.extension)
    }

    pub fn destination(&self) -> PathBuf {
        self.original.with_file_name(self.new_file_name())
    }
}

impl fmt::Display for RenamePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' -> '{}'",
            self.original_file_name(),
            self.new_file_name()
        )
    }
}

/// Why a file was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unsupported,
    NoContent(String),
    NoSuggestion(String),
    NoUsableWords,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("unsupported file type"),
            Self::NoContent(detail) => write!(f, "no usable content ({detail})"),
            Self::NoSuggestion(detail) => write!(f, "no suggestion ({detail})"),
            Self::NoUsableWords => f.write_str("suggestion contained no usable words"),
        }
    }
}

/// Final state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Dry run: the plan was reported, the file was not touched.
    Planned(RenamePlan),
    Renamed(RenamePlan),
    RenameFailed { plan: RenamePlan, error: String },
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Outcomes of a batch, in processing order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub scan_errors: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn planned(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Planned(_)))
    }

    pub fn renamed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Renamed(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::RenameFailed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, FileOutcome::Skipped { .. }))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|outcome| predicate(outcome)).count()
    }
}

/// Turns a raw model suggestion into a sanitized base name.
///
/// Returns `None` when the suggestion has no alphanumeric content, so a file
/// is never renamed to a placeholder.
pub fn propose_base_name(suggestion: &str, case: CasingStyle) -> Option<String> {
    if !suggestion.chars().any(char::is_alphanumeric) {
        return None;
    }

    let words = tokenize_words(&sanitize_filename(suggestion));
    if words.is_empty() {
        return None;
    }

    Some(sanitize_filename(&case.render(&words)))
}

type ExtractFn = dyn Fn(&SourceFile, &ExtractSettings) -> Result<ExtractedContent>;

pub struct Renamer<G> {
    gateway: G,
    options: RenameOptions,
    extract: Box<ExtractFn>,
}

impl<G: SuggestionGateway> Renamer<G> {
    pub fn new(gateway: G, options: RenameOptions) -> Self {
        Self {
            gateway,
            options,
            extract: Box::new(extract_content),
        }
    }

    /// Replace the content extraction step, which defaults to
    /// [`extract_content`].
    pub fn with_extractor<F>(mut self, extract: F) -> Self
    where
        F: Fn(&SourceFile, &ExtractSettings) -> Result<ExtractedContent> + 'static,
    {
        self.extract = Box::new(extract);
        self
    }

    pub fn options(&self) -> &RenameOptions {
        &self.options
    }

    /// Process every file in `directory`.
    pub fn run(&self, directory: &Path) -> Result<BatchReport> {
        self.run_with(directory, |_| {})
    }

    /// Process every file in `directory`, handing each outcome to
    /// `on_outcome` as soon as it is known.
    ///
    /// The only error is a missing directory, detected before any file is
    /// touched.
    pub fn run_with<F>(&self, directory: &Path, mut on_outcome: F) -> Result<BatchReport>
    where
        F: FnMut(&FileOutcome),
    {
        let scan = scan_directory(directory)?;
        for (path, error) in &scan.errors {
            tracing::warn!(path = %path.display(), %error, "failed to read directory entry");
        }

        let mut report = BatchReport {
            outcomes: Vec::with_capacity(scan.files.len()),
            scan_errors: scan.errors,
        };

        for path in &scan.files {
            let outcome = self.process_file(path);
            on_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Run the full pipeline for a single file.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let file = SourceFile::classify(path);
        let plan = match self.plan_file(&file) {
            Ok(plan) => plan,
            Err(reason) => {
                tracing::warn!(path = %path.display(), %reason, "skipping file");
                return FileOutcome::Skipped {
                    path: path.to_path_buf(),
                    reason,
                };
            }
        };

        if !self.options.execute {
            return FileOutcome::Planned(plan);
        }

        match fs::rename(&plan.original, plan.destination()) {
            Ok(()) => {
                tracing::info!(
                    from = %plan.original.display(),
                    to = %plan.destination().display(),
                    "renamed file"
                );
                FileOutcome::Renamed(plan)
            }
            Err(error) => {
                tracing::warn!(path = %plan.original.display(), %error, "rename failed");
                FileOutcome::RenameFailed {
                    plan,
                    error: error.to_string(),
                }
            }
        }
    }

    /// Compute the rename plan for a classified file without touching it.
    pub fn plan_file(&self, file: &SourceFile) -> std::result::Result<RenamePlan, SkipReason> {
        if file.kind() == MediaKind::Unsupported {
            return Err(SkipReason::Unsupported);
        }
        tracing::debug!(path = %file.path().display(), kind = %file.kind(), "classified");

        let content = (self.extract)(file, &self.options.extract)
            .map_err(|err| SkipReason::NoContent(err.to_string()))?;
        tracing::debug!(
            path = %file.path().display(),
            content = content.kind_name(),
            "extracted"
        );

        let suggestion = self.gateway.suggest(&content, &self.options.model);
        // Releases any temporary raster before the result is inspected.
        drop(content);
        let suggestion = suggestion.map_err(|err| SkipReason::NoSuggestion(err.to_string()))?;
        tracing::debug!(path = %file.path().display(), %suggestion, "suggested");

        let base_name =
            propose_base_name(&suggestion, self.options.case).ok_or(SkipReason::NoUsableWords)?;

        Ok(RenamePlan {
            original: file.path().to_path_buf(),
            base_name,
            extension: file.extension().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::Error;
    use crate::extract::ImageSource;

    /// Answers every request with the same suggestion and records what it saw.
    struct FixedGateway {
        answer: Option<&'static str>,
        seen: RefCell<Vec<String>>,
    }

    impl FixedGateway {
        fn answering(answer: &'static str) -> Self {
            Self {
                answer: Some(answer),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: None,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl SuggestionGateway for FixedGateway {
        fn suggest(&self, content: &ExtractedContent, _model: &str) -> Result<String> {
            let seen = match content {
                ExtractedContent::Text(text) => format!("text:{text}"),
                ExtractedContent::Image(source) => format!("image:{}", source.path().display()),
            };
            self.seen.borrow_mut().push(seen);
            self.answer
                .map(str::to_string)
                .ok_or_else(|| Error::Gateway("API call failed with status code 500".to_string()))
        }
    }

    fn options(execute: bool, case: CasingStyle) -> RenameOptions {
        RenameOptions {
            model: "llama3.2-vision".to_string(),
            case,
            execute,
            extract: ExtractSettings::default(),
        }
    }

    #[test]
    fn dry_run_reports_plan_and_leaves_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "Q3 budget review meeting notes").expect("write notes");

        let renamer = Renamer::new(
            FixedGateway::answering("Quarterly Budget Review"),
            options(false, CasingStyle::Snake),
        );
        let mut streamed = Vec::new();
        let report = renamer
            .run_with(dir.path(), |outcome| streamed.push(outcome.clone()))
            .expect("run");

        assert_eq!(report.outcomes, streamed);
        assert_eq!(report.planned(), 1);
        match &report.outcomes[0] {
            FileOutcome::Planned(plan) => {
                assert_eq!(
                    plan.to_string(),
                    "'notes.txt' -> 'quarterly_budget_review.txt'"
                );
            }
            other => panic!("expected a plan, got {other:?}"),
        }
        assert!(notes.exists());
        assert!(!dir.path().join("quarterly_budget_review.txt").exists());
        assert_eq!(
            renamer.gateway.seen.borrow().as_slice(),
            ["text:Q3 budget review meeting notes".to_string()]
        );
    }

    #[test]
    fn execute_renames_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "Q3 budget review meeting notes").expect("write notes");

        let renamer = Renamer::new(
            FixedGateway::answering("Quarterly Budget Review"),
            options(true, CasingStyle::Snake),
        );
        let report = renamer.run(dir.path()).expect("run");

        assert_eq!(report.renamed(), 1);
        assert!(!notes.exists());
        let renamed = dir.path().join("quarterly_budget_review.txt");
        assert_eq!(
            fs::read_to_string(renamed).expect("read renamed file"),
            "Q3 budget review meeting notes"
        );
    }

    #[test]
    fn original_extension_is_kept_verbatim() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let photo = dir.path().join("IMG_0001.JPG");
        fs::write(&photo, [0xFF, 0xD8, 0xFF]).expect("write photo");

        let renamer = Renamer::new(
            FixedGateway::answering("sunsetOverTheLake"),
            options(false, CasingStyle::Kebab),
        );
        let outcome = renamer.process_file(&photo);

        match outcome {
            FileOutcome::Planned(plan) => {
                assert_eq!(plan.new_file_name(), "sunset-over-the-lake.JPG");
            }
            other => panic!("expected a plan, got {other:?}"),
        }
        assert_eq!(
            renamer.gateway.seen.borrow().as_slice(),
            [format!("image:{}", photo.display())]
        );
    }

    #[test]
    fn unsupported_files_never_reach_the_gateway() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let binary = dir.path().join("tool.exe");
        fs::write(&binary, [0x4D, 0x5A]).expect("write binary");

        let renamer = Renamer::new(
            FixedGateway::answering("anything"),
            options(true, CasingStyle::Snake),
        );
        let outcome = renamer.process_file(&binary);

        assert_eq!(
            outcome,
            FileOutcome::Skipped {
                path: binary.clone(),
                reason: SkipReason::Unsupported,
            }
        );
        assert!(renamer.gateway.seen.borrow().is_empty());
        assert!(binary.exists());
    }

    #[test]
    fn absent_suggestion_skips_without_stopping_the_batch() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("a.txt"), "alpha").expect("write a");
        fs::write(dir.path().join("b.md"), "beta").expect("write b");

        let renamer = Renamer::new(FixedGateway::failing(), options(true, CasingStyle::Snake));
        let report = renamer.run(dir.path()).expect("run");

        assert_eq!(report.skipped(), 2);
        assert!(report.outcomes.iter().all(|outcome| matches!(
            outcome,
            FileOutcome::Skipped {
                reason: SkipReason::NoSuggestion(_),
                ..
            }
        )));
        assert!(dir.path().join("a.txt").exists());
        assert!(dir.path().join("b.md").exists());
    }

    #[test]
    fn unreadable_content_is_skipped() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let empty = dir.path().join("empty.json");
        fs::write(&empty, "").expect("write empty file");

        let renamer = Renamer::new(
            FixedGateway::answering("Config"),
            options(true, CasingStyle::Snake),
        );

        assert!(matches!(
            renamer.process_file(&empty),
            FileOutcome::Skipped {
                reason: SkipReason::NoContent(_),
                ..
            }
        ));
        assert!(renamer.gateway.seen.borrow().is_empty());
    }

    #[test]
    fn raster_payload_is_gone_after_a_failed_suggestion() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let scan = dir.path().join("scan.pdf");
        fs::write(&scan, b"%PDF-1.7").expect("write pdf");
        let raster_dir = tempfile::tempdir().expect("create raster dir");
        let raster_root = raster_dir.path().to_path_buf();

        let renamer = Renamer::new(FixedGateway::failing(), options(true, CasingStyle::Snake))
            .with_extractor(move |_, _| {
                let raster = tempfile::Builder::new()
                    .suffix(".jpg")
                    .tempfile_in(&raster_root)?;
                Ok(ExtractedContent::Image(ImageSource::Raster(raster)))
            });
        let outcome = renamer.process_file(&scan);

        assert!(matches!(
            outcome,
            FileOutcome::Skipped {
                reason: SkipReason::NoSuggestion(_),
                ..
            }
        ));
        let seen = renamer.gateway.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with(&format!("image:{}", raster_dir.path().display())));
        let leftovers = fs::read_dir(raster_dir.path())
            .expect("list raster dir")
            .count();
        assert_eq!(leftovers, 0);
        assert!(scan.exists());
    }

    #[test]
    fn wordless_suggestion_is_skipped() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "text").expect("write notes");

        let renamer = Renamer::new(FixedGateway::answering("???"), options(true, CasingStyle::Snake));

        assert!(matches!(
            renamer.process_file(&notes),
            FileOutcome::Skipped {
                reason: SkipReason::NoUsableWords,
                ..
            }
        ));
        assert!(notes.exists());
    }

    #[test]
    fn rename_failure_is_reported_and_batch_continues() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::write(dir.path().join("a.txt"), "alpha").expect("write a");
        fs::write(dir.path().join("b.csv"), "beta").expect("write b");
        // A directory already occupies the destination of a.txt.
        fs::create_dir(dir.path().join("report.txt")).expect("create blocking dir");

        let renamer = Renamer::new(
            FixedGateway::answering("Report"),
            options(true, CasingStyle::Snake),
        );
        let report = renamer.run(dir.path()).expect("run");

        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(
            &report.outcomes[0],
            FileOutcome::RenameFailed { plan, .. } if plan.new_file_name() == "report.txt"
        ));
        assert!(matches!(&report.outcomes[1], FileOutcome::Renamed(_)));
        assert!(dir.path().join("a.txt").exists());
        assert!(dir.path().join("report.csv").exists());
    }

    #[test]
    fn missing_directory_is_the_only_fatal_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let renamer = Renamer::new(
            FixedGateway::answering("x"),
            options(false, CasingStyle::Snake),
        );

        let result = renamer.run(&dir.path().join("nope"));
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[test]
    fn proposes_names_in_each_style() {
        let suggestion = "Quarterly Budget Review";
        let expected = [
            (CasingStyle::Snake, "quarterly_budget_review"),
            (CasingStyle::Kebab, "quarterly-budget-review"),
            (CasingStyle::Camel, "quarterlyBudgetReview"),
            (CasingStyle::Pascal, "QuarterlyBudgetReview"),
            (CasingStyle::Lower, "quarterly budget review"),
            (CasingStyle::Title, "Quarterly Budget Review"),
        ];
        for (style, name) in expected {
            assert_eq!(
                propose_base_name(suggestion, style).as_deref(),
                Some(name),
                "style {style}"
            );
        }
    }

    #[test]
    fn proposals_drop_reserved_characters_and_quotes() {
        assert_eq!(
            propose_base_name("\"Invoice: ACME/2024\"", CasingStyle::Snake).as_deref(),
            Some("invoice_acme_2024")
        );
        assert_eq!(propose_base_name("", CasingStyle::Snake), None);
        assert_eq!(propose_base_name(" ... ", CasingStyle::Title), None);
    }
}
