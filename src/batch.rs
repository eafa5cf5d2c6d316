//! Normalizing a set of index pages.
//!
//! Each page is independent: it is read, parsed and walked on its own, so
//! pages run in parallel and a page that cannot be read only costs itself.
//!
//! A manifest lists the pages:
//!
//! ```toml
//! [[page]]
//! source = "shumeic1/index2.html"
//! level_up = "../"
//! volume = "shumeic1"
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use crate::dom::parse_page;
use crate::error::{Error, Result};
use crate::normalize::{NormalizedPage, Normalizer, PageContext};
use crate::render::{NOT_FOUND_PLACEHOLDER, RenderedPage, render_page};
use crate::rules::Rules;

/// One index page to normalize.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageJob {
    pub source: PathBuf,
    #[serde(default)]
    pub level_up: String,
    pub volume: String,
    /// Where the rendered fragment goes, relative to the output directory.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl PageJob {
    pub fn new(source: impl Into<PathBuf>, volume: &str, level_up: &str) -> Self {
        Self {
            source: source.into(),
            level_up: level_up.to_string(),
            volume: volume.to_string(),
            output: None,
        }
    }

    pub fn context(&self) -> PageContext {
        PageContext::new(self.volume.as_str(), self.level_up.as_str())
    }

    /// Output path: the explicit one, or `<volume>/<source file name>`.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            Path::new(&self.volume).join(self.source.file_name().unwrap_or_default())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(rename = "page", default)]
    pub pages: Vec<PageJob>,
}

impl Manifest {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(src)?;
        if manifest.pages.is_empty() {
            return Err(Error::InvalidManifest("no [[page]] entries".to_string()));
        }
        if let Some(job) = manifest.pages.iter().find(|j| j.volume.trim().is_empty()) {
            return Err(Error::InvalidManifest(format!(
                "page {} has an empty volume",
                job.source.display()
            )));
        }
        Ok(manifest)
    }

    /// Load a manifest; relative sources resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut manifest = Self::from_toml_str(&std::fs::read_to_string(path)?)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for job in &mut manifest.pages {
            if job.source.is_relative() {
                job.source = base.join(&job.source);
            }
        }
        Ok(manifest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Normalized(NormalizedPage),
    /// The source could not be read; the page renders as a placeholder.
    Missing { reason: String },
}

#[derive(Debug, Clone)]
pub struct PageReport {
    pub job: PageJob,
    pub outcome: PageOutcome,
}

impl PageReport {
    pub fn render(&self, nav_label: &str) -> RenderedPage {
        match &self.outcome {
            PageOutcome::Normalized(page) => render_page(page, nav_label),
            PageOutcome::Missing { .. } => RenderedPage {
                body: NOT_FOUND_PLACEHOLDER.to_string(),
                jump_nav: String::new(),
            },
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.outcome, PageOutcome::Missing { .. })
    }
}

/// Read, parse and normalize one page.
pub fn process(job: &PageJob, rules: &Rules) -> Result<NormalizedPage> {
    let bytes = std::fs::read(&job.source).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::SourceNotFound(job.source.clone()),
        _ => Error::Io(e),
    })?;
    let dom = parse_page(&bytes);
    Ok(Normalizer::new(rules).normalize_page(&dom, &job.context()))
}

/// Normalize every job in parallel. Reports come back in job order.
pub fn run(jobs: &[PageJob], rules: &Rules) -> Vec<PageReport> {
    jobs.par_iter()
        .map(|job| {
            let outcome = match process(job, rules) {
                Ok(page) => {
                    info!(
                        source = %job.source.display(),
                        topics = page.topic_count(),
                        headers = page.headers.len(),
                        "normalized page"
                    );
                    PageOutcome::Normalized(page)
                }
                Err(e) => {
                    warn!(source = %job.source.display(), error = %e, "skipping page");
                    PageOutcome::Missing {
                        reason: e.to_string(),
                    }
                }
            };
            PageReport {
                job: job.clone(),
                outcome,
            }
        })
        .collect()
}
