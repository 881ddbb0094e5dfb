//! Static export: hydrate every page of a site directory into HTML files.
//!
//! The site directory is served to the pages through [`DirSource`], exactly
//! as a browser would fetch it, so a snapshot shows the same content, empty
//! states and failure texts a visitor would see.
//!
//! ```text
//! dist/
//! ├── index.html            # home
//! ├── pages/
//! │   ├── about.html
//! │   └── …
//! ├── content/ img/ css/    # copied as-is
//! ```
//!
//! Pages are independent, so they are rendered in parallel on the global
//! rayon pool. Each page owns its document; nothing is shared but the
//! read-only config and source.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{CONFIG_FILE, ConfigError, SiteConfig};
use crate::content::{CollectionKind, Rejection, validate};
use crate::fetch::{ContentError, ContentFetcher, DirSource};
use crate::paths::Location;
use crate::shell::{PageKind, page_html};
use crate::site::{FadeIn, PageContext, SiteReport, init_site};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
    #[error("Unknown page: {0}")]
    UnknownPage(String),
    #[error("{0} content document(s) could not be loaded")]
    CheckFailed(usize),
}

/// One written page.
#[derive(Debug)]
pub struct PageBuild {
    pub page: PageKind,
    pub report: SiteReport,
}

#[derive(Debug)]
pub struct BuildResult {
    pub pages: Vec<PageBuild>,
    /// Copied static files, relative to the output directory.
    pub assets: Vec<PathBuf>,
}

/// Hydrate one page of the site at `site_root` and return its HTML.
pub fn render_page(
    site_root: &Path,
    config: &SiteConfig,
    page: PageKind,
    year: i32,
) -> (String, SiteReport) {
    let source = DirSource::new(site_root);
    let doc = page.document();
    let ctx = PageContext::new(&doc, &source, config, page.url_path()).with_year(year);
    let report = futures::executor::block_on(init_site(&ctx, &FadeIn));
    let html = page_html(page, &doc, ctx.location.prefix()).into_string();
    (html, report)
}

/// Render every page into `output_dir` and copy the site's static files.
pub fn build(
    site_root: &Path,
    output_dir: &Path,
    config: &SiteConfig,
    year: i32,
) -> Result<BuildResult, BuildError> {
    fs::create_dir_all(output_dir.join("pages"))?;

    let pages = PageKind::ALL
        .par_iter()
        .map(|&page| -> Result<PageBuild, BuildError> {
            let (html, report) = render_page(site_root, config, page, year);
            fs::write(output_dir.join(page.output_path()), html)?;
            Ok(PageBuild { page, report })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let assets = copy_assets(site_root, output_dir)?;
    Ok(BuildResult { pages, assets })
}

/// Copy everything under `site_root` except the config file, hidden files,
/// generated page paths, and the output directory itself when it is nested
/// inside the site.
fn copy_assets(site_root: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let site_abs = fs::canonicalize(site_root)?;
    let output_abs = fs::canonicalize(output_dir)?;

    let mut copied = Vec::new();
    let walker = WalkDir::new(&site_abs)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.path() != output_abs && !e.file_name().to_string_lossy().starts_with('.')
        });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(&site_abs) else {
            continue;
        };
        let generated = PageKind::ALL
            .iter()
            .any(|p| relative == Path::new(p.output_path()));
        if relative == Path::new(CONFIG_FILE) || generated {
            continue;
        }
        let target = output_abs.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)?;
        copied.push(relative.to_path_buf());
    }
    Ok(copied)
}

// ============================================================================
// Content check
// ============================================================================

#[derive(Debug)]
pub enum CheckStatus {
    /// A card collection: records that would render and records left out.
    Records {
        accepted: usize,
        skipped: Vec<(usize, Rejection)>,
    },
    /// A single-shape document that parsed.
    Parsed,
    /// The document does not exist; its region would show the failure text.
    Missing,
    Failed(String),
}

#[derive(Debug)]
pub struct DocumentCheck {
    pub document: String,
    pub status: CheckStatus,
}

/// Documents without a card collection.
const PAGE_DOCUMENTS: [&str; 3] = ["home.json", "about.json", "contacts.json"];

/// Fetch and validate every content document the way the pages would.
pub fn check(site_root: &Path, config: &SiteConfig) -> Vec<DocumentCheck> {
    let source = DirSource::new(site_root);
    let location = Location::new(PageKind::Home.url_path(), &config.pages_segment);
    let fetcher = ContentFetcher::new(&source, &location);

    let mut checks = Vec::new();
    for kind in CollectionKind::ALL {
        let document = kind.document();
        let fetched = futures::executor::block_on(fetcher.fetch_content(&config.document_path(&document)));
        let status = match fetched {
            Ok(content) => {
                let mut accepted = 0;
                let mut skipped = Vec::new();
                for (pos, raw) in content.items.iter().enumerate() {
                    match validate(kind, raw) {
                        Ok(_) => accepted += 1,
                        Err(reason) => skipped.push((pos, reason)),
                    }
                }
                CheckStatus::Records { accepted, skipped }
            }
            Err(e) => failure_status(e),
        };
        checks.push(DocumentCheck { document, status });
    }

    for document in PAGE_DOCUMENTS {
        let fetched = futures::executor::block_on(fetcher.fetch_content(&config.document_path(document)));
        let status = match fetched {
            Ok(_) => CheckStatus::Parsed,
            Err(e) => failure_status(e),
        };
        checks.push(DocumentCheck {
            document: document.to_string(),
            status,
        });
    }
    checks
}

fn failure_status(error: ContentError) -> CheckStatus {
    match error {
        ContentError::Status { status: 404, .. } => CheckStatus::Missing,
        other => CheckStatus::Failed(other.to_string()),
    }
}
