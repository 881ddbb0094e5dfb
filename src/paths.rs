//! Page-depth path prefixing and URL resolution.
//!
//! Content documents and asset paths are authored relative to the site root
//! (`content/sellers.json`, `img/logo.png`). Pages live at two depths: the
//! home page at the root and every other page under a `pages/` directory.
//! Rather than configuring each page, the prefix is derived from where the
//! current page lives:
//!
//! ```text
//! /index.html          + img/logo.png  →  img/logo.png
//! /pages/sellers.html  + img/logo.png  →  ../img/logo.png
//! ```
//!
//! Records keep the unprefixed path so the same document serves both depths.

use url::Url;

/// Stand-in origin that page paths are resolved against.
const SITE_ORIGIN: &str = "http://site.invalid/";

/// Directory segment that marks a nested page.
pub const DEFAULT_PAGES_SEGMENT: &str = "/pages/";

/// The relative prefix for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPrefix {
    /// Page lives at the site root; paths are used as-is.
    Root,
    /// Page lives one level down; paths get `../`.
    Nested,
}

impl PathPrefix {
    /// Derive the prefix from the current page path (`location.pathname`).
    pub fn for_location(pathname: &str, pages_segment: &str) -> Self {
        if !pages_segment.is_empty() && pathname.contains(pages_segment) {
            PathPrefix::Nested
        } else {
            PathPrefix::Root
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PathPrefix::Root => "",
            PathPrefix::Nested => "../",
        }
    }

    /// Prefix a record-supplied relative path.
    pub fn apply(self, relative: &str) -> String {
        format!("{}{}", self.as_str(), relative)
    }
}

/// Where the page being hydrated lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pathname: String,
    prefix: PathPrefix,
}

impl Location {
    pub fn new(pathname: &str, pages_segment: &str) -> Self {
        let pathname = if pathname.starts_with('/') {
            pathname.to_string()
        } else {
            format!("/{pathname}")
        };
        let prefix = PathPrefix::for_location(&pathname, pages_segment);
        Self { pathname, prefix }
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    pub fn prefix(&self) -> PathPrefix {
        self.prefix
    }

    /// Shorthand for `self.prefix().apply(relative)`.
    pub fn with_prefix(&self, relative: &str) -> String {
        self.prefix.apply(relative)
    }

    /// Resolve a page-relative URL to a site-absolute path, the way a browser
    /// resolves `fetch("../content/x.json")`. Rooted paths are normalized;
    /// URLs on another origin pass through untouched. The fragment is dropped
    /// and the query kept.
    pub fn resolve(&self, url: &str) -> String {
        let Ok(origin) = Url::parse(SITE_ORIGIN) else {
            return url.to_string();
        };
        let resolved = origin
            .join(&self.pathname)
            .and_then(|page| page.join(url));
        match resolved {
            Ok(target) if target.origin() == origin.origin() => match target.query() {
                Some(query) => format!("{}?{}", target.path(), query),
                None => target.path().to_string(),
            },
            Ok(target) => target.to_string(),
            Err(_) => url.to_string(),
        }
    }
}
