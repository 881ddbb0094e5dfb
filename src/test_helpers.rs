//! Shared test utilities.
//!
//! Content documents come straight from `fixtures/site/content/`, so unit
//! tests and the CLI integration tests agree on what the sample site holds.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let doc = page_document();
//! let source = MemorySource::new().with_body("/content/gallery.json", gallery_json());
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::dom::Document;
use crate::shell;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Documents
// =========================================================================

/// A bare page carrying all three viewer modals, gallery lightbox first.
pub fn page_document() -> Document {
    let doc = Document::new();
    let markup = format!(
        "<main></main>{}{}{}",
        shell::lightbox().into_string(),
        shell::seller_modal().into_string(),
        shell::social_lightbox().into_string(),
    );
    doc.set_inner_html(doc.root(), &markup);
    doc
}

// =========================================================================
// Content fixtures
// =========================================================================

/// Four photos, the second without `src`.
pub fn gallery_json() -> &'static str {
    include_str!("../fixtures/site/content/gallery.json")
}

/// Four sellers, the third without a logo.
pub fn sellers_json() -> &'static str {
    include_str!("../fixtures/site/content/sellers.json")
}

/// Two featured sponsors and three featured posts, the last without a url.
pub fn home_json() -> &'static str {
    include_str!("../fixtures/site/content/home.json")
}

pub fn contacts_json() -> &'static str {
    include_str!("../fixtures/site/content/contacts.json")
}
