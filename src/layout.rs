//! Layout mount: header/footer partials, footer year, active navigation.
//!
//! Everything here is best-effort. A page without `#site-header` simply
//! gets no header; a partial that cannot be fetched is logged at `warn`
//! and the page keeps whatever markup it shipped with.

use chrono::Datelike;

use crate::fetch::ContentSource;
use crate::site::PageContext;

/// What the layout mount managed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub header: bool,
    pub footer: bool,
    /// A navigation link matching the page identity was marked active.
    pub active_nav: bool,
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Fetch `partial` into `#target`. Returns whether anything was injected.
async fn inject<S: ContentSource>(page: &PageContext<'_, S>, target: &str, partial: &str) -> bool {
    let Some(el) = page.doc.get_by_id(target) else {
        return false;
    };
    match page.fetcher().fetch_text(partial).await {
        Ok(html) => {
            page.doc.set_inner_html(el, &html);
            true
        }
        Err(e) => {
            log::warn!("#{target}: {e}");
            false
        }
    }
}

/// Inject both partials concurrently, then fill in the year and mark the
/// active navigation entry. The latter two run after injection because
/// `#year` and the nav links normally live inside the partials.
pub async fn mount_layout<S: ContentSource>(page: &PageContext<'_, S>) -> LayoutReport {
    let partials = &page.config.partials;
    let (header, footer) = futures::join!(
        inject(page, "site-header", &partials.header),
        inject(page, "site-footer", &partials.footer),
    );

    let doc = page.doc;
    if let Some(year) = doc.get_by_id("year") {
        doc.set_text(year, &page.year.to_string());
    }

    let active = page
        .page_name()
        .and_then(|name| doc.query(&format!("a[data-nav=\"{name}\"]")));
    if let Some(link) = active {
        doc.add_class(link, "is-active");
    }

    LayoutReport {
        header,
        footer,
        active_nav: active.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::dom::Document;
    use crate::fetch::MemorySource;
    use futures::executor::block_on;

    const HEADER: &str = r#"<nav><a data-nav="home" href="../index.html">Home</a><a data-nav="gallery" href="gallery.html">Gallery</a></nav>"#;
    const FOOTER: &str = r#"<p>&copy; <span id="year"></span> Market</p>"#;

    fn page_with_shell(page: &str) -> Document {
        let doc = Document::new();
        doc.set_attr(doc.root(), "data-page", page);
        doc.set_inner_html(
            doc.root(),
            r#"<header id="site-header"></header><main></main><footer id="site-footer"></footer>"#,
        );
        doc
    }

    #[test]
    fn nested_page_fetches_partials_with_prefix() {
        let doc = page_with_shell("gallery");
        let source = MemorySource::new()
            .with_body("/partials/header.html", HEADER)
            .with_body("/partials/footer.html", FOOTER);
        let config = SiteConfig::default();
        let page = PageContext::new(&doc, &source, &config, "/pages/gallery.html").with_year(2031);

        let report = block_on(mount_layout(&page));

        assert_eq!(
            report,
            LayoutReport {
                header: true,
                footer: true,
                active_nav: true
            }
        );
        assert_eq!(doc.text(doc.get_by_id("year").unwrap()), "2031");
        let gallery = doc.query("a[data-nav=\"gallery\"]").unwrap();
        assert!(doc.has_class(gallery, "is-active"));
        let home = doc.query("a[data-nav=\"home\"]").unwrap();
        assert!(!doc.has_class(home, "is-active"));
        let mut requests = source.requests();
        requests.sort();
        assert_eq!(requests, vec!["/partials/footer.html", "/partials/header.html"]);
    }

    #[test]
    fn failed_partial_keeps_page_markup() {
        let doc = page_with_shell("home");
        let header = doc.get_by_id("site-header").unwrap();
        doc.set_text(header, "static header");
        let source = MemorySource::new().with_status("/partials/header.html", 404);
        let config = SiteConfig::default();
        let page = PageContext::new(&doc, &source, &config, "/index.html");

        let report = block_on(mount_layout(&page));

        assert!(!report.header);
        assert!(!report.active_nav);
        assert_eq!(doc.text(header), "static header");
    }

    #[test]
    fn missing_targets_are_not_fetched() {
        let doc = Document::new();
        let source = MemorySource::new();
        let config = SiteConfig::default();
        let page = PageContext::new(&doc, &source, &config, "/index.html");

        assert_eq!(block_on(mount_layout(&page)), LayoutReport::default());
        assert!(source.requests().is_empty());
    }
}
