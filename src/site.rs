//! Page initialization.
//!
//! A [`PageContext`] bundles everything one page needs: its document, the
//! content source, the site config, where the page lives, and the viewer
//! registry that keeps modal bindings unique across re-initialization.
//!
//! [`init_site`] is the single entry point:
//!
//! 1. mount the layout (header/footer partials, footer year, active nav);
//! 2. notify [`ShellHooks::layout_mounted`];
//! 3. run every region renderer concurrently and wait for all of them to
//!    settle, whatever their outcome;
//! 4. notify [`ShellHooks::collections_settled`] with the per-region report.
//!
//! Regions whose container is missing from the page report
//! [`RegionOutcome::Absent`]; that is the only routing there is.

use futures::future::join_all;

use crate::blocks;
use crate::cards::CardContext;
use crate::collection;
use crate::config::SiteConfig;
use crate::content::CollectionKind;
use crate::dom::Document;
use crate::fetch::{ContentFetcher, ContentSource};
use crate::layout::{self, LayoutReport};
use crate::paths::Location;
use crate::viewer::ViewerRegistry;

/// One hydratable region of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Home,
    About,
    Collection(CollectionKind),
    Contacts,
}

impl Region {
    /// Every region, in initialization order.
    pub const ALL: [Region; 7] = [
        Region::Home,
        Region::About,
        Region::Collection(CollectionKind::Sellers),
        Region::Collection(CollectionKind::Sponsors),
        Region::Collection(CollectionKind::Gallery),
        Region::Collection(CollectionKind::Social),
        Region::Contacts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::Home => "home",
            Region::About => "about",
            Region::Collection(kind) => kind.name(),
            Region::Contacts => "contacts",
        }
    }
}

/// What happened to one region during initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionOutcome {
    /// The page has no container for this region.
    Absent,
    /// Content was rendered. `skipped` counts records that failed validation.
    Rendered { shown: usize, skipped: usize },
    /// The document could not be fetched or parsed; the failure text is shown.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub layout: LayoutReport,
    pub regions: Vec<(Region, RegionOutcome)>,
}

impl SiteReport {
    pub fn outcome(&self, region: Region) -> Option<&RegionOutcome> {
        self.regions
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, outcome)| outcome)
    }

    /// Regions that ran, i.e. everything but [`RegionOutcome::Absent`].
    pub fn present(&self) -> impl Iterator<Item = &(Region, RegionOutcome)> {
        self.regions
            .iter()
            .filter(|(_, outcome)| *outcome != RegionOutcome::Absent)
    }

    pub fn failures(&self) -> impl Iterator<Item = (Region, &str)> {
        self.regions.iter().filter_map(|(r, outcome)| match outcome {
            RegionOutcome::Failed(reason) => Some((*r, reason.as_str())),
            _ => None,
        })
    }
}

/// Callbacks into the page shell.
pub trait ShellHooks {
    /// Partials are in place; renderers have not started yet.
    fn layout_mounted(&self, _doc: &Document) {}

    /// Every renderer has settled and newly inserted nodes are in the tree.
    fn collections_settled(&self, _doc: &Document, _report: &SiteReport) {}
}

pub struct NoHooks;

impl ShellHooks for NoHooks {}

/// Reveals `.fade-in` elements once after layout mount and again after the
/// regions settle, so nodes inserted by renderers are picked up too. Without
/// a viewport every element counts as intersecting.
pub struct FadeIn;

impl FadeIn {
    pub fn reveal(doc: &Document) -> usize {
        let pending: Vec<_> = doc
            .query_all(".fade-in")
            .into_iter()
            .filter(|n| !doc.has_class(*n, "is-visible"))
            .collect();
        for node in &pending {
            doc.add_class(*node, "is-visible");
        }
        pending.len()
    }
}

impl ShellHooks for FadeIn {
    fn layout_mounted(&self, doc: &Document) {
        FadeIn::reveal(doc);
    }

    fn collections_settled(&self, doc: &Document, _report: &SiteReport) {
        FadeIn::reveal(doc);
    }
}

/// Everything one page needs to hydrate.
pub struct PageContext<'a, S> {
    pub doc: &'a Document,
    pub source: &'a S,
    pub config: &'a SiteConfig,
    pub location: Location,
    /// Written into the footer's `#year`.
    pub year: i32,
    pub viewers: ViewerRegistry,
}

impl<'a, S: ContentSource> PageContext<'a, S> {
    /// Context for the page served at `pathname` (e.g. `/pages/sellers.html`),
    /// dated with the current local year.
    pub fn new(doc: &'a Document, source: &'a S, config: &'a SiteConfig, pathname: &str) -> Self {
        Self {
            doc,
            source,
            config,
            location: Location::new(pathname, &config.pages_segment),
            year: layout::current_year(),
            viewers: ViewerRegistry::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn fetcher(&self) -> ContentFetcher<'_, S> {
        ContentFetcher::new(self.source, &self.location)
    }

    pub fn card_context(&self) -> CardContext<'_> {
        CardContext {
            prefix: self.location.prefix(),
            labels: &self.config.labels,
            social_opens_viewer: self.config.viewer.social_opens_viewer,
        }
    }

    /// The page identity from `<body data-page="…">`.
    pub fn page_name(&self) -> Option<String> {
        self.doc.attr(self.doc.root(), "data-page")
    }
}

async fn render_region<S: ContentSource>(page: &PageContext<'_, S>, region: Region) -> RegionOutcome {
    match region {
        Region::Home => blocks::render_home(page).await,
        Region::About => blocks::render_about(page).await,
        Region::Collection(kind) => collection::render_collection(page, kind).await,
        Region::Contacts => blocks::render_contacts(page).await,
    }
}

/// Hydrate the page. Safe to call again on the same context: regions
/// re-render and viewers keep their single binding.
pub async fn init_site<S, H>(page: &PageContext<'_, S>, hooks: &H) -> SiteReport
where
    S: ContentSource,
    H: ShellHooks + ?Sized,
{
    let layout = layout::mount_layout(page).await;
    hooks.layout_mounted(page.doc);

    let outcomes = join_all(Region::ALL.map(|region| render_region(page, region))).await;
    let report = SiteReport {
        layout,
        regions: Region::ALL.into_iter().zip(outcomes).collect(),
    };
    for (region, reason) in report.failures() {
        log::debug!("region {} settled with failure: {reason}", region.name());
    }

    hooks.collections_settled(page.doc, &report);
    report
}
