//! Collection renderer: content document → validated records → cards.
//!
//! One run per card collection present on the page:
//!
//! 1. No `#<kind>-grid` container: nothing happens.
//! 2. Fetch `<content_root>/<kind>.json`. On failure the container is
//!    emptied, an already-bound viewer loses its items, the intro shows the
//!    configured failure text and the run stops.
//! 3. Title and intro are overwritten when the document provides them.
//! 4. Records are validated; rejects are logged and left out.
//! 5. The container is cleared and refilled with one card per record.
//! 6. The region's viewer (if any) gets the accepted records as its items,
//!    and cards that open a viewer are wired to it.
//! 7. No accepted records: the intro shows the configured empty text.

use std::rc::Rc;

use crate::cards::build_card;
use crate::content::{
    CollectionKind, ContentRecord, GalleryPhoto, Record, Seller, SocialPost, Sponsor,
    validate_all,
};
use crate::dom::{EventKind, NodeId};
use crate::fetch::ContentSource;
use crate::site::{PageContext, RegionOutcome};
use crate::viewer::{self, ViewerHandle};

/// Render one card collection into its container.
pub async fn render_collection<S: ContentSource>(
    page: &PageContext<'_, S>,
    kind: CollectionKind,
) -> RegionOutcome {
    let doc = page.doc;
    let Some(container) = doc.query(&kind.container()) else {
        return RegionOutcome::Absent;
    };
    let title = doc.query(&kind.title_selector());
    let intro = doc.query(&kind.intro_selector());
    let messages = page.config.messages.for_collection(kind);

    let path = page.config.document_path(&kind.document());
    let content = match page.fetcher().fetch_content(&path).await {
        Ok(content) => content,
        Err(e) => {
            log::error!("{} region: {e}", kind.name());
            doc.clear_children(container);
            clear_viewer(page, kind);
            if let Some(intro) = intro {
                doc.set_text(intro, &messages.failed);
            }
            return RegionOutcome::Failed(e.to_string());
        }
    };

    if let (Some(el), Some(text)) = (title, &content.title) {
        doc.set_text(el, text);
    }
    if let (Some(el), Some(text)) = (intro, &content.intro) {
        doc.set_text(el, text);
    }

    let prefix = page.location.prefix();
    let labels = &page.config.labels;
    let (shown, skipped) = match kind {
        CollectionKind::Sellers => {
            let viewer = viewer::bind_seller(
                doc,
                &page.viewers,
                prefix,
                labels,
                page.config.viewer.seller_max_photos,
            );
            mount::<Seller, S>(page, container, &content.items, viewer)
        }
        CollectionKind::Sponsors => mount::<Sponsor, S>(page, container, &content.items, None),
        CollectionKind::Gallery => {
            let viewer = viewer::bind_gallery(doc, &page.viewers, prefix);
            mount::<GalleryPhoto, S>(page, container, &content.items, viewer)
        }
        CollectionKind::Social => {
            let viewer = viewer::bind_social(doc, &page.viewers, prefix, labels);
            mount::<SocialPost, S>(page, container, &content.items, viewer)
        }
    };

    if shown == 0 {
        if let Some(intro) = intro {
            doc.set_text(intro, &messages.empty);
        }
    }
    RegionOutcome::Rendered { shown, skipped }
}

/// Empty the items of the region's viewer if one was bound by an earlier
/// render. Never binds.
fn clear_viewer<S: ContentSource>(page: &PageContext<'_, S>, kind: CollectionKind) {
    fn reset<T: 'static, S: ContentSource>(page: &PageContext<'_, S>, modal_id: &str) {
        if let Some(modal) = page.doc.get_by_id(modal_id)
            && let Some(handle) = page.viewers.get::<T>(modal)
        {
            handle.borrow_mut().set_items(page.doc, Vec::new());
        }
    }
    match kind {
        CollectionKind::Sellers => reset::<Seller, S>(page, viewer::SELLER_MODAL),
        CollectionKind::Gallery => reset::<GalleryPhoto, S>(page, viewer::GALLERY_MODAL),
        CollectionKind::Social => reset::<SocialPost, S>(page, viewer::SOCIAL_MODAL),
        CollectionKind::Sponsors => {}
    }
}

/// Validate, build and mount the cards; hand the records to the viewer.
/// Returns `(shown, skipped)`.
fn mount<R, S>(
    page: &PageContext<'_, S>,
    container: NodeId,
    items: &[serde_json::Value],
    viewer: Option<ViewerHandle<R>>,
) -> (usize, usize)
where
    R: ContentRecord + Into<Record>,
    S: ContentSource,
{
    let doc = page.doc;
    let validated = validate_all::<R>(items);
    for (pos, reason) in &validated.skipped {
        log::debug!("{}: skipping item {pos}: {reason}", R::KIND.name());
    }

    let ctx = page.card_context();
    doc.clear_children(container);
    for (index, record) in validated.records.iter().enumerate() {
        let card = build_card(doc, &record.clone().into(), index, &ctx);
        doc.append(container, card.node);

        if let (Some(open_at), Some(handle)) = (card.opens, &viewer) {
            let handle = handle.clone();
            doc.add_listener(
                card.node,
                EventKind::Click,
                Rc::new(move |doc, event| {
                    event.prevent_default();
                    handle.borrow_mut().open(doc, open_at);
                }),
            );
        }
    }

    let shown = validated.records.len();
    if let Some(handle) = viewer {
        handle.borrow_mut().set_items(doc, validated.records);
    }
    (shown, validated.skipped.len())
}
