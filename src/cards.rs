//! Card builders: one validated record in, one detached card element out.
//!
//! Builders only create nodes. Whether a click opens a viewer is reported
//! back through [`Card::opens`]; the collection renderer does the wiring,
//! so the same builders serve static snapshots and live pages.
//!
//! | Record         | Element                         | Click                 |
//! |----------------|---------------------------------|-----------------------|
//! | `Seller`       | `button.grid-item`              | opens seller detail   |
//! | `Sponsor`      | `a.grid-item` / `div` (no url)  | follows link / none   |
//! | `GalleryPhoto` | `button.gallery-item`           | opens gallery viewer  |
//! | `SocialPost`   | `a.social-item`                 | follows link          |

use crate::config::LabelsConfig;
use crate::content::{GalleryPhoto, Record, Seller, SocialPost, Sponsor};
use crate::dom::{Document, NodeId};
use crate::paths::PathPrefix;

/// Everything a builder needs besides the record.
#[derive(Debug, Clone, Copy)]
pub struct CardContext<'a> {
    pub prefix: PathPrefix,
    pub labels: &'a LabelsConfig,
    /// Social tiles report an index to open instead of only linking out.
    pub social_opens_viewer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub node: NodeId,
    /// Viewer index this card opens when clicked.
    pub opens: Option<usize>,
}

/// Build the card for `record`, the `index`-th accepted record of its
/// collection.
pub fn build_card(doc: &Document, record: &Record, index: usize, ctx: &CardContext) -> Card {
    match record {
        Record::Seller(seller) => Card {
            node: seller_card(doc, seller, index, ctx),
            opens: Some(index),
        },
        Record::Sponsor(sponsor) => Card {
            node: sponsor_card(doc, sponsor, ctx),
            opens: None,
        },
        Record::Gallery(photo) => Card {
            node: gallery_card(doc, photo, index, ctx),
            opens: Some(index),
        },
        Record::Social(post) => Card {
            node: social_card(doc, post, ctx),
            opens: ctx.social_opens_viewer.then_some(index),
        },
    }
}

pub fn seller_card(doc: &Document, seller: &Seller, index: usize, ctx: &CardContext) -> NodeId {
    let el = doc.create_element("button");
    doc.set_attr(el, "type", "button");
    doc.set_attr(el, "class", "grid-item");
    doc.set_attr(
        el,
        "aria-label",
        &format!("{}: {}", ctx.labels.seller_detail, seller.name),
    );
    doc.set_attr(el, "data-index", &index.to_string());
    append_logo_block(
        doc,
        el,
        ctx.prefix,
        &seller.name,
        &seller.logo,
        seller.logo_alt.as_deref(),
        seller.meta.as_deref(),
    );
    el
}

pub fn sponsor_card(doc: &Document, sponsor: &Sponsor, ctx: &CardContext) -> NodeId {
    let el = match &sponsor.url {
        Some(url) => {
            let a = doc.create_element("a");
            doc.set_attr(a, "class", "grid-item");
            doc.set_attr(a, "href", url);
            doc.set_attr(a, "target", "_blank");
            doc.set_attr(a, "rel", "noopener noreferrer");
            doc.set_attr(
                a,
                "aria-label",
                &format!("{} ({})", sponsor.name, ctx.labels.sponsor_open_site),
            );
            a
        }
        None => {
            let div = doc.create_element("div");
            doc.set_attr(div, "class", "grid-item grid-item--static");
            doc.set_attr(div, "role", "group");
            doc.set_attr(div, "aria-label", &sponsor.name);
            div
        }
    };
    doc.set_attr(el, "data-type", "sponsor");
    append_logo_block(
        doc,
        el,
        ctx.prefix,
        &sponsor.name,
        &sponsor.logo,
        sponsor.logo_alt.as_deref(),
        sponsor.meta.as_deref(),
    );
    el
}

pub fn gallery_card(doc: &Document, photo: &GalleryPhoto, index: usize, ctx: &CardContext) -> NodeId {
    let el = doc.create_element("button");
    doc.set_attr(el, "type", "button");
    doc.set_attr(el, "class", "gallery-item");
    let label = photo
        .caption
        .clone()
        .or_else(|| photo.alt.clone())
        .unwrap_or_else(|| format!("{} {}", ctx.labels.gallery_tile, index + 1));
    doc.set_attr(el, "aria-label", &label);
    doc.set_attr(el, "data-index", &index.to_string());
    let img = lazy_img(doc, ctx.prefix, &photo.src, photo.alt.as_deref().unwrap_or(""));
    doc.append(el, img);
    el
}

pub fn social_card(doc: &Document, post: &SocialPost, ctx: &CardContext) -> NodeId {
    let a = doc.create_element("a");
    doc.set_attr(a, "class", "social-item");
    doc.set_attr(a, "href", &post.url);
    doc.set_attr(a, "target", "_blank");
    doc.set_attr(a, "rel", "noopener noreferrer");
    doc.set_attr(
        a,
        "aria-label",
        post.alt.as_deref().unwrap_or(&ctx.labels.social_tile),
    );
    let img = lazy_img(doc, ctx.prefix, &post.src, post.alt.as_deref().unwrap_or(""));
    doc.append(a, img);
    a
}

fn lazy_img(doc: &Document, prefix: PathPrefix, src: &str, alt: &str) -> NodeId {
    let img = doc.create_element("img");
    doc.set_attr(img, "loading", "lazy");
    doc.set_attr(img, "src", &prefix.apply(src));
    doc.set_attr(img, "alt", alt);
    img
}

/// Logo, title and optional meta line shared by seller and sponsor cards.
fn append_logo_block(
    doc: &Document,
    card: NodeId,
    prefix: PathPrefix,
    name: &str,
    logo: &str,
    logo_alt: Option<&str>,
    meta: Option<&str>,
) {
    let alt = logo_alt
        .map(str::to_string)
        .unwrap_or_else(|| format!("{name} logo"));
    let img = lazy_img(doc, prefix, logo, &alt);
    doc.set_attr(img, "class", "grid-item__logo");

    let text = doc.create_element("div");
    doc.set_attr(text, "class", "grid-item__text");
    let title = doc.create_element("h2");
    doc.set_attr(title, "class", "grid-item__title");
    doc.set_text(title, name);
    doc.append(text, title);
    if let Some(meta) = meta {
        let p = doc.create_element("p");
        doc.set_attr(p, "class", "grid-item__meta");
        doc.set_text(p, meta);
        doc.append(text, p);
    }

    doc.append(card, img);
    doc.append(card, text);
}
