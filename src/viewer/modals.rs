//! The three concrete viewers.
//!
//! | Viewer        | Modal              | Item           | Arrow keys |
//! |---------------|--------------------|----------------|------------|
//! | gallery       | `#lightbox`        | `GalleryPhoto` | yes        |
//! | seller detail | `#seller-modal`    | `Seller`       | no         |
//! | social post   | `#social-lightbox` | `SocialPost`   | yes        |
//!
//! Display fields are looked up by id on every open, so a modal whose inner
//! markup is partially missing still opens and fills what it can.

use super::controller::{ViewerController, ViewerHandle};
use super::registry::{Controls, ViewerRegistry};
use crate::config::LabelsConfig;
use crate::content::{GalleryPhoto, Link, LinkKind, Seller, SocialPost};
use crate::dom::{Document, NodeId};
use crate::paths::PathPrefix;

pub const GALLERY_MODAL: &str = "lightbox";
pub const SELLER_MODAL: &str = "seller-modal";
pub const SOCIAL_MODAL: &str = "social-lightbox";

const LIGHTBOX_CONTROLS: Controls = Controls {
    close: ".lightbox__close",
    prev: Some(".lightbox__nav--prev"),
    next: Some(".lightbox__nav--next"),
};

const SELLER_CONTROLS: Controls = Controls {
    close: ".seller-modal__close",
    prev: None,
    next: None,
};

/// Bind (or fetch the already-bound) gallery lightbox. `None` when the page
/// has no `#lightbox`.
pub fn bind_gallery(
    doc: &Document,
    registry: &ViewerRegistry,
    prefix: PathPrefix,
) -> Option<ViewerHandle<GalleryPhoto>> {
    let modal = doc.get_by_id(GALLERY_MODAL)?;
    registry.bind(doc, modal, LIGHTBOX_CONTROLS, move || {
        ViewerController::new(
            modal,
            Box::new(move |doc, _, photo: &GalleryPhoto| populate_gallery(doc, prefix, photo)),
        )
        .with_arrow_keys()
    })
}

/// Bind (or fetch the already-bound) seller detail modal.
pub fn bind_seller(
    doc: &Document,
    registry: &ViewerRegistry,
    prefix: PathPrefix,
    labels: &LabelsConfig,
    max_photos: usize,
) -> Option<ViewerHandle<Seller>> {
    let modal = doc.get_by_id(SELLER_MODAL)?;
    let labels = labels.clone();
    registry.bind(doc, modal, SELLER_CONTROLS, move || {
        ViewerController::new(
            modal,
            Box::new(move |doc, _, seller: &Seller| {
                populate_seller(doc, prefix, &labels, max_photos, seller)
            }),
        )
    })
}

/// Bind (or fetch the already-bound) social post lightbox.
pub fn bind_social(
    doc: &Document,
    registry: &ViewerRegistry,
    prefix: PathPrefix,
    labels: &LabelsConfig,
) -> Option<ViewerHandle<SocialPost>> {
    let modal = doc.get_by_id(SOCIAL_MODAL)?;
    let cta = labels.social_post_cta.clone();
    registry.bind(doc, modal, LIGHTBOX_CONTROLS, move || {
        ViewerController::new(
            modal,
            Box::new(move |doc, _, post: &SocialPost| populate_social(doc, prefix, &cta, post)),
        )
        .with_arrow_keys()
    })
}

fn populate_gallery(doc: &Document, prefix: PathPrefix, photo: &GalleryPhoto) {
    let Some(img) = doc.get_by_id("lightbox-img") else {
        return;
    };
    doc.set_attr(img, "src", &prefix.apply(&photo.src));
    doc.set_attr(img, "alt", photo.alt.as_deref().unwrap_or(""));
    if let Some(caption) = doc.get_by_id("lightbox-caption") {
        doc.set_text(caption, photo.caption.as_deref().unwrap_or(""));
    }
}

fn populate_social(doc: &Document, prefix: PathPrefix, cta: &str, post: &SocialPost) {
    let Some(img) = doc.get_by_id("social-lightbox-img") else {
        return;
    };
    doc.set_attr(img, "src", &prefix.apply(&post.src));
    doc.set_attr(img, "alt", post.alt.as_deref().unwrap_or(""));
    if let Some(caption) = doc.get_by_id("social-lightbox-caption") {
        doc.set_text(caption, post.caption.as_deref().unwrap_or(""));
    }
    if let Some(actions) = doc.get_by_id("social-lightbox-actions") {
        doc.clear_children(actions);
        let a = external_button(doc, &post.url, cta);
        doc.append(actions, a);
    }
}

fn populate_seller(
    doc: &Document,
    prefix: PathPrefix,
    labels: &LabelsConfig,
    max_photos: usize,
    seller: &Seller,
) {
    if let Some(title) = doc.get_by_id("seller-modal-title") {
        doc.set_text(title, &seller.name);
    }
    for (id, value) in [
        ("seller-modal-meta", &seller.meta),
        ("seller-modal-desc", &seller.description),
    ] {
        if let Some(el) = doc.get_by_id(id) {
            doc.set_text(el, value.as_deref().unwrap_or(""));
            doc.set_hidden(el, value.is_none());
        }
    }

    if let Some(photos) = doc.get_by_id("seller-modal-photos") {
        doc.clear_children(photos);
        let slots = &seller.photos[..seller.photos.len().min(max_photos)];
        doc.set_hidden(photos, slots.is_empty());
        for (i, slot) in slots.iter().enumerate() {
            let Some(photo) = slot else { continue };
            let img = doc.create_element("img");
            doc.set_attr(img, "loading", "lazy");
            doc.set_attr(img, "src", &prefix.apply(&photo.src));
            let alt = match &photo.alt {
                Some(alt) => alt.clone(),
                None => format!("{} – {} {}", seller.name, labels.photo, i + 1),
            };
            doc.set_attr(img, "alt", &alt);
            doc.append(photos, img);
        }
    }

    if let Some(actions) = doc.get_by_id("seller-modal-actions") {
        doc.clear_children(actions);
        doc.set_hidden(actions, seller.link.is_none());
        if let Some(link) = &seller.link {
            let a = external_button(doc, &link.url, &action_label(link, labels));
            doc.append(actions, a);
        }
    }
}

/// Button text for a seller's action link: the record's own label, else the
/// default for its link kind.
pub fn action_label(link: &Link, labels: &LabelsConfig) -> String {
    match (&link.label, link.kind) {
        (Some(label), _) => label.clone(),
        (None, LinkKind::Social) => labels.seller_social_cta.clone(),
        (None, LinkKind::Web) => labels.seller_web_cta.clone(),
    }
}

fn external_button(doc: &Document, href: &str, text: &str) -> NodeId {
    let a = doc.create_element("a");
    doc.set_attr(a, "class", "btn btn--secondary");
    doc.set_attr(a, "href", href);
    doc.set_attr(a, "target", "_blank");
    doc.set_attr(a, "rel", "noopener noreferrer");
    doc.set_text(a, text);
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Photo;
    use crate::dom::{Event, Key};
    use crate::test_helpers::page_document;
    use crate::viewer::ViewerState;

    fn seller(photos: Vec<Option<Photo>>, link: Option<Link>) -> Seller {
        Seller {
            name: "Bakery".into(),
            logo: "img/bakery.png".into(),
            logo_alt: None,
            meta: Some("Bread".into()),
            description: None,
            photos,
            link,
        }
    }

    fn photo(src: &str) -> Option<Photo> {
        Some(Photo {
            src: src.into(),
            alt: None,
        })
    }

    #[test]
    fn gallery_populates_image_and_caption() {
        let doc = page_document();
        let registry = ViewerRegistry::new();
        let viewer = bind_gallery(&doc, &registry, PathPrefix::Nested).unwrap();
        let photos = vec![
            GalleryPhoto {
                src: "img/a.jpg".into(),
                alt: Some("A".into()),
                caption: Some("First".into()),
            },
            GalleryPhoto {
                src: "img/b.jpg".into(),
                alt: None,
                caption: None,
            },
        ];
        viewer.borrow_mut().set_items(&doc, photos);
        viewer.borrow_mut().open(&doc, 0);

        let img = doc.get_by_id("lightbox-img").unwrap();
        assert_eq!(doc.attr(img, "src").as_deref(), Some("../img/a.jpg"));
        assert_eq!(doc.attr(img, "alt").as_deref(), Some("A"));
        assert_eq!(doc.text(doc.get_by_id("lightbox-caption").unwrap()), "First");

        doc.dispatch(&Event::key(doc.root(), Key::ArrowRight));
        assert_eq!(viewer.borrow().state(), ViewerState::Open(1));
        assert_eq!(doc.attr(img, "alt").as_deref(), Some(""));
        assert_eq!(doc.text(doc.get_by_id("lightbox-caption").unwrap()), "");
    }

    #[test]
    fn seller_detail_caps_photos_and_generates_alt() {
        let doc = page_document();
        let registry = ViewerRegistry::new();
        let labels = LabelsConfig::default();
        let viewer = bind_seller(&doc, &registry, PathPrefix::Root, &labels, 3).unwrap();
        let record = seller(
            vec![photo("1.jpg"), None, photo("3.jpg"), photo("4.jpg")],
            None,
        );
        viewer.borrow_mut().set_items(&doc, vec![record]);
        viewer.borrow_mut().open(&doc, 0);

        let photos = doc.get_by_id("seller-modal-photos").unwrap();
        let imgs = doc.children(photos);
        assert_eq!(imgs.len(), 2);
        assert_eq!(doc.attr(imgs[1], "src").as_deref(), Some("3.jpg"));
        assert_eq!(doc.attr(imgs[1], "alt").as_deref(), Some("Bakery – photo 3"));

        assert!(!doc.is_hidden(doc.get_by_id("seller-modal-meta").unwrap()));
        assert!(doc.is_hidden(doc.get_by_id("seller-modal-desc").unwrap()));
        assert!(doc.is_hidden(doc.get_by_id("seller-modal-actions").unwrap()));
    }

    #[test]
    fn seller_action_label_defaults_by_kind() {
        let doc = page_document();
        let registry = ViewerRegistry::new();
        let labels = LabelsConfig::default();
        let viewer = bind_seller(&doc, &registry, PathPrefix::Root, &labels, 3).unwrap();
        let social = Link {
            kind: LinkKind::Social,
            url: "https://ig.example".into(),
            label: None,
        };
        let custom = Link {
            kind: LinkKind::Web,
            url: "https://shop.example".into(),
            label: Some("Shop now".into()),
        };
        viewer
            .borrow_mut()
            .set_items(&doc, vec![seller(vec![], Some(social)), seller(vec![], Some(custom))]);

        let actions = doc.get_by_id("seller-modal-actions").unwrap();
        viewer.borrow_mut().open(&doc, 0);
        let a = doc.query_within(actions, "a").unwrap();
        assert_eq!(doc.text(a), "Open social profiles");
        assert_eq!(doc.attr(a, "rel").as_deref(), Some("noopener noreferrer"));
        assert!(!doc.is_hidden(actions));
        assert!(doc.is_hidden(doc.get_by_id("seller-modal-photos").unwrap()));

        viewer.borrow_mut().step(&doc, 1);
        let a = doc.query_within(actions, "a").unwrap();
        assert_eq!(doc.text(a), "Shop now");
        assert_eq!(doc.attr(a, "href").as_deref(), Some("https://shop.example"));
        assert_eq!(doc.query_all_within(actions, "a").len(), 1);
    }

    #[test]
    fn seller_ignores_arrow_keys_but_closes_on_escape() {
        let doc = page_document();
        let registry = ViewerRegistry::new();
        let viewer =
            bind_seller(&doc, &registry, PathPrefix::Root, &LabelsConfig::default(), 3).unwrap();
        viewer
            .borrow_mut()
            .set_items(&doc, vec![seller(vec![], None), seller(vec![], None)]);
        viewer.borrow_mut().open(&doc, 0);

        doc.dispatch(&Event::key(doc.root(), Key::ArrowRight));
        assert_eq!(viewer.borrow().state(), ViewerState::Open(0));
        doc.dispatch(&Event::key(doc.root(), Key::Escape));
        assert_eq!(viewer.borrow().state(), ViewerState::Closed);
    }

    #[test]
    fn social_viewer_offers_open_post_action() {
        let doc = page_document();
        let registry = ViewerRegistry::new();
        let viewer =
            bind_social(&doc, &registry, PathPrefix::Root, &LabelsConfig::default()).unwrap();
        viewer.borrow_mut().set_items(
            &doc,
            vec![SocialPost {
                src: "img/p.jpg".into(),
                url: "https://ig.example/p/1".into(),
                alt: None,
                caption: Some("Market day".into()),
            }],
        );
        viewer.borrow_mut().open(&doc, 0);

        let actions = doc.get_by_id("social-lightbox-actions").unwrap();
        let a = doc.query_within(actions, "a").unwrap();
        assert_eq!(doc.text(a), "Open post");
        assert_eq!(doc.attr(a, "href").as_deref(), Some("https://ig.example/p/1"));
        assert_eq!(
            doc.text(doc.get_by_id("social-lightbox-caption").unwrap()),
            "Market day"
        );
    }

    #[test]
    fn missing_modal_binds_nothing() {
        let doc = Document::new();
        let registry = ViewerRegistry::new();
        assert!(bind_gallery(&doc, &registry, PathPrefix::Root).is_none());
        assert!(registry.is_empty());
        assert_eq!(doc.listener_count(), 0);
    }
}
