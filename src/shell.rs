//! Page skeletons and the HTML page wrapper.
//!
//! Each page is a fixed skeleton whose element ids decide which regions
//! hydrate (see [`crate::site`]). The skeleton carries only static markup:
//! header and footer arrive as partials, everything else from content
//! documents. Modal markup is emitted only on the page whose cards open it.

use maud::{DOCTYPE, Markup, html};

use crate::content::CollectionKind;
use crate::dom::Document;
use crate::paths::PathPrefix;

/// The site's pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    About,
    Sellers,
    Sponsors,
    Gallery,
    Social,
    Contacts,
}

impl PageKind {
    pub const ALL: [PageKind; 7] = [
        PageKind::Home,
        PageKind::About,
        PageKind::Sellers,
        PageKind::Sponsors,
        PageKind::Gallery,
        PageKind::Social,
        PageKind::Contacts,
    ];

    /// Page identity, as written to `<body data-page="…">`.
    pub fn name(self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::About => "about",
            PageKind::Sellers => "sellers",
            PageKind::Sponsors => "sponsors",
            PageKind::Gallery => "gallery",
            PageKind::Social => "social",
            PageKind::Contacts => "contacts",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Where the page is served from. Everything but the home page lives
    /// under `/pages/`.
    pub fn url_path(self) -> &'static str {
        match self {
            PageKind::Home => "/index.html",
            PageKind::About => "/pages/about.html",
            PageKind::Sellers => "/pages/sellers.html",
            PageKind::Sponsors => "/pages/sponsors.html",
            PageKind::Gallery => "/pages/gallery.html",
            PageKind::Social => "/pages/social.html",
            PageKind::Contacts => "/pages/contacts.html",
        }
    }

    /// Output file relative to the build directory.
    pub fn output_path(self) -> &'static str {
        self.url_path().trim_start_matches('/')
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::Home => "Home",
            PageKind::About => "About",
            PageKind::Sellers => "Sellers",
            PageKind::Sponsors => "Sponsors",
            PageKind::Gallery => "Gallery",
            PageKind::Social => "Social",
            PageKind::Contacts => "Contacts",
        }
    }

    fn collection(self) -> Option<CollectionKind> {
        match self {
            PageKind::Sellers => Some(CollectionKind::Sellers),
            PageKind::Sponsors => Some(CollectionKind::Sponsors),
            PageKind::Gallery => Some(CollectionKind::Gallery),
            PageKind::Social => Some(CollectionKind::Social),
            _ => None,
        }
    }

    /// Body markup before hydration.
    pub fn skeleton(self) -> Markup {
        html! {
            header.site-header id="site-header" {}
            main.site-main {
                @match self {
                    PageKind::Home => (home_main()),
                    PageKind::About => (about_main()),
                    PageKind::Contacts => (contacts_main()),
                    _ => {
                        @if let Some(kind) = self.collection() {
                            (collection_main(self, kind))
                        }
                    }
                }
            }
            footer.site-footer id="site-footer" {}
            @match self {
                PageKind::Sellers => (seller_modal()),
                PageKind::Gallery => (lightbox()),
                PageKind::Social => (social_lightbox()),
                _ => {}
            }
        }
    }

    /// A fresh, unhydrated document for this page.
    pub fn document(self) -> Document {
        let doc = Document::new();
        doc.set_attr(doc.root(), "data-page", self.name());
        doc.set_inner_html(doc.root(), &self.skeleton().into_string());
        doc
    }
}

/// Wrap a hydrated document into a complete HTML page.
pub fn page_html(page: PageKind, doc: &Document, prefix: PathPrefix) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page.title()) }
                link rel="stylesheet" href=(prefix.apply("css/style.css"));
            }
            (doc)
        }
    }
}

fn home_main() -> Markup {
    html! {
        section.hero.fade-in {
            p.hero__desc id="home-hero-desc" {}
        }
        section.section.fade-in {
            p id="home-about-text" {}
            p.home-about__long id="home-about-long" {}
        }
        section.section.fade-in {
            div.sponsor-grid id="home-sponsors-grid" {}
        }
        section.section.fade-in {
            p.section__intro id="social-intro" {}
            div.social-grid id="home-social-grid" {}
        }
    }
}

fn about_main() -> Markup {
    html! {
        section.section {
            h1 id="about-title" { "About" }
            p.section__intro id="about-intro" {}
            div id="about-sections" {}
        }
    }
}

fn collection_main(page: PageKind, kind: CollectionKind) -> Markup {
    let name = kind.name();
    let grid_class = match kind {
        CollectionKind::Gallery => "gallery-grid",
        CollectionKind::Social => "social-grid",
        _ => "grid",
    };
    html! {
        section.section {
            h1 id=(format!("{name}-title")) { (page.title()) }
            p.section__intro id=(format!("{name}-intro")) {}
            div class=(grid_class) id=(format!("{name}-grid")) {}
        }
    }
}

fn contacts_main() -> Markup {
    html! {
        section.section {
            h1 id="contacts-title" { "Contacts" }
            p.section__intro id="contacts-intro" {}
            div.contacts {
                div.contacts__left {
                    h2 id="contacts-address-label" {}
                    address id="contacts-address" {}
                    h2 id="contacts-email-label" {}
                    a id="contacts-email" href="#" {}
                    h2 id="contacts-phone-label" {}
                    a id="contacts-phone" href="#" {}
                    h2 id="contacts-social-label" {}
                    div.contacts__icons {
                        a id="contacts-social-instagram" href="#" target="_blank" rel="noopener noreferrer" aria-label="Instagram" {}
                        a id="contacts-social-facebook" href="#" target="_blank" rel="noopener noreferrer" aria-label="Facebook" {}
                        a id="contacts-social-tiktok" href="#" target="_blank" rel="noopener noreferrer" aria-label="TikTok" {}
                    }
                    ul id="contacts-socials" {}
                }
                div.contacts__form {
                    h2 id="contacts-form-title" {}
                    p id="contacts-form-note" {}
                    form id="contact-form" method="post" {
                        input type="text" name="name" required;
                        input type="email" name="email" required;
                        textarea name="message" required {}
                        button.btn type="submit" { "Send" }
                    }
                    p id="contact-status" role="status" {}
                }
                div.contacts__map {
                    h2 id="contacts-map-title" {}
                    iframe id="contacts-map" loading="lazy" title="Map" {}
                    p id="contacts-map-note" {}
                }
            }
        }
    }
}

/// Gallery lightbox: close, prev/next, image and caption.
pub fn lightbox() -> Markup {
    lightbox_markup("lightbox")
}

/// Social-post lightbox: the gallery layout plus an action bar.
pub fn social_lightbox() -> Markup {
    lightbox_markup("social-lightbox")
}

fn lightbox_markup(id: &str) -> Markup {
    let with_actions = id == "social-lightbox";
    html! {
        dialog.lightbox id=(id) aria-modal="true" {
            button.lightbox__close type="button" aria-label="Close" { "×" }
            button.lightbox__nav."lightbox__nav--prev" type="button" aria-label="Previous" { "‹" }
            figure.lightbox__figure {
                img id=(format!("{id}-img")) src="" alt="";
                figcaption id=(format!("{id}-caption")) {}
            }
            button.lightbox__nav."lightbox__nav--next" type="button" aria-label="Next" { "›" }
            @if with_actions {
                div.lightbox__actions id=(format!("{id}-actions")) {}
            }
        }
    }
}

/// Seller detail modal.
pub fn seller_modal() -> Markup {
    html! {
        dialog.seller-modal id="seller-modal" aria-modal="true" aria-labelledby="seller-modal-title" {
            button.seller-modal__close type="button" aria-label="Close" { "×" }
            h2 id="seller-modal-title" {}
            p.seller-modal__meta id="seller-modal-meta" {}
            p.seller-modal__desc id="seller-modal-desc" {}
            div.seller-modal__photos id="seller-modal-photos" {}
            div.seller-modal__actions id="seller-modal-actions" {}
        }
    }
}
