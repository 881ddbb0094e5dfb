//! Single-document page blocks: home, about and contacts.
//!
//! Same contract as the collection renderer: a page without the block's
//! elements is left alone, a failed fetch becomes status text plus an
//! `error` log line, and nothing propagates past the renderer.

use serde_json::Value;

use crate::content::{ContentDocument, list, text, text_entry, trimmed};
use crate::dom::{Document, NodeId};
use crate::fetch::ContentSource;
use crate::site::{PageContext, RegionOutcome};

/// Number of featured posts whose images load eagerly.
const EAGER_IMAGES: usize = 3;

/// Fetch `<content_root>/<file>`; on failure log it and return the reason.
async fn load<S: ContentSource>(
    page: &PageContext<'_, S>,
    file: &str,
) -> Result<ContentDocument, String> {
    let path = page.config.document_path(file);
    page.fetcher().fetch_content(&path).await.map_err(|e| {
        log::error!("{file}: {e}");
        e.to_string()
    })
}

fn set_text_opt(doc: &Document, node: Option<NodeId>, value: &str) {
    if let Some(node) = node {
        doc.set_text(node, value);
    }
}

/// Copy `value[key]` into `#id`; a missing key empties the element.
fn fill(doc: &Document, id: &str, value: &Value, key: &str) {
    if let Some(node) = doc.get_by_id(id) {
        doc.set_text(node, &text(value, key).unwrap_or_default());
    }
}

// ============================================================================
// Home
// ============================================================================

/// Hero text, about teaser, featured sponsors and featured posts.
pub async fn render_home<S: ContentSource>(page: &PageContext<'_, S>) -> RegionOutcome {
    let doc = page.doc;
    let hero = doc.get_by_id("home-hero-desc");
    let teaser = doc.get_by_id("home-about-text");
    let long = doc.get_by_id("home-about-long");
    let sponsors_grid = doc.get_by_id("home-sponsors-grid");
    let social_grid = doc.get_by_id("home-social-grid");
    let social_intro = doc.get_by_id("social-intro");
    if [hero, teaser, long, sponsors_grid, social_grid]
        .iter()
        .all(Option::is_none)
    {
        return RegionOutcome::Absent;
    }

    let messages = &page.config.messages.home;
    let content = match load(page, "home.json").await {
        Ok(content) => content,
        Err(reason) => {
            set_text_opt(doc, social_intro, &messages.failed);
            return RegionOutcome::Failed(reason);
        }
    };

    // Plain strings are taken as-is, even when empty.
    if let (Some(el), Some(Value::String(s))) = (hero, content.field("heroDesc")) {
        doc.set_text(el, s);
    }
    if let (Some(el), Some(Value::String(s))) = (teaser, content.field("aboutTeaser")) {
        doc.set_text(el, s);
    }
    if let Some(el) = long {
        let value = content
            .field("aboutLong")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or("");
        doc.set_text(el, value);
        doc.set_hidden(el, value.is_empty());
    }

    let mut shown = 0;
    let mut skipped = 0;

    if let Some(grid) = sponsors_grid {
        doc.clear_children(grid);
        for item in content.list("featuredSponsors") {
            match featured_sponsor(page, item) {
                Some(card) => {
                    doc.append(grid, card);
                    shown += 1;
                }
                None => skipped += 1,
            }
        }
    }

    if let Some(grid) = social_grid {
        doc.clear_children(grid);
        let mut posts = 0;
        for (idx, item) in content.list("featuredSocial").iter().enumerate() {
            match featured_post(page, item, idx) {
                Some(card) => {
                    doc.append(grid, card);
                    posts += 1;
                }
                None => skipped += 1,
            }
        }
        shown += posts;
        let intro = if posts > 0 {
            &messages.featured_social
        } else {
            &messages.no_social
        };
        set_text_opt(doc, social_intro, intro);
    }

    RegionOutcome::Rendered { shown, skipped }
}

/// `a.sponsor-card` for a featured sponsor; requires `logo`.
fn featured_sponsor<S: ContentSource>(page: &PageContext<'_, S>, item: &Value) -> Option<NodeId> {
    let doc = page.doc;
    let labels = &page.config.labels;
    let logo = text(item, "logo")?;
    let name = text(item, "name");
    let url = text(item, "url");

    let a = doc.create_element("a");
    doc.set_attr(a, "class", "sponsor-card");
    doc.set_attr(a, "href", url.as_deref().unwrap_or("#"));
    if url.is_some() {
        doc.set_attr(a, "target", "_blank");
        doc.set_attr(a, "rel", "noopener noreferrer");
    }
    doc.set_attr(a, "aria-label", name.as_deref().unwrap_or(&labels.sponsor));

    let img = doc.create_element("img");
    doc.set_attr(img, "src", &page.location.with_prefix(&logo));
    let alt = text(item, "logoAlt")
        .or(name)
        .unwrap_or_else(|| labels.sponsor.clone());
    doc.set_attr(img, "alt", &alt);
    doc.set_attr(img, "loading", "lazy");
    doc.append(a, img);
    Some(a)
}

/// `a.social-item` for a featured post; requires `image` and `url`. The
/// first few images load eagerly and the very first gets high priority.
fn featured_post<S: ContentSource>(
    page: &PageContext<'_, S>,
    item: &Value,
    idx: usize,
) -> Option<NodeId> {
    let doc = page.doc;
    let labels = &page.config.labels;
    let image = text(item, "image")?;
    let url = text(item, "url")?;
    let caption = text(item, "caption").unwrap_or_else(|| labels.post.clone());

    let a = doc.create_element("a");
    doc.set_attr(a, "class", "social-item");
    let is_instagram = text(item, "platform").is_some_and(|p| p.eq_ignore_ascii_case("instagram"));
    if is_instagram {
        doc.add_class(a, "social-item--ig");
    }
    doc.set_attr(a, "href", &url);
    doc.set_attr(a, "target", "_blank");
    doc.set_attr(a, "rel", "noopener noreferrer");
    doc.set_attr(a, "aria-label", &format!("{caption} ({})", labels.open));

    let img = doc.create_element("img");
    doc.set_attr(img, "src", &page.location.with_prefix(&image));
    doc.set_attr(img, "alt", &caption);
    doc.set_attr(img, "loading", if idx < EAGER_IMAGES { "eager" } else { "lazy" });
    doc.set_attr(img, "decoding", "async");
    if idx == 0 {
        doc.set_attr(img, "fetchpriority", "high");
    }
    doc.append(a, img);
    Some(a)
}

// ============================================================================
// About
// ============================================================================

/// Title, intro and free-form sections.
pub async fn render_about<S: ContentSource>(page: &PageContext<'_, S>) -> RegionOutcome {
    let doc = page.doc;
    let title = doc.get_by_id("about-title");
    let intro = doc.get_by_id("about-intro");
    let container = doc.get_by_id("about-sections");
    let fixed = doc.get_by_id(FIXED_SECTIONS[0].0);
    if title.is_none() && intro.is_none() && container.is_none() && fixed.is_none() {
        return RegionOutcome::Absent;
    }

    let messages = &page.config.messages.about;
    let content = match load(page, "about.json").await {
        Ok(content) => content,
        Err(reason) => {
            set_text_opt(doc, title, &messages.fallback_title);
            set_text_opt(doc, intro, &messages.failed);
            return RegionOutcome::Failed(reason);
        }
    };

    if let (Some(el), Some(s)) = (title, &content.title) {
        doc.set_text(el, s);
    }
    if let (Some(el), Some(s)) = (intro, &content.intro) {
        doc.set_text(el, s);
    }

    let Some(container) = container else {
        return render_fixed_sections(doc, content.list("sections"));
    };
    doc.clear_children(container);
    let mut shown = 0;
    let mut skipped = 0;
    for section in content.list("sections") {
        if !section.is_object() {
            skipped += 1;
            continue;
        }
        doc.append(container, about_section(doc, section));
        shown += 1;
    }
    RegionOutcome::Rendered { shown, skipped }
}

/// Pages without `#about-sections` carry fixed slots for the first two
/// sections: a heading and two paragraphs each.
const FIXED_SECTIONS: [(&str, [&str; 2]); 2] = [
    ("about-h2-1", ["about-p-1", "about-p-2"]),
    ("about-h2-2", ["about-p-3", "about-p-4"]),
];

/// Fill the fixed slots; a slot without content is emptied and hidden.
/// Counts the slots that received text.
fn render_fixed_sections(doc: &Document, sections: &[Value]) -> RegionOutcome {
    let null = Value::Null;
    let mut shown = 0;
    let mut put = |id: &str, value: Option<String>| {
        let Some(el) = doc.get_by_id(id) else {
            return;
        };
        doc.set_text(el, value.as_deref().unwrap_or_default());
        doc.set_hidden(el, value.is_none());
        shown += usize::from(value.is_some());
    };
    for (pos, (heading_id, paragraph_ids)) in FIXED_SECTIONS.iter().enumerate() {
        let section = sections.get(pos).unwrap_or(&null);
        put(*heading_id, text(section, "heading"));
        let paragraphs = list(section, "paragraphs");
        for (idx, id) in paragraph_ids.iter().enumerate() {
            put(*id, paragraphs.get(idx).and_then(text_entry));
        }
    }
    RegionOutcome::Rendered { shown, skipped: 0 }
}

fn about_section(doc: &Document, section: &Value) -> NodeId {
    let el = doc.create_element("section");
    doc.set_attr(el, "class", "section fade-in");

    if let Some(heading) = text(section, "heading") {
        let h2 = doc.create_element("h2");
        doc.set_text(h2, &heading);
        doc.append(el, h2);
    }
    for paragraph in list(section, "paragraphs").iter().filter_map(text_entry) {
        let p = doc.create_element("p");
        doc.set_text(p, &paragraph);
        doc.append(el, p);
    }

    let bullets: Vec<String> = list(section, "bullets").iter().filter_map(text_entry).collect();
    if !bullets.is_empty() {
        let ul = doc.create_element("ul");
        doc.set_attr(ul, "class", "about-list");
        for bullet in &bullets {
            let li = doc.create_element("li");
            doc.set_text(li, bullet);
            doc.append(ul, li);
        }
        doc.append(el, ul);
    }
    el
}

// ============================================================================
// Contacts
// ============================================================================

/// Social profiles with a dedicated icon link on the page, by label.
const SOCIAL_ICONS: [&str; 3] = ["instagram", "facebook", "tiktok"];

/// Address, email, phone, socials, form texts and map.
pub async fn render_contacts<S: ContentSource>(page: &PageContext<'_, S>) -> RegionOutcome {
    let doc = page.doc;
    let title = doc.get_by_id("contacts-title");
    let intro = doc.get_by_id("contacts-intro");
    if title.is_none() && intro.is_none() {
        return RegionOutcome::Absent;
    }

    let content = match load(page, "contacts.json").await {
        Ok(content) => content,
        Err(reason) => {
            set_text_opt(doc, intro, &page.config.messages.contacts.failed);
            return RegionOutcome::Failed(reason);
        }
    };

    if let (Some(el), Some(s)) = (title, &content.title) {
        doc.set_text(el, s);
    }
    if let (Some(el), Some(s)) = (intro, &content.intro) {
        doc.set_text(el, s);
    }

    let empty = Value::Null;
    let left = content.field("left").unwrap_or(&empty);
    let form = content.field("form").unwrap_or(&empty);
    let map = content.field("map").unwrap_or(&empty);

    fill(doc, "contacts-address-label", left, "addressLabel");
    let mut shown = 0;
    if let Some(address) = doc.get_by_id("contacts-address") {
        doc.clear_children(address);
        for line in list(left, "addressLines").iter().filter_map(text_entry) {
            let div = doc.create_element("div");
            doc.set_text(div, &line);
            doc.append(address, div);
            shown += 1;
        }
    }

    fill(doc, "contacts-email-label", left, "emailLabel");
    if let Some(email) = doc.get_by_id("contacts-email") {
        let value = text(left, "email").unwrap_or_default();
        set_link(doc, email, &value, (!value.is_empty()).then(|| format!("mailto:{value}")));
    }

    fill(doc, "contacts-phone-label", left, "phoneLabel");
    if let Some(phone) = doc.get_by_id("contacts-phone") {
        let value = phone_text(left);
        let dial: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        set_link(doc, phone, &value, (!dial.is_empty()).then(|| format!("tel:{dial}")));
    }

    fill(doc, "contacts-social-label", left, "socialLabel");
    shown += render_socials(doc, list(left, "socials"));

    fill(doc, "contacts-form-title", form, "title");
    fill(doc, "contacts-form-note", form, "note");
    if let Some(status) = doc.get_by_id("contact-status") {
        for (attr, key) in [("data-success-text", "successText"), ("data-error-text", "errorText")] {
            doc.set_attr(status, attr, &text(form, key).unwrap_or_default());
        }
    }

    fill(doc, "contacts-map-title", map, "title");
    if let Some(frame) = doc.get_by_id("contacts-map") {
        match text(map, "iframeSrc") {
            Some(src) => {
                doc.set_attr(frame, "src", &src);
                doc.set_hidden(frame, false);
            }
            None => {
                doc.remove_attr(frame, "src");
                doc.set_hidden(frame, true);
            }
        }
    }
    fill(doc, "contacts-map-note", map, "note");

    RegionOutcome::Rendered { shown, skipped: 0 }
}

/// Phone numbers are often authored as JSON numbers.
fn phone_text(left: &Value) -> String {
    match left.get("phone") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Fill a contact link; without a target it points nowhere and is hidden.
fn set_link(doc: &Document, link: NodeId, label: &str, href: Option<String>) {
    doc.set_text(link, label);
    doc.set_attr(link, "href", href.as_deref().unwrap_or("#"));
    doc.set_hidden(link, href.is_none());
}

/// Fill either the per-network icon links or, when the page has none, the
/// plain `#contacts-socials` list. Returns the number of profiles shown.
fn render_socials(doc: &Document, socials: &[Value]) -> usize {
    let list_el = doc.get_by_id("contacts-socials");
    let icons: Vec<(&str, NodeId)> = SOCIAL_ICONS
        .iter()
        .filter_map(|network| {
            doc.get_by_id(&format!("contacts-social-{network}"))
                .map(|el| (*network, el))
        })
        .collect();

    if !icons.is_empty() {
        let mut shown = 0;
        for (network, icon) in icons {
            let url = socials
                .iter()
                .find(|s| trimmed(s, "label").is_some_and(|l| l.eq_ignore_ascii_case(network)))
                .and_then(|s| text(s, "url"));
            match url {
                Some(url) => {
                    doc.set_attr(icon, "href", &url);
                    doc.set_hidden(icon, false);
                    shown += 1;
                }
                None => doc.set_hidden(icon, true),
            }
        }
        if let Some(list_el) = list_el {
            doc.set_hidden(list_el, true);
        }
        return shown;
    }

    let Some(list_el) = list_el else {
        return 0;
    };
    doc.clear_children(list_el);
    let mut shown = 0;
    for social in socials {
        let Some(url) = text(social, "url") else {
            continue;
        };
        let li = doc.create_element("li");
        let a = doc.create_element("a");
        doc.set_attr(a, "href", &url);
        doc.set_attr(a, "target", "_blank");
        doc.set_attr(a, "rel", "noopener noreferrer");
        doc.set_text(a, &text(social, "label").unwrap_or_else(|| url.clone()));
        doc.append(li, a);
        doc.append(list_el, li);
        shown += 1;
    }
    doc.set_hidden(list_el, socials.is_empty());
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::fetch::MemorySource;
    use crate::shell::PageKind;
    use crate::test_helpers::{contacts_json, home_json};
    use futures::executor::block_on;

    fn context<'a>(
        doc: &'a Document,
        source: &'a MemorySource,
        config: &'a SiteConfig,
        page: PageKind,
    ) -> PageContext<'a, MemorySource> {
        PageContext::new(doc, source, config, page.url_path())
    }

    fn text_of(doc: &Document, id: &str) -> String {
        doc.text(doc.get_by_id(id).unwrap())
    }

    #[test]
    fn home_renders_featured_blocks() {
        let doc = PageKind::Home.document();
        let source = MemorySource::new().with_body("/content/home.json", home_json());
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::Home);

        let outcome = block_on(render_home(&page));
        assert_eq!(outcome, RegionOutcome::Rendered { shown: 4, skipped: 1 });

        assert_eq!(text_of(&doc, "home-hero-desc"), "Local makers, every first Saturday.");
        assert!(doc.is_hidden(doc.get_by_id("home-about-long").unwrap()));

        let sponsors = doc.query_all_within(doc.get_by_id("home-sponsors-grid").unwrap(), "a");
        assert_eq!(doc.attr(sponsors[0], "href").as_deref(), Some("https://mill.example"));
        assert_eq!(doc.attr(sponsors[1], "href").as_deref(), Some("#"));
        assert_eq!(doc.attr(sponsors[1], "target"), None);
        assert_eq!(doc.attr(sponsors[1], "aria-label").as_deref(), Some("Sponsor"));

        let posts = doc.query_all_within(doc.get_by_id("home-social-grid").unwrap(), "a");
        assert_eq!(posts.len(), 2);
        assert!(doc.has_class(posts[0], "social-item--ig"));
        assert!(!doc.has_class(posts[1], "social-item--ig"));
        let first = doc.query_within(posts[0], "img").unwrap();
        assert_eq!(doc.attr(first, "fetchpriority").as_deref(), Some("high"));
        assert_eq!(doc.attr(first, "src").as_deref(), Some("img/social/1.jpg"));
        assert_eq!(doc.attr(posts[1], "aria-label").as_deref(), Some("Post (open)"));

        assert_eq!(
            text_of(&doc, "social-intro"),
            "Featured posts (click to open the original)."
        );
    }

    #[test]
    fn home_failure_sets_social_intro() {
        let doc = PageKind::Home.document();
        let source = MemorySource::new().with_failure("/content/home.json", "offline");
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::Home);

        assert!(matches!(block_on(render_home(&page)), RegionOutcome::Failed(_)));
        assert_eq!(
            text_of(&doc, "social-intro"),
            "The homepage content could not be loaded."
        );
    }

    #[test]
    fn about_sections_drop_blank_entries() {
        let doc = PageKind::About.document();
        let source = MemorySource::new().with_body(
            "/content/about.json",
            r#"{
                "title": "About us",
                "sections": [
                    { "heading": "Story", "paragraphs": ["One", { "text": "Two" }, "  "] },
                    { "bullets": ["a", { "text": "" }, { "text": "b" }] },
                    null
                ]
            }"#,
        );
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::About);

        let outcome = block_on(render_about(&page));
        assert_eq!(outcome, RegionOutcome::Rendered { shown: 2, skipped: 1 });
        assert_eq!(text_of(&doc, "about-title"), "About us");

        let sections = doc.query_all_within(doc.get_by_id("about-sections").unwrap(), "section");
        assert_eq!(doc.query_all_within(sections[0], "p").len(), 2);
        assert!(doc.query_within(sections[0], "ul").is_none());
        let items = doc.query_all_within(sections[1], "li");
        assert_eq!(items.len(), 2);
        assert!(doc.query_within(sections[1], "h2").is_none());
    }

    #[test]
    fn about_failure_restores_fallback_title() {
        let doc = PageKind::About.document();
        let source = MemorySource::new();
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::About);

        assert!(matches!(block_on(render_about(&page)), RegionOutcome::Failed(_)));
        assert_eq!(text_of(&doc, "about-title"), "About");
        assert_eq!(text_of(&doc, "about-intro"), "The content could not be loaded.");
    }

    #[test]
    fn contacts_fill_links_and_map() {
        let doc = PageKind::Contacts.document();
        let source = MemorySource::new().with_body("/content/contacts.json", contacts_json());
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::Contacts);

        block_on(render_contacts(&page));

        let email = doc.get_by_id("contacts-email").unwrap();
        assert_eq!(doc.attr(email, "href").as_deref(), Some("mailto:hello@market.example"));
        let phone = doc.get_by_id("contacts-phone").unwrap();
        assert_eq!(doc.attr(phone, "href").as_deref(), Some("tel:+420123456789"));
        assert_eq!(doc.text(phone), "+420 123 456 789");

        let address = doc.get_by_id("contacts-address").unwrap();
        assert_eq!(doc.children(address).len(), 2);

        let status = doc.get_by_id("contact-status").unwrap();
        assert_eq!(doc.attr(status, "data-success-text").as_deref(), Some("Thanks!"));

        let map = doc.get_by_id("contacts-map").unwrap();
        assert!(!doc.is_hidden(map));
        assert_eq!(doc.attr(map, "src").as_deref(), Some("https://maps.example/embed"));
    }

    #[test]
    fn contacts_rerender_follows_latest_document() {
        let doc = PageKind::Contacts.document();
        let config = SiteConfig::default();
        let sparse = MemorySource::new()
            .with_body("/content/contacts.json", r#"{ "title": "Contacts", "left": {} }"#);
        let full = MemorySource::new().with_body("/content/contacts.json", contacts_json());

        block_on(render_contacts(&context(&doc, &full, &config, PageKind::Contacts)));
        block_on(render_contacts(&context(&doc, &sparse, &config, PageKind::Contacts)));
        let email = doc.get_by_id("contacts-email").unwrap();
        assert!(doc.is_hidden(email));
        assert_eq!(text_of(&doc, "contacts-email-label"), "");
        assert_eq!(text_of(&doc, "contacts-form-title"), "");
        let status = doc.get_by_id("contact-status").unwrap();
        assert_eq!(doc.attr(status, "data-success-text").as_deref(), Some(""));

        block_on(render_contacts(&context(&doc, &full, &config, PageKind::Contacts)));
        assert!(!doc.is_hidden(email));
        assert_eq!(doc.attr(email, "href").as_deref(), Some("mailto:hello@market.example"));
        assert_eq!(text_of(&doc, "contacts-email-label"), "Email");
    }

    #[test]
    fn about_fills_fixed_slots_without_section_container() {
        let doc = Document::new();
        doc.set_inner_html(
            doc.root(),
            r#"<h1 id="about-title"></h1>
            <h2 id="about-h2-1"></h2><p id="about-p-1"></p><p id="about-p-2"></p>
            <h2 id="about-h2-2"></h2><p id="about-p-3"></p><p id="about-p-4"></p>"#,
        );
        let source = MemorySource::new().with_body(
            "/content/about.json",
            r#"{
                "title": "About us",
                "sections": [
                    { "heading": "Story", "paragraphs": ["One", { "text": "Two" }] },
                    { "heading": "Team", "paragraphs": [{ "text": "Three" }] }
                ]
            }"#,
        );
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::About);

        let outcome = block_on(render_about(&page));
        assert_eq!(outcome, RegionOutcome::Rendered { shown: 5, skipped: 0 });
        assert_eq!(text_of(&doc, "about-h2-1"), "Story");
        assert_eq!(text_of(&doc, "about-p-2"), "Two");
        assert_eq!(text_of(&doc, "about-p-3"), "Three");
        let last = doc.get_by_id("about-p-4").unwrap();
        assert!(doc.is_hidden(last));
        assert_eq!(doc.text(last), "");
    }

    #[test]
    fn contacts_icons_hide_missing_networks() {
        let doc = PageKind::Contacts.document();
        let source = MemorySource::new().with_body("/content/contacts.json", contacts_json());
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::Contacts);

        block_on(render_contacts(&page));

        let ig = doc.get_by_id("contacts-social-instagram").unwrap();
        assert_eq!(doc.attr(ig, "href").as_deref(), Some("https://instagram.com/market"));
        assert!(!doc.is_hidden(ig));
        assert!(doc.is_hidden(doc.get_by_id("contacts-social-tiktok").unwrap()));
        assert!(doc.is_hidden(doc.get_by_id("contacts-socials").unwrap()));
    }

    #[test]
    fn contacts_fall_back_to_plain_list_without_icons() {
        let doc = Document::new();
        doc.set_inner_html(
            doc.root(),
            r#"<h1 id="contacts-title"></h1><ul id="contacts-socials"></ul><a id="contacts-email"></a>"#,
        );
        let source = MemorySource::new().with_body(
            "/content/contacts.json",
            r#"{ "left": { "socials": [{ "label": "Facebook", "url": "https://fb.example" }, { "label": "x" }] } }"#,
        );
        let config = SiteConfig::default();
        let page = context(&doc, &source, &config, PageKind::Contacts);

        block_on(render_contacts(&page));

        let list_el = doc.get_by_id("contacts-socials").unwrap();
        let links = doc.query_all_within(list_el, "a");
        assert_eq!(links.len(), 1);
        assert_eq!(doc.text(links[0]), "Facebook");
        assert!(!doc.is_hidden(list_el));
        let email = doc.get_by_id("contacts-email").unwrap();
        assert!(doc.is_hidden(email));
        assert_eq!(doc.attr(email, "href").as_deref(), Some("#"));
    }
}
