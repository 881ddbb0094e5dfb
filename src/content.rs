//! Content documents and validated records.
//!
//! Every page region is driven by one JSON document under `content/`. The
//! documents are hand-edited, so nothing about their shape is trusted:
//!
//! - A missing or non-array `items` is an empty collection, not an error.
//! - Non-string values in text fields are treated as absent.
//! - A record missing its identity fields is skipped with a [`Rejection`];
//!   the rest of the collection still renders, in original order.
//!
//! Records are parsed once into a closed set of typed variants ([`Seller`],
//! [`Sponsor`], [`GalleryPhoto`], [`SocialPost`]) so rendering code never
//! reads optional JSON fields itself.
//!
//! ## Identity fields
//!
//! | Collection | Required            |
//! |------------|---------------------|
//! | sellers    | `name`, `logo`      |
//! | sponsors   | `name`, `logo`      |
//! | gallery    | `src`               |
//! | social     | `src`, `url`        |

use serde_json::Value;
use thiserror::Error;

/// The four card collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Sellers,
    Sponsors,
    Gallery,
    Social,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::Sellers,
        CollectionKind::Sponsors,
        CollectionKind::Gallery,
        CollectionKind::Social,
    ];

    /// Region name used in element ids and document names.
    pub fn name(self) -> &'static str {
        match self {
            CollectionKind::Sellers => "sellers",
            CollectionKind::Sponsors => "sponsors",
            CollectionKind::Gallery => "gallery",
            CollectionKind::Social => "social",
        }
    }

    /// Content document file name, e.g. `sellers.json`.
    pub fn document(self) -> String {
        format!("{}.json", self.name())
    }

    /// Container selector, e.g. `#sellers-grid`.
    pub fn container(self) -> String {
        format!("#{}-grid", self.name())
    }

    pub fn title_selector(self) -> String {
        format!("#{}-title", self.name())
    }

    pub fn intro_selector(self) -> String {
        format!("#{}-intro", self.name())
    }
}

/// A fetched content document with lenient accessors.
#[derive(Debug, Clone, Default)]
pub struct ContentDocument {
    pub title: Option<String>,
    pub intro: Option<String>,
    /// Raw records; validation happens per collection.
    pub items: Vec<Value>,
    raw: Value,
}

impl ContentDocument {
    /// Wrap a parsed JSON value. Never fails: a non-object root is an empty
    /// document.
    pub fn from_value(raw: Value) -> Self {
        Self {
            title: text(&raw, "title"),
            intro: text(&raw, "intro"),
            items: list(&raw, "items").to_vec(),
            raw,
        }
    }

    /// Any top-level field, for documents with their own shape
    /// (`home.json`, `about.json`, `contacts.json`).
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        text(&self.raw, key)
    }

    pub fn list(&self, key: &str) -> &[Value] {
        list(&self.raw, key)
    }
}

/// Non-empty string field of an object.
pub fn text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Non-blank string field of an object, trimmed.
pub fn trimmed(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Array field of an object; anything else is empty.
pub fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// A list entry that may be a bare string or `{ "text": … }`.
pub fn text_entry(value: &Value) -> Option<String> {
    let entry = match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => text(value, "text"),
        _ => None,
    };
    entry.filter(|s| !s.trim().is_empty())
}

/// Why a record was left out of its collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("not an object")]
    NotAnObject,
    #[error("missing `{0}`")]
    MissingField(&'static str),
}

fn required(raw: &Value, key: &'static str) -> Result<String, Rejection> {
    text(raw, key).ok_or(Rejection::MissingField(key))
}

fn object(raw: &Value) -> Result<&Value, Rejection> {
    if raw.is_object() {
        Ok(raw)
    } else {
        Err(Rejection::NotAnObject)
    }
}

/// A record type that can be validated out of a raw JSON entry.
pub trait ContentRecord: Sized + Clone + 'static {
    const KIND: CollectionKind;

    fn from_raw(raw: &Value) -> Result<Self, Rejection>;
}

/// Where a seller's call-to-action points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Web,
    Social,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub kind: LinkKind,
    pub url: String,
    /// Explicit button label; the viewer falls back to a per-kind default.
    pub label: Option<String>,
}

impl Link {
    /// Resolve a record's action link.
    ///
    /// Accepts the structured `link` object and the legacy flat `url` field.
    /// `link.url` wins over `url`. The type comes from `link.type`; without
    /// one it is `web` only when the legacy `url` is set, and `none`
    /// otherwise. Type `none`, or no url at all, means no action.
    pub fn resolve(raw: &Value) -> Option<Link> {
        let link = raw.get("link").filter(|l| l.is_object());
        let legacy = trimmed(raw, "url");
        let kind = match link.and_then(|l| trimmed(l, "type")).as_deref() {
            Some("none") => return None,
            Some("social") => LinkKind::Social,
            Some(_) => LinkKind::Web,
            None if legacy.is_some() => LinkKind::Web,
            None => return None,
        };
        let url = link.and_then(|l| trimmed(l, "url")).or(legacy)?;
        Some(Link {
            kind,
            url,
            label: link.and_then(|l| trimmed(l, "label")),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub src: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub name: String,
    pub logo: String,
    pub logo_alt: Option<String>,
    pub meta: Option<String>,
    pub description: Option<String>,
    /// Raw photo slots in authored order; `None` marks a slot without `src`.
    pub photos: Vec<Option<Photo>>,
    pub link: Option<Link>,
}

impl ContentRecord for Seller {
    const KIND: CollectionKind = CollectionKind::Sellers;

    fn from_raw(raw: &Value) -> Result<Self, Rejection> {
        let raw = object(raw)?;
        Ok(Seller {
            name: required(raw, "name")?,
            logo: required(raw, "logo")?,
            logo_alt: text(raw, "logoAlt"),
            meta: text(raw, "meta"),
            description: text(raw, "description"),
            photos: list(raw, "photos")
                .iter()
                .map(|p| {
                    text(p, "src").map(|src| Photo {
                        src,
                        alt: text(p, "alt"),
                    })
                })
                .collect(),
            link: Link::resolve(raw),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sponsor {
    pub name: String,
    pub logo: String,
    pub logo_alt: Option<String>,
    pub meta: Option<String>,
    pub url: Option<String>,
}

impl ContentRecord for Sponsor {
    const KIND: CollectionKind = CollectionKind::Sponsors;

    fn from_raw(raw: &Value) -> Result<Self, Rejection> {
        let raw = object(raw)?;
        Ok(Sponsor {
            name: required(raw, "name")?,
            logo: required(raw, "logo")?,
            logo_alt: text(raw, "logoAlt"),
            meta: text(raw, "meta"),
            url: text(raw, "url"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPhoto {
    pub src: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl ContentRecord for GalleryPhoto {
    const KIND: CollectionKind = CollectionKind::Gallery;

    fn from_raw(raw: &Value) -> Result<Self, Rejection> {
        let raw = object(raw)?;
        Ok(GalleryPhoto {
            src: required(raw, "src")?,
            alt: text(raw, "alt"),
            caption: text(raw, "caption"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPost {
    pub src: String,
    pub url: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

impl ContentRecord for SocialPost {
    const KIND: CollectionKind = CollectionKind::Social;

    fn from_raw(raw: &Value) -> Result<Self, Rejection> {
        let raw = object(raw)?;
        Ok(SocialPost {
            src: required(raw, "src")?,
            url: required(raw, "url")?,
            alt: text(raw, "alt"),
            caption: text(raw, "caption"),
        })
    }
}

/// One validated record of any collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Seller(Seller),
    Sponsor(Sponsor),
    Gallery(GalleryPhoto),
    Social(SocialPost),
}

impl Record {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Record::Seller(_) => CollectionKind::Sellers,
            Record::Sponsor(_) => CollectionKind::Sponsors,
            Record::Gallery(_) => CollectionKind::Gallery,
            Record::Social(_) => CollectionKind::Social,
        }
    }
}

impl From<Seller> for Record {
    fn from(r: Seller) -> Self {
        Record::Seller(r)
    }
}

impl From<Sponsor> for Record {
    fn from(r: Sponsor) -> Self {
        Record::Sponsor(r)
    }
}

impl From<GalleryPhoto> for Record {
    fn from(r: GalleryPhoto) -> Self {
        Record::Gallery(r)
    }
}

impl From<SocialPost> for Record {
    fn from(r: SocialPost) -> Self {
        Record::Social(r)
    }
}

/// Validate one raw entry as a record of `kind`.
pub fn validate(kind: CollectionKind, raw: &Value) -> Result<Record, Rejection> {
    match kind {
        CollectionKind::Sellers => Seller::from_raw(raw).map(Record::from),
        CollectionKind::Sponsors => Sponsor::from_raw(raw).map(Record::from),
        CollectionKind::Gallery => GalleryPhoto::from_raw(raw).map(Record::from),
        CollectionKind::Social => SocialPost::from_raw(raw).map(Record::from),
    }
}

/// Outcome of validating a whole `items` list.
#[derive(Debug, Clone)]
pub struct Validated<R> {
    /// Accepted records in authored order.
    pub records: Vec<R>,
    /// Position in the raw list and reason, for each skipped entry.
    pub skipped: Vec<(usize, Rejection)>,
}

pub fn validate_all<R: ContentRecord>(items: &[Value]) -> Validated<R> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for (pos, raw) in items.iter().enumerate() {
        match R::from_raw(raw) {
            Ok(record) => records.push(record),
            Err(reason) => skipped.push((pos, reason)),
        }
    }
    Validated { records, skipped }
}
