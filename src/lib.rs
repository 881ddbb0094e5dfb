//! # Vitrine
//!
//! Content hydration and modal viewers for small JSON-driven marketing sites:
//! a market's sellers, sponsors, photo gallery and social posts, each kept in
//! a hand-edited JSON document and rendered into whichever page carries the
//! matching container.
//!
//! # Pipeline
//!
//! ```text
//! content/<kind>.json ─ fetch ─▶ ContentDocument ─ validate ─▶ Record ─ build ─▶ card
//!                                                                 │
//!                                                                 └─▶ viewer items
//! ```
//!
//! A page is initialized once with [`site::init_site`]: layout partials are
//! injected, then every region renderer runs concurrently and settles on its
//! own. A region whose container is missing does nothing; a region whose
//! document fails shows a configured failure text. Nothing a renderer does
//! can fail the page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | In-memory page document: elements, selectors, events, modal dialogs |
//! | [`paths`] | Page-depth path prefix and URL resolution |
//! | [`fetch`] | Content source capability and the content fetcher |
//! | [`content`] | Content documents and record validation |
//! | [`cards`] | One record in, one card element out |
//! | [`collection`] | Collection renderer for the four card grids |
//! | [`blocks`] | Home, about and contacts renderers |
//! | [`viewer`] | Modal viewer state machine, registry and the three concrete viewers |
//! | [`layout`] | Header/footer partials, footer year, active navigation |
//! | [`site`] | Page context, region dispatch, shell hooks, `init_site` |
//! | [`shell`] | Page skeletons and the HTML page wrapper (Maud) |
//! | [`export`] | Static export and content check for the CLI |
//! | [`config`] | `site.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Single-Threaded Page, Parallel Site
//!
//! A page is hydrated on one thread with a cooperative executor, matching a
//! browser's event loop: the document uses interior mutability and handles
//! are `Rc`. Concurrency across pages comes from rayon in [`export`], where
//! every page owns its own document.
//!
//! ## Viewers Bind Once
//!
//! Re-initializing a page re-renders regions but never stacks a second set
//! of listeners on a modal. The [`viewer::ViewerRegistry`] keys bindings by
//! modal element; rebinding returns the existing controller and only its
//! items are replaced.

pub mod blocks;
pub mod cards;
pub mod collection;
pub mod config;
pub mod content;
pub mod dom;
pub mod export;
pub mod fetch;
pub mod layout;
pub mod output;
pub mod paths;
pub mod shell;
pub mod site;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
