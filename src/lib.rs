//! # Showcase
//!
//! Content resolution and interaction core for a studio marketing site: blog,
//! portfolio, careers, testimonials and FAQ, all rendered to static HTML.
//!
//! # Architecture: Resolve, Then View
//!
//! Content arrives as flat JSON collections whose records point at each other
//! by id. Every page goes through the same two steps:
//!
//! ```text
//! 1. Resolve   records + relation specs  →  ResolvedView   (joins, with fallbacks)
//! 2. View      views + FilterState       →  visible list   (filter, sort, page)
//! ```
//!
//! Both steps are pure functions of their inputs. The store is loaded once and
//! shared read-only; the only mutable state lives in small per-surface
//! controllers ([`collection::CollectionView`], [`carousel::Carousel`],
//! [`disclosure::DisclosureState`]).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Record types, collections, the `Record` field-access trait, JSON loading |
//! | [`resolve`] | Relationship resolver: foreign keys → embedded objects, related/featured lookups |
//! | [`collection`] | Filter + sort + paginate controller shared by every grid |
//! | [`carousel`] | Circular carousel state machine, swipe gestures, autoplay |
//! | [`disclosure`] | Single-open accordion state and the filterable FAQ list |
//! | [`schema`] | Per-surface relation and view declarations, broken-link audit |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Renders the static site using Maud |
//! | [`naming`] | Slugs and display labels |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Resolution Is Total
//!
//! A record whose author, category or department does not exist still
//! renders. The resolver substitutes a configured fallback object (`"Unknown
//! Author"`, `"Uncategorized"`, `"General"`) and logs the miss at debug level;
//! `showcase check` lists every such reference so they can be fixed, but the
//! build never fails on them.
//!
//! ## Views Never Carry Raw Foreign Keys
//!
//! A [`resolve::ResolvedView`] serializes as the record with each foreign key
//! replaced by its embedded object. Consumers cannot accidentally render
//! `authorId` where an author name belongs.
//!
//! ## Stable Sorts
//!
//! Every ordering uses a stable sort, so items that compare equal keep their
//! collection order and re-rendering never reshuffles ties.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system:
//!
//! - **Compile-time checking**: malformed HTML is a build error.
//! - **XSS-safe by default**: all interpolation is auto-escaped.
//! - **Zero runtime files**: no template directory to ship or get out of sync.

pub mod carousel;
pub mod collection;
pub mod config;
pub mod content;
pub mod disclosure;
pub mod generate;
pub mod naming;
pub mod output;
pub mod resolve;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_helpers;
