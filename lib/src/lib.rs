#![doc = svgbobdoc::transform!(
//! Content and page rendering for a small portfolio site.
//!
//! # Overview
//!
//! `folio` splits a page request into two halves: _what_ to show and _how_ to
//! show it.
//!
//! ```svgbob
//!   +---------+      +-------------+      +------------+      +--------+
//!   | request |----->| PageContext |----->|   Engine   |----->|  sink  |
//!   +---------+      +------+------+      +-----+------+      +--------+
//!                           ^                   ^
//!                           |                   |
//!                    +------+------+     +------+------+
//!                    |   Content   |     |  Templates  |
//!                    +-------------+     +-------------+
//! ```
//!
//!   * [`Content`] is the fixed table of principles and projects. It is built
//!     once, from the built-in data or a TOML fixture, and only read after.
//!
//!   * [`PageContext`] is what a single page renders against: a title plus
//!     whichever records the page shows.
//!
//!   * An [`Engine`](templating::Engine) is the template registry. Every
//!     template is parsed when the engine is built; a template that fails to
//!     parse stops startup. Rendering a template writes straight to an
//!     [`io::Write`](std::io::Write) sink and reports a
//!     [`RenderError`](templating::RenderError) on failure.
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod content;
pub mod context;
pub mod templating;

pub use content::{Content, PrincipleRecord, ProjectRecord};
pub use context::PageContext;
