//! # ChatRH Core
//!
//! Shared logic for ChatRH: data models, the taxonomy store abstraction,
//! and the query-grounding pipeline that turns a free-text question into
//! a bounded context block of labour-code articles.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. The calling application supplies a
//! [`store::TaxonomyStore`] implementation and invokes
//! [`engine::GroundingEngine::build_grounded_context`].
//!
//! # Pipeline
//!
//! ```text
//! raw message
//!     │
//!     ▼
//! keyword extraction (table → subject scan → generic categories)
//!     │
//!     ▼
//! subject resolution (by id → by title substring)
//!     │
//!     ▼
//! article collection (subject-scoped, or content-search fallback)
//!     │
//!     ▼
//! dedup + cap (10 articles)
//!     │
//!     ▼
//! context assembly (instructional preamble + article section + topic)
//! ```

pub mod collect;
pub mod context;
pub mod engine;
pub mod excerpt;
pub mod keywords;
pub mod models;
pub mod resolve;
pub mod store;
