//! Helpers shared with the ingestion collaborators.
//!
//! # Responsibility
//! - Recognise project and JEP hyperlinks in scraped pages and JEP bodies.
//! - Keep the link conventions next to the group factories that depend on them.
//!
//! Fetching and markup parsing stay outside this crate; these functions only
//! look at already extracted link and body strings.

pub mod links;
