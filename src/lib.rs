//! Vetrina: a content platform for marketing sites.
//!
//! Landing pages and case studies are assembled from ordered sequences of
//! typed content blocks; fully custom pages mix an embedded block sequence
//! with raw HTML/CSS/JS channels that pass through an explicit trust
//! boundary before rendering.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
