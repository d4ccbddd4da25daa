//! Grabbit - Look up track versions on Discogs
//!
//! This library searches the Discogs catalog for (track, artist) pairs and
//! turns every matching release into a report of versions, formats, related
//! tracks and embedded videos.

/// Batch processing of lookup requests
pub mod analyzer;
/// Client modules for interacting with the Discogs catalog
pub mod clients;
