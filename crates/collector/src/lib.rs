#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`CollectorError`)
//! - [`config`]: Collector configuration (`CollectorConfig`, builder)
//! - [`types`]: Domain types (`Advisory`, `Affected`, `Range`, `Event`, `Severity`, `VulnDb`)
//! - [`feed`]: Index feed parsing (`IndexFeed`, `FeedItem`, multi-ID expansion)
//! - [`registry`]: CVE registry detail records (`CveRecord`, description/metric selection)
//! - [`version`]: Version sanitizer, range builder, series merger, event builder
//! - [`component`]: Canonical organization/repository identity tables
//! - [`scoring`]: CVSS vector scoring
//! - [`validate`]: Batch validation (`ValidationReport`)
//! - [`source`]: Fetch boundary (`AdvisorySource` trait, `HttpAdvisorySource`)
//! - [`collector`]: Main orchestrator (`Collector`)
//!
//! # Architecture
//!
//! ```text
//! index feed --> FeedItem --> expand_ids --> detail record (registry)
//!                                                 |
//!                                  sanitize --> build_spans --> merge_series
//!                                                 |
//!                                           build_affected
//!                                                 |
//!                          Advisory (summary + description + component + cvss)
//!                                                 |
//!                                   VulnDb --> validate_db --> caller
//! ```

pub mod collector;
pub mod component;
pub mod config;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod registry;
pub mod scoring;
pub mod source;
pub mod types;
pub mod validate;
pub mod version;

// --- Public API Re-exports ---

// Collector (main orchestrator)
pub use collector::Collector;

// Configuration
pub use config::{CollectorConfig, CollectorConfigBuilder};

// Error
pub use error::CollectorError;

// Types
pub use types::{
    Advisory, Affected, CvssV3, Event, RANGE_TYPE_SEMVER, Range, Severity, VersionSpan, VulnDb,
};

// Feed / registry wire types
pub use feed::{FeedItem, IndexFeed};
pub use registry::{CveRecord, RawVersionField};

// Fetch boundary
pub use source::{AdvisorySource, HttpAdvisorySource};

// Validation
pub use validate::{ValidationReport, Violation, validate_db};

// Version engine
pub use version::event::build_affected;
pub use version::merge::merge_series;
pub use version::range::{Comparator, build_spans, extract_bounds};
pub use version::sanitize::{SanitizedVersion, sanitize};
