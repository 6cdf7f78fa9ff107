//! PropertyInspect Common Library
//!
//! CLIと解析サービスで共有される型とユーティリティ

pub mod types;
pub mod labels;
pub mod error;
pub mod parser;
pub mod prompts;
pub mod catalog;

pub use types::{
    ImageRef, InspectionReport, InspectionSession, Property, PropertyStatus, RecordingState, User,
};
pub use labels::{
    normalize_labels, validate_labels, FallbackPolicy, AMENITY_CANDIDATES, FALLBACK_AMENITIES,
    FALLBACK_KEYWORDS, KEYWORD_CANDIDATES, MAX_LABELS, MIN_LABELS, PLACEHOLDER_TRANSCRIPT,
};
pub use error::{Error, Result};
pub use parser::{extract_json, parse_label_response};
pub use prompts::{build_amenity_prompt, build_keyword_prompt};
pub use catalog::{find_property, properties, CatalogStats, PropertyPatch};
