//! Dataset loading
//!
//! - Source CSV parsing and popularity enrichment (`loader`)
//! - Built-in popularity reference (`popularity`)
//! - Cached, shareable table snapshots (`snapshot`)

pub mod loader;
pub mod popularity;
pub mod snapshot;

pub use loader::{
    enrich, load_from_bytes, load_table, parse_records, read_source, Enrichment, LoadedTable,
    ParseStats,
};
pub use popularity::{builtin_reference, PopularityReference, POPULARITY_REFERENCE};
pub use snapshot::{SnapshotCache, SnapshotMetadata, TableSnapshot};
