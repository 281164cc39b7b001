pub mod attribute;
pub mod enriched_table;
pub mod sport_record;

pub use attribute::{Attribute, Column};
pub use enriched_table::{EnrichedTable, TABLE_COLUMN_COUNT};
pub use sport_record::{EnrichedRow, PopularitySource, SportRecord};
