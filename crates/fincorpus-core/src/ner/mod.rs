mod clean;
mod pipeline;
mod schema;
mod split;

pub use clean::{clean, CleanedRecord, Rejection, SplitRecord};
pub use pipeline::{
    load_and_clean, prepare, LoadStats, NerStats, METADATA_FILE, TEST_FILE, TRAIN_FILE,
    VALIDATION_FILE,
};
pub use schema::{LabelSchema, SplitMetadata, OUTSIDE};
pub use split::{split_records, Splits};
