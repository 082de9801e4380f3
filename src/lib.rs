pub mod corpus;
pub mod dataset;
pub mod error;
mod nikud;

pub use corpus::{Book, Chapter, ReviewRow, Verse, load_book, review_rows, write_review_csv};
pub use dataset::{
    PrepareConfig, PrepareReport, TrainingPairs, build_pairs, prepare_dataset,
    read_corrected_texts,
};
pub use error::DatasetError;
pub use nikud::{
    DAGESH, MarkCategory, SHIN_DOT, SIN_DOT, canonicalize, classify, is_diacritic,
    is_hebrew_letter, strip,
};
