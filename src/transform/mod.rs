//! Transform implementations for tabular datasets
//!
//! Each rule is its own [`Transformer`](crate::etl::Transformer) over a
//! [`Dataset`](crate::dataset::Dataset); [`TitanicCleaner`] chains them into
//! the fixed manifest cleaning sequence.

mod categorical;
mod column_dropper;
mod family_size;
mod median_filler;
mod mode_filler;
mod titanic;

pub use categorical::CategoricalTagger;
pub use column_dropper::ColumnDropper;
pub use family_size::FamilySize;
pub use median_filler::MedianFiller;
pub use mode_filler::ModeFiller;
pub use titanic::{REQUIRED_COLUMNS, TitanicCleaner};
