//! Persistence of the used-problem record.

mod used;

pub use used::UsedProblemStore;
