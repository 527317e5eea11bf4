pub mod loader;
pub mod processor;

pub use loader::{DictionaryLoader, SubstitutionLoader};
pub use processor::EnglishProcessor;
