pub mod dictionary;
pub mod error;
pub mod language;
pub mod lookup;
pub mod preprocess;
pub mod simplify;
pub mod state;
pub mod syllable;
pub mod text;
pub mod vocabulary;
