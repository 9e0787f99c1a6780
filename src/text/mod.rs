//! Text Processing
//!
//! Tokenization, tokenizer resources and word-budgeted chunking.

pub mod chunker;
pub mod resources;
pub mod tokenizer;

pub use chunker::{Chunker, chunk_text, word_count};
pub use resources::TokenizerResources;
pub use tokenizer::{PunktTokenizer, SharedTokenizer, Tokenizer, is_alphabetic, is_title_case};
