// Job-description keyword extraction. The analyzer only needs a nested keyword
// structure; how it is produced sits behind the `KeywordExtractor` trait.

pub mod experience;
pub mod extractor;
pub mod handlers;
pub mod prompts;

pub use extractor::{KeywordExtractor, LlmKeywordExtractor};
