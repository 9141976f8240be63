mod direct;
mod fallback;
mod openai;
mod provider;

pub use direct::DirectHttpProvider;
pub use fallback::random_unit_vector;
pub use openai::{OPENAI_BASE_URL, OpenAIProvider};
pub use provider::EmbeddingProvider;

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
