pub mod error;
pub mod extract;
pub mod fetch;
pub mod generate;
pub mod parse;
pub mod pipeline;
pub mod postprocess;
pub mod preprocess;
pub mod readability;
pub mod scoring;
pub mod sentence;
pub mod strategy;
pub mod summarize;
pub mod target;

pub use error::{ErrorKind, GistError, Result};
pub use extract::{ExtractConfig, Extractor, MIN_CONTENT_CHARS, SourceDocument};
pub use fetch::{BROWSER_USER_AGENT, FetchConfig, fetch_url, parse_article_url};
pub use generate::{
    DEFAULT_MODEL, GenerationParams, Generator, GeneratorFactory, HttpGenerator, HttpGeneratorConfig,
    HttpGeneratorFactory, LazyGenerator,
};
pub use parse::{Document, Element};
pub use pipeline::{Pipeline, SummaryResult, fingerprint};
pub use postprocess::{pack_by_chars, pack_by_lines};
#[doc(hidden)]
pub use preprocess::{PreprocessConfig, preprocess_html};
pub use readability::{ReadabilityConfig, ReadabilityConfigBuilder, extract_readable_text};
#[doc(hidden)]
pub use scoring::{ScoreConfig, base_tag_score, class_id_weight, link_density};
pub use sentence::split_sentences;
pub use strategy::{ExtractionStrategy, Page, ReadabilityStrategy, SelectorStrategy, default_strategies};
pub use summarize::{DEFAULT_CACHE_CAPACITY, GenerationKey, Summarizer};
pub use target::{SummaryTarget, TargetSet, TokenBudget};
