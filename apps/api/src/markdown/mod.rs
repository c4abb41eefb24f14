//! The constrained markdown dialect: tokenizer, normalizer, quality gate and block pass.

pub mod blocks;
pub mod inline;
pub mod normalize;
pub mod patterns;
pub mod quality;

pub use blocks::{filename_base, parse_blocks, Block};
pub use inline::InlineSpan;
pub use normalize::{normalize_with, LineCapPolicy, NormalizeOptions};
pub use quality::QualityGate;
