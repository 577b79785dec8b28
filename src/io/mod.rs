//! Stream tokenization and the parse driver.

pub mod pair_reader;
pub mod reader;

pub use pair_reader::{DxfPairReader, TagPair};
pub use reader::DxfParser;
