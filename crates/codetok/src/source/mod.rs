//! # Source Files
//!
//! Discovery, comment removal and tokenization of source files.

pub mod comments;
pub mod tokenize;
pub mod walk;

pub use comments::{CommentStripper, CommentStyle};
pub use tokenize::{SourceTokenizer, strip_comments, tokenize_source};
pub use walk::matching_files;
