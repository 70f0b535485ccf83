//! Token tree and analysis result types

mod analysis;
mod token_tree;

pub use analysis::{Analysis, StatementAnalysis, StatementKind};
pub use token_tree::{Identifier, Token, TokenId, TokenKind, TokenTree, TreeBuilder};
