//! Data access port trait.

use std::path::Path;

use tracing::error;

use crate::domain::error::FolioError;
use crate::domain::tree::Node;
use crate::domain::valuation::PriceTable;

pub trait DataPort {
    /// Reads a portfolio source into a generic tree.
    fn load_tree(&self, path: &Path) -> Result<Node, FolioError>;

    /// Reads a symbol → current price table.
    fn load_prices(&self, path: &Path) -> Result<PriceTable, FolioError>;

    /// Like `load_tree`, but an unreadable source yields an empty tree and a
    /// logged error instead of failing.
    fn tree_or_empty(&self, path: &Path) -> Node {
        self.load_tree(path).unwrap_or_else(|e| {
            error!(path = %path.display(), "{e}");
            Node::empty()
        })
    }

    /// Like `load_prices`, but an unreadable source yields an empty table and
    /// a logged error instead of failing.
    fn prices_or_empty(&self, path: &Path) -> PriceTable {
        self.load_prices(path).unwrap_or_else(|e| {
            error!(path = %path.display(), "{e}");
            PriceTable::new()
        })
    }
}
