use thiserror::Error;

use crate::document::NodeId;

/// Errors returned by [`Document`](crate::Document) mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id refers to a node that was removed (or never existed).
    #[error("{0} does not exist")]
    StaleNode(NodeId),

    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Inserting would make a node its own ancestor.
    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("the document root cannot be moved or removed")]
    RootImmutable,
}
