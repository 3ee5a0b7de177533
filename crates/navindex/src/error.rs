#[derive(Debug, thiserror::Error)]
pub enum NavIndexError {
    #[error("Empty label in section '{0}'")]
    EmptyLabel(String),

    #[error("Node '{0}' has neither an href nor children")]
    DeadNode(String),

    #[error("Section at position {0} has an empty title")]
    EmptySectionTitle(usize),
}

pub type Result<T> = std::result::Result<T, NavIndexError>;
