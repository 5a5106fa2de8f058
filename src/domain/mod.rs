pub mod catalog;
pub mod format;
pub mod listing;
pub mod pagination;
pub mod relevance;
