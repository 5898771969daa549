//! Data models for Bookshelf

pub mod book;
pub mod category;
pub mod item;
pub mod pagination;
pub mod policy;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookInput};
pub use category::Category;
pub use item::{Item, ItemStatistics};
pub use pagination::{PageQuery, PageRequest};
pub use policy::Action;
pub use user::{Role, User, UserClaims, UserShort};

/// A record stored in a JSON collection, addressed by its string id
pub trait Record {
    /// Human-readable entity name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;
}
