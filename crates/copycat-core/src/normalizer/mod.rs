pub mod cache;
pub mod canonical;

pub use cache::ContentCache;
pub use canonical::{read_canonical, CanonicalContent};
