pub use crate::error::{ConfigError, InvariantError};
pub use crate::policy::lru::{LruCore, LruStore};
pub use crate::traits::{CoreCache, LruCacheTrait, MutableCache};
