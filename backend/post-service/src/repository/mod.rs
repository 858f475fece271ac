/// Store traits and their PostgreSQL implementations
///
/// The traits are the seam between the policy layer and persistence: the
/// services consume `PostStore`/`UserStore`, production wires in the
/// Postgres implementations, and tests substitute mocks or in-memory
/// fakes.
mod posts;
mod users;

pub use posts::PgPostStore;
pub use users::PgUserStore;

use crate::error::Result;
use crate::models::{Post, UserProfile};
use async_trait::async_trait;
use uuid::Uuid;

/// Load/save access to the post aggregate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Load one aggregate by id
    async fn load(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// All posts, newest first
    async fn list_recent(&self) -> Result<Vec<Post>>;

    /// Persist a freshly created aggregate
    async fn insert(&self, post: &Post) -> Result<()>;

    /// Write back a loaded aggregate.
    ///
    /// Returns `false` when the stored version no longer matches the
    /// loaded one, i.e. another writer got there first. The caller re-runs
    /// its read-modify-write in that case.
    async fn save(&self, post: &Post) -> Result<bool>;

    /// Delete the aggregate; embedded likes and comments go with it
    async fn delete(&self, post_id: Uuid) -> Result<()>;
}

/// Read access to user identity data owned by the identity service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn load_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>>;
}
