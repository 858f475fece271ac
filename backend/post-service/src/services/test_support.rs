/// In-memory store doubles shared by the service unit tests.
use crate::models::{Post, UserProfile};
use crate::repository::{MockPostStore, MockUserStore};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub(crate) type SharedPosts = Arc<Mutex<HashMap<Uuid, Post>>>;

pub(crate) fn post_with(author: Uuid, text: &str) -> Post {
    Post {
        id: Uuid::new_v4(),
        user_id: author,
        name: "Ada Lovelace".to_string(),
        avatar: Some("https://avatars.devlink.dev/ada".to_string()),
        text: text.to_string(),
        likes: Vec::new(),
        comments: Vec::new(),
        version: 0,
        created_at: Utc::now(),
    }
}

pub(crate) fn ada() -> UserProfile {
    UserProfile {
        name: "Ada Lovelace".to_string(),
        avatar: Some("https://avatars.devlink.dev/ada".to_string()),
    }
}

/// Mock post store backed by a shared map, with version-checked saves
/// mirroring the Postgres implementation's contract.
pub(crate) fn aggregate_store(seed: Vec<Post>) -> (MockPostStore, SharedPosts) {
    let state: SharedPosts = Arc::new(Mutex::new(
        seed.into_iter().map(|post| (post.id, post)).collect(),
    ));
    let mut mock = MockPostStore::new();

    let s = state.clone();
    mock.expect_load()
        .returning(move |id| Ok(s.lock().unwrap().get(&id).cloned()));

    let s = state.clone();
    mock.expect_save().returning(move |post| {
        let mut guard = s.lock().unwrap();
        match guard.get(&post.id) {
            Some(existing) if existing.version == post.version => {
                let mut updated = post.clone();
                updated.version += 1;
                guard.insert(updated.id, updated);
                Ok(true)
            }
            _ => Ok(false),
        }
    });

    let s = state.clone();
    mock.expect_delete().returning(move |id| {
        s.lock().unwrap().remove(&id);
        Ok(())
    });

    let s = state.clone();
    mock.expect_list_recent().returning(move || {
        let mut posts: Vec<Post> = s.lock().unwrap().values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    });

    (mock, state)
}

/// Mock user store that knows exactly one profile.
pub(crate) fn profile_store(user_id: Uuid, profile: UserProfile) -> MockUserStore {
    let mut mock = MockUserStore::new();
    mock.expect_load_profile().returning(move |id| {
        if id == user_id {
            Ok(Some(profile.clone()))
        } else {
            Ok(None)
        }
    });
    mock
}
