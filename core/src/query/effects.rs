//! Cache effects of successful mutations
//!
//! Each write endpoint maps its response to the cache entries it affects.
//! Overwrite is used only where the response has exactly the shape the
//! matching query stores; everything else is invalidated and re-fetched.

use std::fmt;
use std::sync::Arc;

use habitquest_types::{Adventure, FriendRequest, Task, TaskId};

use super::cache::CachedValue;
use super::key::{QueryKey, keys};

#[derive(Clone)]
pub enum CacheEffect {
    Invalidate(QueryKey),
    Overwrite { key: QueryKey, value: CachedValue },
}

impl CacheEffect {
    pub fn overwrite<T: Send + Sync + 'static>(key: QueryKey, value: T) -> Self {
        CacheEffect::Overwrite {
            key,
            value: Arc::new(value),
        }
    }

    pub fn key(&self) -> &QueryKey {
        match self {
            CacheEffect::Invalidate(key) | CacheEffect::Overwrite { key, .. } => key,
        }
    }
}

impl fmt::Debug for CacheEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheEffect::Invalidate(key) => f.debug_tuple("Invalidate").field(key).finish(),
            CacheEffect::Overwrite { key, .. } => {
                f.debug_struct("Overwrite").field("key", key).finish_non_exhaustive()
            }
        }
    }
}

/// Completing a task changes the task list, the user's XP and the damage
/// dealt to the current monster.
pub fn task_completed(_task: &Task) -> Vec<CacheEffect> {
    vec![
        CacheEffect::Invalidate(keys::tasks()),
        CacheEffect::Invalidate(keys::me()),
        CacheEffect::Invalidate(keys::current_adventure()),
    ]
}

pub fn task_created(_task: &Task) -> Vec<CacheEffect> {
    vec![CacheEffect::Invalidate(keys::tasks())]
}

pub fn task_deleted(_id: TaskId) -> Vec<CacheEffect> {
    vec![CacheEffect::Invalidate(keys::tasks())]
}

/// The new adventure is both the current adventure and its own detail entry
pub fn adventure_started(adventure: &Adventure) -> Vec<CacheEffect> {
    vec![
        CacheEffect::overwrite(keys::adventure(adventure.id), adventure.clone()),
        CacheEffect::overwrite(keys::current_adventure(), Some(adventure.clone())),
        CacheEffect::Invalidate(keys::adventure_history()),
    ]
}

/// The abandoned adventure's detail entry is known; lists and XP are not
pub fn adventure_abandoned(adventure: &Adventure) -> Vec<CacheEffect> {
    vec![
        CacheEffect::overwrite(keys::adventure(adventure.id), adventure.clone()),
        CacheEffect::Invalidate(keys::current_adventure()),
        CacheEffect::Invalidate(keys::adventure_history()),
        CacheEffect::Invalidate(keys::me()),
    ]
}

pub fn friend_request_sent(_request: &FriendRequest) -> Vec<CacheEffect> {
    vec![CacheEffect::Invalidate(keys::friend_requests())]
}

pub fn friend_request_answered(_request: &FriendRequest) -> Vec<CacheEffect> {
    vec![
        CacheEffect::Invalidate(keys::friend_requests()),
        CacheEffect::Invalidate(keys::friend_list()),
    ]
}
