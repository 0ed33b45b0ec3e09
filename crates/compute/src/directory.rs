//! In-memory registry of tracked users.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tourguide_core::{User, UserId};

/// Users keyed by their unique name.
///
/// Bulk passes work from [`UserDirectory::all`], a snapshot taken under a
/// short read lock, so registrations never wait on a running pass.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<String, Arc<User>>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. A name that is already taken keeps its first
    /// registration; returns whether the user was inserted.
    pub fn register(&self, user: User) -> bool {
        self.register_shared(Arc::new(user))
    }

    pub fn register_shared(&self, user: Arc<User>) -> bool {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        if users.contains_key(&user.user_name) {
            return false;
        }
        users.insert(user.user_name.clone(), user);
        true
    }

    pub fn by_name(&self, name: &str) -> Option<Arc<User>> {
        self.read().get(name).cloned()
    }

    /// Linear scan; ids are not indexed.
    pub fn by_id(&self, user_id: UserId) -> Option<Arc<User>> {
        self.read()
            .values()
            .find(|u| u.user_id == user_id)
            .cloned()
    }

    /// Point-in-time list of every registered user.
    pub fn all(&self) -> Vec<Arc<User>> {
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<User>>> {
        self.users.read().unwrap_or_else(|e| e.into_inner())
    }
}
