use std::collections::btree_map::{BTreeMap, Entry};

use crate::error::{AppError, Result};
use crate::models::User;

/// In-memory user records keyed by Id.
///
/// Enumeration yields records in ascending Id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStore {
    users: BTreeMap<u16, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user, failing if the Id is already taken
    pub fn insert(&mut self, user: User) -> Result<()> {
        match self.users.entry(user.id) {
            Entry::Occupied(_) => Err(AppError::DuplicateId(user.id)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    /// Add or replace a user, returning the record it displaced
    pub fn upsert(&mut self, user: User) -> Option<User> {
        self.users.insert(user.id, user)
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }

    /// Drop every record and take `users` instead.
    ///
    /// Later duplicates of an Id win.
    pub fn replace_all(&mut self, users: impl IntoIterator<Item = User>) {
        self.users = users.into_iter().map(|u| (u.id, u)).collect();
    }

    pub fn contains(&self, id: u16) -> bool {
        self.users.contains_key(&id)
    }

    pub fn get(&self, id: u16) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<User> for UserStore {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let mut store = UserStore::new();
        store.replace_all(iter);
        store
    }
}
