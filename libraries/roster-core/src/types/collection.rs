/// Ordered snapshot of the backend's user collection
use super::{User, UserId};
use serde::{Deserialize, Serialize};

/// Users in the order the server returned them
///
/// A snapshot: it is only valid until the next successful read or local merge.
/// The client never reorders it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserCollection(Vec<User>);

/// What `UserCollection::merge` did with the user it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No user with that id existed; it was added at the end
    Appended,
    /// A user with that id existed and was replaced in place
    Replaced,
}

impl UserCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[User] {
        &self.0
    }

    /// Find a user by id
    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.0.iter().find(|user| user.id.same_as(id))
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.get(id).is_some()
    }

    /// Ids in display order
    pub fn ids(&self) -> impl Iterator<Item = &UserId> {
        self.0.iter().map(|user| &user.id)
    }

    /// Merge a user into the snapshot
    ///
    /// Replaces an existing user with the same id in place, otherwise appends.
    /// Ids are compared with [`UserId::same_as`], so `2` and `"2"` collide;
    /// a replaced user keeps the id form already in the snapshot. The
    /// position of every other user is unchanged.
    pub fn merge(&mut self, mut user: User) -> MergeOutcome {
        match self.0.iter_mut().find(|existing| existing.id.same_as(&user.id)) {
            Some(existing) => {
                user.id = existing.id.clone();
                *existing = user;
                MergeOutcome::Replaced
            }
            None => {
                self.0.push(user);
                MergeOutcome::Appended
            }
        }
    }

    pub fn into_inner(self) -> Vec<User> {
        self.0
    }
}

impl From<Vec<User>> for UserCollection {
    fn from(users: Vec<User>) -> Self {
        Self(users)
    }
}

impl FromIterator<User> for UserCollection {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for UserCollection {
    type Item = User;
    type IntoIter = std::vec::IntoIter<User>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a UserCollection {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_deserializes_from_json_array() {
        let users: UserCollection =
            serde_json::from_str(r#"[{"id":1,"name":"Ana"},{"id":2,"name":"Bo"}]"#).unwrap();

        assert_eq!(users.len(), 2);
        let ids: Vec<String> = users.ids().map(ToString::to_string).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_merge_appends_new_user() {
        let mut users = UserCollection::from(vec![User::new(1, "Ana")]);

        assert_eq!(users.merge(User::new(2, "Bo")), MergeOutcome::Appended);
        assert_eq!(users.len(), 2);
        assert_eq!(users.as_slice()[1].display_name(), "Bo");
    }

    #[test]
    fn test_merge_replaces_in_place() {
        let mut users =
            UserCollection::from(vec![User::new(1, "Ana"), User::new(2, "Bo"), User::new(3, "Cy")]);

        assert_eq!(users.merge(User::new(2, "Bob")), MergeOutcome::Replaced);

        let names: Vec<String> = users.iter().map(User::display_name).collect();
        assert_eq!(names, vec!["Ana", "Bob", "Cy"]);
    }

    #[test]
    fn test_merge_matches_id_across_wire_forms() {
        let mut users = UserCollection::from(vec![User::new(1, "Ana"), User::new(2, "Bo")]);

        assert_eq!(users.merge(User::new("2", "Bob")), MergeOutcome::Replaced);

        assert_eq!(users.len(), 2);
        assert_eq!(users.as_slice()[1].id, UserId::from(2));
        assert_eq!(users.as_slice()[1].display_name(), "Bob");
        assert!(users.contains(&UserId::from("1")));
    }

    proptest! {
        /// Merging never disturbs the relative order of users already present
        #[test]
        fn merge_preserves_existing_order(
            ids in prop::collection::btree_set(0i64..500, 0..40),
            merged in 0i64..600,
        ) {
            let ids: Vec<i64> = ids.into_iter().collect();
            let mut users: UserCollection =
                ids.iter().map(|id| User::new(*id, format!("user-{}", id))).collect();

            users.merge(User::new(merged, "merged"));

            let after: Vec<i64> = users
                .ids()
                .filter_map(|id| match id {
                    UserId::Numeric(n) => Some(*n),
                    UserId::Text(_) => None,
                })
                .collect();

            let expected: Vec<i64> = if ids.contains(&merged) {
                ids.clone()
            } else {
                ids.iter().copied().chain(std::iter::once(merged)).collect()
            };
            prop_assert_eq!(after, expected);
            prop_assert_eq!(users.get(&UserId::from(merged)).and_then(|u| u.name.clone()), Some("merged".to_string()));
        }
    }
}
