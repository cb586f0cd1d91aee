use indexmap::IndexMap;
use tracing::debug;

use crate::state::{roles::Role, tracker::PlayerId};

/// League member as known by the league backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// League member identifier.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Team label.
    pub team: String,
    /// Playing role.
    pub role: Role,
}

/// Lookup table of league members used to resolve roles.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: IndexMap<PlayerId, RosterEntry>,
}

impl Roster {
    /// Replace the whole roster.
    pub fn replace<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = RosterEntry>,
    {
        self.entries = entries.into_iter().map(|entry| (entry.id, entry)).collect();
    }

    /// Look up a member.
    pub fn get(&self, id: PlayerId) -> Option<&RosterEntry> {
        self.entries.get(&id)
    }

    /// Role of a member, [`Role::Starter`] when the member is unknown.
    pub fn role_of(&self, id: PlayerId) -> Role {
        match self.entries.get(&id) {
            Some(entry) => entry.role,
            None => {
                debug!(player_id = id, "player missing from roster; assuming starter");
                Role::Starter
            }
        }
    }

    /// Members in the order they were supplied.
    pub fn entries(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.values()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_member_defaults_to_starter() {
        let mut roster = Roster::default();
        roster.replace([RosterEntry {
            id: 10,
            name: "Alex".into(),
            team: "Green".into(),
            role: Role::Captain,
        }]);

        assert_eq!(roster.role_of(10), Role::Captain);
        assert_eq!(roster.role_of(11), Role::Starter);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn replace_discards_previous_members() {
        let mut roster = Roster::default();
        roster.replace([RosterEntry {
            id: 1,
            name: "A".into(),
            team: "T".into(),
            role: Role::SClass,
        }]);
        roster.replace(Vec::new());
        assert!(roster.is_empty());
        assert!(roster.get(1).is_none());
    }
}
