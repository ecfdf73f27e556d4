use serde::{Deserialize, Serialize};

use crate::TeamMember;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl User {
    /// Build a user from a team member entry.
    pub fn from_member(team_name: &str, member: TeamMember) -> Self {
        Self {
            user_id: member.user_id,
            username: member.username,
            team_name: team_name.into(),
            is_active: member.is_active,
        }
    }
}
