//! Review assignment logic.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod deadline;
pub mod errors;
pub mod random;
pub mod use_cases;

pub use context::CoreContext;
pub use errors::{DomainError, Result};
pub use random::{ChaChaRandomService, RandomService};
use shaku::module;
use use_cases::{
    pulls::{
        create_pull_request::CreatePullRequest, merge_pull_request::MergePullRequest,
        reassign_reviewer::ReassignReviewer, select_reviewers::SelectReviewers,
    },
    statistics::get_statistics::GetStatistics,
    teams::{create_team::CreateTeam, get_team::GetTeam},
    users::{
        deactivate_team_members::DeactivateTeamMembers, list_user_reviews::ListUserReviews,
        set_user_is_active::SetUserIsActive,
    },
};

module! {
    pub CoreModule {
        components = [
            CreateTeam, GetTeam,
            SetUserIsActive, ListUserReviews, DeactivateTeamMembers,
            SelectReviewers, CreatePullRequest, MergePullRequest, ReassignReviewer,
            GetStatistics
        ],
        providers = []
    }
}
