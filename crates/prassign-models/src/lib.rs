//! Domain models.

mod pull_request;
mod pull_request_status;
mod statistics;
mod team;
mod user;

pub use pull_request::{PullRequest, PullRequestShort};
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use statistics::{PullRequestCounts, Statistics};
pub use team::{Team, TeamMember};
pub use user::User;
