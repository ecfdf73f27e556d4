pub(crate) mod create_pull_request;
pub(crate) mod merge_pull_request;
pub(crate) mod reassign_reviewer;
pub(crate) mod select_reviewers;

pub use create_pull_request::CreatePullRequestInterface;
pub use merge_pull_request::MergePullRequestInterface;
pub use reassign_reviewer::{ReassignReviewerInterface, Reassignment};
pub use select_reviewers::SelectReviewersInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_pull_request::MockCreatePullRequestInterface,
    merge_pull_request::MockMergePullRequestInterface,
    reassign_reviewer::MockReassignReviewerInterface,
    select_reviewers::MockSelectReviewersInterface,
};
