use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestCounts {
    #[serde(rename = "total_prs")]
    pub total: u64,
    #[serde(rename = "open_prs")]
    pub open: u64,
    #[serde(rename = "merged_prs")]
    pub merged: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    /// Assignment count per username, including users with no assignment.
    pub assignments_by_user: BTreeMap<String, u64>,
    pub pull_requests: PullRequestCounts,
}
