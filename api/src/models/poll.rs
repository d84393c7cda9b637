use pollbuddy_core::db::Poll;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct PollSummaryModel {
    pub id:    String,
    pub title: String
}

impl PollSummaryModel {
    pub fn from_poll(poll: Poll) -> Self {
        Self {
            id:    poll.id.to_hex(),
            title: poll.title
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollModel {
    pub id:         String,
    pub title:      String,
    pub open_time:  String,
    pub close_time: String,
    pub open:       bool,
    pub is_admin:   bool,
    pub group:      Option<String>
}

impl PollModel {
    pub fn from_poll(poll: Poll, open: bool, is_admin: bool) -> Self {
        Self {
            id: poll.id.to_hex(),
            title: poll.title,
            open_time: poll.open_time.to_chrono().to_rfc3339(),
            close_time: poll.close_time.to_chrono().to_rfc3339(),
            open,
            is_admin,
            group: poll.group.map(|id| id.to_hex())
        }
    }
}
