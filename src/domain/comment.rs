use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CommentBody, CommentId, PostId, UserId, Username};

/// A reply attached to a post, ordered by creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author: Username,
    pub body: CommentBody,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`Comment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub post_id: PostId,
    pub author_id: UserId,
    pub body: CommentBody,
}
