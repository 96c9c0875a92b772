mod comment;
pub use comment::{Comment, CommentId, NewComment};

pub mod endpoints;

mod error;
pub use error::{FailureReason, RequestFailed};

mod feed;
pub use feed::{FeedPage, PostSummary};

mod like;
pub use like::{LikeState, NewLike};

mod post;
pub use post::{PostDetail, PostId};

pub use http::{Method, StatusCode};

pub type Time = chrono::DateTime<chrono::Utc>;

/// Deserializes `null` and missing strings as the empty string
///
/// The backend sends `null` for absent URLs, while the views treat the empty
/// string as "nothing here".
pub(crate) fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = serde::Deserialize::deserialize(d)?;
    Ok(s.unwrap_or_default())
}
