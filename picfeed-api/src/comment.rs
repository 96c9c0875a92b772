use std::fmt;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub commentid: CommentId,
    pub owner: String,

    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub owner_show_url: String,

    pub text: String,

    /// Resource to DELETE in order to remove this comment
    pub url: String,

    /// Whether the logged-in viewer wrote this comment
    pub logname_owns_this: bool,
}

impl Comment {
    pub fn owner_show_url(&self) -> String {
        match self.owner_show_url.is_empty() {
            true => crate::endpoints::user_show(&self.owner),
            false => self.owner_show_url.clone(),
        }
    }
}

/// Body of a comment creation request
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub text: String,
}
