use crate::PostId;

/// Reference to a post, as listed in a feed page
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PostSummary {
    pub postid: PostId,
    pub url: String,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FeedPage {
    pub results: Vec<PostSummary>,

    /// Next page to fetch, empty when this was the last page
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub next: String,

    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub url: String,
}

impl FeedPage {
    pub fn is_last(&self) -> bool {
        self.next.is_empty()
    }
}
