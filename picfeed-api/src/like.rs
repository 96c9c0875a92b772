/// Like state of one post, as seen by the logged-in viewer
///
/// `url` is the resource to DELETE in order to retract the viewer's like. It
/// is non-empty if and only if `logname_likes_this` is set.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub logname_likes_this: bool,
    pub num_likes: u64,

    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub url: String,
}

impl LikeState {
    pub fn is_consistent(&self) -> bool {
        self.logname_likes_this != self.url.is_empty()
    }

    /// State after the viewer's like was created at `url`
    pub fn liked(&self, url: String) -> LikeState {
        LikeState {
            logname_likes_this: true,
            num_likes: self.num_likes + 1,
            url,
        }
    }

    /// State after the viewer's like was deleted
    pub fn unliked(&self) -> LikeState {
        LikeState {
            logname_likes_this: false,
            num_likes: self.num_likes.saturating_sub(1),
            url: String::new(),
        }
    }
}

/// Answer to a like creation request
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewLike {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likeid: Option<u64>,
    pub url: String,
}
