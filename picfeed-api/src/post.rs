use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::{Comment, LikeState, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub postid: PostId,
    pub img_url: String,
    pub owner: String,
    pub owner_img_url: String,

    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub owner_show_url: String,

    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub post_show_url: String,

    /// The API resource this record was fetched from
    #[serde(default, deserialize_with = "crate::null_as_empty")]
    pub url: String,

    #[serde(with = "created_format")]
    pub created: Time,

    pub likes: LikeState,

    /// Comments in the order the backend returned them
    pub comments: Vec<Comment>,
}

impl PostDetail {
    pub fn owner_show_url(&self) -> String {
        match self.owner_show_url.is_empty() {
            true => crate::endpoints::user_show(&self.owner),
            false => self.owner_show_url.clone(),
        }
    }

    pub fn post_show_url(&self) -> String {
        match self.post_show_url.is_empty() {
            true => crate::endpoints::post_show(self.postid),
            false => self.post_show_url.clone(),
        }
    }
}

/// The backend stores `created` as a naive UTC `YYYY-MM-DD HH:MM:SS`
/// timestamp; RFC 3339 is accepted as well.
mod created_format {
    use super::*;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(t: &Time, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Time, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: String = serde::Deserialize::deserialize(d)?;
        parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid post creation timestamp {s:?}"))
        })
    }

    pub(super) fn parse(s: &str) -> Option<Time> {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, FORMAT) {
            return Some(Utc.from_utc_datetime(&t));
        }
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}
