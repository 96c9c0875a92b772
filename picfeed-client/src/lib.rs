mod backend;
pub use backend::Backend;

mod diagnostics;
pub use diagnostics::{Diagnostics, TracingDiagnostics};

mod feed;
pub use feed::{FeedView, PageRequest, PageResponse};

mod guard;
pub use guard::{Generation, StaleGuard};

mod http;
pub use http::{Credentials, HttpBackend};

mod likes;
pub use likes::{button_label, count_label, toggle_like};

mod post;
pub use post::{remove_comment, CommentRequest, PostRequest, PostResponse, PostState, PostView};

mod time;
pub use time::humanize_since;

pub mod api {
    pub use picfeed_api::*;
}
