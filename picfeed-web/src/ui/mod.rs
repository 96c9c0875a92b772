mod app;
pub use app::{App, AppProps};

mod comment_list;
pub use comment_list::CommentList;

mod feed;
pub use feed::Feed;

mod likes;
pub use likes::Likes;

mod post;
pub use post::Post;
