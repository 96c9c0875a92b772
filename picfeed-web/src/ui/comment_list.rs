use picfeed_client::api::{Comment, CommentId};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentListProps {
    pub comments: Vec<Comment>,
    pub on_delete: Callback<CommentId>,
}

#[function_component(CommentList)]
pub fn comment_list(p: &CommentListProps) -> Html {
    let items = p.comments.iter().map(|c| {
        // only the author gets to delete a comment
        let delete_button = c.logname_owns_this.then(|| {
            let id = c.commentid;
            html! {
                <button
                    class="delete-comment-button"
                    type="button"
                    onclick={ p.on_delete.reform(move |_| id) }
                >
                    { "Delete comment" }
                </button>
            }
        });
        html! {
            <div key={ c.commentid.to_string() }>
                <span class="comment-text">
                    <a href={ c.owner_show_url() }>
                        <b>{ &c.owner }</b>
                    </a>
                    { " " }
                    { &c.text }
                    { for delete_button }
                </span>
            </div>
        }
    });
    html! {
        <>
            { for items }
        </>
    }
}
