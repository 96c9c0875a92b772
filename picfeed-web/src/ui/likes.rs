use picfeed_client::{
    api::{LikeState, PostId},
    button_label, count_label, toggle_like,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::Services;

#[derive(Clone, PartialEq, Properties)]
pub struct LikesProps {
    pub likes: LikeState,
    pub postid: PostId,
    pub on_change: Callback<LikeState>,
    pub services: Services,
}

/// Like count and like/unlike button
///
/// The state belongs to the parent: once the backend confirmed the toggle, the
/// whole new state gets handed back through `on_change`.
#[function_component(Likes)]
pub fn likes(p: &LikesProps) -> Html {
    let onclick = {
        let likes = p.likes.clone();
        let postid = p.postid;
        let on_change = p.on_change.clone();
        let services = p.services.clone();
        Callback::from(move |_: MouseEvent| {
            let likes = likes.clone();
            let on_change = on_change.clone();
            let services = services.clone();
            spawn_local(async move {
                match toggle_like(&*services.backend, postid, &likes).await {
                    Ok(new_likes) => on_change.emit(new_likes),
                    Err(e) => services.diagnostics.report("failed toggling like", &e),
                }
            });
        })
    };
    html! {
        <div>
            <p>{ count_label(p.likes.num_likes) }</p>
            <button
                class="like-unlike-button"
                type="button"
                { onclick }
            >
                { button_label(&p.likes) }
            </button>
        </div>
    }
}
