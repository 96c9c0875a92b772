use picfeed_client::{
    api::{endpoints, CommentId, Method, PostId, StatusCode},
    toggle_like, Backend, PostState, PostView,
};
use picfeed_mock_server::{MockServer, RecordedDiagnostics};

async fn load(server: &MockServer, postid: PostId) -> PostView {
    let mut view = PostView::new();
    let req = view.start(&endpoints::post(postid));
    let resp = PostView::fetch(server, req).await;
    assert!(view.complete(resp, &RecordedDiagnostics::new()));
    server.take_requests();
    view
}

/// Backend where post 7 exists, owned by the viewer
fn server_with_post_7() -> MockServer {
    let server = MockServer::new(tests::LOGNAME);
    for _ in 0..7 {
        server.add_post(tests::LOGNAME, tests::epoch());
    }
    server
}

#[tokio::test]
async fn loads_full_record() {
    let server = server_with_post_7();
    let postid = PostId(7);
    server.add_comment_as("jflinn", postid, "first");
    server.add_comment_as(tests::LOGNAME, postid, "second");
    server.like_as("jflinn", postid);

    let view = load(&server, postid).await;
    let d = view.detail().expect("post is loaded");
    assert_eq!(d.postid, postid);
    assert_eq!(d.owner, tests::LOGNAME);
    assert_eq!(d.likes.num_likes, 1);
    assert!(!d.likes.logname_likes_this);
    let texts = d.comments.iter().map(|c| &c.text as &str).collect::<Vec<_>>();
    assert_eq!(texts, vec!["first", "second"]);
    assert!(!d.comments[0].logname_owns_this);
    assert!(d.comments[1].logname_owns_this);
}

#[tokio::test]
async fn missing_post_stays_loading() {
    let server = MockServer::new(tests::LOGNAME);
    let diag = RecordedDiagnostics::new();
    let mut view = PostView::new();
    let req = view.start(&endpoints::post(PostId(3)));
    assert!(!view.complete(PostView::fetch(&server, req).await, &diag));
    assert_eq!(view.state(), &PostState::Loading);
    assert!(!view.comment_input_enabled());
    assert_eq!(diag.reports()[0].1.status_code(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn comment_submission() {
    let server = server_with_post_7();
    let mut view = load(&server, PostId(7)).await;

    view.set_comment_draft(String::from("hello"));
    let req = view.submit_comment().expect("post id is resolved");
    // cleared before the request even started
    assert_eq!(view.comment_draft(), "");

    let c = PostView::send_comment(&server, req).await.unwrap();
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, "/api/v1/comments/?postid=7");
    assert_eq!(requests[0].body, Some(serde_json::json!({ "text": "hello" })));

    assert!(c.logname_owns_this);
    assert_eq!(c.url, endpoints::comment(c.commentid));
    assert!(view.append_comment(PostId(7), c.clone()));
    assert_eq!(view.comments().last(), Some(&c));
    assert_eq!(view.comment_draft(), "");
}

#[tokio::test]
async fn failed_comment_still_clears_input() {
    let server = server_with_post_7();
    let mut view = load(&server, PostId(7)).await;

    view.set_comment_draft(String::from("lost"));
    let req = view.submit_comment().unwrap();
    server.fail_next(StatusCode::FORBIDDEN);
    assert!(PostView::send_comment(&server, req).await.is_err());
    assert_eq!(view.comment_draft(), "");
    assert!(view.comments().is_empty());
    assert!(server.comment_texts(PostId(7)).is_empty());
}

#[tokio::test]
async fn delete_is_local_first() {
    let server = server_with_post_7();
    let keep_a = server.add_comment_as(tests::LOGNAME, PostId(7), "a");
    let gone = server.add_comment_as(tests::LOGNAME, PostId(7), "b");
    let keep_c = server.add_comment_as("jflinn", PostId(7), "c");
    let mut view = load(&server, PostId(7)).await;

    let removed = view.delete_comment(gone).expect("own comment");
    let ids = view.comments().iter().map(|c| c.commentid).collect::<Vec<_>>();
    assert_eq!(ids, vec![keep_a, keep_c]);

    // the view does not come back even when the backend refuses
    server.fail_next(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(server.delete_comment(&removed.url).await.is_err());
    assert_eq!(view.comments().len(), 2);
    assert_eq!(server.comment_texts(PostId(7)), vec!["a", "b", "c"]);

    server.delete_comment(&removed.url).await.unwrap();
    assert_eq!(server.comment_texts(PostId(7)), vec!["a", "c"]);
}

#[tokio::test]
async fn foreign_comments_cannot_be_deleted() {
    let server = server_with_post_7();
    let theirs = server.add_comment_as("jflinn", PostId(7), "mine!");
    let mut view = load(&server, PostId(7)).await;

    assert_eq!(view.delete_comment(theirs), None);
    assert_eq!(view.comments().len(), 1);

    let err = server
        .delete_comment(&endpoints::comment(theirs))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::FORBIDDEN));
    let err = server
        .delete_comment(&endpoints::comment(CommentId(999)))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn double_click_likes_once() {
    let server = server_with_post_7();
    let mut view = load(&server, PostId(7)).await;

    let (postid, likes) = view.double_click_like().expect("not liked yet");
    let likes = toggle_like(&server, postid, &likes).await.unwrap();
    assert!(view.set_likes(postid, likes.clone()));
    assert_eq!(likes.num_likes, 1);
    assert!(likes.logname_likes_this);
    assert!(likes.is_consistent());
    assert_eq!(server.take_requests().len(), 1);

    // already liked: nothing to send, nothing changes
    assert_eq!(view.double_click_like(), None);
    assert!(server.requests().is_empty());
    assert_eq!(view.likes(), Some(&likes));
    assert_eq!(server.num_likes(PostId(7)), 1);
}
