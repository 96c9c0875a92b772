use picfeed_client::{
    api::{endpoints, LikeState, Method, PostId, StatusCode},
    button_label, count_label, toggle_like, Backend,
};
use picfeed_mock_server::MockServer;

/// Post 7 liked by three other users, and 41 identifiers already handed out
fn server_with_liked_post() -> MockServer {
    let server = MockServer::new(tests::LOGNAME);
    for _ in 0..7 {
        server.add_post(tests::LOGNAME, tests::epoch());
    }
    for i in 0..31 {
        server.add_comment_as("jflinn", PostId(1), &format!("filler {i}"));
    }
    for u in 1..=3 {
        server.like_as(&tests::username(u), PostId(7));
    }
    server
}

fn three_likes() -> LikeState {
    LikeState {
        logname_likes_this: false,
        num_likes: 3,
        url: String::new(),
    }
}

#[tokio::test]
async fn like_then_unlike() {
    let server = server_with_liked_post();
    let before = three_likes();
    assert_eq!(button_label(&before), "Like");
    assert_eq!(count_label(before.num_likes), "3 likes");

    let liked = toggle_like(&server, PostId(7), &before).await.unwrap();
    assert_eq!(
        liked,
        LikeState {
            logname_likes_this: true,
            num_likes: 4,
            url: String::from("/api/v1/likes/42/"),
        }
    );
    assert_eq!(button_label(&liked), "Unlike");
    assert_eq!(count_label(liked.num_likes), "4 likes");
    let requests = server.take_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, "/api/v1/likes/?postid=7");
    assert_eq!(server.num_likes(PostId(7)), 4);

    let unliked = toggle_like(&server, PostId(7), &liked).await.unwrap();
    assert_eq!(unliked, before);
    let requests = server.take_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].url, "/api/v1/likes/42/");
    assert_eq!(server.num_likes(PostId(7)), 3);
}

#[tokio::test]
async fn failure_changes_nothing() {
    let server = server_with_liked_post();
    let before = three_likes();

    server.fail_next(StatusCode::INTERNAL_SERVER_ERROR);
    let err = toggle_like(&server, PostId(7), &before).await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(before, three_likes());
    assert_eq!(server.num_likes(PostId(7)), 3);
}

#[tokio::test]
async fn cannot_remove_someone_elses_like() {
    let server = server_with_liked_post();
    let theirs = server.like_as("jflinn", PostId(7));
    let forged = LikeState {
        logname_likes_this: true,
        num_likes: 4,
        url: endpoints::like(theirs),
    };
    let err = toggle_like(&server, PostId(7), &forged).await.unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::FORBIDDEN));
    assert_eq!(server.num_likes(PostId(7)), 4);
}

#[tokio::test]
async fn liking_twice_keeps_one_like() {
    let server = server_with_liked_post();
    let first = server.add_like(PostId(7)).await.unwrap();
    let second = server.add_like(PostId(7)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(server.num_likes(PostId(7)), 4);
}

#[tokio::test]
async fn liking_missing_post_is_not_found() {
    let server = MockServer::new(tests::LOGNAME);
    let err = toggle_like(&server, PostId(7), &three_likes())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(StatusCode::NOT_FOUND));
}
