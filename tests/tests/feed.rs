use picfeed_client::{
    api::{endpoints, FeedPage, Method, PostId, PostSummary, StatusCode},
    FeedView, PageResponse,
};
use picfeed_mock_server::{MockServer, RecordedDiagnostics};
use rand::SeedableRng;

async fn fetch_all(server: &MockServer, diag: &RecordedDiagnostics) -> FeedView {
    let mut view = FeedView::new();
    let mut req = Some(view.start(endpoints::FEED));
    while let Some(r) = req.take() {
        let resp = FeedView::fetch(server, r).await;
        assert!(view.complete(resp, diag));
        req = view.load_more();
    }
    view
}

#[tokio::test]
async fn pages_concatenate_in_arrival_order() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let fixture = tests::generate(&mut rng, &tests::Config::default());
    let diag = RecordedDiagnostics::new();

    let view = fetch_all(&fixture.server, &diag).await;

    let ids = view.posts().iter().map(|p| p.postid).collect::<Vec<_>>();
    assert_eq!(ids, fixture.visible_posts);
    assert!(!view.has_more());
    assert!(diag.is_empty());

    // one request per page, then nothing once the cursor is empty
    let num_pages = fixture.visible_posts.len() / 10 + 1;
    assert_eq!(fixture.server.requests().len(), num_pages);
    assert!(fixture
        .server
        .requests()
        .iter()
        .all(|r| r.method == Method::GET));
}

#[tokio::test]
async fn load_more_fetches_the_cursor() {
    let server = MockServer::new(tests::LOGNAME);
    let diag = RecordedDiagnostics::new();
    let mut view = FeedView::new();

    let req = view.start(endpoints::FEED);
    let page = FeedPage {
        results: vec![PostSummary {
            postid: PostId(1),
            url: String::from("/api/v1/posts/1/"),
        }],
        next: String::from("/api/v1/posts/?page=2"),
        url: String::new(),
    };
    view.complete(
        PageResponse {
            generation: req.generation,
            url: req.url,
            result: Ok(page),
        },
        &diag,
    );
    assert_eq!(view.posts().len(), 1);
    assert_eq!(view.posts()[0].url, "/api/v1/posts/1/");

    let req = view.load_more().expect("there is a next page");
    let resp = FeedView::fetch(&server, req).await;
    assert_eq!(server.requests()[0].url, "/api/v1/posts/?page=2");
    assert_eq!(server.requests()[0].method, Method::GET);

    view.complete(resp, &diag);
    assert!(!view.has_more());
    assert!(view.load_more().is_none());
}

#[tokio::test]
async fn only_own_and_followed_posts_show() {
    let server = MockServer::new(tests::LOGNAME);
    server.follow(tests::LOGNAME, "jflinn");
    server.add_user("michjc");
    let own = server.add_post(tests::LOGNAME, tests::epoch());
    let followed = server.add_post("jflinn", tests::epoch());
    server.add_post("michjc", tests::epoch());

    let view = fetch_all(&server, &RecordedDiagnostics::new()).await;
    let ids = view.posts().iter().map(|p| p.postid).collect::<Vec<_>>();
    assert_eq!(ids, vec![followed, own]);
}

#[tokio::test]
async fn exact_multiple_of_page_size_ends_on_empty_page() {
    let server = MockServer::new(tests::LOGNAME);
    server.set_page_size(2);
    for _ in 0..4 {
        server.add_post(tests::LOGNAME, tests::epoch());
    }
    let view = fetch_all(&server, &RecordedDiagnostics::new()).await;
    assert_eq!(view.posts().len(), 4);
    assert_eq!(server.requests().len(), 3);
    assert_eq!(
        server.requests()[2].url,
        endpoints::feed_page(2, 2, PostId(4)),
    );
}

#[tokio::test]
async fn failed_page_is_reported_and_can_be_retried() {
    let server = MockServer::new(tests::LOGNAME);
    server.set_page_size(1);
    server.add_post(tests::LOGNAME, tests::epoch());
    server.add_post(tests::LOGNAME, tests::epoch());
    let diag = RecordedDiagnostics::new();
    let mut view = FeedView::new();

    let req = view.start(endpoints::FEED);
    view.complete(FeedView::fetch(&server, req).await, &diag);
    assert_eq!(view.posts().len(), 1);

    server.fail_next(StatusCode::INTERNAL_SERVER_ERROR);
    let req = view.load_more().unwrap();
    view.complete(FeedView::fetch(&server, req).await, &diag);
    assert_eq!(view.posts().len(), 1);
    let reports = diag.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(
        reports[0].1.status_code(),
        Some(StatusCode::INTERNAL_SERVER_ERROR),
    );

    let req = view.load_more().unwrap();
    view.complete(FeedView::fetch(&server, req).await, &diag);
    assert_eq!(view.posts().len(), 2);
}

#[tokio::test]
async fn response_after_restart_is_dropped() {
    let server = MockServer::new(tests::LOGNAME);
    server.add_post(tests::LOGNAME, tests::epoch());
    let diag = RecordedDiagnostics::new();
    let mut view = FeedView::new();

    let first = view.start(endpoints::FEED);
    let second = view.start(endpoints::FEED);
    let first = FeedView::fetch(&server, first).await;
    let second = FeedView::fetch(&server, second).await;

    assert!(!view.complete(first, &diag));
    assert!(view.posts().is_empty());
    assert!(view.complete(second, &diag));
    assert_eq!(view.posts().len(), 1);
}
