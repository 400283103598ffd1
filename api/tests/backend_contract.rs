//! HTTP contract tests for `BackendClient` against a mock server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use fscomics_api::{
    ApiError, BackendApi, BackendClient, Credentials, LikeChange, NewComment, NewProfile,
    NewReview, ProfileId, ProfileUpdate, ReviewId, Upload, UserId,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "token-123";

fn review_json(id: u64, liked: &[u64]) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Dune",
        "bookName": "Dune",
        "content": "Spice",
        "userReview": 1,
        "createdAt": "2021-04-01",
        "img": null,
        "likedUser": liked,
    })
}

fn profile_json(id: u64, user: u64, nick: &str) -> serde_json::Value {
    json!({
        "id": id,
        "nickName": nick,
        "userProfile": user,
        "created_at": "2021-04-01",
        "avatar": null,
    })
}

async fn body_of_last_request(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    String::from_utf8_lossy(&requests.last().unwrap().body).into_owned()
}

#[tokio::test]
async fn test_authenticate_posts_json_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authen/jwt/create"))
        .and(body_json(json!({ "email": "a@b.c", "password": "pass" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access": "acc", "refresh": "ref" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let tokens = client
        .authenticate(&Credentials::new("a@b.c", "pass"))
        .await
        .unwrap();

    assert_eq!(tokens.access, "acc");
    assert_eq!(tokens.refresh.as_deref(), Some("ref"));
}

#[tokio::test]
async fn test_authenticate_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/authen/jwt/create"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let result = client.authenticate(&Credentials::new("a@b.c", "nope")).await;

    assert_eq!(result, Err(ApiError::Unauthorized));
}

#[tokio::test]
async fn test_register_returns_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12, "email": "a@b.c" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let account = client.register(&Credentials::new("a@b.c", "pass")).await.unwrap();

    assert_eq!(account.id, Some(UserId(12)));
    assert_eq!(account.email, "a@b.c");
}

#[tokio::test]
async fn test_create_profile_sends_jwt_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/profile/"))
        .and(header("Authorization", "JWT token-123"))
        .and(body_json(json!({ "nickName": "mob" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(profile_json(3, 12, "mob")))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let profile = client
        .create_profile(TOKEN, &NewProfile { nick_name: "mob".to_string() })
        .await
        .unwrap();

    assert_eq!(profile.id, ProfileId(3));
    assert_eq!(profile.user_profile, UserId(12));
}

#[tokio::test]
async fn test_update_profile_is_multipart_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/profile/3/"))
        .and(header("Authorization", "JWT token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(3, 12, "renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let profile = client
        .update_profile(
            TOKEN,
            &ProfileUpdate {
                id: ProfileId(3),
                nick_name: "renamed".to_string(),
                avatar: Some(Upload::new("me.png", vec![0x89, 0x50]).with_mime("image/png")),
            },
        )
        .await
        .unwrap();

    assert_eq!(profile.nick_name, "renamed");
    let body = body_of_last_request(&server).await;
    assert!(body.contains("name=\"nickName\""));
    assert!(body.contains("name=\"avatar\"; filename=\"me.png\""));
}

#[tokio::test]
async fn test_my_profile_takes_first_element() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/myprofile/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([profile_json(3, 12, "me"), profile_json(4, 13, "other")])),
        )
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let profile = client.my_profile(TOKEN).await.unwrap();

    assert_eq!(profile.nick_name, "me");
}

#[tokio::test]
async fn test_my_profile_empty_array_is_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/myprofile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let result = client.my_profile(TOKEN).await;

    assert!(matches!(result, Err(ApiError::EmptyCollection(_))));
}

#[tokio::test]
async fn test_list_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_json(1, 1, "a")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/review/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([review_json(1, &[]), review_json(2, &[1])])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/comment/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "text": "nice", "userComment": 1, "review": 2 }
        ])))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());

    assert_eq!(client.profiles(TOKEN).await.unwrap().len(), 1);
    assert_eq!(client.reviews(TOKEN).await.unwrap().len(), 2);
    let comments = client.comments(TOKEN).await.unwrap();
    assert_eq!(comments[0].review, ReviewId(2));
}

#[tokio::test]
async fn test_create_review_is_multipart_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/review/"))
        .and(body_string_contains("name=\"bookName\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(review_json(7, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let review = client
        .create_review(
            TOKEN,
            &NewReview {
                title: "Dune".to_string(),
                book_name: "Dune".to_string(),
                content: "Spice".to_string(),
                img: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(review.id, ReviewId(7));
    assert!(!body_of_last_request(&server).await.contains("name=\"img\""));
}

#[tokio::test]
async fn test_remove_sole_like_is_put_with_title_only() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/review/4/"))
        .and(body_string_contains("name=\"title\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(review_json(4, &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let change = LikeChange::plan(ReviewId(4), "Dune", &[UserId(5)], UserId(5));
    let review = client.update_likes(TOKEN, &change).await.unwrap();

    assert!(review.liked_user.is_empty());
    assert!(!body_of_last_request(&server).await.contains("name=\"liked\""));
}

#[tokio::test]
async fn test_partial_like_update_is_patch_without_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/review/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(review_json(4, &[3, 9])))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let change = LikeChange::plan(ReviewId(4), "Dune", &[UserId(3), UserId(5), UserId(9)], UserId(5));
    let review = client.update_likes(TOKEN, &change).await.unwrap();

    assert_eq!(review.liked_user, vec![UserId(3), UserId(9)]);
    let body = body_of_last_request(&server).await;
    assert_eq!(body.matches("name=\"liked\"").count(), 2);
    assert!(!body.contains("name=\"title\""));
}

#[tokio::test]
async fn test_create_comment_posts_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/comment/"))
        .and(body_json(json!({ "text": "nice", "review": 4 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 8, "text": "nice", "userComment": 12, "review": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let comment = client
        .create_comment(
            TOKEN,
            &NewComment {
                text: "nice".to_string(),
                review: ReviewId(4),
            },
        )
        .await
        .unwrap();

    assert_eq!(comment.user_comment, UserId(12));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/review/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let result = client.reviews(TOKEN).await;

    assert_eq!(
        result,
        Err(ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        })
    );
}

#[tokio::test]
async fn test_malformed_body_is_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/comment/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let result = client.comments(TOKEN).await;

    assert!(matches!(result, Err(ApiError::ResponseParseFailed(_))));
}
