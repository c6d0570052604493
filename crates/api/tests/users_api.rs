//! HTTP-level integration tests for public user profiles.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_game, get, get_auth, player_with_token, post_json_auth,
    upload, zip_fixture,
};
use playhub_db::repositories::UserRepo;
use sqlx::PgPool;

fn slugs(json: &serde_json::Value) -> Vec<String> {
    json["authoredGames"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["slug"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_hides_unpublished_games_from_others(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_alice, alice) = player_with_token(&pool, &app, "alice").await;
    let (_bob, bob) = player_with_token(&pool, &app, "bobby").await;
    let published = create_game(&app, &alice, "Alpha Game").await;
    create_game(&app, &alice, "Beta Game").await;
    upload(&app, &alice, &published, &zip_fixture(), None).await;

    let anonymous = body_json(get(app.clone(), "/api/v1/users/alice").await).await;
    assert_eq!(anonymous["username"], "alice");
    assert!(anonymous["registeredTimestamp"].is_string());
    assert_eq!(slugs(&anonymous), ["alpha-game"]);

    let other = body_json(get_auth(app.clone(), "/api/v1/users/alice", &bob).await).await;
    assert_eq!(slugs(&other), ["alpha-game"]);

    let own = body_json(get_auth(app, "/api/v1/users/alice", &alice).await).await;
    assert_eq!(slugs(&own), ["alpha-game", "beta-game"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_lists_best_score_per_game(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (_alice, alice) = player_with_token(&pool, &app, "alice").await;
    let (_bob, bob) = player_with_token(&pool, &app, "bobby").await;
    for title in ["Alpha Game", "Beta Game"] {
        let slug = create_game(&app, &alice, title).await;
        upload(&app, &alice, &slug, &zip_fixture(), None).await;
    }
    for (slug, value) in [("alpha-game", 5.0), ("alpha-game", 50.0), ("beta-game", 7.0)] {
        let uri = format!("/api/v1/games/{slug}/scores");
        let body = serde_json::json!({ "score": value });
        let response = post_json_auth(app.clone(), &uri, body, &bob).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app, "/api/v1/users/bobby").await).await;
    assert_eq!(json["authoredGames"], serde_json::json!([]));
    let highscores = json["highscores"].as_array().unwrap();
    assert_eq!(highscores.len(), 2);
    assert_eq!(highscores[0]["game"]["slug"], "alpha-game");
    assert_eq!(highscores[0]["game"]["title"], "Alpha Game");
    assert_eq!(highscores[0]["score"], 50.0);
    assert!(highscores[0]["timestamp"].is_string());
    assert_eq!(highscores[1]["game"]["slug"], "beta-game");
    assert_eq!(highscores[1]["score"], 7.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_of_missing_or_deactivated_user_is_404(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let (carol, _token) = player_with_token(&pool, &app, "carol").await;

    assert_eq!(get(app.clone(), "/api/v1/users/nobody").await.status(), StatusCode::NOT_FOUND);

    UserRepo::deactivate(&pool, carol.id).await.unwrap();
    assert_eq!(get(app, "/api/v1/users/carol").await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_rejects_invalid_token(pool: PgPool) {
    let app = build_test_app(pool.clone());
    player_with_token(&pool, &app, "alice").await;

    let response = get_auth(app, "/api/v1/users/alice", "not-a-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
