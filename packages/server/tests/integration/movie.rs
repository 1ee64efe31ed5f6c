use serde_json::json;

use crate::common::{TestApp, routes};

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_is_empty_before_any_movie_is_added() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::MOVIES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn list_does_not_require_authentication() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;
        app.create_movie(&token, "The Terminal").await;

        let res = app.get_without_token(routes::MOVIES).await;

        assert_eq!(res.status, 200);
        let movies = res.body.as_array().expect("body should be an array");
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0]["name"], "The Terminal");
    }

    #[tokio::test]
    async fn getting_a_missing_movie_fails() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::movie(999)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Movie with given id doesn't exist");
    }
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn creating_a_movie_requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::MOVIES,
                &json!({"name": "M", "casts": ["C"], "genres": ["G"]}),
            )
            .await;

        assert_eq!(res.status, 401);

        // Rejected before reaching persistence.
        let list = app.get_without_token(routes::MOVIES).await;
        assert_eq!(list.body, json!([]));
    }

    #[tokio::test]
    async fn created_movie_records_its_owner() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;
        let user_id = app.user_id("a@x.com").await;

        let res = app
            .post_with_token(
                routes::MOVIES,
                &json!({"name": "M", "casts": ["C"], "genres": ["G"]}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "Create failed: {}", res.text);

        let movie = app.get_without_token(&routes::movie(res.id())).await;
        assert_eq!(movie.status, 200);
        assert_eq!(movie.body["name"], "M");
        assert_eq!(movie.body["casts"], json!(["C"]));
        assert_eq!(movie.body["genres"], json!(["G"]));
        assert_eq!(movie.body["added_by"], user_id);
    }

    #[tokio::test]
    async fn movie_names_are_unique_across_users() {
        let app = TestApp::spawn().await;
        let first = app.create_authenticated_user("a@x.com", "abcdef").await;
        let second = app.create_authenticated_user("b@x.com", "abcdef").await;

        app.create_movie(&first, "The Terminal").await;

        let res = app
            .post_with_token(
                routes::MOVIES,
                &json!({"name": "The Terminal", "casts": ["C"], "genres": ["G"]}),
                &second,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Movie with given name already exists");
    }

    #[tokio::test]
    async fn body_missing_a_required_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;

        let res = app
            .post_with_token(routes::MOVIES, &json!({"name": "M", "casts": ["C"]}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Request is missing required fields");
    }

    #[tokio::test]
    async fn empty_cast_and_genre_lists_are_allowed() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;

        let res = app
            .post_with_token(
                routes::MOVIES,
                &json!({"name": "M", "casts": [], "genres": []}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "Create failed: {}", res.text);
    }
}

mod updating {
    use super::*;

    #[tokio::test]
    async fn owner_can_partially_update_their_movie() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;
        let id = app.create_movie(&token, "Old Name").await;

        let res = app
            .put_with_token(&routes::movie(id), &json!({"name": "New Name"}), &token)
            .await;
        assert_eq!(res.status, 200, "Update failed: {}", res.text);

        let movie = app.get_without_token(&routes::movie(id)).await;
        assert_eq!(movie.body["name"], "New Name");
        // Untouched fields survive a partial update.
        assert_eq!(movie.body["casts"], json!(["Some Actor"]));
    }

    #[tokio::test]
    async fn non_owner_cannot_update_an_existing_movie() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("a@x.com", "abcdef").await;
        let other = app.create_authenticated_user("b@x.com", "abcdef").await;
        let id = app.create_movie(&owner, "The Terminal").await;

        let res = app
            .put_with_token(&routes::movie(id), &json!({"name": "Hijacked"}), &other)
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(
            res.body["message"],
            "Updating movie added by other is forbidden"
        );

        let movie = app.get_without_token(&routes::movie(id)).await;
        assert_eq!(movie.body["name"], "The Terminal");
    }

    #[tokio::test]
    async fn updating_a_missing_movie_is_forbidden() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;

        let res = app
            .put_with_token(&routes::movie(999), &json!({"name": "Ghost"}), &token)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn malformed_update_body_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;
        let id = app.create_movie(&token, "The Terminal").await;

        let res = app
            .put_with_token(&routes::movie(id), &json!({"casts": "not-a-list"}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Request is missing required fields");
    }
}

mod deletion {
    use super::*;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use server::entity::movie;

    #[tokio::test]
    async fn non_owner_cannot_delete_an_existing_movie() {
        let app = TestApp::spawn().await;
        let owner = app.create_authenticated_user("a@x.com", "abcdef").await;
        let other = app.create_authenticated_user("b@x.com", "abcdef").await;
        let id = app.create_movie(&owner, "The Terminal").await;

        let res = app.delete_with_token(&routes::movie(id), &other).await;

        assert_eq!(res.status, 403);
        assert_eq!(
            res.body["message"],
            "Deleting movie added by other is forbidden"
        );
    }

    #[tokio::test]
    async fn owner_can_delete_their_movie() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("a@x.com", "abcdef").await;
        let id = app.create_movie(&token, "The Terminal").await;
        let user_id = app.user_id("a@x.com").await;

        let res = app.delete_with_token(&routes::movie(id), &token).await;
        assert_eq!(res.status, 200, "Delete failed: {}", res.text);

        let gone = app.get_without_token(&routes::movie(id)).await;
        assert_eq!(gone.status, 400);

        // No dangling reference from the owner.
        let owned = movie::Entity::find()
            .filter(movie::Column::AddedBy.eq(user_id))
            .all(&app.db)
            .await
            .unwrap();
        assert!(owned.is_empty());
    }
}

mod end_to_end {
    use super::*;

    #[tokio::test]
    async fn signup_login_create_and_fetch() {
        let app = TestApp::spawn().await;

        let signup = app
            .post_without_token(
                routes::SIGNUP,
                &json!({"email": "a@x.com", "password": "abcdef"}),
            )
            .await;
        assert_eq!(signup.status, 200);
        let user_id = signup.id();

        let login = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "a@x.com", "password": "abcdef"}),
            )
            .await;
        assert_eq!(login.status, 200);
        let token = login.body["token"].as_str().unwrap().to_string();

        let created = app
            .post_with_token(
                routes::MOVIES,
                &json!({"name": "M", "casts": ["C"], "genres": ["G"]}),
                &token,
            )
            .await;
        assert_eq!(created.status, 200);

        let movie = app.get_without_token(&routes::movie(created.id())).await;
        assert_eq!(movie.status, 200);
        assert_eq!(movie.body["added_by"], user_id);
    }
}
