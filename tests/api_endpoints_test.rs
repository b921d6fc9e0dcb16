mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{TestApp, TEST_PASSWORD};

fn runner_profile() -> Value {
    json!({
        "age": 28,
        "gender": "female",
        "height": 165,
        "weight": 58,
        "fitness_level": "intermediate",
        "goals": ["weight_loss"]
    })
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_login_and_verify() {
    let app = TestApp::new();
    let (username, register_token) = app.register_user(runner_profile()).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": username, "password": TEST_PASSWORD })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["username"], username.as_str());
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = app
        .request(Method::GET, "/api/auth/verify", None, Some(&register_token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["profile"]["fitness_level"], "intermediate");
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = TestApp::new();
    let (username, _) = app.register_user(json!({})).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            Some(json!({
                "username": username,
                "email": "someone-else@example.com",
                "password": TEST_PASSWORD
            })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    let (username, _) = app.register_user(json!({})).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": username, "password": "not-the-password1" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    for uri in [
        "/api/fitness/workouts",
        "/api/fitness/analysis",
        "/api/ai/fitness/history",
        "/api/auth/profile",
    ] {
        let (status, body) = app.request(Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Missing authorization header");
    }

    let (status, _) = app
        .request(Method::GET, "/api/fitness/workouts", None, Some("garbage"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, _) = app
        .request(Method::POST, "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(Method::GET, "/api/auth/verify", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token revoked");
}

#[tokio::test]
async fn test_update_profile_and_change_password() {
    let app = TestApp::new();
    let (username, token) = app.register_user(runner_profile()).await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/auth/profile",
            Some(json!({ "profile": { "weight": 60, "fitness_level": "advanced" } })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["weight_kg"], 60.0);
    assert_eq!(body["profile"]["fitness_level"], "advanced");
    assert_eq!(body["profile"]["age"], 28);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/change-password",
            Some(json!({ "current_password": TEST_PASSWORD, "new_password": "brandnew42" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/login",
            Some(json!({ "username": username, "password": "brandnew42" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_workout_calories_are_estimated_when_missing() {
    let app = TestApp::new();
    let (_, token) = app.register_user(runner_profile()).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/fitness/workouts",
            Some(json!({ "type": "cardio", "duration": 30, "exercises": ["running"] })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["workout"]["id"], 1);
    assert_eq!(body["workout"]["calories_burned"], 232.0);

    // Zero counts as not reported; the workout type is used without exercises.
    let (_, body) = app
        .request(
            Method::POST,
            "/api/fitness/workouts",
            Some(json!({ "type": "yoga", "duration": 60, "calories_burned": 0 })),
            Some(&token),
        )
        .await;
    assert_eq!(body["workout"]["id"], 2);
    assert_eq!(body["workout"]["calories_burned"], 145.0);

    let (_, body) = app
        .request(
            Method::POST,
            "/api/fitness/workouts",
            Some(json!({ "type": "strength", "duration": 45, "calories_burned": 321.5 })),
            Some(&token),
        )
        .await;
    assert_eq!(body["workout"]["calories_burned"], 321.5);
}

#[tokio::test]
async fn test_workout_without_profile_weight_uses_default() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (_, body) = app
        .request(
            Method::POST,
            "/api/fitness/workouts",
            Some(json!({ "type": "dancing", "duration": 60 })),
            Some(&token),
        )
        .await;

    assert_eq!(body["workout"]["calories_burned"], 210.0);
}

#[tokio::test]
async fn test_invalid_workouts_are_rejected() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let cases = [
        json!({ "type": "cardio", "duration": 0 }),
        json!({ "type": "cardio", "duration": 30, "calories_burned": -5 }),
        json!({ "type": "", "duration": 30 }),
        json!({ "duration": 30 }),
    ];

    for case in cases {
        let (status, _) = app
            .request(Method::POST, "/api/fitness/workouts", Some(case.clone()), Some(&token))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
    }

    let (_, body) = app
        .request(Method::GET, "/api/fitness/workouts", None, Some(&token))
        .await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_workout_pagination() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    for minutes in [20, 30, 40] {
        app.request(
            Method::POST,
            "/api/fitness/workouts",
            Some(json!({ "type": "cardio", "duration": minutes, "calories_burned": 100 })),
            Some(&token),
        )
        .await;
    }

    let (status, body) = app
        .request(
            Method::GET,
            "/api/fitness/workouts?limit=2&offset=1",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["offset"], 1);
    let ids: Vec<u64> = body["workouts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn test_goals_and_progress() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/fitness/goals",
            Some(json!({
                "type": "weight_loss",
                "target": 5,
                "current": 2.5,
                "unit": "kg",
                "deadline": "2024-03-01"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["goal"]["status"], "active");

    let (_, body) = app
        .request(Method::GET, "/api/fitness/goals", None, Some(&token))
        .await;
    assert_eq!(body["goals"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .request(Method::GET, "/api/fitness/progress", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"]["stats"]["active_goals"], 1);
    assert_eq!(body["progress"]["goal_progress"][0]["progress_percentage"], 50.0);
}

#[tokio::test]
async fn test_combined_fitness_data() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/fitness/data",
            Some(json!({
                "workout": { "type": "cardio", "duration": 30, "calories_burned": 200 },
                "goal": { "type": "endurance", "target": 10 }
            })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .request(Method::POST, "/api/fitness/data", Some(json!({})), Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .request(Method::GET, "/api/fitness/data", None, Some(&token))
        .await;
    assert_eq!(body["workouts"].as_array().unwrap().len(), 1);
    assert_eq!(body["fitness_goals"][0]["type"], "endurance");
}

#[tokio::test]
async fn test_combined_submission_is_all_or_nothing() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/fitness/data",
            Some(json!({
                "workout": { "type": "cardio", "duration": 30, "calories_burned": 200 },
                "goal": { "type": "  ", "target": 10 }
            })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .request(Method::GET, "/api/fitness/data", None, Some(&token))
        .await;
    assert_eq!(body["workouts"], json!([]));
    assert_eq!(body["fitness_goals"], json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/fitness/goals")
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_training_plan_is_personalized() {
    let app = TestApp::new();
    let (_, token) = app.register_user(runner_profile()).await;

    let (status, body) = app
        .request(Method::GET, "/api/fitness/training-plan", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "中级训练计划");
    assert_eq!(body["description"], "适合有一定基础的健身者 - 重点减脂");
    let friday = &body["weekly_schedule"][3];
    assert_eq!(friday["focus"], "有氧+核心");
    assert_eq!(friday["duration_minutes"], 40);
}

#[tokio::test]
async fn test_analysis_of_empty_history() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, body) = app
        .request(Method::GET, "/api/fitness/analysis", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "暂无运动数据");
    assert_eq!(body["recommendations"], json!(["开始记录您的第一次运动吧！"]));
    assert!(body.get("stats").is_none());
}

#[tokio::test]
async fn test_exercise_recommendations() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, body) = app
        .request(
            Method::GET,
            "/api/fitness/exercises/recommendations?muscle_group=%E8%83%B8%E9%83%A8&difficulty=intermediate",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["muscle_group"], "胸部");
    assert_eq!(body["recommendations"][0]["name"], "卧推");

    let (status, body) = app
        .request(
            Method::GET,
            "/api/fitness/exercises/recommendations",
            None,
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Muscle group is required");
}

#[tokio::test]
async fn test_fitness_profile_summary() {
    let app = TestApp::new();
    let (_, token) = app.register_user(runner_profile()).await;

    for minutes in [20, 30, 40, 50] {
        app.request(
            Method::POST,
            "/api/fitness/workouts",
            Some(json!({ "type": "cardio", "duration": minutes, "calories_burned": 100 })),
            Some(&token),
        )
        .await;
    }

    let (status, body) = app
        .request(Method::GET, "/api/fitness/profile", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basic_info"]["age"], 28);
    assert_eq!(body["stats"]["total_workouts"], 4);
    assert_eq!(body["stats"]["total_calories"], 400.0);
    assert_eq!(body["recent_workouts"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_chat_uses_keyword_replies_without_credential() {
    let app = TestApp::new();
    let (_, token) = app.register_user(runner_profile()).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/ai/fitness/chat",
            Some(json!({ "message": "请告诉我我的体能概况" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["reply"],
        "根据您的数据，您的体能水平为intermediate。建议加强核心训练和心肺功能。"
    );
    assert_eq!(body["conversation_id"], 2);

    let (_, body) = app
        .request(Method::GET, "/api/ai/fitness/history", None, Some(&token))
        .await;
    let conversations = body["conversations"].as_array().unwrap();
    assert_eq!(conversations.len(), 2);
    assert_eq!(conversations[0]["sender"], "user");
    assert_eq!(conversations[1]["sender"], "ai");
}

#[tokio::test]
async fn test_personas_keep_separate_logs() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (_, body) = app
        .request(
            Method::POST,
            "/api/ai/nutritionist/chat",
            Some(json!({ "message": "我有高血压" })),
            Some(&token),
        )
        .await;
    assert_eq!(body["reply"], "高血压患者饮食建议：低盐饮食，增加钾摄入，控制体重。");

    let (_, body) = app
        .request(Method::GET, "/api/ai/fitness/history", None, Some(&token))
        .await;
    assert_eq!(body["conversations"], json!([]));

    let (_, body) = app
        .request(Method::GET, "/api/ai/nutritionist/history", None, Some(&token))
        .await;
    assert_eq!(body["conversations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_chat_rejects_blank_message() {
    let app = TestApp::new();
    let (_, token) = app.register_user(json!({})).await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/ai/fitness/chat",
            Some(json!({ "message": "   " })),
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
