// Tests for the per-action protocol
//
// Success bodies, response validation (400 with details) and the generic
// per-action failure messages (500).

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use player::action::Action;
use player_test_support::error_body::{assert_error_body, assert_error_with_details, read_json};
use serde_json::{json, Value};

use crate::common::{init_app, post_action, post_raw, CountingTelemetry, Reply, StubAgent};

fn context() -> Value {
    json!({
        "round": 2,
        "currentPhase": "day",
        "alivePlayers": [
            { "id": 1, "isAlive": true },
            { "id": 2, "isAlive": true },
            { "id": 3, "isAlive": true }
        ],
        "allSpeeches": {
            "1": [{ "playerId": 2, "content": "I saw nothing.", "type": "player" }]
        },
        "allVotes": {}
    })
}

async fn call(agent: StubAgent, req: actix_http::Request) -> (StatusCode, Value, Arc<StubAgent>) {
    let agent = Arc::new(agent);
    let app = init_app(agent.clone(), Arc::new(CountingTelemetry::default())).await;
    let resp = test::call_service(&app, req).await;
    let (status, _headers, body) = read_json(resp).await;
    (status, body, agent)
}

#[actix_web::test]
async fn start_game_acknowledges_and_forwards_params() {
    let params = json!({ "gameId": "g-42", "playerId": 2, "role": "werewolf", "teammates": [5] });
    let (status, body, agent) = call(StubAgent::new(), post_action(Action::StartGame, &params)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Game started successfully", "langfuseEnabled": true })
    );
    assert_eq!(agent.calls(), vec![(Action::StartGame, params)]);
}

#[actix_web::test]
async fn start_game_failure_is_generic_500() {
    let agent = StubAgent::new().with_reply(Action::StartGame, Reply::Fail);
    let params = json!({ "gameId": "g-1", "playerId": 1, "role": "seer" });
    let (status, body, _) = call(agent, post_action(Action::StartGame, &params)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to start game");
}

#[actix_web::test]
async fn start_game_forwards_unknown_role_to_the_agent() {
    let params = json!({ "gameId": "g-1", "playerId": 1, "role": "mayor" });
    let (status, body, agent) = call(StubAgent::new(), post_action(Action::StartGame, &params)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Game started successfully");
    assert_eq!(agent.calls(), vec![(Action::StartGame, params)]);
}

#[actix_web::test]
async fn unexpected_context_shapes_reach_the_agent() {
    for action in [Action::Speak, Action::Vote] {
        let ctx = json!({ "currentPhase": "discussion", "alivePlayers": [{ "id": 1 }] });
        let (status, _, agent) = call(StubAgent::new(), post_action(action, &ctx)).await;

        assert_eq!(status, StatusCode::OK, "{action:?}");
        assert_eq!(agent.calls(), vec![(action, ctx)]);
    }

    let (status, _, agent) = call(StubAgent::new(), post_raw(Action::Speak, "null")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(agent.calls(), vec![(Action::Speak, Value::Null)]);
}

#[actix_web::test]
async fn speak_wraps_speech() {
    let agent = StubAgent::new().with_reply(Action::Speak, Reply::Value(json!("Player 3 is lying.")));
    let (status, body, agent) = call(agent, post_action(Action::Speak, &context())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "speech": "Player 3 is lying." }));
    assert_eq!(agent.calls()[0].1["round"], 2);
}

#[actix_web::test]
async fn non_text_speech_is_invalid_response_data() {
    for bad in [json!(42), json!(null), json!({ "text": "hi" })] {
        let agent = StubAgent::new().with_reply(Action::Speak, Reply::Value(bad.clone()));
        let (status, body, _) = call(agent, post_action(Action::Speak, &context())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "speech {bad} should be rejected");
        let details = assert_error_with_details(&body, "Invalid response data");
        assert_eq!(details["schema"], "speech");
    }
}

#[actix_web::test]
async fn long_and_empty_speech_are_accepted() {
    for speech in ["".to_string(), "a".repeat(2001)] {
        let agent = StubAgent::new().with_reply(Action::Speak, Reply::Value(json!(speech.clone())));
        let (status, body, _) = call(agent, post_action(Action::Speak, &context())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "speech": speech }));
    }
}

#[actix_web::test]
async fn speak_agent_failure_is_generic_500() {
    let agent = StubAgent::new().with_reply(Action::Speak, Reply::Fail);
    let (status, body, _) = call(agent, post_action(Action::Speak, &context())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to generate speech");
}

#[actix_web::test]
async fn non_json_bytes_never_reach_the_agent() {
    let (status, body, agent) = call(StubAgent::new(), post_raw(Action::Speak, "{not json")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to generate speech");
    assert_eq!(agent.call_count(), 0);
}

#[actix_web::test]
async fn vote_passes_valid_result_through() {
    let vote = json!({ "target": 3, "reason": "voted against the seer" });
    let agent = StubAgent::new().with_reply(Action::Vote, Reply::Value(vote.clone()));
    let (status, body, _) = call(agent, post_action(Action::Vote, &context())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, vote);
}

#[actix_web::test]
async fn vote_with_wrong_shape_is_invalid_response_data() {
    for bad in [
        json!({ "target": "three", "reason": "typo" }),
        json!({ "target": 3 }),
        json!({ "target": -1, "reason": "nobody" }),
        json!({ "target": 3, "reason": 7 }),
        json!("abstain"),
    ] {
        let agent = StubAgent::new().with_reply(Action::Vote, Reply::Value(bad.clone()));
        let (status, body, _) = call(agent, post_action(Action::Vote, &context())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "vote {bad} should be rejected");
        assert_error_with_details(&body, "Invalid response data");
    }
}

#[actix_web::test]
async fn vote_agent_failure_is_generic_500() {
    let agent = StubAgent::new().with_reply(Action::Vote, Reply::Fail);
    let (status, body, _) = call(agent, post_action(Action::Vote, &context())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to generate vote");
}

#[actix_web::test]
async fn use_ability_returns_agent_result_verbatim() {
    let result = json!({ "action": "using", "healTarget": 4, "healReason": "saved", "poisonTarget": 0, "poisonReason": "" });
    let agent = StubAgent::new().with_reply(Action::UseAbility, Reply::Value(result.clone()));
    let ctx = json!({ "round": 1, "killedTonight": 4, "potionUsed": { "heal": false, "poison": false } });
    let (status, body, agent) = call(agent, post_action(Action::UseAbility, &ctx)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, result);
    assert_eq!(agent.calls(), vec![(Action::UseAbility, ctx)]);
}

#[actix_web::test]
async fn use_ability_with_empty_body_forwards_null() {
    let (status, _, agent) = call(StubAgent::new(), post_raw(Action::UseAbility, "")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(agent.calls(), vec![(Action::UseAbility, Value::Null)]);
}

#[actix_web::test]
async fn use_ability_failure_is_generic_500() {
    let agent = StubAgent::new().with_reply(Action::UseAbility, Reply::Fail);
    let (status, body, _) = call(agent, post_action(Action::UseAbility, &json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to use ability");
}

#[actix_web::test]
async fn last_words_wraps_content() {
    let agent = StubAgent::new().with_reply(Action::LastWords, Reply::Value(json!("Watch player 5.")));
    let (status, body, _) = call(agent, post_action(Action::LastWords, &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "content": "Watch player 5." }));
}

#[actix_web::test]
async fn non_text_last_words_are_invalid_response_data() {
    let agent = StubAgent::new().with_reply(Action::LastWords, Reply::Value(json!(["bye"])));
    let (status, body, _) = call(agent, post_action(Action::LastWords, &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = assert_error_with_details(&body, "Invalid response data");
    assert_eq!(details["schema"], "last-words");
}

#[actix_web::test]
async fn last_words_failure_is_generic_500() {
    let agent = StubAgent::new().with_reply(Action::LastWords, Reply::Fail);
    let (status, body, _) = call(agent, post_action(Action::LastWords, &json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to generate last words");
}

#[actix_web::test]
async fn status_returns_snapshot_and_ignores_body() {
    let (status, body, _) = call(StubAgent::new(), post_raw(Action::Status, "{garbage")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gameId"], "g-1");
    assert_eq!(body["role"], "villager");
    assert_eq!(body["agent"]["name"], "stub");
}

#[actix_web::test]
async fn status_failure_is_generic_500() {
    let agent = StubAgent::new().with_reply(Action::Status, Reply::Fail);
    let (status, body, _) = call(agent, post_action(Action::Status, &json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to get status");
}

#[actix_web::test]
async fn repeated_requests_get_identical_responses() {
    let agent = Arc::new(StubAgent::new());
    let app = init_app(agent.clone(), Arc::new(CountingTelemetry::default())).await;

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let resp = test::call_service(&app, post_action(Action::Vote, &context())).await;
        let (status, _, body) = read_json(resp).await;
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(agent.call_count(), 2);
}

#[actix_web::test]
async fn oversized_body_is_generic_500() {
    use actix_web::web;
    use player::langfuse::TelemetryFlusher;
    use player::state::AppState;

    let agent = Arc::new(StubAgent::new());
    let state = AppState::new(agent.clone(), TelemetryFlusher::disabled()).with_limits(16, true);
    let app = test::init_service(player::build_app(web::Data::new(state))).await;

    let resp = test::call_service(&app, post_action(Action::Speak, &context())).await;
    let (status, _, body) = read_json(resp).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error_body(&body, "Failed to generate speech");
    assert_eq!(agent.call_count(), 0);
}
