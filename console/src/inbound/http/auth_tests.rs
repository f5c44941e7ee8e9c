//! Login flow coverage through the full console application.

use actix_web::http::StatusCode;
use actix_web::test;
use url::Url;

use crate::inbound::http::test_utils::{
    FIXTURE_CODE, MockPorts, body_text, console_app, console_state, fixture_identity, location,
    session_cookie, sign_in,
};

#[actix_web::test]
async fn login_page_keeps_a_local_return_path() {
    let app = test::init_service(console_app(console_state(
        MockPorts::default(),
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/login?from=%2Fadmin%2Fusers")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("name=\"from\" value=\"/admin/users\""));
}

#[actix_web::test]
async fn starting_a_login_redirects_to_the_provider() {
    let app = test::init_service(console_app(console_state(
        MockPorts::default(),
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("from", "/admin/users")])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let _pending = session_cookie(&response);
    let url = Url::parse(&location(&response)).expect("absolute provider url");
    assert_eq!(url.host_str(), Some("idp.test"));
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(params.iter().any(|(k, v)| k == "redirect_uri" && v == "http://console.test/auth/callback"));
    assert!(params.iter().any(|(k, v)| k == "code_challenge" && !v.is_empty()));
    assert!(params.iter().any(|(k, v)| k == "state" && !v.is_empty()));
}

#[actix_web::test]
async fn callbacks_with_a_foreign_state_are_refused() {
    let state = console_state(MockPorts::default(), fixture_identity("ana", &["ADMIN"]));
    let app = test::init_service(console_app(state.clone())).await;
    let start = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("from", "")])
            .to_request(),
    )
    .await;
    let pending = session_cookie(&start);
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/auth/callback?code={FIXTURE_CODE}&state=forged"))
            .cookie(pending)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?error=state");
    assert!(state.sessions.is_empty());
}

#[actix_web::test]
async fn anonymous_visitors_are_sent_to_login() {
    let app = test::init_service(console_app(console_state(
        MockPorts::default(),
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let response =
        test::call_service(&app, test::TestRequest::get().uri("/dashboard").to_request()).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?from=%2Fdashboard");
}

#[actix_web::test]
async fn admins_land_on_events_after_login() {
    let state = console_state(MockPorts::default(), fixture_identity("ana", &["ADMIN"]));
    let app = test::init_service(console_app(state.clone())).await;
    let cookie = sign_in(&app).await;
    assert_eq!(state.sessions.len(), 1);

    let landing = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/landing")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(location(&landing), "/admin/events");

    let returning = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/landing?from=%2Fadmin%2Finstruments")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(location(&returning), "/admin/instruments");

    let dashboard = test::call_service(
        &app,
        test::TestRequest::get().uri("/dashboard").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let body = body_text(dashboard).await;
    assert!(body.contains("ana"));
}

#[actix_web::test]
async fn rejected_codes_end_on_the_login_page() {
    let state = console_state(MockPorts::default(), fixture_identity("ana", &["ADMIN"]));
    let app = test::init_service(console_app(state.clone())).await;
    let start = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("from", "")])
            .to_request(),
    )
    .await;
    let pending = session_cookie(&start);
    let returned_state = Url::parse(&location(&start))
        .expect("provider url")
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .expect("state");
    let callback = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/auth/callback?code=stale&state={returned_state}"))
            .cookie(pending)
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&callback);

    let mut last = None;
    for _ in 0..100 {
        let landing = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/landing")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        if landing.status() == StatusCode::SEE_OTHER {
            last = Some(location(&landing));
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let target = last.expect("session resolved");
    assert!(target.starts_with("/login?from="), "{target}");
    assert!(state.sessions.is_empty());
}

#[actix_web::test]
async fn logout_leaves_through_the_provider() {
    let state = console_state(MockPorts::default(), fixture_identity("ana", &["MUSICIAN"]));
    let app = test::init_service(console_app(state.clone())).await;
    let cookie = sign_in(&app).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post().uri("/logout").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let url = Url::parse(&location(&response)).expect("end-session url");
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert!(params.contains(&("id_token_hint".to_owned(), "fixture-id".to_owned())));
    assert!(params.contains(&(
        "post_logout_redirect_uri".to_owned(),
        "http://console.test/login".to_owned()
    )));
    assert!(state.sessions.is_empty());

    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/me/events").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(location(&after), "/login?from=%2Fme%2Fevents");
}
