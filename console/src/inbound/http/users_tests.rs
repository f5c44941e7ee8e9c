//! Users page handlers driven through the console application.

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::test;
use pagination::{PageResponse, SortDirection};

use crate::domain::Role;
use crate::domain::auth::RefreshPolicy;
use crate::domain::guard::NO_PERMISSION_MESSAGE;
use crate::domain::user::fixtures::user;
use crate::domain::{User, UserId};
use crate::inbound::http::test_utils::{
    MockPorts, body_text, console_app, console_state, console_state_with_policy, fixture_identity,
    location, sign_in,
};

fn two_users() -> PageResponse<User> {
    PageResponse {
        content: vec![user(1, "Ana"), user(2, "Luis")],
        total_pages: 1,
        total_elements: 2,
        ..PageResponse::empty(10)
    }
}

fn roles() -> Vec<Role> {
    vec![Role {
        id: "r-admin".into(),
        name: "ADMIN".into(),
        description: None,
    }]
}

fn unsorted_list(ports: &mut MockPorts) {
    ports
        .users
        .expect_list()
        .withf(|_, query| query.sort.is_empty() && query.page.page() == 0)
        .times(1)
        .returning(|_, _| Ok(two_users()));
    ports
        .roles
        .expect_list_roles()
        .times(1)
        .returning(|_| Ok(roles()));
}

#[actix_web::test]
async fn musicians_see_the_no_permission_view() {
    let app = test::init_service(console_app(console_state(
        MockPorts::default(),
        fixture_identity("luis", &["MUSICIAN"]),
    )))
    .await;
    let cookie = sign_in(&app).await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_text(response).await;
    assert!(body.contains(NO_PERMISSION_MESSAGE));
    assert!(body.contains("luis"));
}

#[actix_web::test]
async fn admins_get_the_rendered_list() {
    let mut ports = MockPorts::default();
    unsorted_list(&mut ports);
    let app = test::init_service(console_app(console_state(
        ports,
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let cookie = sign_in(&app).await;
    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("user1@banda.test"));
    assert!(body.contains("user2@banda.test"));
    assert!(body.contains("value=\"ADMIN\""));
}

#[actix_web::test]
async fn header_clicks_refetch_with_the_new_sort() {
    let mut ports = MockPorts::default();
    unsorted_list(&mut ports);
    ports
        .users
        .expect_list()
        .withf(|_, query| {
            query.sort.len() == 1
                && query.sort.iter().all(|order| {
                    order.field() == "firstName" && order.direction() == SortDirection::Asc
                })
        })
        .times(1)
        .returning(|_, _| Ok(two_users()));
    let app = test::init_service(console_app(console_state(
        ports,
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let cookie = sign_in(&app).await;
    let first = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie.clone()).to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let sort = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/users/sort/firstName")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(sort.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&sort), "/admin/users");

    let sorted = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(sorted.status(), StatusCode::OK);
    assert!(body_text(sorted).await.contains(" ▲"));
}

#[actix_web::test]
async fn unknown_sort_columns_are_bad_requests() {
    let app = test::init_service(console_app(console_state(
        MockPorts::default(),
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let cookie = sign_in(&app).await;
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/users/sort/password")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deletion_asks_before_calling_the_backend() {
    let mut ports = MockPorts::default();
    unsorted_list(&mut ports);
    ports
        .users
        .expect_delete()
        .withf(|_, id, _| *id == UserId::new(2))
        .times(1)
        .returning(|_, _, _| Ok(()));
    let app = test::init_service(console_app(console_state(
        ports,
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let cookie = sign_in(&app).await;
    test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie.clone()).to_request(),
    )
    .await;

    let prompt = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/users/2/delete")
            .cookie(cookie.clone())
            .set_form([("confirm", "")])
            .to_request(),
    )
    .await;
    assert_eq!(prompt.status(), StatusCode::OK);
    let body = body_text(prompt).await;
    assert!(body.contains("eliminar al usuario &quot;user2&quot;"));
    assert!(body.contains("name=\"confirm\" value=\"true\""));

    let confirmed = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/users/2/delete")
            .cookie(cookie.clone())
            .set_form([("confirm", "true")])
            .to_request(),
    )
    .await;
    assert_eq!(location(&confirmed), "/admin/users");

    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie).to_request(),
    )
    .await;
    let body = body_text(after).await;
    assert!(body.contains("user1@banda.test"));
    assert!(!body.contains("user2@banda.test"));
}

#[actix_web::test]
async fn deleting_an_unknown_row_returns_to_the_list() {
    let app = test::init_service(console_app(console_state(
        MockPorts::default(),
        fixture_identity("ana", &["ADMIN"]),
    )))
    .await;
    let cookie = sign_in(&app).await;
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/admin/users/99/delete")
            .cookie(cookie)
            .set_form([("confirm", "")])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/users");
}

#[actix_web::test]
async fn a_failed_token_refresh_sends_the_next_request_to_login() {
    let identity = fixture_identity("ana", &["ADMIN"]).short_lived(Duration::from_secs(10));
    let refresh = identity.refresh_switch();
    let state = console_state_with_policy(
        MockPorts::default(),
        identity,
        RefreshPolicy::new(Duration::from_millis(10), Duration::from_secs(30)),
    );
    let app = test::init_service(console_app(state.clone())).await;
    let cookie = sign_in(&app).await;
    assert_eq!(state.sessions.len(), 1);

    refresh.fail();
    for _ in 0..200 {
        if refresh.rejected() > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(refresh.rejected(), 1);

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/users").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login?from=%2Fadmin%2Fusers");
    assert!(state.sessions.is_empty());
}
