mod common;

use anyhow::Result;
use common::{can_bind_localhost, Harness};
use serde_json::json;
use tracks::{
    features::auth::{AuthSession, FlowStep, LoginStage, RegistrationStage},
    navigation::Route,
    store::StoreKey,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_with_code_stores_credentials() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(header("X-Client-Type", "mobile"))
        .and(body_json(json!({ "username": "alice", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login_token": "LT1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login/verification/"))
        .and(body_json(json!({ "code": "123456", "login_token": "LT1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT1",
            "refresh_token": "RT1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Vec::new())?;
    let mut session = AuthSession::restore(harness.api.clone()).await?;
    assert!(!session.is_authenticated());

    session.login("alice", "secret").await?;
    assert_eq!(session.login_stage(), LoginStage::Started);
    assert_eq!(harness.stored(StoreKey::LoginToken).await.as_deref(), Some("LT1"));

    session.verify_login_code("123456").await?;
    assert!(session.is_authenticated());
    assert_eq!(session.login_stage(), LoginStage::LoggedIn);
    assert_eq!(harness.stored(StoreKey::AccessToken).await.as_deref(), Some("AT1"));
    assert_eq!(harness.stored(StoreKey::RefreshToken).await.as_deref(), Some("RT1"));
    assert_eq!(harness.stored(StoreKey::LoginToken).await, None);
    assert_eq!(harness.navigator.resets(), vec![Route::Home]);

    let restored = AuthSession::restore(harness.api.clone()).await?;
    assert!(restored.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn registration_runs_three_steps() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/registration/"))
        .and(body_json(json!({ "email": "bob@example.com", "username": "bob" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "reg_token": "REG1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/registration/verification/"))
        .and(body_json(json!({ "code": "654321", "reg_token": "REG1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/registration/password-set/"))
        .and(body_json(json!({
            "password": "hunter22",
            "password2": "hunter22",
            "reg_token": "REG1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT9",
            "refresh_token": "RT9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, Vec::new())?;
    let mut session = AuthSession::restore(harness.api.clone()).await?;

    session.register("bob@example.com", "bob").await?;
    assert_eq!(session.registration_stage(), RegistrationStage::Started);

    // A later process picks the flow up from the stored reg_token.
    let mut session = AuthSession::restore(harness.api.clone()).await?;
    assert!(session.has_pending_registration());

    session.verify_registration_code("654321").await?;
    assert_eq!(session.registration_stage(), RegistrationStage::CodeVerified);

    session.set_password("hunter22", "hunter22").await?;
    assert_eq!(session.registration_stage(), RegistrationStage::PasswordSet);
    assert!(session.is_authenticated());
    assert_eq!(harness.stored(StoreKey::AccessToken).await.as_deref(), Some("AT9"));
    assert_eq!(harness.stored(StoreKey::RegToken).await, None);
    Ok(())
}

#[tokio::test]
async fn failed_code_keeps_step_token_for_retry() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/verification/"))
        .and(body_json(json!({ "code": "000000", "login_token": "LT1" })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid code" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login/verification/"))
        .and(body_json(json!({ "code": "123456", "login_token": "LT1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "AT1",
            "refresh_token": "RT1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let harness = Harness::new(&server, vec![(StoreKey::LoginToken, "LT1")])?;
    let mut session = AuthSession::restore(harness.api.clone()).await?;
    assert!(session.has_pending_login());

    assert!(session.verify_login_code("000000").await.is_err());
    let last_error = session.last_error().cloned();
    assert_eq!(last_error.as_ref().map(|e| e.step), Some(FlowStep::VerifyLogin));
    assert_eq!(last_error.as_ref().map(|e| e.message.as_str()), Some("Invalid code"));
    assert_eq!(last_error.and_then(|e| e.status), Some(400));
    assert!(!session.is_authenticated());
    assert_eq!(harness.stored(StoreKey::LoginToken).await.as_deref(), Some("LT1"));
    assert_eq!(harness.stored(StoreKey::AccessToken).await, None);

    session.verify_login_code("123456").await?;
    assert!(session.is_authenticated());
    assert!(session.last_error().is_none());
    Ok(())
}

#[tokio::test]
async fn invalid_input_never_reaches_the_server() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let harness = Harness::new(&server, vec![(StoreKey::LoginToken, "LT1")])?;
    let mut session = AuthSession::restore(harness.api.clone()).await?;

    assert!(session.register("not-an-email", "bob").await.is_err());
    assert!(session.login("alice", "").await.is_err());
    assert!(session.verify_login_code("12a456").await.is_err());
    assert!(session.set_password("one", "two").await.is_err());

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
    Ok(())
}

#[tokio::test]
async fn logout_clears_every_key() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;
    let harness = Harness::new(
        &server,
        vec![
            (StoreKey::AccessToken, "AT1"),
            (StoreKey::RefreshToken, "RT1"),
            (StoreKey::RegToken, "REG1"),
            (StoreKey::LoginToken, "LT1"),
        ],
    )?;
    let mut session = AuthSession::restore(harness.api.clone()).await?;
    assert!(session.is_authenticated());

    session.logout().await?;
    assert!(!session.is_authenticated());
    for key in StoreKey::ALL {
        assert_eq!(harness.stored(key).await, None, "{key}");
    }
    assert_eq!(harness.navigator.resets(), vec![Route::Login]);
    Ok(())
}
