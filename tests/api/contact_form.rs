use portfolio_contact::contact_form::{
    ContactApiClient, ContactFields, FormController, Notification, SUCCESS_NOTICE,
};
use wiremock::matchers::{any, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

fn typed_fields() -> ContactFields {
    ContactFields {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        subject: "Hi".into(),
        message: "Hello\nWorld".into(),
    }
}

#[tokio::test]
async fn a_successful_submission_clears_the_form() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "1" })),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let mut controller = FormController::new(ContactApiClient::new(&app.address));
    *controller.fields_mut() = typed_fields();

    let notification = controller.submit().await;

    assert_eq!(notification, Notification::Success(SUCCESS_NOTICE.into()));
    assert!(controller.fields().is_empty());
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn a_server_error_keeps_what_the_user_typed() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let mut controller = FormController::new(ContactApiClient::new(&app.address));
    *controller.fields_mut() = typed_fields();

    let notification = controller.submit().await;

    assert_eq!(
        notification,
        Notification::Failure("Failed to send message".into())
    );
    assert_eq!(controller.fields(), &typed_fields());
    assert!(!controller.is_in_flight());
}

#[tokio::test]
async fn empty_fields_reach_the_server_and_are_reported() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut controller = FormController::new(ContactApiClient::new(&app.address));
    controller.fields_mut().name = "Ada".into();

    let notification = controller.submit().await;

    assert_eq!(
        notification,
        Notification::Failure("All fields are required".into())
    );
    assert_eq!(controller.fields().name, "Ada");
}

#[tokio::test]
async fn an_unreachable_server_is_a_failure() {
    // nothing listens on the discard port
    let mut controller =
        FormController::new(ContactApiClient::new("http://127.0.0.1:9"));
    *controller.fields_mut() = typed_fields();

    let notification = controller.submit().await;

    match notification {
        Notification::Failure(message) => assert!(!message.is_empty()),
        other => panic!("expected a failure, got {:?}", other),
    }
    assert_eq!(controller.fields(), &typed_fields());
    assert!(!controller.is_in_flight());
}
