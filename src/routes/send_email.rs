use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};

use crate::dispatch::{DispatchRequest, MailDispatchHandler, Status};

/// Accepts every method so that the dispatch handler decides on 405.
pub async fn send_email(
    request: HttpRequest,
    body: web::Bytes,
    handler: web::Data<MailDispatchHandler>,
) -> HttpResponse {
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let response = handler
        .handle(DispatchRequest::new(request.method().as_str(), body))
        .await;

    HttpResponse::build(status_code(response.status)).json(response.body)
}

fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Ok => StatusCode::OK,
        Status::BadRequest => StatusCode::BAD_REQUEST,
        Status::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
