use std::net::TcpListener;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Condition;
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::dispatch::MailDispatchHandler;
use crate::email_client::{EmailProvider, ResendClient};
use crate::routes::{health_check, send_email};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = ResendClient::new(
            config.email_client.base_url.clone(),
            config.email_client.api_key.clone(),
            config.email_client.timeout(),
        )
        .context("failed to build the email provider client")?;

        let handler = MailDispatchHandler::new(
            Arc::new(email_client) as Arc<dyn EmailProvider>,
            &config.email_client,
            config.submission.clone(),
        );

        let address =
            format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("failed to bind to {}", address))?;
        let port = listener.local_addr()?.port();

        let server =
            run(listener, handler, config.application.allowed_origins.clone())?;
        tracing::info!(%address, port, "contact endpoint listening");

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    handler: MailDispatchHandler,
    allowed_origins: Vec<String>,
) -> Result<Server, std::io::Error> {
    let handler = web::Data::new(handler);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(
                !allowed_origins.is_empty(),
                cors(&allowed_origins),
            ))
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/api/send-email", web::route().to(send_email))
            .app_data(handler.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Preflights from `allowed_origins` are answered here. Everything else
/// still reaches the dispatch handler.
fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| {
            if origin == "*" {
                cors.allow_any_origin()
            } else {
                cors.allowed_origin(origin)
            }
        })
        .allowed_methods(["POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}
