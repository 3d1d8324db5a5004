use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use relay_core_contact_contracts::{ContactService, ContactSubmitError};

use super::{bad_request, internal_server_error, method_not_allowed};
use crate::models::contact::{ApiContactResponse, ApiContactSubmission};

/// The second path keeps forms posting to the former serverless function
/// working unchanged.
pub const CONTACT_ROUTES: [&str; 2] = ["/contact", "/.netlify/functions/contact"];

pub fn router<C: ContactService>(service: Arc<C>) -> Router<()> {
    let submit = routing::post(submit::<C>).fallback(method_not_allowed);

    CONTACT_ROUTES
        .into_iter()
        .fold(Router::new(), |router, path| router.route(path, submit.clone()))
        .with_state(service)
}

async fn submit<C: ContactService>(service: State<Arc<C>>, body: Bytes) -> Response {
    let submission = match ApiContactSubmission::from_body(&body)
        .context("Failed to parse contact form submission")
    {
        Ok(submission) => submission,
        Err(err) => return internal_server_error(err),
    };

    match service.submit(submission.into()).await {
        Ok(receipt) => Json(ApiContactResponse::sent(receipt.preview)).into_response(),
        Err(ContactSubmitError::BotDetected) => bad_request("Bot detected."),
        Err(ContactSubmitError::MissingFields) => bad_request("All fields are required."),
        Err(ContactSubmitError::InvalidEmail) => {
            bad_request("Please enter a valid email address.")
        }
        Err(ContactSubmitError::InvalidPhone) => bad_request("Please enter a valid phone number."),
        Err(ContactSubmitError::Send) => {
            internal_server_error(anyhow!("Mail server did not accept the message"))
        }
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}
