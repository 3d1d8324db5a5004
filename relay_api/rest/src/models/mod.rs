use serde::Serialize;

pub mod contact;

#[derive(Serialize)]
pub struct ApiError {
    pub message: &'static str,
}
