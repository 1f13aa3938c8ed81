use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use std::result::Result as StdResult;
use thiserror::Error;

pub type Result<T> = StdResult<T, FlixlogError>;

#[derive(Error, Debug)]
pub enum FlixlogError {
    #[error("TransportError: {0:?}")]
    Transport(#[from] ReqwestError),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("InvalidResponseError: {0}")]
    InvalidResponse(#[from] SerdeJsonError),
}
