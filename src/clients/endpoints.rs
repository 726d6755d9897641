//! Endpoints that step outside the usual JSON envelope.

use serde_json::Value;

use crate::clients::errors::{ApiError, HttpError};
use crate::clients::http_client::HttpClient;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::PingResponse;
use crate::dates::DateKeySpec;

impl HttpClient {
    /// Checks that Traffic Ops is reachable. Needs no login.
    ///
    /// Unlike [`request`](Self::request), a failed ping is always an error,
    /// whatever `raise_error_alerts` says: there is no response to hand back
    /// in place of a [`PingResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Api`] if the server answers with a non-2xx
    /// status or with something other than `{"ping": ...}`, and
    /// [`HttpError::Network`] on transport failure.
    pub async fn ping(&self) -> Result<PingResponse, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "ping")
            .date_keys(DateKeySpec::none())
            .unauthenticated()
            .build()?;

        let response = self.request(request).await?;
        if !response.is_ok() {
            return Err(ApiError::from_response(&response).into());
        }

        response.json::<PingResponse>().map_err(|e| {
            ApiError::new(format!("malformed ping response: {e}"))
                .with_response_meta(response.code, response.headers.clone())
                .into()
        })
    }

    /// Downloads a dump of the Traffic Ops database.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidCall`] before login, [`HttpError::Api`]
    /// on a non-2xx status, and [`HttpError::Network`] on transport failure.
    pub async fn dump_database(&self) -> Result<Vec<u8>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Get, "dbdump")
            .date_keys(DateKeySpec::none())
            .build()?;
        Ok(self.request_bytes(request).await?.body)
    }

    /// Generates a bootable ISO image from `options`.
    ///
    /// # Errors
    ///
    /// Same as [`dump_database`](Self::dump_database).
    pub async fn generate_iso(&self, options: Value) -> Result<Vec<u8>, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, "isos")
            .body(options)
            .date_keys(DateKeySpec::none())
            .build()?;
        Ok(self.request_bytes(request).await?.body)
    }
}
