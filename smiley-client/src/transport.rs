use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use smiley_core::{ClientConfig, Result, Secret, SmileyError};
use tracing::{debug, trace};
use url::Url;

/// JSON-RPC 1.0 request.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: String,
    method: &'a str,
    params: &'a [Value],
}

/// Sends JSON-RPC 1.0 requests to the daemon over HTTP with basic authentication.
///
/// The transport holds no per-call state; `call` can be used from several
/// tasks at once.
pub struct RpcTransport {
    http: reqwest::Client,
    endpoint: Url,
    user: String,
    password: Secret,
    id_suffix: String,
}

impl RpcTransport {
    /// Create a transport from the connection settings in `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint()?,
            user: config.rpc_user.clone(),
            password: config.rpc_password.clone(),
            id_suffix: config.id_suffix.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Request id sent with `method`.
    pub fn request_id(&self, method: &str) -> String {
        format!("{}{}", method, self.id_suffix)
    }

    /// Send a request and return the raw `result` value.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let body = self.encode_request(method, &params)?;
        debug!("calling {} with {} params", method, params.len());
        trace!("sending request: {}", body);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/plain")
            .basic_auth(&self.user, Some(self.password.expose()))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        trace!("received response ({}): {}", status, text.trim());

        decode_response(method, status, &text)
    }

    /// Send a request and deserialize the `result` into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T> {
        let value = self.call(method, params).await?;
        Ok(serde_json::from_value(value)?)
    }

    fn encode_request(&self, method: &str, params: &[Value]) -> Result<String> {
        let request = JsonRpcRequest {
            jsonrpc: "1.0",
            id: self.request_id(method),
            method,
            params,
        };
        Ok(serde_json::to_string(&request)?)
    }
}

/// Unwrap a JSON-RPC response body.
///
/// A JSON-RPC `error` wins over the HTTP status, since the daemon reports
/// failed calls with a 500 and an error object. A `result` of `null` is a
/// valid answer; a missing `result` is not.
fn decode_response(method: &str, status: StatusCode, body: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(mut response)) => {
            if let Some(error) = response.remove("error").filter(|e| !e.is_null()) {
                return Err(daemon_error(error));
            }
            if !status.is_success() {
                return Err(status_error(status, body));
            }
            response.remove("result").ok_or_else(|| SmileyError::MissingResult {
                method: method.to_string(),
            })
        }
        Ok(_) if status.is_success() => Err(SmileyError::MissingResult {
            method: method.to_string(),
        }),
        Err(e) if status.is_success() => Err(SmileyError::Serialization(e)),
        _ => Err(status_error(status, body)),
    }
}

fn daemon_error(error: Value) -> SmileyError {
    let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
    let message = match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => error.to_string(),
    };
    SmileyError::Daemon { code, message }
}

fn status_error(status: StatusCode, body: &str) -> SmileyError {
    SmileyError::HttpStatus {
        status: status.as_u16(),
        body: body.trim().to_string(),
    }
}
