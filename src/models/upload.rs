//! Request and response bodies for `POST /get-upload-url`.

use serde::Serialize;
use serde_json::Value;

/// How long an issued upload URL stays valid, in seconds.
pub const UPLOAD_URL_TTL_SECS: u64 = 3600;

/// Credentials and target filename submitted by the uploader.
///
/// The filename is not sanitized, so a filename containing `/` produces
/// nested keys under the user prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub username: String,
    /// `None` when the submitted password was present but not a string.
    /// Such a password never matches the shared secret.
    pub password: Option<String>,
    pub filename: String,
}

impl UploadRequest {
    /// Extract the three required fields from a parsed JSON document.
    ///
    /// Returns `None` when any field is absent or falsy (`null`, `false`,
    /// `0`, `""`). A document that is not an object has no fields at all.
    /// Other non-string values count as present; `username` and `filename`
    /// are coerced to text.
    pub fn from_json(value: &Value) -> Option<Self> {
        let field = |name: &str| value.get(name).filter(|v| is_truthy(v));

        let username = field("username")?;
        let password = field("password")?;
        let filename = field("filename")?;

        Some(Self {
            username: coerce_to_string(username),
            password: password.as_str().map(str::to_owned),
            filename: coerce_to_string(filename),
        })
    }

    /// Storage key for this upload: `{username}/{now_millis}-{filename}`.
    pub fn object_key(&self, now_millis: i64) -> String {
        format!("{}/{}-{}", self.username, now_millis, self.filename)
    }
}

/// Pre-signed URL handed back to the uploader together with its key.
#[derive(Clone, Debug, Serialize)]
pub struct UploadGrant {
    pub url: String,
    pub key: String,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a JSON value, following browser string coercion.
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_to_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        // `42.0` prints as `42`
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}
