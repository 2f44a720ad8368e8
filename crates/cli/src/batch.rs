//! Batch mode: one JSON request per stdin line, one JSON response per line.
//!
//! Request:  `{"function": "strftime", "arguments": ["%Y", "2024-01-15T10:30:00Z"]}`
//! Response: `{"function": "strftime", "result": "2024"}` or
//!           `{"function": "strftime", "error": "..."}`
//!
//! A malformed request produces an error response; later lines still run.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use timeutils_core::TimeUtils;

/// A single call request.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub function: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// A single call outcome. Exactly one of `result` / `error` is set.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn from_call(provider: &TimeUtils, function: &str, arguments: &[&str]) -> Self {
        match provider.call(function, arguments) {
            Ok(result) => Self {
                function: Some(function.to_string()),
                result: Some(result),
                error: None,
            },
            Err(err) => Self {
                function: Some(function.to_string()),
                result: None,
                error: Some(err.to_string()),
            },
        }
    }

    fn invalid_request(err: &serde_json::Error) -> Self {
        Self {
            function: None,
            result: None,
            error: Some(format!("invalid request: {}", err)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Handle one request line. Returns `None` for blank lines.
pub fn process_line(provider: &TimeUtils, line: &str) -> Option<Response> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let response = match serde_json::from_str::<Request>(line) {
        Ok(request) => {
            let args: Vec<&str> = request.arguments.iter().map(String::as_str).collect();
            Response::from_call(provider, &request.function, &args)
        }
        Err(err) => {
            tracing::debug!("batch: rejected request line: {}", err);
            Response::invalid_request(&err)
        }
    };
    Some(response)
}

/// Run batch mode over stdin. Returns the number of failed requests.
pub fn run_batch_mode(provider: &TimeUtils) -> io::Result<usize> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0;

    for line_result in stdin.lock().lines() {
        let line = line_result?;
        let Some(response) = process_line(provider, &line) else {
            continue;
        };
        if response.is_error() {
            failures += 1;
        }
        let encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
        writeln!(out, "{}", encoded)?;
        out.flush()?;
    }

    Ok(failures)
}
