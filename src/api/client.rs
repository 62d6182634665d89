use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::QueryError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

fn curl_line(method: &str, url: &str, body: Option<&Value>) -> String {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));

    if let Some(d) = body {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!("{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    parts.join(" ")
}

/// Core HTTP client function for backend calls.
/// The body is sent as JSON even on GET, which is how the artifact
/// listing endpoints take their filters.
pub async fn api_call(
    client: &reqwest::Client,
    api_base_url: &str,
    method: &str,
    endpoint: &str,
    body: Option<Value>,
) -> Result<Value, QueryError> {
    let url = format!("{}{}", api_base_url, endpoint);
    log_output(format!("Request:\n{}", curl_line(method, &url, body.as_ref())));

    let mut req = match method {
        "GET" => client.get(&url),
        "POST" => client.post(&url),
        "PUT" => client.put(&url),
        "DELETE" => client.delete(&url),
        _ => client.get(&url),
    };

    if let Some(ref b) = body {
        req = req.json(b);
    }

    let resp = req.send().await.map_err(|e| QueryError::Network(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| QueryError::Network(e.to_string()))?;

    // Grayed out so request lines stand out
    log_output(format!("Response ({}):\n{}", status.as_u16(), Paint::new(&text).rgb(100, 100, 100)));

    if !status.is_success() {
        return Err(QueryError::Status {
            status: status.as_u16(),
            body: text,
        });
    }
    serde_json::from_str(&text).map_err(|e| QueryError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curl_line_includes_body_and_escapes_quotes() {
        yansi::disable();
        let body = serde_json::json!({"name": "it's"});
        let line = curl_line("GET", "http://x/oci/artifacts/Instance", Some(&body));
        assert!(line.starts_with("curl -X GET 'http://x/oci/artifacts/Instance'"));
        assert!(line.contains("Content-Type: application/json"));
        assert!(line.contains(r#"{"name":"it'\''s"}"#));
    }
}
