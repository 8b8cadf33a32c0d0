//! One-shot fetch of a random dog image URL.
//!
//! The request runs on a detached background thread and reports back over a
//! channel; the owning view polls the handle from the event loop. Failures
//! are dropped: a request that dies looks exactly like one that never
//! resolves.

use serde_json::Value;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

/// Public endpoint returning `{"message": "<image url>", "status": "success"}`.
pub const DOG_API_URL: &str = "https://dog.ceo/api/breeds/image/random";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Receiving end of a fetch started with [`start_fetch`].
#[derive(Debug)]
pub struct FetchHandle {
    receiver: Receiver<Value>,
}

impl FetchHandle {
    /// Non-blocking poll. Yields the response envelope at most once.
    pub fn try_recv(&self) -> Option<Value> {
        match self.receiver.try_recv() {
            Ok(envelope) => Some(envelope),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Issue a single GET on a background thread and return immediately.
///
/// The whole parsed JSON envelope is delivered, not the nested URL field.
/// Connect errors, bad statuses, and unparsable bodies all end the thread
/// without sending anything.
pub fn start_fetch(url: &str) -> FetchHandle {
    let (tx, rx) = mpsc::channel();
    let url = url.to_string();

    thread::spawn(move || {
        let _ = ureq::get(&url)
            .timeout(REQUEST_TIMEOUT)
            .call()
            .ok()
            .and_then(|response| response.into_json::<Value>().ok())
            .map(|envelope| tx.send(envelope));
    });

    FetchHandle { receiver: rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn serve_once(body: &'static str) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to start test server");
        let port = server.server_addr().to_ip().unwrap().port();

        thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let _ = request.respond(tiny_http::Response::from_string(body));
            }
        });

        format!("http://127.0.0.1:{}/api/breeds/image/random", port)
    }

    fn wait_for(handle: &FetchHandle, timeout: Duration) -> Option<Value> {
        let start = Instant::now();
        while start.elapsed() < timeout {
            if let Some(envelope) = handle.try_recv() {
                return Some(envelope);
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_fetch_delivers_parsed_envelope() {
        let url = serve_once(r#"{"message": "https://images.dog.ceo/breeds/hound/1.jpg", "status": "success"}"#);
        let handle = start_fetch(&url);

        let envelope = wait_for(&handle, Duration::from_secs(5)).expect("no payload received");
        assert_eq!(
            envelope["message"],
            "https://images.dog.ceo/breeds/hound/1.jpg"
        );
        assert_eq!(envelope["status"], "success");
    }

    #[test]
    fn test_envelope_is_delivered_at_most_once() {
        let url = serve_once(r#"{"message": "x", "status": "success"}"#);
        let handle = start_fetch(&url);

        assert!(wait_for(&handle, Duration::from_secs(5)).is_some());
        assert!(handle.try_recv().is_none());
    }

    #[test]
    fn test_connect_failure_yields_nothing() {
        // Nothing listens on the discard port; the request fails fast.
        let handle = start_fetch("http://127.0.0.1:9/api/breeds/image/random");
        assert!(wait_for(&handle, Duration::from_millis(500)).is_none());
    }

    #[test]
    fn test_non_json_body_yields_nothing() {
        let url = serve_once("not json at all");
        let handle = start_fetch(&url);
        assert!(wait_for(&handle, Duration::from_millis(500)).is_none());
    }
}
