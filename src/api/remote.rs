//! HTTP client for the remote contacts API.

use reqwest::blocking::{Client, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use super::ContactsApi;
use crate::config::Config;
use crate::error::RemoteError;
use crate::models::Contact;

/// JSON-over-HTTP client for `{base}/contacts`.
pub struct RemoteContactsClient {
    client: Client,
    base_url: Url,
}

impl RemoteContactsClient {
    pub fn new(config: &Config) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RemoteError::Client)?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// `{base}/contacts`
    pub fn contacts_url(&self) -> Url {
        self.endpoint(None)
    }

    /// `{base}/contacts/{id}`, with `id` percent-encoded as one segment
    pub fn contact_url(&self, id: &str) -> Url {
        self.endpoint(Some(id))
    }

    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // Config only admits URLs that can be a base
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("contacts");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }

    fn execute(&self, method: Method, url: Url, body: Option<&Contact>) -> Result<Response, RemoteError> {
        tracing::debug!(%method, %url, "contacts request");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().map_err(|source| RemoteError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                method,
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }

    fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, RemoteError> {
        response.json().map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl ContactsApi for RemoteContactsClient {
    fn list(&self) -> Result<Vec<Contact>, RemoteError> {
        let url = self.contacts_url();
        let response = self.execute(Method::GET, url.clone(), None)?;
        Self::decode(&url, response)
    }

    fn create(&self, draft: &Contact) -> Result<Contact, RemoteError> {
        let url = self.contacts_url();
        let body = draft.without_id();
        let response = self.execute(Method::POST, url.clone(), Some(&body))?;
        Self::decode(&url, response)
    }

    fn update(&self, id: &str, draft: &Contact) -> Result<Contact, RemoteError> {
        let url = self.contact_url(id);
        let response = self.execute(Method::PUT, url.clone(), Some(draft))?;
        Self::decode(&url, response)
    }

    fn delete(&self, id: &str) -> Result<(), RemoteError> {
        self.execute(Method::DELETE, self.contact_url(id), None)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.contacts_url().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve exactly one canned response and hand back the raw request.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                if let Some(value) = line.to_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
                head.push_str(&line);
            }
            let mut body_bytes = vec![0u8; content_length];
            reader.read_exact(&mut body_bytes).unwrap();
            tx.send(format!("{}\r\n{}", head, String::from_utf8(body_bytes).unwrap()))
                .unwrap();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        (format!("http://{}", addr), rx)
    }

    fn client_for(base: &str) -> RemoteContactsClient {
        let config = Config::from_lookup(Some(base.to_string()), |_| None).unwrap();
        RemoteContactsClient::new(&config).unwrap()
    }

    fn draft() -> Contact {
        Contact {
            id: None,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            company: "Analytical Engines".to_string(),
            job_title: String::new(),
        }
    }

    #[test]
    fn test_endpoint_urls() {
        let client = client_for("http://localhost:5000/api/");
        assert_eq!(client.contacts_url().as_str(), "http://localhost:5000/api/contacts");
        assert_eq!(
            client.contact_url("64f1").as_str(),
            "http://localhost:5000/api/contacts/64f1"
        );

        let client = client_for("http://localhost:5000");
        assert_eq!(client.contacts_url().as_str(), "http://localhost:5000/contacts");
    }

    #[test]
    fn test_contact_url_encodes_id() {
        let client = client_for("http://localhost:5000");
        assert_eq!(
            client.contact_url("a/b c").as_str(),
            "http://localhost:5000/contacts/a%2Fb%20c"
        );
    }

    #[test]
    fn test_list() {
        let (base, requests) = serve_once(
            "200 OK",
            r#"[{"_id":"1","firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","phoneNumber":"555"}]"#,
        );
        let contacts = client_for(&base).list().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id.as_deref(), Some("1"));
        assert_eq!(contacts[0].first_name, "Ada");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("GET /contacts HTTP/1.1"), "{}", request);
    }

    #[test]
    fn test_create_sends_body_without_id() {
        let (base, requests) = serve_once(
            "201 Created",
            r#"{"_id":"new-1","firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","phoneNumber":"555-0100","company":"Analytical Engines","jobTitle":""}"#,
        );
        let mut with_stale_id = draft();
        with_stale_id.id = Some("stale".to_string());

        let created = client_for(&base).create(&with_stale_id).unwrap();
        assert_eq!(created.id.as_deref(), Some("new-1"));
        assert!(created.same_details(&draft()));

        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST /contacts HTTP/1.1"), "{}", request);
        let body = request.split("\r\n\r\n").last().unwrap();
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert!(sent.get("_id").is_none());
        assert_eq!(sent["firstName"], "Ada");
        assert_eq!(sent["company"], "Analytical Engines");
    }

    #[test]
    fn test_update_puts_full_record() {
        let (base, requests) = serve_once(
            "200 OK",
            r#"{"_id":"42","firstName":"Ada","lastName":"King","email":"ada@example.com","phoneNumber":"555-0100"}"#,
        );
        let mut record = draft();
        record.id = Some("42".to_string());
        record.last_name = "King".to_string();

        let updated = client_for(&base).update("42", &record).unwrap();
        assert_eq!(updated.last_name, "King");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("PUT /contacts/42 HTTP/1.1"), "{}", request);
        let body = request.split("\r\n\r\n").last().unwrap();
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["_id"], "42");
        assert_eq!(sent["lastName"], "King");
    }

    #[test]
    fn test_delete() {
        let (base, requests) = serve_once("204 No Content", "");
        client_for(&base).delete("42").unwrap();

        let request = requests.recv().unwrap();
        assert!(request.starts_with("DELETE /contacts/42 HTTP/1.1"), "{}", request);
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let (base, _requests) = serve_once("404 Not Found", r#"{"message":"not found"}"#);
        let err = client_for(&base).delete("missing").unwrap_err();
        match err {
            RemoteError::Status { method, status, .. } => {
                assert_eq!(method, Method::DELETE);
                assert_eq!(status.as_u16(), 404);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_bad_json_is_a_decode_error() {
        let (base, _requests) = serve_once("200 OK", r#"{"not":"a list"}"#);
        let err = client_for(&base).list().unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }), "{}", err);
    }

    #[test]
    fn test_unreachable_server_is_a_transport_error() {
        // Bind then drop to get a port nobody listens on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = client_for(&format!("http://127.0.0.1:{}", port))
            .list()
            .unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }), "{}", err);
    }
}
