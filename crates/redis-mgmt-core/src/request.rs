//! The pending-request data model
//!
//! A [`PendingRequest`] captures one API call before it is handed to the
//! transport: verb, path relative to the client base URL, query pairs in
//! caller order, and an optional JSON body. Construction is the only way to
//! change one; the transport consumes it as-is.

use std::fmt;

use serde_json::Value;

/// The verbs the clients issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One API call, described but not yet sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl PendingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        PendingRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Describe a GET of `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Describe a POST to `path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Describe a PUT to `path`
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// Describe a DELETE of `path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append one query pair; pairs reach the URL in insertion order.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append query pairs in iteration order.
    #[must_use]
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The verb this request will use
    pub fn method(&self) -> Method {
        self.method
    }

    /// The path relative to the client base URL
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query pairs, in the order they were added
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// The JSON body, if any
    pub fn json_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors_pick_the_right_verb() {
        assert_eq!(PendingRequest::get("/a").method(), Method::Get);
        assert_eq!(PendingRequest::post("/a").method(), Method::Post);
        assert_eq!(PendingRequest::put("/a").method(), Method::Put);
        assert_eq!(PendingRequest::delete("/a").method(), Method::Delete);
    }

    #[test]
    fn test_query_pairs_keep_insertion_order() {
        let request = PendingRequest::get("/v1/logs")
            .query("stime", "2024-01-01T00:00:00Z")
            .query("order", "desc")
            .query_pairs([("limit", "50"), ("offset", "0")]);

        let pairs: Vec<(&str, &str)> = request
            .query_params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("stime", "2024-01-01T00:00:00Z"),
                ("order", "desc"),
                ("limit", "50"),
                ("offset", "0"),
            ]
        );
    }

    #[test]
    fn test_body_is_carried_verbatim() {
        let body = json!({"name": "cache", "memory_size": 1073741824_u64});
        let request = PendingRequest::post("/v1/bdbs").body(body.clone());
        assert_eq!(request.json_body(), Some(&body));
        assert!(PendingRequest::get("/v1/bdbs").json_body().is_none());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }
}
