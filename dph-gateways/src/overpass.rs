use dph_core::gateways::{OverpassGateway, UpstreamError};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::USER_AGENT,
};
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

pub const DEFAULT_USER_AGENT: &str =
    "date-planner-harvest/1.0 (+https://github.com/AdeboyeGAdejoro/date-planner-app)";

/// Overpass API client.
///
/// The query is sent as form data (`data=<query>`), i.e. with
/// the content type `application/x-www-form-urlencoded`.
#[derive(Debug, Clone)]
pub struct OverpassApi {
    client: Client,
    endpoint: String,
    user_agent: String,
}

impl OverpassApi {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, query: &str) -> RequestBuilder {
        self.client
            .post(&self.endpoint)
            .header(USER_AGENT, &self.user_agent)
            .form(&form_data(query))
    }

    fn send(&self, query: &str) -> reqwest::Result<Response> {
        self.request(query).send()
    }
}

impl Default for OverpassApi {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_USER_AGENT)
    }
}

fn form_data(query: &str) -> [(&'static str, &str); 1] {
    [("data", query)]
}

impl OverpassGateway for OverpassApi {
    fn query(&self, query: &str) -> Result<Value, UpstreamError> {
        log::debug!("Sending Overpass query to {}", self.endpoint);
        let response = self
            .send(query)
            .map_err(|err| UpstreamError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), &body));
        }
        response
            .json()
            .map_err(|err| UpstreamError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;

    #[test]
    fn query_request() {
        let api = OverpassApi::default();
        let query = "[out:json];node[amenity=cinema](52.3,13.0,52.7,13.8);out;";
        let request = api.request(query).build().unwrap();
        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.url().as_str(), DEFAULT_ENDPOINT);
        assert_eq!(request.headers()[USER_AGENT], DEFAULT_USER_AGENT);
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let body = request.body().unwrap().as_bytes().unwrap();
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            "data=%5Bout%3Ajson%5D%3Bnode%5Bamenity%3Dcinema%5D%2852.3%2C13.0%2C52.7%2C13.8%29%3Bout%3B"
        );
    }

    #[test]
    fn configured_endpoint_and_user_agent() {
        let api = OverpassApi::new("http://127.0.0.1:8080/api/interpreter", "my-harvest/0.1");
        let request = api.request("[out:json];out;").build().unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:8080/api/interpreter");
        assert_eq!(request.headers()[USER_AGENT], "my-harvest/0.1");
    }
}
