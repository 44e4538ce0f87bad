use std::{error::Error as _, time::Duration};

use reqwest::blocking::{
    multipart::{Form, Part},
    Client, RequestBuilder,
};

use owl_core::{
    ports::{BotApi, FormFields, MultipartFile},
    Error, Result,
};

use crate::response::ApiOutcome;

/// Generous enough for a 50 MB album over a slow uplink.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Blocking Bot API client: `{api_base_url}/bot{token}/{method}`.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(api_base_url: &str, token: &str, proxy: Option<&str>) -> Result<Self> {
        if api_base_url.is_empty() {
            return Err(Error::Config("api base URL value is not provided".to_string()));
        }
        if token.is_empty() {
            return Err(Error::Config("token value is not provided".to_string()));
        }

        let mut builder = Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(proxy) = proxy.filter(|p| !p.is_empty()) {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("invalid proxy URL: {}", describe(e))))?;
            builder = builder.proxy(proxy);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", describe(e))))?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{token}", api_base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method.trim_start_matches('/'))
    }

    fn execute(&self, method: &str, request: RequestBuilder) -> Result<()> {
        let resp = request
            .send()
            .map_err(|e| Error::Transport(describe(e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| Error::Transport(format!("failed to read response body: {}", describe(e))))?;

        tracing::debug!(method, status, "bot api response");
        ApiOutcome::classify(status, &body).into_result(method, status)
    }
}

impl BotApi for HttpClient {
    fn submit_json(&self, method: &str, body: &serde_json::Value) -> Result<()> {
        let request = self.http.post(self.endpoint(method)).json(body);
        self.execute(method, request)
    }

    fn submit_multipart(
        &self,
        method: &str,
        fields: &FormFields,
        files: Vec<MultipartFile>,
    ) -> Result<()> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in files {
            // A zero stat size (FIFO, process substitution) says nothing about the
            // content, so those parts go out chunked.
            let part = if file.size_bytes == 0 {
                Part::reader(file.reader)
            } else {
                Part::reader_with_length(file.reader, file.size_bytes)
            };
            form = form.part(file.field_name, part.file_name(file.file_name));
        }

        // The form owns every file stream; they are closed when the request is done.
        let request = self.http.post(self.endpoint(method)).multipart(form);
        self.execute(method, request)
    }
}

/// Error text plus its causes, without the request URL (it carries the bot token).
///
/// reqwest's own display already ends with the immediate source.
fn describe(e: reqwest::Error) -> String {
    let e = e.without_url();
    let mut msg = e.to_string();
    let mut source = e.source().and_then(|s| s.source());
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
