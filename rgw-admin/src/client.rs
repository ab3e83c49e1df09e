// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::str::FromStr;

use bytes::Bytes;
use http::{Request, Uri};
use log::debug;
use rgw_admin_core::{Context, Error, Result, Signer};
use rgw_admin_signature_v2::RequestSigner;

use crate::constants::*;
use crate::{Config, Pipeline, Verb};

/// Client dispatches admin commands to the RADOS Gateway.
///
/// Every call builds one request, signs it, sends it and returns the raw
/// response body. Decoding the JSON is left to the caller.
///
/// ## Example
///
/// ```no_run
/// use rgw_admin::{Client, Config, Verb};
///
/// # async fn example() -> rgw_admin::Result<()> {
/// let client = Client::new(Config {
///     api_url: Some("http://127.0.0.1:7480/admin".to_string()),
///     api_key: Some("api-key".to_string()),
///     secret_key: Some("secret-key".to_string()),
/// })?;
///
/// let body = client.dispatch(Verb::Get, "user", [("uid", "alice")]).await?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    api_url: String,
    pipeline: Pipeline,
}

impl Client {
    /// Create a client with the default transport and the OS environment.
    #[cfg(feature = "default-context")]
    pub fn new(config: Config) -> Result<Self> {
        Self::with_context(config, crate::default_context())
    }

    /// Create a client with the collaborators in `ctx`.
    ///
    /// The config is validated here and never again.
    pub fn with_context(config: Config, ctx: Context) -> Result<Self> {
        let (api_url, credential) = config.validate()?;
        let signer = Signer::new(credential, RequestSigner::new());

        Ok(Self {
            api_url,
            pipeline: Pipeline::new(ctx, signer),
        })
    }

    /// Base url every resource is appended to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Build the unsigned request for an admin command.
    ///
    /// The uri is `{api_url}/{resource}?{parameters}` where `format=json` is
    /// always appended and any `format` given by the caller is dropped.
    pub fn create_request<I, K, V>(
        &self,
        verb: Verb,
        resource: &str,
        parameters: I,
    ) -> Result<Request<Bytes>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        if resource.is_empty() {
            return Err(Error::argument_invalid("no resource specified"));
        }

        let uri = self.build_uri(resource, parameters)?;
        Ok(Request::builder()
            .method(http::Method::from(verb))
            .uri(uri)
            .body(Bytes::new())?)
    }

    fn build_uri<I, K, V>(&self, resource: &str, parameters: I) -> Result<Uri>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (k, v) in parameters {
            if k.as_ref() == FORMAT {
                continue;
            }
            query.append_pair(k.as_ref(), v.as_ref());
        }
        query.append_pair(FORMAT, FORMAT_JSON);

        let uri = format!("{}/{}?{}", self.api_url, resource, query.finish());
        Ok(Uri::from_str(&uri)?)
    }

    /// Send a request through the pipeline and return the body text.
    pub async fn send_request(&self, req: Request<Bytes>) -> Result<String> {
        let resp = self.pipeline.send(req).await?;

        String::from_utf8(resp.into_body().to_vec()).map_err(|e| {
            Error::body_unreadable("response body is not valid utf-8").with_source(e)
        })
    }

    /// Dispatch one admin command and return the raw response body.
    pub async fn dispatch<I, K, V>(
        &self,
        verb: Verb,
        resource: &str,
        parameters: I,
    ) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let req = self.create_request(verb, resource, parameters)?;
        debug!("dispatching admin command: {} {}", verb, req.uri());

        self.send_request(req).await
    }

    /// Shorthand for [`Client::dispatch`] with [`Verb::Get`].
    pub async fn get<I, K, V>(&self, resource: &str, parameters: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.dispatch(Verb::Get, resource, parameters).await
    }

    /// Shorthand for [`Client::dispatch`] with [`Verb::Post`].
    pub async fn post<I, K, V>(&self, resource: &str, parameters: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.dispatch(Verb::Post, resource, parameters).await
    }

    /// Shorthand for [`Client::dispatch`] with [`Verb::Put`].
    pub async fn put<I, K, V>(&self, resource: &str, parameters: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.dispatch(Verb::Put, resource, parameters).await
    }

    /// Shorthand for [`Client::dispatch`] with [`Verb::Delete`].
    pub async fn delete<I, K, V>(&self, resource: &str, parameters: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.dispatch(Verb::Delete, resource, parameters).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use http::header::{AUTHORIZATION, DATE};
    use http::{Method, Response, StatusCode};
    use pretty_assertions::assert_eq;
    use rgw_admin_core::{ErrorKind, HttpSend};
    use rgw_admin_signature_v2::sign;

    use super::*;

    const NO_PARAMS: [(&str, &str); 0] = [];

    /// Records every request and answers with a canned response.
    #[derive(Debug, Clone)]
    struct MockHttpSend {
        status: StatusCode,
        body: Bytes,
        requests: Arc<Mutex<Vec<Request<Bytes>>>>,
    }

    impl MockHttpSend {
        fn new(status: StatusCode, body: &'static [u8]) -> Self {
            Self {
                status,
                body: Bytes::from_static(body),
                requests: Arc::default(),
            }
        }

        fn requests(&self) -> Vec<(Method, Uri, http::HeaderMap)> {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .map(|r| (r.method().clone(), r.uri().clone(), r.headers().clone()))
                .collect()
        }
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            Ok(Response::builder()
                .status(self.status)
                .body(self.body.clone())?)
        }
    }

    fn config() -> Config {
        Config {
            api_url: Some("http://127.0.0.1:7480/admin".to_string()),
            api_key: Some("AKEXAMPLE".to_string()),
            secret_key: Some("secret".to_string()),
        }
    }

    fn client(mock: &MockHttpSend) -> Client {
        let _ = env_logger::builder().is_test(true).try_init();

        Client::with_context(config(), Context::new().with_http_send(mock.clone()))
            .expect("config must be valid")
    }

    fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
        form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }

    #[tokio::test]
    async fn test_dispatch_signs_and_returns_body() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, br#"{"user_id":"alice"}"#);
        let client = client(&mock);

        let body = client.dispatch(Verb::Get, "user", [("uid", "alice")]).await?;
        assert_eq!(body, r#"{"user_id":"alice"}"#);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let (method, uri, headers) = &requests[0];
        assert_eq!(*method, Method::GET);
        assert_eq!(uri, "http://127.0.0.1:7480/admin/user?uid=alice&format=json");

        let date = headers[DATE].to_str()?;
        let expected = sign(&format!("GET\n\n\n{date}\n/admin/user"), "secret");
        assert_eq!(
            headers[AUTHORIZATION].to_str()?,
            format!("AWS AKEXAMPLE:{expected}")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_forces_json_format() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, b"{}");
        let client = client(&mock);

        let params = HashMap::from([("format", "xml"), ("uid", "alice")]);
        client.dispatch(Verb::Get, "user", params).await?;

        let (_, uri, _) = &mock.requests()[0];
        let mut pairs = query_pairs(uri);
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("format".to_string(), "json".to_string()),
                ("uid".to_string(), "alice".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_create_request_encodes_parameters() -> Result<()> {
        let client = client(&MockHttpSend::new(StatusCode::OK, b""));

        let req = client.create_request(
            Verb::Put,
            "user",
            vec![
                ("uid".to_string(), "alice".to_string()),
                ("display-name".to_string(), "Alice & Bob".to_string()),
            ],
        )?;

        assert_eq!(req.method(), &Method::PUT);
        assert_eq!(
            req.uri(),
            "http://127.0.0.1:7480/admin/user?uid=alice&display-name=Alice+%26+Bob&format=json"
        );
        assert!(req.headers().is_empty());
        assert!(req.body().is_empty());
        Ok(())
    }

    #[test]
    fn test_create_request_without_parameters() -> Result<()> {
        let client = client(&MockHttpSend::new(StatusCode::OK, b""));

        let req = client.create_request(Verb::Get, "info", NO_PARAMS)?;
        assert_eq!(req.uri(), "http://127.0.0.1:7480/admin/info?format=json");
        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_rejects_empty_resource() {
        let mock = MockHttpSend::new(StatusCode::OK, b"{}");
        let client = client(&mock);

        let err = client
            .dispatch(Verb::Get, "", [("uid", "alice")])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ArgumentInvalid);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_parsed_verb() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, b"");
        let client = client(&mock);

        let err = "patch".parse::<Verb>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);

        client
            .dispatch("delete".parse()?, "bucket", [("bucket", "photos")])
            .await?;
        assert_eq!(mock.requests()[0].0, Method::DELETE);
        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_not_found_is_response_error() {
        let mock = MockHttpSend::new(StatusCode::NOT_FOUND, br#"{"Code":"NoSuchUser"}"#);
        let client = client(&mock);

        let err = client
            .get("user", [("uid", "nobody")])
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Response);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.response_body(), Some(r#"{"Code":"NoSuchUser"}"#));
    }

    #[tokio::test]
    async fn test_dispatch_redirect_is_success() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::FOUND, b"moved");
        let client = client(&mock);

        assert_eq!(client.get("usage", NO_PARAMS).await?, "moved");
        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_unreadable_body() {
        let mock = MockHttpSend::new(StatusCode::OK, &[0xff, 0xfe, 0x00]);
        let client = client(&mock);

        let err = client.get("user", [("uid", "alice")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BodyUnreadable);
    }

    #[tokio::test]
    async fn test_dispatch_without_transport() {
        let client = Client::with_context(config(), Context::new()).unwrap();

        let err = client.get("user", [("uid", "alice")]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_every_call_is_signed() -> Result<()> {
        let mock = MockHttpSend::new(StatusCode::OK, b"{}");
        let client = client(&mock);

        client.put("user", [("uid", "alice")]).await?;
        client.post("user", [("uid", "alice"), ("suspended", "true")]).await?;
        client.delete("user", [("uid", "alice")]).await?;

        let requests = mock.requests();
        let methods: Vec<_> = requests.iter().map(|(m, _, _)| m.clone()).collect();
        assert_eq!(methods, vec![Method::PUT, Method::POST, Method::DELETE]);

        for (method, _, headers) in &requests {
            let date = headers[DATE].to_str()?;
            let expected = sign(&format!("{method}\n\n\n{date}\n/admin/user"), "secret");
            assert_eq!(
                headers[AUTHORIZATION].to_str()?,
                format!("AWS AKEXAMPLE:{expected}")
            );
        }
        Ok(())
    }

    #[test]
    fn test_with_context_validates_config() {
        let config = Config {
            secret_key: None,
            ..config()
        };

        let err = Client::with_context(config, Context::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
