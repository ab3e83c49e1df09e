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

use std::fmt::{Debug, Formatter};

use http::Uri;
use rgw_admin_core::utils::Redact;
use rgw_admin_core::{Context, Error, Result};
use rgw_admin_signature_v2::Credential;

use crate::constants::*;

/// Config carries all the configuration for the admin client.
///
/// All three fields are required; [`crate::Client`] validates them once at
/// construction.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_url` is the admin endpoint, for example `http://127.0.0.1:7480/admin`.
    ///
    /// It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `RGW_ADMIN_API_URL`
    pub api_url: Option<String>,
    /// `api_key` is the access key of an admin user. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `RGW_ADMIN_API_KEY`
    pub api_key: Option<String>,
    /// `secret_key` is the secret key of an admin user. It will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `RGW_ADMIN_SECRET_KEY`
    pub secret_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(RGW_ADMIN_API_URL) {
            self.api_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RGW_ADMIN_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(RGW_ADMIN_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }

    /// Validate the config and split it into the base url and the credential.
    ///
    /// Every missing or empty field is reported in one error. The returned
    /// url has no trailing `/`.
    pub(crate) fn validate(self) -> Result<(String, Credential)> {
        let Config {
            api_url,
            api_key,
            secret_key,
        } = self;

        let present = |v: Option<String>| v.filter(|v| !v.is_empty());
        let (api_url, api_key, secret_key) =
            match (present(api_url), present(api_key), present(secret_key)) {
                (Some(api_url), Some(api_key), Some(secret_key)) => (api_url, api_key, secret_key),
                (api_url, api_key, secret_key) => {
                    let missing = [
                        ("api_url", api_url.is_none()),
                        ("api_key", api_key.is_none()),
                        ("secret_key", secret_key.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, missing)| missing.then_some(name))
                    .collect::<Vec<_>>();

                    return Err(Error::config_invalid(format!(
                        "required option(s) not defined: {}",
                        missing.join(",")
                    )));
                }
            };

        let api_url = api_url.trim_end_matches('/').to_string();
        let uri: Uri = api_url.parse().map_err(|e| {
            Error::config_invalid(format!("api_url {api_url} is not a valid url")).with_source(e)
        })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::config_invalid(format!(
                "api_url {api_url} must contain scheme and host"
            )));
        }

        Ok((api_url, Credential::new(api_key, secret_key)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rgw_admin_core::{ErrorKind, OsEnv, StaticEnv};

    use super::*;

    fn full() -> Config {
        Config {
            api_url: Some("http://127.0.0.1:7480/admin".to_string()),
            api_key: Some("AKEXAMPLE".to_string()),
            secret_key: Some("secret".to_string()),
        }
    }

    #[test]
    fn test_validate() -> Result<()> {
        let (api_url, cred) = full().validate()?;

        assert_eq!(api_url, "http://127.0.0.1:7480/admin");
        assert_eq!(cred, Credential::new("AKEXAMPLE", "secret"));
        Ok(())
    }

    #[test]
    fn test_validate_trims_trailing_slash() -> Result<()> {
        let config = Config {
            api_url: Some("http://127.0.0.1:7480/admin/".to_string()),
            ..full()
        };

        let (api_url, _) = config.validate()?;
        assert_eq!(api_url, "http://127.0.0.1:7480/admin");
        Ok(())
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let err = Config::default().validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(
            err.to_string(),
            "invalid configuration: required option(s) not defined: api_url,api_key,secret_key"
        );

        let config = Config {
            api_key: Some(String::new()),
            secret_key: None,
            ..full()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(
            err.to_string(),
            "invalid configuration: required option(s) not defined: api_key,secret_key"
        );
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let config = Config {
            api_url: Some("/admin".to_string()),
            ..full()
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (
                    RGW_ADMIN_API_URL.to_string(),
                    "http://rgw.example.com/admin".to_string(),
                ),
                (RGW_ADMIN_API_KEY.to_string(), "env_key".to_string()),
                (RGW_ADMIN_SECRET_KEY.to_string(), "env_secret".to_string()),
            ]),
        });

        let config = Config {
            api_key: Some("explicit_key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(
            config.api_url.as_deref(),
            Some("http://rgw.example.com/admin")
        );
        assert_eq!(config.api_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.secret_key.as_deref(), Some("env_secret"));
    }

    #[test]
    fn test_from_os_env() {
        temp_env::with_vars(
            [
                (RGW_ADMIN_API_URL, Some("http://127.0.0.1:7480/admin")),
                (RGW_ADMIN_API_KEY, Some("os_key")),
                (RGW_ADMIN_SECRET_KEY, None),
            ],
            || {
                let ctx = Context::new().with_env(OsEnv);
                let config = Config::default().from_env(&ctx);

                assert_eq!(config.api_key.as_deref(), Some("os_key"));
                assert_eq!(config.secret_key, None);

                let err = config.validate().unwrap_err();
                assert_eq!(
                    err.to_string(),
                    "invalid configuration: required option(s) not defined: secret_key"
                );
            },
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        assert_eq!(
            format!("{:?}", full()),
            r#"Config { api_url: Some("http://127.0.0.1:7480/admin"), api_key: Some(***), secret_key: Some(***) }"#
        );
    }
}
