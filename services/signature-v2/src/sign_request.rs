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

use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use http::HeaderValue;
use log::debug;
use rgw_admin_core::hash::base64_hmac_sha1;
use rgw_admin_core::time::{format_rfc2822, now, DateTime};
use rgw_admin_core::{Error, Result, SignRequest, SigningMethod, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements AWS Signature Version 2 as accepted by the
/// RADOS Gateway admin API.
///
/// - Header signing sets `Date` and `Authorization: AWS {api_key}:{signature}`.
/// - Query signing (pre-signed requests) appends `AWSAccessKeyId`, `Expires`
///   and `Signature` to the query string.
///
/// ## Reference
///
/// - [Signing and Authenticating REST Requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        req: &mut http::request::Parts,
        cred: &Self::Credential,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let method = match expires_in {
            Some(expires_in) => SigningMethod::Query(expires_in),
            None => SigningMethod::Header,
        };

        let mut ctx = SigningRequest::build(req)?;

        match method {
            SigningMethod::Header => {
                ctx.headers.insert(DATE, format_rfc2822(now).parse()?);

                let string_to_sign = string_to_sign(&ctx, None)?;
                let signature = sign(&string_to_sign, &cred.secret_key);

                ctx.headers.insert(AUTHORIZATION, {
                    let mut value: HeaderValue =
                        format!("{AUTHORIZATION_SCHEME} {}:{signature}", cred.api_key).parse()?;
                    value.set_sensitive(true);

                    value
                });
            }
            SigningMethod::Query(expires_in) => {
                let expires = chrono::TimeDelta::from_std(expires_in)
                    .ok()
                    .and_then(|d| now.checked_add_signed(d))
                    .ok_or_else(|| {
                        Error::request_invalid(format!("expires_in {expires_in:?} is out of range"))
                    })?
                    .timestamp()
                    .to_string();

                let string_to_sign = string_to_sign(&ctx, Some(&expires))?;
                let signature = sign(&string_to_sign, &cred.secret_key);

                ctx.query_push(AWS_ACCESS_KEY_ID, &cred.api_key);
                ctx.query_push(EXPIRES, &expires);
                ctx.query_push(SIGNATURE, &signature);
            }
        }

        ctx.apply(req)
    }
}

/// Sign the string with the secret key.
///
/// Returns the base64 encoded HMAC-SHA1 of `string_to_sign` keyed by `secret_key`.
pub fn sign(string_to_sign: &str, secret_key: &str) -> String {
    base64_hmac_sha1(secret_key.as_bytes(), string_to_sign.as_bytes())
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// (Expires or Date) + "\n" +
/// CanonicalizedAmzHeaders +
/// CanonicalizedResource;
/// ```
///
/// Absent headers contribute an empty line. `expires` takes precedence over
/// the `Date` header when it is set and non-empty.
pub fn string_to_sign(ctx: &SigningRequest, expires: Option<&str>) -> Result<String> {
    let mut s = String::new();
    writeln!(&mut s, "{}", ctx.method.as_str().to_ascii_uppercase())?;
    for name in [&CONTENT_MD5, &CONTENT_TYPE] {
        writeln!(&mut s, "{}", ctx.header_get_or_default(name))?;
    }

    let date = match expires {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => ctx.header_get_or_default(&DATE),
    };
    writeln!(&mut s, "{date}")?;

    s.write_str(&canonicalize_amz_headers(ctx)?)?;
    s.write_str(canonicalize_resource(ctx))?;

    debug!("string to sign: {:?}", &s);
    Ok(s)
}

/// Build the CanonicalizedAmzHeaders block.
///
/// Every `x-amz-*` header is lowercased and trimmed, headers left empty are
/// dropped, and the rest are sorted by name and written as `name:value\n`.
/// When a name carries several values the last one wins. Returns an empty
/// string if nothing is left.
pub fn canonicalize_amz_headers(ctx: &SigningRequest) -> Result<String> {
    let headers: BTreeMap<String, String> = ctx
        .header_to_vec_with_prefix(X_AMZ_PREFIX)
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect();

    let mut s = String::new();
    for (k, v) in headers {
        writeln!(&mut s, "{k}:{v}")?;
    }

    Ok(s)
}

/// Build the CanonicalizedResource: the request path without query string.
pub fn canonicalize_resource(ctx: &SigningRequest) -> &str {
    &ctx.path
}
