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

use bytes::Bytes;
use http::{Request, Response};
use log::{debug, warn};
use rgw_admin_core::{Context, Error, Result, Signer};
use rgw_admin_signature_v2::Credential;

/// Pipeline wraps the transport with its two fixed stages.
///
/// 1. Before sending, the request is signed by [`Signer::authenticate`].
/// 2. After receiving, a response whose status is neither 2xx nor 3xx is
///    turned into an [`rgw_admin_core::ErrorKind::Response`] error.
///
/// Each stage runs exactly once per call and nothing is kept between calls.
#[derive(Clone, Debug)]
pub struct Pipeline {
    ctx: Context,
    signer: Signer<Credential>,
}

impl Pipeline {
    /// Create a new pipeline around the transport in `ctx`.
    pub fn new(ctx: Context, signer: Signer<Credential>) -> Self {
        Self { ctx, signer }
    }

    /// Sign, send and check one request.
    pub async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        let req = self.signer.authenticate(req).await?;
        debug!("sending signed request: {} {}", req.method(), req.uri());

        let resp = self.ctx.http_send(req).await?;
        normalize_error(resp)
    }
}

fn normalize_error(resp: Response<Bytes>) -> Result<Response<Bytes>> {
    let status = resp.status();
    if status.is_success() || status.is_redirection() {
        return Ok(resp);
    }

    let body = String::from_utf8_lossy(resp.body()).into_owned();
    warn!("admin request failed with {status}: {body}");
    Err(Error::response(status, body))
}
