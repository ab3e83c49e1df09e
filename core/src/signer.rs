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

use crate::{Result, SignRequest};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Signer binds an immutable credential to a [`SignRequest`] implementation.
///
/// Every call signs from scratch, so one signer can be shared across tasks.
pub struct Signer<C: Send + Sync + Unpin + 'static> {
    credential: Arc<C>,
    builder: Arc<dyn SignRequest<Credential = C>>,
}

impl<C: Send + Sync + Unpin + 'static> Clone for Signer<C> {
    fn clone(&self) -> Self {
        Self {
            credential: self.credential.clone(),
            builder: self.builder.clone(),
        }
    }
}

impl<C: Debug + Send + Sync + Unpin + 'static> Debug for Signer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("credential", &self.credential)
            .field("builder", &self.builder)
            .finish()
    }
}

impl<C: Send + Sync + Unpin + 'static> Signer<C> {
    /// Create a new signer.
    pub fn new(credential: C, builder: impl SignRequest<Credential = C>) -> Self {
        Self {
            credential: Arc::new(credential),
            builder: Arc::new(builder),
        }
    }

    /// Get the credential used by this signer.
    pub fn credential(&self) -> &C {
        &self.credential
    }

    /// Sign the request parts in place.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        self.builder
            .sign_request(req, &self.credential, expires_in)
            .await
    }

    /// Consume a request and return its signed copy.
    ///
    /// Only the authentication material changes; method, uri, body and the
    /// other headers pass through untouched.
    pub async fn authenticate<B>(&self, req: http::Request<B>) -> Result<http::Request<B>> {
        let (mut parts, body) = req.into_parts();
        self.sign(&mut parts, None).await?;
        Ok(http::Request::from_parts(parts, body))
    }
}
