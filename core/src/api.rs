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

use crate::Result;
use std::fmt::Debug;
use std::time::Duration;

/// SignRequest is the trait used by signer to sign the request.
///
/// Implementations compute the authentication material for one request and
/// write it back into `req`. They must not cache anything across calls.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request in place.
    ///
    /// ## Expires In
    ///
    /// The `expires_in` parameter asks for a pre-signed request that stays
    /// valid for the given duration. Signers that only support header
    /// authentication should return an error when it is set.
    async fn sign_request(
        &self,
        req: &mut http::request::Parts,
        credential: &Self::Credential,
        expires_in: Option<Duration>,
    ) -> Result<()>;
}
