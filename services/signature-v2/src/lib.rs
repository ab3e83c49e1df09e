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

//! AWS Signature Version 2 for the RADOS Gateway admin API.
//!
//! The gateway authenticates admin requests with the S3 style V2 scheme:
//! an HMAC-SHA1 over a canonical string, sent as
//! `Authorization: AWS {api_key}:{signature}` next to a fresh `Date` header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rgw_admin_core::{Result, Signer};
//! use rgw_admin_signature_v2::{Credential, RequestSigner};
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Credential::new("api-key", "secret-key"), RequestSigner::new());
//!
//! let req = http::Request::get("http://127.0.0.1:7480/admin/user?uid=alice&format=json")
//!     .body(())?;
//! let req = signer.authenticate(req).await?;
//! assert!(req.headers().contains_key("authorization"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Canonical string
//!
//! The building blocks are public so callers can check a signature by hand:
//! [`string_to_sign`], [`canonicalize_amz_headers`], [`canonicalize_resource`]
//! and [`sign`].

mod constants;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::canonicalize_amz_headers;
pub use sign_request::canonicalize_resource;
pub use sign_request::sign;
pub use sign_request::string_to_sign;
pub use sign_request::RequestSigner;
