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

use http::header::HeaderName;

// Headers
pub const CONTENT_MD5: HeaderName = HeaderName::from_static("content-md5");

/// Prefix of the custom headers that take part in the string to sign.
pub const X_AMZ_PREFIX: &str = "x-amz-";

/// Scheme written in front of `{api_key}:{signature}` in `Authorization`.
pub const AUTHORIZATION_SCHEME: &str = "AWS";

// Query parameters used by pre-signed requests
pub const AWS_ACCESS_KEY_ID: &str = "AWSAccessKeyId";
pub const EXPIRES: &str = "Expires";
pub const SIGNATURE: &str = "Signature";
