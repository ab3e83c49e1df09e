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

use rgw_admin_core::utils::Redact;
use std::fmt::{Debug, Formatter};

/// Credential that holds the api key and secret key of an admin user.
///
/// Only the api key is ever sent; the secret key is used as HMAC key.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Access key of the admin user.
    pub api_key: String,
    /// Secret key of the admin user.
    pub secret_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_keys() {
        let cred = Credential::new("0555b35654ad1656d804", "secret");

        assert_eq!(
            format!("{cred:?}"),
            "Credential { api_key: 055***804, secret_key: *** }"
        );
    }
}
