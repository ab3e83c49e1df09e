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

use anyhow::Result;
use rgw_admin::{default_context, Client, Config, ErrorKind, Verb};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Reads RGW_ADMIN_API_URL, RGW_ADMIN_API_KEY and RGW_ADMIN_SECRET_KEY.
    let ctx = default_context();
    let config = Config::default().from_env(&ctx);
    let client = Client::with_context(config, ctx)?;

    let uid = std::env::args().nth(1).unwrap_or_else(|| "admin".to_string());

    match client.dispatch(Verb::Get, "user", [("uid", uid.as_str())]).await {
        Ok(body) => println!("{body}"),
        Err(err) if err.kind() == ErrorKind::Response => {
            eprintln!(
                "gateway answered {}: {}",
                err.status().map(|s| s.to_string()).unwrap_or_default(),
                err.response_body().unwrap_or_default()
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
