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

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use once_cell::sync::Lazy;
use rgw_admin_core::SignRequest;
use rgw_admin_signature_v2::{Credential, RequestSigner};

criterion_group!(benches, bench);
criterion_main!(benches);

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success")
});

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("signature_v2");

    group.bench_function("sign_header", |b| {
        let cred = Credential::new(
            "0555b35654ad1656d804",
            "h7GhxuBLTrlhVUyxSPUKUV8r/2EI4ngqJxD7iBdBYLhwluN30JaT3Q==",
        );
        let s = RequestSigner::new();

        b.to_async(&*RUNTIME).iter(|| async {
            let req = http::Request::get("http://127.0.0.1:7480/admin/user?uid=alice&format=json")
                .header("x-amz-meta-b", "two")
                .header("x-amz-meta-a", "one")
                .body(())
                .expect("request must be valid");

            let (mut parts, _) = req.into_parts();
            s.sign_request(&mut parts, &cred, None)
                .await
                .expect("must success")
        })
    });

    group.finish()
}
