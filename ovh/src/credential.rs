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

use ovh_core::utils::Redact;

/// Credential for signed OVH API calls.
///
/// All three values are opaque strings handed out by the API. None of them is validated,
/// empty values are accepted for unauthenticated calls.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential {
    /// Application key, sent in clear in every signed call.
    pub application_key: String,
    /// Application secret, only ever used as signature input.
    pub application_secret: String,
    /// Consumer key, sent in clear and used as signature input.
    pub consumer_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        consumer_key: impl Into<String>,
    ) -> Self {
        Self {
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            consumer_key: consumer_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("application_key", &Redact::from(&self.application_key))
            .field("application_secret", &Redact::from(&self.application_secret))
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::new(
            "7kbG7Bk7S9Nt",
            "EXEgWIz07P0HYwtQDs7cNIqCiQaWSuHF",
            "MtSwSrPpNjqfVSmJhLbPyr2i45lSwPU1",
        );

        let output = format!("{cred:?}");
        assert_eq!(
            output,
            r#"Credential { application_key: 7kb***9Nt, application_secret: EXE***uHF, consumer_key: MtS***PU1 }"#
        );
        assert!(!output.contains("EXEgWIz07P0HYwtQDs7cNIqCiQaWSuHF"));
    }
}
