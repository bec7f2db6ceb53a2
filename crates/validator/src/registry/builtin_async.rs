//! Built-in asynchronous rule table.
//!
//! One illustrative entry: `unique_username` simulates a remote uniqueness
//! lookup with a fixed delay against a static taken-set. Demo logic — real
//! deployments register their own async validators.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::core::{AsyncOutcome, AsyncPredicate, FieldValue, FormData};
use crate::registry::AsyncValidatorRegistry;

const TAKEN_USERNAMES: &[&str] = &["user1", "user2", "user3"];

const LOOKUP_DELAY: Duration = Duration::from_millis(50);

fn unique_username(value: FieldValue, _form: FormData) -> BoxFuture<'static, AsyncOutcome> {
    Box::pin(async move {
        tokio::time::sleep(LOOKUP_DELAY).await;
        Ok(value
            .as_str()
            .is_none_or(|name| !TAKEN_USERNAMES.contains(&name)))
    })
}

/// Installs the built-in async rule table.
pub(crate) fn install(reg: &mut AsyncValidatorRegistry) {
    reg.register("unique_username", |_arg| {
        let predicate: AsyncPredicate = Arc::new(unique_username);
        Ok(predicate)
    });
}

// ============================================================================
// TESTS
// ============================================================================
