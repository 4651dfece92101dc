//! Correlation identifier shared by a request's log records, failure body
//! and `trace-id` response header.
//!
//! The identifier lives in tokio task-local storage for the lifetime of the
//! request future. Spawned tasks do not inherit it; run them inside
//! [`TraceId::scope`] when they need it.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header echoing the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID v4 assigned to one request.
///
/// # Examples
/// ```
/// use booking_backend::domain::TraceId;
///
/// async fn handler() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "handling booking request");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Identifier of the request being served, or a fresh one outside a
    /// request so that failure records always carry an id.
    #[must_use]
    pub fn current_or_generate() -> Self {
        Self::current().unwrap_or_else(Self::generate)
    }

    /// Poll `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id = TraceId::from_uuid(uuid::Uuid::nil());
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut: Future>(trace_id: Self, fut: Fut) -> Fut::Output {
        CURRENT.scope(trace_id, fut).await
    }

    /// Run `f` with `trace_id` as the current identifier.
    ///
    /// Middleware stages may log while constructing their future, before it
    /// is first polled.
    pub fn sync_scope<F: FnOnce() -> R, R>(trace_id: Self, f: F) -> R {
        CURRENT.sync_scope(trace_id, f)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_ids_are_random_v4() {
        let first = TraceId::generate();
        assert_ne!(first, TraceId::generate());
        assert_eq!(first.0.get_version_num(), 4);
    }

    #[tokio::test]
    async fn scope_sets_and_clears_the_current_id() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    fn sync_scope_is_visible_to_the_closure() {
        let id = TraceId::from_uuid(Uuid::nil());
        assert_eq!(TraceId::sync_scope(id, TraceId::current), Some(id));
        assert_eq!(TraceId::sync_scope(id, TraceId::current_or_generate), id);
    }

    #[rstest]
    fn outside_a_request_a_fresh_id_is_generated() {
        assert!(TraceId::current().is_none());
        assert_ne!(TraceId::current_or_generate(), TraceId::from_uuid(Uuid::nil()));
    }

    #[rstest]
    #[case("00000000-0000-0000-0000-000000000000", true)]
    #[case("not-a-uuid", false)]
    fn parses_hyphenated_uuids(#[case] input: &str, #[case] ok: bool) {
        let parsed = input.parse::<TraceId>();
        assert_eq!(parsed.is_ok(), ok);
        if let Ok(id) = parsed {
            assert_eq!(id.to_string(), input);
        }
    }
}
