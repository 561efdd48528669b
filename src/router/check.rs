//! Authorization predicates evaluated before a command runs.
//!
//! A failing check silently ends the dispatch. Combinators evaluate their
//! checks in order and stop as soon as the result is known.

use std::future::{ready, Future};
use std::ops::Not;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt as _;
use log::error;

use super::Context;

type CheckFn = dyn Fn(Context) -> BoxFuture<'static, bool> + Send + Sync;

#[derive(Clone)]
pub struct Check(Arc<CheckFn>);

impl Check {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Check(Arc::new(move |ctx: Context| f(ctx).boxed()))
    }

    /// Check that needs no awaiting.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&Context) -> bool + Send + Sync + 'static,
    {
        Check::new(move |ctx| ready(f(&ctx)))
    }

    /// A panicking check counts as failed.
    pub async fn evaluate(&self, ctx: &Context) -> bool {
        let check = AssertUnwindSafe(async { (self.0)(ctx.clone()).await });
        match check.catch_unwind().await {
            Ok(passed) => passed,
            Err(_) => {
                error!("Check panicked for {}", ctx.author());
                false
            }
        }
    }

    pub fn and(self, other: Check) -> Check {
        all([self, other])
    }

    pub fn or(self, other: Check) -> Check {
        any([self, other])
    }
}

impl Not for Check {
    type Output = Check;

    fn not(self) -> Check {
        invert(self)
    }
}

pub fn invert(check: Check) -> Check {
    Check::new(move |ctx| {
        let check = check.clone();
        async move { !check.evaluate(&ctx).await }
    })
}

/// Passes when every check passes. Stops at the first failing one.
pub fn all(checks: impl IntoIterator<Item = Check>) -> Check {
    let checks: Arc<[Check]> = checks.into_iter().collect();
    Check::new(move |ctx| {
        let checks = checks.clone();
        async move {
            for check in checks.iter() {
                if !check.evaluate(&ctx).await {
                    return false;
                }
            }
            true
        }
    })
}

/// Passes when any check passes. Stops at the first passing one.
pub fn any(checks: impl IntoIterator<Item = Check>) -> Check {
    let checks: Arc<[Check]> = checks.into_iter().collect();
    Check::new(move |ctx| {
        let checks = checks.clone();
        async move {
            for check in checks.iter() {
                if check.evaluate(&ctx).await {
                    return true;
                }
            }
            false
        }
    })
}

/// Author is the configured owner, or the application owner when none is
/// configured.
pub fn is_owner() -> Check {
    Check::new(|ctx: Context| async move {
        match ctx.router().owner().await {
            Ok(owner) => ctx.author().id == owner,
            Err(e) => {
                error!("Owner check failed: {e:#}");
                false
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use cmdisco_model::UserId;

    use super::*;
    use crate::config::RouterConfig;
    use crate::router::testing::{context, router, router_with, StubDirectory, AUTHOR_ID};

    fn counting(result: bool, counter: &Arc<AtomicUsize>) -> Check {
        let counter = counter.clone();
        Check::from_fn(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            result
        })
    }

    #[tokio::test]
    async fn all_stops_at_first_failure() {
        let router = router(Default::default());
        let (ctx, _) = context(&router);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let check = all([counting(false, &first), counting(true, &second)]);
        assert!(!check.evaluate(&ctx).await);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        let check = all([counting(true, &first), counting(true, &second)]);
        assert!(check.evaluate(&ctx).await);
        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn any_stops_at_first_success() {
        let router = router(Default::default());
        let (ctx, _) = context(&router);
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let check = any([counting(true, &first), counting(false, &second)]);
        assert!(check.evaluate(&ctx).await);
        assert_eq!(second.load(Ordering::SeqCst), 0);

        let check = counting(false, &first).or(counting(false, &second));
        assert!(!check.evaluate(&ctx).await);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_combinators() {
        let router = router(Default::default());
        let (ctx, _) = context(&router);
        assert!(all([]).evaluate(&ctx).await);
        assert!(!any([]).evaluate(&ctx).await);
    }

    #[tokio::test]
    async fn inversion() {
        let router = router(Default::default());
        let (ctx, _) = context(&router);
        let yes = Check::from_fn(|_| true);
        assert!(!(!yes.clone()).evaluate(&ctx).await);
        assert!(invert(!yes.clone()).evaluate(&ctx).await);
        assert!(!yes.and(Check::from_fn(|_| false)).evaluate(&ctx).await);
    }

    #[tokio::test]
    async fn configured_owner() {
        let config = RouterConfig {
            owner_id: Some(UserId::from(AUTHOR_ID)),
            ..Default::default()
        };
        let owned = router(config);
        let (ctx, _) = context(&owned);
        assert!(is_owner().evaluate(&ctx).await);

        let config = RouterConfig {
            owner_id: Some(UserId::from(1)),
            ..Default::default()
        };
        let owned_by_other = router(config);
        let (ctx, _) = context(&owned_by_other);
        assert!(!is_owner().evaluate(&ctx).await);
    }

    #[tokio::test]
    async fn application_owner_is_fetched_once() {
        let directory = StubDirectory {
            owner: Some(UserId::from(AUTHOR_ID)),
            ..Default::default()
        };
        let lookups = directory.owner_lookups.clone();
        let router = router_with(Default::default(), directory);
        let (ctx, _) = context(&router);
        assert!(is_owner().evaluate(&ctx).await);
        assert!(is_owner().evaluate(&ctx).await);
        assert_eq!(lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panicking_check_fails() {
        let router = router(Default::default());
        let (ctx, _) = context(&router);
        let exploding = Check::from_fn(|_| panic!("check exploded"));
        assert!(!exploding.clone().evaluate(&ctx).await);
        assert!(any([exploding, Check::from_fn(|_| true)]).evaluate(&ctx).await);
    }

    #[tokio::test]
    async fn failed_owner_lookup_rejects() {
        let router = router(Default::default());
        let (ctx, _) = context(&router);
        assert!(!is_owner().evaluate(&ctx).await);
    }
}
