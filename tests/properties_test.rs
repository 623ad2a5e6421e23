use completable_result::{AsyncResult, Cause, CompletableResult, ResultExt, ResultFactory, ResultView};
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

proptest! {
    #[test]
    fn succeeded_reads_back(v in any::<i64>()) {
        let ok = ResultFactory::new().succeeded(v);
        prop_assert_eq!(ok.result(), Some(v));
        prop_assert!(ok.succeeded());
        prop_assert!(!ok.failed());
    }

    #[test]
    fn failed_reads_back(message in "[a-z]{1,16}") {
        let cause = Cause::msg(message.clone());
        let failed = ResultFactory::new().failed::<i64, _>(cause.clone());
        prop_assert_eq!(failed.cause(), Some(cause));
        prop_assert!(failed.failed());
        prop_assert_eq!(failed.cause().unwrap().to_string(), message);
    }

    #[test]
    fn first_completion_is_permanent(first in any::<i32>(), later in prop::collection::vec(any::<i32>(), 0..8)) {
        let result = CompletableResult::<i32>::new();
        result.complete(first).unwrap();
        for v in later {
            prop_assert!(result.complete(v).is_err());
            prop_assert!(result.fail_msg("late").is_err());
            prop_assert!(!result.try_complete(v));
            prop_assert!(!result.try_fail_msg("late"));
        }
        prop_assert_eq!(result.result(), Some(first));
    }

    #[test]
    fn map_applies_or_skips(v in any::<i32>(), fail in any::<bool>()) {
        let factory = ResultFactory::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let f = move |x: i32| {
            seen.fetch_add(1, Ordering::SeqCst);
            x.wrapping_mul(3)
        };
        if fail {
            let cause = Cause::msg("source failed");
            let mapped = factory.failed::<i32, _>(cause.clone()).map(f);
            prop_assert_eq!(mapped.cause(), Some(cause));
            prop_assert_eq!(calls.load(Ordering::SeqCst), 0);
        } else {
            let mapped = factory.succeeded(v).map(f);
            prop_assert_eq!(mapped.result(), Some(v.wrapping_mul(3)));
            prop_assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn otherwise_only_touches_failures(v in any::<u16>()) {
        let factory = ResultFactory::new();
        prop_assert_eq!(factory.failed_msg::<u16, _>("x").otherwise_value(0).result(), Some(0));
        prop_assert_eq!(factory.succeeded(v).otherwise_value(0).result(), Some(v));
    }
}
