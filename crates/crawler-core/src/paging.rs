use crate::backoff::BackoffPolicy;
use crate::error::ErrorClass;
use tracing::warn;

/// One page of a provider listing. `next` is the opaque token of the
/// following page; `None` is the walk's only normal terminal signal.
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Walks every page of a listing endpoint, feeding each item to `sink` in
/// the order returned.
///
/// Rate-limited fetches wait out the backoff and retry the same token, so a
/// page is never delivered twice and never skipped. Transient failures retry
/// the same token a bounded number of times before escalating. Fatal
/// failures end the walk early; everything already delivered to the sink
/// stays delivered.
pub fn walk_pages<T, F, C, S>(
    mut fetch: F,
    classify: C,
    backoff: &BackoffPolicy,
    mut sink: S,
) -> anyhow::Result<()>
where
    F: FnMut(Option<&str>) -> anyhow::Result<Page<T>>,
    C: Fn(&anyhow::Error) -> ErrorClass,
    S: FnMut(T),
{
    let mut token: Option<String> = None;
    let mut transient_retries = 0u32;
    loop {
        let page = match fetch(token.as_deref()) {
            Ok(page) => page,
            Err(err) => match classify(&err) {
                ErrorClass::RateLimited => {
                    warn!("provider rate limit hit, waiting before retrying the same page");
                    backoff.wait_rate_limited();
                    continue;
                }
                ErrorClass::Transient
                    if transient_retries < backoff.max_transient_retries() =>
                {
                    transient_retries += 1;
                    warn!(retry = transient_retries, "transient provider error, retrying page");
                    backoff.wait_transient();
                    continue;
                }
                _ => return Err(err),
            },
        };
        transient_retries = 0;
        for item in page.items {
            sink(item);
        }
        match page.next {
            Some(next) => token = Some(next),
            None => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, classify_error};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn counting_policy() -> (BackoffPolicy, Rc<RefCell<Vec<Duration>>>) {
        let waits = Rc::new(RefCell::new(Vec::new()));
        let recorded = waits.clone();
        let policy = BackoffPolicy::with_sleeper(Box::new(move |wait| {
            recorded.borrow_mut().push(wait);
        }));
        (policy, waits)
    }

    #[test]
    fn delivers_every_item_across_pages_in_order() {
        let pages = vec![vec![1, 2, 3], vec![4], vec![5, 6]];
        let (policy, _) = counting_policy();
        let mut seen = Vec::new();
        walk_pages(
            |token| {
                let idx: usize = token.map(|t| t.parse().unwrap()).unwrap_or(0);
                let next = if idx + 1 < pages.len() {
                    Some((idx + 1).to_string())
                } else {
                    None
                };
                Ok(Page {
                    items: pages[idx].clone(),
                    next,
                })
            },
            classify_error,
            &policy,
            |item| seen.push(item),
        )
        .unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rate_limited_page_is_retried_not_redelivered() {
        let (policy, waits) = counting_policy();
        let failures_left = RefCell::new(2u32);
        let mut seen = Vec::new();
        walk_pages(
            |token| {
                assert!(token.is_none());
                if *failures_left.borrow() > 0 {
                    *failures_left.borrow_mut() -= 1;
                    return Err(ApiError::RateLimited.into());
                }
                Ok(Page::last(vec!["a", "b"]))
            },
            classify_error,
            &policy,
            |item| seen.push(item),
        )
        .unwrap();
        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(waits.borrow().len(), 2);
        assert!(waits.borrow().iter().all(|w| *w == Duration::from_secs(3600)));
    }

    #[test]
    fn transient_errors_escalate_after_bounded_retries() {
        let (policy, waits) = counting_policy();
        let mut calls = 0u32;
        let result = walk_pages(
            |_| {
                calls += 1;
                Err::<Page<u32>, _>(ApiError::Status { status: 502 }.into())
            },
            classify_error,
            &policy,
            |_| {},
        );
        assert!(result.is_err());
        assert_eq!(calls, 4);
        assert_eq!(waits.borrow().len(), 3);
    }

    #[test]
    fn fatal_error_stops_walk_and_keeps_delivered_items() {
        let (policy, _) = counting_policy();
        let mut seen = Vec::new();
        let result = walk_pages(
            |token| match token {
                None => Ok(Page {
                    items: vec![1, 2],
                    next: Some("1".to_string()),
                }),
                Some(_) => Err(ApiError::Status { status: 404 }.into()),
            },
            classify_error,
            &policy,
            |item| seen.push(item),
        );
        assert!(result.is_err());
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn successful_page_resets_transient_retries() {
        let (policy, waits) = counting_policy();
        let failures = RefCell::new(vec![2u32, 2u32]);
        let mut seen = Vec::new();
        walk_pages(
            |token| {
                let idx: usize = token.map(|t| t.parse().unwrap()).unwrap_or(0);
                if failures.borrow()[idx] > 0 {
                    failures.borrow_mut()[idx] -= 1;
                    return Err(ApiError::Status { status: 500 }.into());
                }
                let next = if idx == 0 { Some("1".to_string()) } else { None };
                Ok(Page {
                    items: vec![idx],
                    next,
                })
            },
            classify_error,
            &policy,
            |item| seen.push(item),
        )
        .unwrap();
        assert_eq!(seen, vec![0, 1]);
        assert_eq!(waits.borrow().len(), 4);
    }
}
