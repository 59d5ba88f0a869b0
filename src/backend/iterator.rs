//! Paged list iteration over backend collections
//!
//! A `ListIterator` pulls pages from a `PageFetcher` on demand and pushes
//! every item to a callback. Paging stops at the first error, which is
//! recorded and reported by [`ListIterator::get_error`].

use async_trait::async_trait;

use super::error::BackendError;

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Total number of items across every page
    pub total: usize,
    pub items: Vec<T>,
}

/// Source of list pages
#[async_trait]
pub trait PageFetcher<T: Send + 'static>: Send + Sync {
    /// Fetch a page; pages are numbered from 1
    async fn fetch(&self, page: u32) -> Result<Page<T>, BackendError>;

    /// Complete an item before it is handed out
    async fn resolve(&self, item: T) -> Result<T, BackendError> {
        Ok(item)
    }
}

enum Source<T: Send + 'static> {
    Pages(Box<dyn PageFetcher<T>>),
    Items(Vec<T>),
}

/// Single-use iterator over a backend list.
///
/// The iterator is consumed by [`items`](ListIterator::items); calling it a
/// second time yields nothing.
pub struct ListIterator<T: Send + 'static> {
    source: Option<Source<T>>,
    err: Option<BackendError>,
}

impl<T: Send + 'static> ListIterator<T> {
    pub fn new(fetcher: impl PageFetcher<T> + 'static) -> Self {
        Self {
            source: Some(Source::Pages(Box::new(fetcher))),
            err: None,
        }
    }

    /// Iterate over a fixed set of items, then report `err`
    pub fn from_items(items: Vec<T>, err: Option<BackendError>) -> Self {
        Self {
            source: Some(Source::Items(items)),
            err,
        }
    }

    /// Push every item to `f` until it returns `false`, the list is
    /// exhausted, or a page fails.
    pub async fn items<F>(&mut self, mut f: F)
    where
        F: FnMut(T) -> bool + Send,
    {
        let Some(source) = self.source.take() else {
            return;
        };

        let fetcher = match source {
            Source::Items(items) => {
                for item in items {
                    if !f(item) {
                        break;
                    }
                }
                return;
            }
            Source::Pages(fetcher) => fetcher,
        };

        let mut page = 0;
        let mut count = 0;
        let mut total = usize::MAX;

        while count < total {
            page += 1;
            let result = match fetcher.fetch(page).await {
                Ok(result) => result,
                Err(e) => {
                    self.err = Some(e);
                    return;
                }
            };

            total = result.total;
            // An empty page before the total is reached ends the list
            if result.items.is_empty() {
                return;
            }
            count += result.items.len();

            for item in result.items {
                let item = match fetcher.resolve(item).await {
                    Ok(item) => item,
                    Err(e) => {
                        self.err = Some(e);
                        return;
                    }
                };
                if !f(item) {
                    return;
                }
            }
        }
    }

    /// Drain the iterator into a vector, failing on a recorded error
    pub async fn collect(mut self) -> Result<Vec<T>, BackendError> {
        let mut collected = Vec::new();
        self.items(|item| {
            collected.push(item);
            true
        })
        .await;
        match self.err.take() {
            Some(e) => Err(e),
            None => Ok(collected),
        }
    }

    pub fn get_error(&self) -> Option<&BackendError> {
        self.err.as_ref()
    }
}

#[cfg(test)]
#[path = "iterator_test.rs"]
mod tests;
