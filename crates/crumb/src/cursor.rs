use crate::{FromRow, Result};
use crumb_core::stmt::ValueRecord;

use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A sequence of query results, decoded on demand.
pub struct Cursor<T> {
    rows: VecDeque<ValueRecord>,
    _p: std::marker::PhantomData<fn() -> T>,
}

impl<T: FromRow> Cursor<T> {
    pub(crate) fn new(rows: Vec<ValueRecord>) -> Self {
        Self {
            rows: rows.into(),
            _p: std::marker::PhantomData,
        }
    }

    pub async fn next(&mut self) -> Option<Result<T>> {
        let row = self.rows.pop_front()?;
        Some(T::from_row(row))
    }

    /// Collect all values
    pub async fn collect(mut self) -> Result<Vec<T>> {
        let mut ret = Vec::with_capacity(self.rows.len());

        while let Some(res) = self.next().await {
            ret.push(res?);
        }

        Ok(ret)
    }
}

impl<T: FromRow> tokio_stream::Stream for Cursor<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().rows.pop_front().map(T::from_row))
    }
}
