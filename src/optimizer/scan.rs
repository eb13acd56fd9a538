use rayon::prelude::*;
use rayon::ThreadPool;
use std::time::Instant;

/// How oracle scans are executed: on the caller's thread or fanned out over a
/// bounded pool, optionally cut off at a deadline. Parallel and serial scans
/// return the same answer.
pub struct ScanPolicy<'a> {
    pool: Option<&'a ThreadPool>,
    deadline: Option<Instant>,
}

impl<'a> ScanPolicy<'a> {
    pub fn new(pool: Option<&'a ThreadPool>, deadline: Option<Instant>) -> Self {
        Self { pool, deadline }
    }

    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Applies `f` to every row, preserving order.
    pub fn map_rows<T, R, F>(&self, rows: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        match self.pool {
            Some(pool) => pool.install(|| rows.par_iter().map(&f).collect()),
            None => rows.iter().map(f).collect(),
        }
    }

    /// First item (in slice order) for which `f` returns `Some`.
    pub fn find_first<T, R, F>(&self, items: &[T], f: F) -> Option<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Option<R> + Sync + Send,
    {
        match self.pool {
            Some(pool) => pool.install(|| items.par_iter().find_map_first(&f)),
            None => items.iter().find_map(f),
        }
    }
}
