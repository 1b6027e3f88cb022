// sluice/src/compose.rs

//! Generic right-to-left function composition over endofunctions `V -> V`.
//!
//! `compose(vec![f1, f2, f3])` behaves as `|v| f1(f2(f3(v)))`. Within sluice
//! this is used for exactly one thing: merging several per-invocation
//! middleware decorators into a single interceptor (`Middleware<T>` is
//! `Composable<Next<T>>`). It is exported because combining middleware is
//! part of the public contract.

use std::sync::Arc;

/// A composable callable. Uses Arc to be cheaply cloneable into the closures
/// built by `compose`.
pub type Composable<V> = Arc<dyn Fn(V) -> V + Send + Sync>;

/// Composes `funcs` right to left.
///
/// - Zero functions: the identity function.
/// - One function: that function, unchanged.
/// - Two or more: pairwise composition `(a, b) -> |v| a(b(v))` folded left to
///   right, so the rightmost function is applied first.
pub fn compose<V: 'static>(funcs: Vec<Composable<V>>) -> Composable<V> {
  let mut iter = funcs.into_iter();

  let first = match iter.next() {
    Some(f) => f,
    None => return Arc::new(|v| v),
  };

  iter.fold(first, |a, b| -> Composable<V> {
    Arc::new(move |v| a(b(v)))
  })
}
