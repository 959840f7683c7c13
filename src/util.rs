
//! Various utility functions.

use std::convert::Infallible;
use std::cmp::Ordering;

/// Extracts the value of a result that cannot fail.
pub fn unwrap_infallible<T>(res: Result<T, Infallible>) -> T {
  match res {
    Ok(value) => value,
    Err(never) => match never {},
  }
}

/// Compares two iterables lexicographically, according to the given
/// ordering function.
///
/// This function is a re-implementation of the same function on
/// `Iterator`, which is only available in Rust nightly.
pub fn cmp_iter_by<I1, I2, F>(iter1: I1, iter2: I2, mut cmp: F) -> Ordering
where I1: IntoIterator,
      I2: IntoIterator,
      F: FnMut(&I1::Item, &I2::Item) -> Ordering {
  let mut iter1 = iter1.into_iter();
  let mut iter2 = iter2.into_iter();
  loop {
    let Some(a) = iter1.next() else { return if iter2.next().is_none() { Ordering::Equal } else { Ordering::Less } };
    let Some(b) = iter2.next() else { return Ordering::Greater };
    let ord = cmp(&a, &b);
    if ord != Ordering::Equal {
      return ord;
    }
  }
}

/// Three-valued conjunction. Returns `None` as soon as any element is
/// unknown, even if a later element is known to be false. Otherwise,
/// returns `Some(true)` if every element is true.
pub fn all_known<I>(iter: I) -> Option<bool>
where I: IntoIterator<Item = Option<bool>> {
  let mut result = true;
  for value in iter {
    match value {
      None => return None,
      Some(false) => result = false,
      Some(true) => {}
    }
  }
  Some(result)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_unwrap_infallible() {
    assert_eq!(unwrap_infallible(Ok::<_, Infallible>("x")), "x");
  }

  #[test]
  fn test_cmp_iter_by_prefix() {
    let always_equal = |_: &&char, _: &&char| Ordering::Equal;
    assert_eq!(cmp_iter_by(&['a', 'b'], &['c', 'd'], always_equal), Ordering::Equal);
    assert_eq!(cmp_iter_by(&['a', 'b', 'c'], &['d', 'e'], always_equal), Ordering::Greater);
    assert_eq!(cmp_iter_by(&['a'], &['b', 'c'], always_equal), Ordering::Less);
  }

  #[test]
  fn test_cmp_iter_by_first_difference() {
    let lengths = |x: &&&str, y: &&&str| x.len().cmp(&y.len());
    assert_eq!(cmp_iter_by(&["ab", "c"], &["xy", "zzz"], lengths), Ordering::Less);
    assert_eq!(cmp_iter_by(&["abc"], &["x", "y"], lengths), Ordering::Greater);
  }

  #[test]
  fn test_all_known() {
    assert_eq!(all_known(vec![]), Some(true));
    assert_eq!(all_known(vec![Some(true), Some(true)]), Some(true));
    assert_eq!(all_known(vec![Some(true), Some(false)]), Some(false));
    assert_eq!(all_known(vec![Some(false), None]), None);
    assert_eq!(all_known(vec![None, Some(false)]), None);
  }
}
