// ABOUTME: Optional-priority ordering contract
// ABOUTME: Entities with a priority sort before entities without one

use std::cmp::Ordering;

pub trait HasPriority {
    fn priority(&self) -> Option<i32>;

    fn has_priority(&self) -> bool {
        self.priority().is_some()
    }
}

/// Prioritized entities ascend numerically; unprioritized ones sort last and
/// compare equal to each other.
pub fn sort_priority<T: HasPriority + ?Sized>(a: &T, b: &T) -> Ordering {
    match (a.priority(), b.priority()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by [`sort_priority`]
pub fn sort_by_priority<T: HasPriority>(items: &mut [T]) {
    items.sort_by(|a, b| sort_priority(a, b));
}
