use crate::models::Address;
use crate::traits::Tier;
use std::fmt;
use std::sync::Arc;

/// Composable predicate over one tier
///
/// ```rust,ignore
/// // Raw materials this mill bought but has not woven yet
/// let filter = Filter::<RawMaterial>::held_by(mill).and(Filter::unused_for_next_tier());
/// ```
pub struct Filter<T> {
    label: String,
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Filter").field(&self.label).finish()
    }
}

impl<T: 'static> Filter<T> {
    /// Arbitrary predicate with a label used in logs
    pub fn new(
        label: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Keeps everything
    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    pub fn matches(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn and(self, other: Filter<T>) -> Self {
        let label = format!("{} and {}", self.label, other.label);
        Self::new(label, move |e| self.matches(e) && other.matches(e))
    }

    pub fn not(self) -> Self {
        let label = format!("not ({})", self.label);
        Self::new(label, move |e| !self.matches(e))
    }
}

impl<T: Tier> Filter<T> {
    /// Still listed for the next role
    pub fn available() -> Self {
        Self::new("available", |e: &T| e.is_available())
    }

    pub fn unavailable() -> Self {
        Self::new("unavailable", |e: &T| !e.is_available())
    }

    /// Created by `address`
    pub fn originated_by(address: Address) -> Self {
        Self::new(format!("originated by {}", address.short()), move |e: &T| {
            e.origin() == address
        })
    }

    /// Taken over by `address` as the next role
    pub fn held_by(address: Address) -> Self {
        Self::new(format!("held by {}", address.short()), move |e: &T| {
            e.next_owner() == address
        })
    }

    /// Not yet consumed into the tier above
    pub fn unused_for_next_tier() -> Self {
        Self::new("unused for next tier", |e: &T| !e.used_for_next_tier())
    }
}
