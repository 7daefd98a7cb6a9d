//! Last submitted search per view mode.
//!
//! Only explicit user submissions are recorded here. Passive loads (a view opening with a
//! query already in place) never overwrite a slot.

use crate::types::FilterParams;
use parking_lot::RwLock;

#[derive(Debug, Default)]
pub struct QueryRecall {
    unflagged: RwLock<FilterParams>,
    flagged: RwLock<FilterParams>,
}

impl QueryRecall {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, flagged: bool) -> &RwLock<FilterParams> {
        if flagged {
            &self.flagged
        } else {
            &self.unflagged
        }
    }

    /// Overwrites the slot for the given mode.
    pub fn set(&self, flagged: bool, query: FilterParams) {
        *self.slot(flagged).write() = query;
    }

    /// Returns the last submitted query for the mode, or an empty filter.
    #[must_use]
    pub fn get(&self, flagged: bool) -> FilterParams {
        self.slot(flagged).read().clone()
    }

    /// Resets both slots to the empty filter.
    pub fn clear(&self) {
        *self.unflagged.write() = FilterParams::new();
        *self.flagged.write() = FilterParams::new();
    }
}
