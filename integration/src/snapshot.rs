// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
use serde::{Deserialize, Serialize};

/// Normalised Snapshot wrapper. Used to indicate a value represents a full state replacement
/// rather than an incremental delta, distinguishing a market-data or account-data snapshot
/// from subsequent updates that build on it.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
pub struct Snapshot<T>(pub T);

impl<T> Snapshot<T> {
    pub fn as_ref(&self) -> Snapshot<&T> {
        Snapshot(&self.0)
    }

    pub fn map<Output, Func>(self, f: Func) -> Snapshot<Output>
    where
        Func: FnOnce(T) -> Output,
    {
        Snapshot(f(self.0))
    }
}
