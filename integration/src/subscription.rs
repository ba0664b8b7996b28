// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::{Display, Formatter};

/// New type representing a unique `String` identifier for a stream that has been subscribed to.
/// Used to associate data structures received over the socket with the original
/// [`Subscription`](crate::subscription::Subscription) that was actioned.
///
/// Note: Each exchange requires a different `String` identifier depending on the data
/// structures it sends.
///
/// eg/ [`SubscriptionId`] of a B3 trade channel is `"{instrument}@trade"`.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
pub struct SubscriptionId(pub SmolStr);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubscriptionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<S> From<S> for SubscriptionId
where
    S: Into<SmolStr>,
{
    fn from(input: S) -> Self {
        Self(input.into())
    }
}
