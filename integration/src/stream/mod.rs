// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Stream utilities.

/// A `Stream` wrapper that indexes each yielded item via an [`indexed::Indexer`].
pub mod indexed;
