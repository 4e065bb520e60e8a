//! Traversal of causally linked errors.

use std::collections::HashSet;

use core_types::ErrorRef;

/// How an error relates to the one reported after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// The error was the explicit cause of the next one
    Cause,
    /// The error was being handled when the next one was raised
    Context,
}

/// One error in a chain and its relation to the next entry.
#[derive(Debug, Clone)]
pub struct ChainLink {
    /// The error record
    pub error: ErrorRef,
    /// Relation to the next (later) entry; None for the reported error
    pub link: Option<LinkKind>,
}

/// Errors leading up to a reported error, oldest first.
///
/// The reported error is always the last entry. Following links stops at an
/// error that suppresses its context, at an error with no predecessor, or at
/// a predecessor that is already in the chain.
#[derive(Debug, Clone)]
pub struct ErrorChain {
    links: Vec<ChainLink>,
}

impl ErrorChain {
    /// Build the chain ending at `error`.
    ///
    /// With `follow_links` false the chain holds `error` alone.
    pub fn build(error: &ErrorRef, follow_links: bool) -> Self {
        let mut links = vec![ChainLink {
            error: error.clone(),
            link: None,
        }];

        if follow_links {
            let mut seen = HashSet::from([identity(error)]);
            let mut current = error.clone();
            while let Some((previous, kind)) = predecessor(&current) {
                if !seen.insert(identity(&previous)) {
                    log::debug!(
                        "error chain revisits {} after {} links, truncating",
                        previous,
                        links.len()
                    );
                    break;
                }
                links.push(ChainLink {
                    error: previous.clone(),
                    link: Some(kind),
                });
                current = previous;
            }
        }

        links.reverse();
        Self { links }
    }

    /// Number of errors in the chain
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Always false: a chain holds at least the reported error
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Entries oldest first
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// The error that was reported
    pub fn reported(&self) -> &ErrorRef {
        // never empty: `build` starts from the reported error
        &self.links[self.links.len() - 1].error
    }

    /// Errors oldest first, without link kinds
    pub fn errors(&self) -> impl Iterator<Item = &ErrorRef> {
        self.links.iter().map(|l| &l.error)
    }
}

impl IntoIterator for ErrorChain {
    type Item = ChainLink;
    type IntoIter = std::vec::IntoIter<ChainLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

/// The error that led to `error`, if it is to be reported.
///
/// An explicit cause wins over an implicit context; suppression hides both.
fn predecessor(error: &ErrorRef) -> Option<(ErrorRef, LinkKind)> {
    if error.suppress_context() {
        return None;
    }
    if let Some(cause) = error.cause() {
        return Some((cause, LinkKind::Cause));
    }
    error.context().map(|context| (context, LinkKind::Context))
}

fn identity(error: &ErrorRef) -> usize {
    ErrorRef::as_ptr(error) as usize
}
