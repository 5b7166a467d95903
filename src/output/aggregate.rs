//! Result aggregation
//!
//! Splits scheduler results into the title-keyed index, the ordered list of
//! successful articles and the list of failures.

use crate::crawler::{ArticleDoc, FetchResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the combined index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub url: String,
    pub breadcrumbs: String,
    pub content: String,
}

/// Combined index keyed by article title
///
/// Two articles sharing a title collide: the later one in task order wins.
pub type AggregateIndex = BTreeMap<String, IndexEntry>;

/// A document that could not be harvested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedDocument {
    pub url: String,
    pub error: String,
}

/// Everything downstream writers need from a harvest
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub index: AggregateIndex,
    /// Successful articles in original task order
    pub documents: Vec<ArticleDoc>,
    pub failures: Vec<FailedDocument>,
}

impl Aggregate {
    pub fn success_count(&self) -> usize {
        self.documents.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of articles that lost their index slot to a later same-titled one
    pub fn title_collisions(&self) -> usize {
        self.documents.len() - self.index.len()
    }
}

/// Builds the aggregate from scheduler results
pub fn aggregate(results: Vec<FetchResult>) -> Aggregate {
    let mut aggregate = Aggregate::default();

    for result in results {
        match result {
            FetchResult::Success { doc, .. } => {
                let previous = aggregate.index.insert(
                    doc.title.clone(),
                    IndexEntry {
                        url: doc.url.clone(),
                        breadcrumbs: doc.breadcrumbs.clone(),
                        content: doc.content.clone(),
                    },
                );
                if let Some(previous) = previous {
                    tracing::debug!(
                        "Title '{}' of {} replaces index entry for {}",
                        doc.title,
                        doc.url,
                        previous.url
                    );
                }
                aggregate.documents.push(doc);
            }
            FetchResult::Failure { url, error } => {
                aggregate.failures.push(FailedDocument { url, error });
            }
        }
    }

    aggregate
}
