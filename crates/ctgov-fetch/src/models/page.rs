//! One page of search results with its continuation token.

use serde::{Deserialize, Serialize};

use super::Study;

/// A single page returned by the studies search endpoint.
///
/// The token is opaque: it is minted by the server, consumed as the
/// `pageToken` parameter of the following request, and discarded after use.
/// Its absence signals the end of the result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudiesPage {
    /// Studies in this page, in server order.
    #[serde(default)]
    pub studies: Vec<Study>,

    /// Continuation token for the next page (None = no more results).
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl StudiesPage {
    /// Check if there are more results available.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}
