// ABOUTME: Reconciler - merges a fetched session snapshot into the displayed state

use crate::app::state::Selection;
use crate::byobu::GatewayError;
use crate::models::Session;

/// Outcome of merging one fetch result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub sessions: Vec<Session>,
    pub selection: Selection,
    /// Fetch failure to surface as the pending error
    pub error: Option<GatewayError>,
}

/// Merge `fetched` into the previously displayed state.
///
/// A successful fetch is authoritative and replaces the set verbatim; the
/// remembered name is re-selected when it survived, otherwise selection
/// falls back to `Default`. A failed fetch leaves sessions and selection
/// exactly as they were and only reports the error.
pub fn reconcile(
    previous: &[Session],
    previous_selection: &Selection,
    remembered: Option<&str>,
    fetched: Result<Vec<Session>, GatewayError>,
) -> Reconciled {
    match fetched {
        Ok(sessions) => {
            let selection = remembered
                .filter(|name| sessions.iter().any(|s| s.name == *name))
                .map_or(Selection::Default, |name| Selection::Named(name.to_string()));
            Reconciled {
                sessions,
                selection,
                error: None,
            }
        }
        Err(error) => Reconciled {
            sessions: previous.to_vec(),
            selection: previous_selection.clone(),
            error: Some(error),
        },
    }
}
