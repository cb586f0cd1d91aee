use std::collections::HashSet;

use tracing::info;

use crate::{
    dto::roster::{ReplaceRosterRequest, RosterEntrySummary},
    error::ServiceError,
    services::sse_events,
    state::{SharedState, roster::RosterEntry},
};

/// Replace the roster used to resolve player roles.
pub async fn replace_roster(
    state: &SharedState,
    request: ReplaceRosterRequest,
) -> Result<Vec<RosterEntrySummary>, ServiceError> {
    let mut seen_ids = HashSet::new();
    let entries = request
        .players
        .into_iter()
        .map(|input| {
            if !seen_ids.insert(input.id) {
                return Err(ServiceError::InvalidInput(format!(
                    "duplicate player id `{}` detected",
                    input.id
                )));
            }
            Ok(RosterEntry::from(input))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let summaries = state
        .write_session(|session| {
            session.roster.replace(entries);
            session
                .roster
                .entries()
                .map(RosterEntrySummary::from)
                .collect::<Vec<_>>()
        })
        .await;

    info!(players = summaries.len(), "roster replaced");
    sse_events::broadcast_roster_updated(state, summaries.len());
    Ok(summaries)
}

/// Current roster in the order it was supplied.
pub async fn list_roster(state: &SharedState) -> Vec<RosterEntrySummary> {
    state
        .read_session(|session| {
            session
                .roster
                .entries()
                .map(RosterEntrySummary::from)
                .collect()
        })
        .await
}
