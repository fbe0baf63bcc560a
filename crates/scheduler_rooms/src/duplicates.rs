// --- File: crates/scheduler_rooms/src/duplicates.rs ---
//! Advisory check for sessions that may belong to the same student.
//!
//! Matching is a loose substring heuristic. Results are shown as a warning
//! only and never block a booking.

use scheduler_common::{Session, SessionId};
use serde::{Deserialize, Serialize};

/// Shorter names than this never match, to keep "Al" from matching everyone.
pub const MIN_MATCH_CHARS: usize = 3;

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct DuplicateQuery {
    pub student_name: String,
    #[serde(default)]
    pub exclude_session_id: Option<SessionId>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DuplicateSessionsResponse {
    /// Always true: the list is a hint for the operator.
    pub advisory: bool,
    pub matches: Vec<Session>,
}

/// Lowercases and collapses runs of whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn names_match(a: &str, b: &str) -> bool {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    shorter.chars().count() >= MIN_MATCH_CHARS && longer.contains(shorter)
}

/// Sessions whose student name contains, or is contained in, `student_name`.
pub fn find_possible_duplicates<'a>(
    student_name: &str,
    sessions: &'a [Session],
    exclude_session_id: Option<SessionId>,
) -> Vec<&'a Session> {
    let wanted = normalize_name(student_name);
    sessions
        .iter()
        .filter(|session| Some(session.id) != exclude_session_id)
        .filter(|session| {
            session
                .student_name
                .as_deref()
                .map(|name| names_match(&wanted, &normalize_name(name)))
                .unwrap_or(false)
        })
        .collect()
}
