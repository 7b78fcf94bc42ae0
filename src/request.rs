use serde::Deserialize;

/// Form body of a vote. `choice` stays raw so that a malformed id is
/// reported like a missing one.
#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}
