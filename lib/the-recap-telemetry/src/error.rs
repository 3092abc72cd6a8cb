use crate::model::TeamId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("match has no participants")]
    EmptyMatch,
    #[error("expected two teams, found {}", .0.len())]
    AmbiguousTeamStructure(Vec<TeamId>),
}
