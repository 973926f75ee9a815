use srange::engine::config::StateSelection;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid KEY=VALUE pair: '{0}'. Expected e.g. 'analysis.method=mises'.")]
    InvalidKeyValue(String),

    #[error("Invalid state id '{token}' in state list '{list}'.")]
    InvalidStateId { token: String, list: String },

    #[error("Decreasing state range '{token}' in state list '{list}'.")]
    DecreasingRange { token: String, list: String },

    #[error("State list cannot be empty.")]
    EmptyList,
}

pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}

/// Parses `all` or a comma separated list of ids and inclusive ranges,
/// e.g. `0-3,7`. Ids are kept in the order given.
pub fn parse_state_selection(list: &str) -> Result<StateSelection, ParseError> {
    let trimmed = list.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(StateSelection::All);
    }
    if trimmed.is_empty() {
        return Err(ParseError::EmptyList);
    }

    let parse_id = |token: &str| {
        token
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidStateId {
                token: token.trim().to_string(),
                list: list.to_string(),
            })
    };

    let mut ids = Vec::new();
    for token in trimmed.split(',') {
        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse_id(start)?, parse_id(end)?);
                if end < start {
                    return Err(ParseError::DecreasingRange {
                        token: token.trim().to_string(),
                        list: list.to_string(),
                    });
                }
                ids.extend(start..=end);
            }
            None => ids.push(parse_id(token)?),
        }
    }
    Ok(StateSelection::List(ids))
}
