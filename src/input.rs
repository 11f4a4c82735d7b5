//! Initial-state input: a start speed and a start height, whitespace separated.

use std::io::BufRead;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputParseError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("expected `<start speed> <start height>`, got {0:?}")]
    Malformed(String),
    #[error("`{token}` is not a number")]
    NotANumber { token: String },
}

/// Initial vertical speed (m/s, positive downward) and height (m).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    pub start_speed_m_s: f64,
    pub start_height_m: f64,
}

/// Parse `"<speed> <height>"`. Extra tokens are rejected.
pub fn parse_initial_state(line: &str) -> Result<InitialState, InputParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [speed, height] = tokens.as_slice() else {
        return Err(InputParseError::Malformed(line.trim().to_string()));
    };
    Ok(InitialState {
        start_speed_m_s: parse_number(speed)?,
        start_height_m: parse_number(height)?,
    })
}

/// Read the first non-blank line from `reader` and parse it.
pub fn read_initial_state<R: BufRead>(reader: R) -> Result<InitialState, InputParseError> {
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            return parse_initial_state(&line);
        }
    }
    Err(InputParseError::Malformed(String::new()))
}

fn parse_number(token: &str) -> Result<f64, InputParseError> {
    token.parse().map_err(|_| InputParseError::NotANumber {
        token: token.to_string(),
    })
}
