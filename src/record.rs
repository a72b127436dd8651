use serde::Serialize;

use crate::error::IngestError;

/// Tokens consumed per record. The source CSV is headerless and
/// whitespace-delimited with exactly nine columns per row.
pub const FIELDS_PER_RECORD: usize = 9;

/// One row of the homes CSV. Values stay as strings; coercion and loading
/// belong to whatever sits behind the sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HomeRecord {
    pub sell: String,
    pub list: String,
    pub living: String,
    pub rooms: String,
    pub beds: String,
    pub baths: String,
    pub age: String,
    pub acres: String,
    pub taxes: String,
}

impl HomeRecord {
    fn from_tokens(tokens: &[&str]) -> Self {
        debug_assert_eq!(tokens.len(), FIELDS_PER_RECORD);
        Self {
            sell: tokens[0].to_string(),
            list: tokens[1].to_string(),
            living: tokens[2].to_string(),
            rooms: tokens[3].to_string(),
            beds: tokens[4].to_string(),
            baths: tokens[5].to_string(),
            age: tokens[6].to_string(),
            acres: tokens[7].to_string(),
            taxes: tokens[8].to_string(),
        }
    }
}

/// Splits the payload on whitespace and regroups the tokens in strides of
/// nine. A token count that is not a multiple of nine is rejected instead
/// of being read past the end.
pub fn parse_records(payload: &str) -> Result<Vec<HomeRecord>, IngestError> {
    let tokens: Vec<&str> = payload.split_whitespace().collect();
    if tokens.len() % FIELDS_PER_RECORD != 0 {
        return Err(IngestError::MalformedPayload {
            tokens: tokens.len(),
        });
    }
    Ok(tokens
        .chunks_exact(FIELDS_PER_RECORD)
        .map(HomeRecord::from_tokens)
        .collect())
}
