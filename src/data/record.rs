//! Transfer Record Schema
//! Typed row of the canonical dataset and the column names it maps to.

use std::fmt;

pub const CLUB_NAME: &str = "club_name";
pub const PLAYER_NAME: &str = "player_name";
pub const AGE: &str = "age";
pub const POSITION: &str = "position";
pub const CLUB_INVOLVED_NAME: &str = "club_involved_name";
pub const FEE: &str = "fee";
pub const TRANSFER_MOVEMENT: &str = "transfer_movement";
pub const TRANSFER_PERIOD: &str = "transfer_period";
pub const FEE_CLEANED: &str = "fee_cleaned";
pub const LEAGUE_NAME: &str = "league_name";
pub const YEAR: &str = "year";
pub const SEASON: &str = "season";
pub const SEASON_START: &str = "season_start";
pub const SEASON_END: &str = "season_end";

/// Columns every raw season file is expected to carry.
pub const RAW_COLUMNS: [&str; 12] = [
    CLUB_NAME,
    PLAYER_NAME,
    AGE,
    POSITION,
    CLUB_INVOLVED_NAME,
    FEE,
    TRANSFER_MOVEMENT,
    TRANSFER_PERIOD,
    FEE_CLEANED,
    LEAGUE_NAME,
    YEAR,
    SEASON,
];

/// Age written for rows without a usable age.
pub const AGE_SENTINEL: i32 = -1;

/// Direction of a transfer relative to `club_name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransferMovement {
    Inbound,
    Outbound,
    /// Text that matched neither rule during normalization.
    Other(String),
}

impl TransferMovement {
    pub fn parse(value: &str) -> Self {
        match value {
            "Inbound" => TransferMovement::Inbound,
            "Outbound" => TransferMovement::Outbound,
            other => TransferMovement::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TransferMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMovement::Inbound => f.write_str("Inbound"),
            TransferMovement::Outbound => f.write_str("Outbound"),
            TransferMovement::Other(text) => f.write_str(text),
        }
    }
}

/// One player move between clubs, as stored in the canonical dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRecord {
    pub club_name: String,
    pub player_name: String,
    pub age: i32,
    pub position: String,
    pub club_involved_name: String,
    pub fee: String,
    pub transfer_movement: TransferMovement,
    pub transfer_period: String,
    /// `None` when the source left the numeric fee blank.
    pub fee_cleaned: Option<f64>,
    pub league_name: String,
    pub year: i32,
    pub season: String,
    pub season_start: i32,
    pub season_end: i32,
}

impl TransferRecord {
    pub fn has_known_age(&self) -> bool {
        self.age != AGE_SENTINEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_round_trips_through_display() {
        for text in ["Inbound", "Outbound", "transfer"] {
            assert_eq!(TransferMovement::parse(text).to_string(), text);
        }
        assert_eq!(
            TransferMovement::parse("loan"),
            TransferMovement::Other("loan".to_string())
        );
    }
}
