//! Dashboard Filters
//! Conjunction of inclusion predicates over transfer records.

use crate::data::{TransferMovement, TransferRecord};
use std::collections::BTreeSet;

/// Movement selector; `Any` passes every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovementFilter {
    #[default]
    Any,
    Inbound,
    Outbound,
}

impl MovementFilter {
    pub const ALL: [MovementFilter; 3] = [
        MovementFilter::Any,
        MovementFilter::Inbound,
        MovementFilter::Outbound,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MovementFilter::Any => "Any",
            MovementFilter::Inbound => "Inbound",
            MovementFilter::Outbound => "Outbound",
        }
    }

    fn matches(&self, movement: &TransferMovement) -> bool {
        match self {
            MovementFilter::Any => true,
            MovementFilter::Inbound => *movement == TransferMovement::Inbound,
            MovementFilter::Outbound => *movement == TransferMovement::Outbound,
        }
    }
}

/// User-selected filters. Empty sets and `None` bounds are pass-through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferFilter {
    pub clubs: BTreeSet<String>,
    pub movement: MovementFilter,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub leagues: BTreeSet<String>,
    pub positions: BTreeSet<String>,
}

fn selected(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(value)
}

impl TransferFilter {
    pub fn matches(&self, record: &TransferRecord) -> bool {
        selected(&self.clubs, &record.club_name)
            && self.movement.matches(&record.transfer_movement)
            && selected(&self.positions, &record.position)
            && self.min_year.map_or(true, |min| record.year >= min)
            && self.max_year.map_or(true, |max| record.year <= max)
            && selected(&self.leagues, &record.league_name)
    }

    pub fn apply<'a>(&self, records: &'a [TransferRecord]) -> Vec<&'a TransferRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// True when at least one predicate narrows the data.
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}
