//! Single-column sorting.

use crate::descriptor::ColumnType;
use crate::value::{CellValue, Row, RowId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Direction applied on the first toggle: text ascends, numbers descend.
    pub fn first_for(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Text => SortDirection::Asc,
            ColumnType::Number => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Next sort after toggling `column_id`: none, first direction, opposite
/// direction, none again.
pub fn toggle_sort(
    current: Option<&SortState>,
    column_id: &str,
    column_type: ColumnType,
) -> Option<SortState> {
    let first = SortDirection::first_for(column_type);
    match current {
        Some(state) if state.column_id == column_id => {
            if state.direction == first {
                Some(SortState {
                    column_id: column_id.to_string(),
                    direction: first.reversed(),
                })
            } else {
                None
            }
        }
        _ => Some(SortState {
            column_id: column_id.to_string(),
            direction: first,
        }),
    }
}

/// Stable sort of row ids by one column. Nulls go last in both directions.
pub fn sort_row_ids<R: Row>(ids: &mut [RowId], data: &[R], sort: &SortState) {
    let mut keyed: Vec<(RowId, CellValue)> = ids
        .iter()
        .map(|id| (*id, data[id.0].value(&sort.column_id)))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| compare(a, b, sort.direction));

    for (slot, (id, _)) in ids.iter_mut().zip(keyed) {
        *slot = id;
    }
}

fn compare(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.sort_cmp(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
    }
}
