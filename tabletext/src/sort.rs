//! Stable multi-key ordering of rows.
//!
//! When every key sorts in the same direction the rows are ordered with a
//! single composite-key sort. Mixed directions fall back to one stable
//! single-key sort per key, applied from the last key to the first. Both
//! paths produce the same order when directions agree.

use std::cmp::Ordering;
use std::ptr;
use std::sync::Arc;

use crate::column::RecordType;
use crate::error::TableError;
use crate::row::Row;
use crate::Result;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending (A-Z, smallest first)
    #[default]
    Ascending,
    /// Descending (Z-A, largest first)
    Descending,
}

impl From<bool> for OrderDirection {
    fn from(ascending: bool) -> Self {
        if ascending {
            OrderDirection::Ascending
        } else {
            OrderDirection::Descending
        }
    }
}

/// Validated sort request: keys paired with their directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<(String, OrderDirection)>,
}

impl SortSpec {
    /// Build a sort spec from keys and optional per-key directions.
    ///
    /// Without `ascending`, every key sorts ascending.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSortSpec`] if `order_by` is empty or
    /// `ascending` has a different length.
    pub fn new<S: AsRef<str>>(order_by: &[S], ascending: Option<&[bool]>) -> Result<Self> {
        if order_by.is_empty() {
            return Err(TableError::InvalidSortSpec(
                "order_by must name at least one column".to_string(),
            ));
        }
        let directions: Vec<OrderDirection> = match ascending {
            Some(flags) if flags.len() != order_by.len() => {
                return Err(TableError::InvalidSortSpec(format!(
                    "{} sort directions given for {} columns",
                    flags.len(),
                    order_by.len()
                )));
            }
            Some(flags) => flags.iter().copied().map(OrderDirection::from).collect(),
            None => vec![OrderDirection::Ascending; order_by.len()],
        };
        let keys = order_by
            .iter()
            .map(|k| k.as_ref().to_string())
            .zip(directions)
            .collect();
        Ok(Self { keys })
    }

    /// Build from optional arguments, as table rendering receives them.
    ///
    /// Returns `Ok(None)` when neither is given.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::InvalidSortSpec`] if `ascending` is given
    /// without `order_by`, or for any reason [`SortSpec::new`] fails.
    pub fn from_options<S: AsRef<str>>(
        order_by: Option<&[S]>,
        ascending: Option<&[bool]>,
    ) -> Result<Option<Self>> {
        match (order_by, ascending) {
            (None, None) => Ok(None),
            (None, Some(_)) => Err(TableError::InvalidSortSpec(
                "ascending given without order_by".to_string(),
            )),
            (Some(keys), ascending) => Self::new(keys, ascending).map(Some),
        }
    }

    pub fn keys(&self) -> &[(String, OrderDirection)] {
        &self.keys
    }

    /// Direction shared by every key, if there is one
    fn uniform_direction(&self) -> Option<OrderDirection> {
        let first = self.keys[0].1;
        self.keys.iter().all(|(_, d)| *d == first).then_some(first)
    }
}

fn directed(ordering: Ordering, direction: OrderDirection) -> Ordering {
    match direction {
        OrderDirection::Ascending => ordering,
        OrderDirection::Descending => ordering.reverse(),
    }
}

/// Order `rows` by `spec` without touching the input.
///
/// Keys are checked against every field of `record_type`, hidden ones
/// included, and every row must belong to `record_type`. Both checks
/// happen before any sorting.
///
/// # Errors
///
/// Returns [`TableError::UnknownColumn`] if a key is not declared on the
/// record type, and [`TableError::TypeMismatch`] for a row of another
/// record type.
pub fn sort_rows<'a>(
    record_type: &RecordType,
    rows: &'a [Row],
    spec: &SortSpec,
) -> Result<Vec<&'a Row>> {
    let indices = spec
        .keys
        .iter()
        .map(|(key, direction)| {
            record_type
                .index_of(key)
                .map(|i| (i, *direction))
                .ok_or_else(|| TableError::UnknownColumn(key.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(stranger) = rows
        .iter()
        .find(|row| !ptr::eq(Arc::as_ptr(row.record_type()), record_type))
    {
        return Err(TableError::TypeMismatch {
            expected: record_type.name().to_string(),
            found: stranger.record_type().name().to_string(),
        });
    }

    let mut sorted: Vec<&Row> = rows.iter().collect();
    match spec.uniform_direction() {
        Some(direction) => {
            log::debug!(
                "composite sort of {} rows on {} keys ({:?})",
                rows.len(),
                indices.len(),
                direction
            );
            sort_composite(&mut sorted, &indices, direction);
        }
        None => {
            log::debug!(
                "mixed-direction sort of {} rows on {} keys",
                rows.len(),
                indices.len()
            );
            sort_per_key(&mut sorted, &indices);
        }
    }
    Ok(sorted)
}

/// One stable sort on the key tuple, every key in `direction`
fn sort_composite(rows: &mut [&Row], indices: &[(usize, OrderDirection)], direction: OrderDirection) {
    rows.sort_by(|a, b| directed(compare_composite(a, b, indices), direction));
}

/// One stable sort per key, last key first, each in its own direction
fn sort_per_key(rows: &mut [&Row], indices: &[(usize, OrderDirection)]) {
    for &(index, direction) in indices.iter().rev() {
        rows.sort_by(|a, b| directed(a.values()[index].sort_cmp(&b.values()[index]), direction));
    }
}

/// Lexicographic comparison across the key columns, all ascending
fn compare_composite(a: &Row, b: &Row, indices: &[(usize, OrderDirection)]) -> Ordering {
    indices
        .iter()
        .map(|&(i, _)| a.values()[i].sort_cmp(&b.values()[i]))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}
