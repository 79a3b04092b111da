use crate::foundation::error::{StackError, StackResult};

/// Split `items` into contiguous, order-preserving groups of `group_size`.
///
/// Every group holds exactly `group_size` items except the last, which holds between 1 and
/// `group_size`. An empty input yields no groups.
pub fn partition<T>(items: &[T], group_size: usize) -> StackResult<Vec<&[T]>> {
    if group_size == 0 {
        return Err(StackError::invalid_argument("group size must be >= 1"));
    }
    Ok(items.chunks(group_size).collect())
}

/// Number of groups [`partition`] produces for `len` items.
pub fn group_count(len: usize, group_size: usize) -> StackResult<usize> {
    if group_size == 0 {
        return Err(StackError::invalid_argument("group size must be >= 1"));
    }
    Ok(len.div_ceil(group_size))
}

#[cfg(test)]
#[path = "../../tests/unit/batch/partition.rs"]
mod tests;
