// Simulation error taxonomy.
//
// Two failure classes, kept deliberately distinct:
// - `Config`: caller-fixable input problems (non-positive capacities,
//   unknown selector strings). Rejected at construction or parse time,
//   before any computation runs.
// - `InvariantViolation`: internal defect indicators (a cell left
//   unassigned when sequencing is requested). Not user-recoverable; the
//   operation aborts rather than substituting a default.
//
// Every operation in this crate is a pure, total function over a
// fully-formed wall, so failures are deterministic — there is no retry
// logic anywhere.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid configuration or selector — the caller can fix the input.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An internal invariant did not hold — indicates a defect, not bad input.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_their_class() {
        let c = SimError::Config("rows must be positive".into());
        assert!(c.to_string().starts_with("invalid configuration"));
        let i = SimError::InvariantViolation("unassigned cell".into());
        assert!(i.to_string().starts_with("internal invariant violated"));
    }
}
