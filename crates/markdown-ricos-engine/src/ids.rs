//! Node identifier generation.
//!
//! Identifiers are opaque strings of exactly [`ID_LEN`] lowercase hex
//! characters. They are random, not guaranteed unique: two nodes in the same
//! document may in principle share an id. Callers must treat them as opaque
//! and never depend on a particular value.

use uuid::Uuid;

/// Length of every generated identifier.
pub const ID_LEN: usize = 8;

/// Source of node identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random identifiers drawn from a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        id
    }
}

/// Counter-based identifiers with the same format as [`RandomIds`].
///
/// Useful wherever output must be reproducible (tests, diffs of converted
/// documents).
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next = self.next.wrapping_add(1);
        format!("{:0width$x}", self.next, width = ID_LEN)
    }
}

/// Checks that `id` has the generated identifier format.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_have_fixed_format() {
        let mut ids = RandomIds;
        for _ in 0..32 {
            let id = ids.next_id();
            assert!(is_valid_id(&id), "unexpected id format: {id}");
        }
    }

    #[test]
    fn sequential_ids_share_the_format() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "00000001");
        assert_eq!(ids.next_id(), "00000002");
        assert!(is_valid_id(&ids.next_id()));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("0000000g"));
        assert!(!is_valid_id("ABCDEF12"));
        assert!(!is_valid_id("123456789"));
    }
}
