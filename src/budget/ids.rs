use std::cell::Cell;

use uuid::Uuid;

/// Source of opaque unique ids for templates and allocations.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// 128-bit random ids, formatted as 32 lowercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Predictable ids (`<prefix>-1`, `<prefix>-2`, ...), for tests and fixtures.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!("{}-{n}", self.prefix)
    }
}
