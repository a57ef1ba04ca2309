//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use nnpkg_core::OperandId;

#[inline]
pub(crate) fn ensure_registered<T>(entry: Option<T>, id: OperandId) -> T {
    match entry {
        Some(entry) => entry,
        None => panic!(
            "OperandRegistry: operand {id} not registered \
             (operations must be topologically ordered)"
        ),
    }
}

#[inline]
pub(crate) fn ensure_fresh(id: OperandId, fresh: bool) {
    assert!(fresh, "OperandRegistry: operand {id} registered twice");
}
