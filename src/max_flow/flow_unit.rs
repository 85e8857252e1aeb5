//!
//! FlowUnit trait for generics of the flow amount
//!
//! u32, u64, usize and i64 implement FlowUnit
//!
use std::iter::Sum;
use std::ops::{Add, Sub};

///
/// generic integer flow amount
///
/// Capacities, residuals and flow values are all FlowUnit values.
/// Accumulation uses `checked_add` so overflow is reported instead of
/// wrapped; signed implementations expose negative capacity entries
/// through `is_negative`.
///
pub trait FlowUnit:
    Copy
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Sum
    + std::fmt::Debug
    + std::fmt::Display
{
    /// zero value = 0
    fn zero() -> Self;
    /// addition reporting overflow as None
    fn checked_add(self, rhs: Self) -> Option<Self>;
    /// below zero (never for the unsigned implementations)
    fn is_negative(self) -> bool;
}

impl FlowUnit for u32 {
    fn zero() -> u32 {
        0
    }
    fn checked_add(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
    fn is_negative(self) -> bool {
        false
    }
}

impl FlowUnit for u64 {
    fn zero() -> u64 {
        0
    }
    fn checked_add(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
    fn is_negative(self) -> bool {
        false
    }
}

impl FlowUnit for usize {
    fn zero() -> usize {
        0
    }
    fn checked_add(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
    fn is_negative(self) -> bool {
        false
    }
}

impl FlowUnit for i64 {
    fn zero() -> i64 {
        0
    }
    fn checked_add(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
    fn is_negative(self) -> bool {
        self < 0
    }
}
