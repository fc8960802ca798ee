//! Assignment pricing and eligibility derivation.
//!
//! Pure functions over in-memory collections: no I/O, inputs are never
//! mutated. Display rounding belongs to callers.

use std::collections::HashSet;

use uuid::Uuid;

use campus_domain::user::{UserStatus, UserType};

use crate::domain::types::{
    AssignableUser, AssignmentStatus, AssignmentSummary, BoardingAssignment, UserRecord,
};

/// Derived price fields of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceBreakdown {
    pub original_price: f64,
    pub discount_amount: f64,
    pub final_price: f64,
}

/// True when `pct` is a usable discount percentage (finite, 0–100).
pub fn is_valid_discount(pct: f64) -> bool {
    pct.is_finite() && (0.0..=100.0).contains(&pct)
}

/// Compute the price breakdown for a prospective or edited assignment.
///
/// `price` is `None` while no package is selected; that degenerate case
/// yields an all-zero breakdown, which is a valid non-error state.
pub fn price_breakdown(price: Option<f64>, discount_percentage: f64) -> PriceBreakdown {
    let original_price = price.unwrap_or(0.0);
    let discount_amount = original_price * discount_percentage / 100.0;
    PriceBreakdown {
        original_price,
        discount_amount,
        final_price: original_price - discount_amount,
    }
}

/// Annotate active-status users with whether they hold an active assignment.
///
/// Callers filter `is_assigned == false` to obtain the pool eligible for a
/// new assignment. Users whose own status is not active are omitted: they
/// are never assignable.
pub fn assignable_users(
    users: Vec<UserRecord>,
    assignments: &[BoardingAssignment],
) -> Vec<AssignableUser> {
    let assigned: HashSet<(UserType, Uuid)> = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::Active)
        .map(|a| (a.user_type, a.user_id))
        .collect();

    users
        .into_iter()
        .filter(|u| u.status == UserStatus::Active)
        .map(|user| {
            let is_assigned = assigned.contains(&(user.user_type, user.id));
            AssignableUser { user, is_assigned }
        })
        .collect()
}

/// Recompute the aggregate over the active-assignment set.
pub fn summarize(assignments: &[BoardingAssignment]) -> AssignmentSummary {
    let mut summary = AssignmentSummary::default();
    let mut discount_sum = 0.0;
    for a in assignments {
        if a.status != AssignmentStatus::Active {
            continue;
        }
        summary.total_active += 1;
        match a.user_type {
            UserType::Student => summary.active_students += 1,
            UserType::Teacher => summary.active_teachers += 1,
            UserType::Staff => summary.active_staff += 1,
        }
        summary.total_revenue += a.final_price;
        discount_sum += a.discount_percentage;
    }
    if summary.total_active > 0 {
        summary.average_discount = discount_sum / summary.total_active as f64;
    }
    summary
}
