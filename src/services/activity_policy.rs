use chrono::{Datelike, Days, NaiveDate, NaiveTime};

use crate::services::leave_policy::ValidationOutcome;
use crate::services::policy::LeavePolicy;

/// Fixed calendar quarter containing `date` (Jan-Mar, Apr-Jun, Jul-Sep,
/// Oct-Dec), as an inclusive date window.
pub fn quarter_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start_month = (date.month0() / 3) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(date.year(), start_month, 1).unwrap();
    let end = if start_month == 10 {
        NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap()
    } else {
        NaiveDate::from_ymd_opt(date.year(), start_month + 3, 1)
            .unwrap()
            .pred_opt()
            .unwrap()
    };
    (start, end)
}

/// Calendar month containing `date`, as an inclusive date window.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap();
    let end = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap()
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
            .unwrap()
            .pred_opt()
            .unwrap()
    };
    (start, end)
}

/// Window rules for a single WFH date. Past dates may be backfilled within
/// the policy window; anything from today onward needs the minimum lead
/// time, so a same-day request is rejected.
pub fn check_wfh_date(policy: &LeavePolicy, today: NaiveDate, date: NaiveDate) -> ValidationOutcome {
    if date < today {
        let earliest = today - Days::new(policy.wfh_past_window_days as u64);
        if date < earliest {
            return ValidationOutcome::reject(format!(
                "Work-from-home for {} can no longer be filed; past dates are accepted \
                 up to {} days back",
                date, policy.wfh_past_window_days
            ));
        }
    } else {
        let earliest_future = today + Days::new(policy.activity_notice_days as u64);
        if date < earliest_future {
            return ValidationOutcome::reject(format!(
                "Work-from-home for {} requires at least {} day(s) prior notice",
                date, policy.activity_notice_days
            ));
        }
    }
    ValidationOutcome::ok()
}

/// Quarterly cap check; `hits_used` counts non-rejected rows already in the
/// quarter plus earlier dates of the same submission.
pub fn check_wfh_quota(policy: &LeavePolicy, hits_used: i64) -> ValidationOutcome {
    if hits_used >= policy.wfh_quarterly_cap {
        return ValidationOutcome::reject(format!(
            "Work-from-home limit of {} per quarter has been reached",
            policy.wfh_quarterly_cap
        ));
    }
    ValidationOutcome::ok()
}

/// Partial-day window and monthly minutes cap. Past dates are always
/// allowed; today or later needs the minimum lead time. The stored
/// durations are hours, so the existing usage converts to minutes before
/// the cap comparison.
pub fn check_partial_day(
    policy: &LeavePolicy,
    today: NaiveDate,
    date: NaiveDate,
    existing_hours_in_month: f32,
    new_minutes: i64,
) -> ValidationOutcome {
    if date >= today {
        let earliest_future = today + Days::new(policy.activity_notice_days as u64);
        if date < earliest_future {
            return ValidationOutcome::reject(format!(
                "Partial-day requests for upcoming dates require at least {} day(s) prior notice",
                policy.activity_notice_days
            ));
        }
    }

    let existing_minutes = existing_hours_in_month * 60.0;
    if existing_minutes + new_minutes as f32 > policy.partial_day_monthly_cap_minutes {
        return ValidationOutcome::reject(format!(
            "Monthly partial-day cap of {:.0} minutes would be exceeded \
             ({:.0} minutes already used this month)",
            policy.partial_day_monthly_cap_minutes, existing_minutes
        ));
    }
    ValidationOutcome::ok()
}

/// Regularization carries no quota or notice policy; only a well-formed
/// clock pair is required, the rest is manual admin approval.
pub fn check_regularization(clock_in: NaiveTime, clock_out: NaiveTime) -> ValidationOutcome {
    if clock_out <= clock_in {
        return ValidationOutcome::reject("Clock-out time must be after clock-in time");
    }
    ValidationOutcome::ok()
}

/// Absence length in whole minutes for a partial-day window.
pub fn partial_day_minutes(start_time: NaiveTime, end_time: NaiveTime) -> i64 {
    (end_time - start_time).num_minutes()
}
