use chrono::{Datelike, NaiveDate, Weekday};

use crate::database::models::{EmployeeLeaveBalance, LeaveType};
use crate::services::policy::LeavePolicy;

/// Typed validation result handed back to the API layer. Policy rejections
/// are normal control flow, not errors; warnings never block.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub error: Option<String>,
    pub warning: Option<String>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            warning: None,
        }
    }

    pub fn ok_with_warning(warning: impl Into<String>) -> Self {
        Self {
            valid: true,
            error: None,
            warning: Some(warning.into()),
        }
    }

    pub fn reject(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            warning: None,
        }
    }
}

/// The slice of the balance row the validator needs.
#[derive(Debug, Clone, Default)]
pub struct BalanceSnapshot {
    pub paid_leave_quota: f32,
    pub paid_leave_used: f32,
    pub birthday_leave_used: bool,
    pub anniversary_leave_used: bool,
}

impl From<&EmployeeLeaveBalance> for BalanceSnapshot {
    fn from(balance: &EmployeeLeaveBalance) -> Self {
        Self {
            paid_leave_quota: balance.paid_leave_quota,
            paid_leave_used: balance.paid_leave_used,
            birthday_leave_used: balance.birthday_leave_used,
            anniversary_leave_used: balance.anniversary_leave_used,
        }
    }
}

/// Everything the decision needs, gathered by the caller. Keeping the
/// function free of I/O lets the boundary tests run without a database.
#[derive(Debug, Clone)]
pub struct LeaveValidationContext {
    pub today: NaiveDate,
    pub gender: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub balance: BalanceSnapshot,
    /// Non-rejected, non-cancelled emergency requests already starting in
    /// the calendar month of the new request's start date.
    pub emergency_taken_in_month: i64,
}

/// Fractional day count for a request: the supplied custom duration (0.5
/// for a half day) or the inclusive span between the endpoints.
pub fn requested_days(start: NaiveDate, end: NaiveDate, custom: Option<f32>) -> f32 {
    custom.unwrap_or_else(|| ((end - start).num_days().abs() + 1) as f32)
}

/// Decide accept/reject/warn for a leave request against the current
/// balance snapshot. Exactly one outcome per call; only the block matching
/// the request type runs.
pub fn validate_leave_request(
    policy: &LeavePolicy,
    ctx: &LeaveValidationContext,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
    custom_duration: Option<f32>,
) -> ValidationOutcome {
    let duration = requested_days(start_date, end_date, custom_duration);

    match leave_type {
        LeaveType::CompOff => ValidationOutcome::ok_with_warning(
            "Comp-off balance is not tracked; attach justification for the approver",
        ),

        LeaveType::Overseas => {
            let Some(join_date) = ctx.join_date else {
                return ValidationOutcome::reject(
                    "Overseas leave requires a recorded joining date",
                );
            };
            let service_years = (start_date - join_date).num_days() as f64 / 365.25;
            if service_years < policy.overseas_min_service_years {
                return ValidationOutcome::reject(format!(
                    "Overseas leave requires at least {:.0} years of service (current: {:.1} years)",
                    policy.overseas_min_service_years, service_years
                ));
            }
            ValidationOutcome::ok()
        }

        LeaveType::Sick | LeaveType::Vacation | LeaveType::Personal | LeaveType::PaidLeave => {
            // Notice is measured from submission time regardless of type.
            let notice_days = (start_date - ctx.today).num_days();
            let required_notice = if duration <= policy.short_leave_max_days {
                policy.short_notice_days
            } else if duration <= policy.medium_leave_max_days {
                policy.medium_notice_days
            } else {
                policy.long_notice_days
            };
            if notice_days < required_notice {
                return ValidationOutcome::reject(format!(
                    "{} day(s) of {} leave requires at least {} days notice ({} given)",
                    duration, leave_type, required_notice, notice_days
                ));
            }

            let remaining = ctx.balance.paid_leave_quota - ctx.balance.paid_leave_used;
            if ctx.balance.paid_leave_used + duration > ctx.balance.paid_leave_quota {
                return ValidationOutcome::reject(format!(
                    "Insufficient paid leave balance: {:.1} day(s) remaining",
                    remaining
                ));
            }
            ValidationOutcome::ok()
        }

        LeaveType::Emergency => {
            if ctx.emergency_taken_in_month >= policy.emergency_monthly_limit {
                return ValidationOutcome::reject(
                    "An emergency leave has already been taken this month; \
                     please submit this request as unpaid leave",
                );
            }
            ValidationOutcome::ok()
        }

        LeaveType::Birthday => {
            if ctx.balance.birthday_leave_used {
                return ValidationOutcome::reject(
                    "Birthday leave has already been used this year",
                );
            }
            if duration > 1.0 {
                return ValidationOutcome::reject("Birthday leave is limited to a single day");
            }
            if matches!(start_date.weekday(), Weekday::Sat | Weekday::Sun) {
                return ValidationOutcome::ok_with_warning(
                    "The requested date falls on a weekend; the yearly birthday leave \
                     will still be consumed",
                );
            }
            ValidationOutcome::ok()
        }

        LeaveType::Anniversary => {
            if ctx.balance.anniversary_leave_used {
                return ValidationOutcome::reject(
                    "Anniversary leave has already been used this year",
                );
            }
            if duration > 1.0 {
                return ValidationOutcome::reject("Anniversary leave is limited to a single day");
            }
            ValidationOutcome::ok()
        }

        LeaveType::Maternity => {
            let is_female = ctx
                .gender
                .as_deref()
                .is_some_and(|g| g.eq_ignore_ascii_case("female"));
            if !is_female {
                return ValidationOutcome::reject(
                    "Maternity leave is only available to female employees",
                );
            }
            let Some(join_date) = ctx.join_date else {
                return ValidationOutcome::reject(
                    "Maternity leave requires a recorded joining date",
                );
            };
            // Service is measured to today, not to the request start.
            let service_days = (ctx.today - join_date).num_days();
            if service_days < policy.maternity_min_service_days {
                return ValidationOutcome::reject(format!(
                    "Maternity leave requires {} days of continuous service (current: {} days)",
                    policy.maternity_min_service_days, service_days
                ));
            }
            if duration > policy.maternity_max_days {
                return ValidationOutcome::reject(format!(
                    "Maternity leave cannot exceed {:.0} days",
                    policy.maternity_max_days
                ));
            }
            ValidationOutcome::ok()
        }

        LeaveType::Paternity => {
            if duration > policy.paternity_max_days {
                return ValidationOutcome::reject(format!(
                    "Paternity leave cannot exceed {:.0} days",
                    policy.paternity_max_days
                ));
            }
            ValidationOutcome::ok()
        }

        // Unpaid leave carries no gate and consumes no balance.
        LeaveType::Unpaid => ValidationOutcome::ok(),
    }
}
