/// All numeric policy thresholds in one injected place, so boundary values
/// can be exercised in tests without magic numbers scattered through the
/// validators.
#[derive(Debug, Clone)]
pub struct LeavePolicy {
    /// Shared annual quota for sick/vacation/personal/paid leave, in days.
    pub paid_leave_annual_quota: f32,
    /// Notice tiers: requests up to `short_leave_max_days` need
    /// `short_notice_days`, up to `medium_leave_max_days` need
    /// `medium_notice_days`, anything longer needs `long_notice_days`.
    pub short_leave_max_days: f32,
    pub short_notice_days: i64,
    pub medium_leave_max_days: f32,
    pub medium_notice_days: i64,
    pub long_notice_days: i64,
    /// Emergency leaves allowed per calendar month of the start date.
    pub emergency_monthly_limit: i64,
    pub maternity_min_service_days: i64,
    pub maternity_max_days: f32,
    pub paternity_max_days: f32,
    pub overseas_min_service_years: f64,
    /// WFH: non-rejected hits allowed per calendar quarter, and how far
    /// back a date may be filed.
    pub wfh_quarterly_cap: i64,
    pub wfh_past_window_days: i64,
    /// Minimum lead time for future-dated WFH and partial-day requests.
    pub activity_notice_days: i64,
    /// Cumulative partial-day absence allowed per calendar month.
    pub partial_day_monthly_cap_minutes: f32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            paid_leave_annual_quota: 15.0,
            short_leave_max_days: 1.0,
            short_notice_days: 3,
            medium_leave_max_days: 3.0,
            medium_notice_days: 5,
            long_notice_days: 10,
            emergency_monthly_limit: 1,
            maternity_min_service_days: 36,
            maternity_max_days: 90.0,
            paternity_max_days: 15.0,
            overseas_min_service_years: 3.0,
            wfh_quarterly_cap: 2,
            wfh_past_window_days: 30,
            activity_notice_days: 1,
            partial_day_monthly_cap_minutes: 500.0,
        }
    }
}
