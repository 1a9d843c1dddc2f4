#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::database::models::LeaveType;
    use crate::services::leave_policy::{
        BalanceSnapshot, LeaveValidationContext, requested_days, validate_leave_request,
    };
    use crate::services::policy::LeavePolicy;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // Monday, so +3/+5/+10 notice offsets land on plain weekdays.
    fn today() -> NaiveDate {
        d(2024, 3, 4)
    }

    fn fresh_balance() -> BalanceSnapshot {
        BalanceSnapshot {
            paid_leave_quota: 15.0,
            paid_leave_used: 0.0,
            birthday_leave_used: false,
            anniversary_leave_used: false,
        }
    }

    fn ctx_with_balance(balance: BalanceSnapshot) -> LeaveValidationContext {
        LeaveValidationContext {
            today: today(),
            gender: Some("female".to_string()),
            join_date: Some(d(2020, 1, 15)),
            balance,
            emergency_taken_in_month: 0,
        }
    }

    fn ctx() -> LeaveValidationContext {
        ctx_with_balance(fresh_balance())
    }

    #[test]
    fn requested_days_is_inclusive_of_both_endpoints() {
        assert_eq!(requested_days(d(2024, 3, 10), d(2024, 3, 12), None), 3.0);
        assert_eq!(requested_days(d(2024, 3, 10), d(2024, 3, 10), None), 1.0);
        assert_eq!(requested_days(d(2024, 3, 10), d(2024, 3, 12), Some(0.5)), 0.5);
    }

    #[test]
    fn vacation_with_enough_notice_and_balance_is_accepted() {
        // 3 days starting in 6 days: medium tier needs 5 days notice.
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx(),
            LeaveType::Vacation,
            d(2024, 3, 10),
            d(2024, 3, 12),
            None,
        );

        assert!(outcome.valid);
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.warning, None);
    }

    #[test]
    fn single_day_notice_boundary_is_three_days() {
        let policy = LeavePolicy::default();

        let accepted = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Sick,
            today() + chrono::Days::new(3),
            today() + chrono::Days::new(3),
            None,
        );
        assert!(accepted.valid);

        let rejected = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Sick,
            today() + chrono::Days::new(2),
            today() + chrono::Days::new(2),
            None,
        );
        assert!(!rejected.valid);
        assert!(rejected.error.unwrap().contains("3 days notice"));
    }

    #[test]
    fn two_to_three_day_notice_boundary_is_five_days() {
        let policy = LeavePolicy::default();

        let start = today() + chrono::Days::new(5);
        let accepted = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Personal,
            start,
            start + chrono::Days::new(2),
            None,
        );
        assert!(accepted.valid);

        let start = today() + chrono::Days::new(4);
        let rejected = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Personal,
            start,
            start + chrono::Days::new(1),
            None,
        );
        assert!(!rejected.valid);
        assert!(rejected.error.unwrap().contains("5 days notice"));
    }

    #[test]
    fn four_day_notice_boundary_is_ten_days() {
        let policy = LeavePolicy::default();

        let start = today() + chrono::Days::new(10);
        let accepted = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::PaidLeave,
            start,
            start + chrono::Days::new(3),
            None,
        );
        assert!(accepted.valid);

        let start = today() + chrono::Days::new(9);
        let rejected = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::PaidLeave,
            start,
            start + chrono::Days::new(3),
            None,
        );
        assert!(!rejected.valid);
        assert!(rejected.error.unwrap().contains("10 days notice"));
    }

    #[test]
    fn half_day_uses_the_short_notice_tier() {
        let policy = LeavePolicy::default();

        let start = today() + chrono::Days::new(3);
        let accepted = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Vacation,
            start,
            start,
            Some(0.5),
        );
        assert!(accepted.valid);

        let start = today() + chrono::Days::new(2);
        let rejected = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Vacation,
            start,
            start,
            Some(0.5),
        );
        assert!(!rejected.valid);
    }

    #[test]
    fn paid_quota_overrun_is_rejected_with_exact_remaining() {
        let mut balance = fresh_balance();
        balance.paid_leave_used = 13.0;

        // 3 requested against 2.0 remaining.
        let start = today() + chrono::Days::new(6);
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx_with_balance(balance),
            LeaveType::Vacation,
            start,
            start + chrono::Days::new(2),
            None,
        );

        assert!(!outcome.valid);
        assert!(outcome.error.unwrap().contains("2.0 day(s) remaining"));
    }

    #[test]
    fn paid_quota_exact_fit_is_accepted() {
        let mut balance = fresh_balance();
        balance.paid_leave_used = 12.0;

        let start = today() + chrono::Days::new(6);
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx_with_balance(balance),
            LeaveType::Vacation,
            start,
            start + chrono::Days::new(2),
            None,
        );

        assert!(outcome.valid);
    }

    #[test]
    fn second_emergency_in_the_same_month_is_rejected() {
        let mut ctx = ctx();
        ctx.emergency_taken_in_month = 1;

        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx,
            LeaveType::Emergency,
            d(2024, 3, 5),
            d(2024, 3, 5),
            None,
        );

        assert!(!outcome.valid);
        assert!(outcome.error.unwrap().contains("unpaid"));
    }

    #[test]
    fn first_emergency_in_a_month_is_accepted() {
        // A rejected prior request does not count; the caller only reports
        // non-rejected, non-cancelled rows.
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx(),
            LeaveType::Emergency,
            d(2024, 3, 5),
            d(2024, 3, 5),
            None,
        );

        assert!(outcome.valid);
    }

    #[test]
    fn birthday_leave_is_one_shot_per_year() {
        let mut balance = fresh_balance();
        balance.birthday_leave_used = true;

        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx_with_balance(balance),
            LeaveType::Birthday,
            d(2024, 6, 14),
            d(2024, 6, 14),
            None,
        );

        assert!(!outcome.valid);
        assert!(outcome.error.unwrap().contains("already been used"));
    }

    #[test]
    fn birthday_leave_is_limited_to_a_single_day() {
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx(),
            LeaveType::Birthday,
            d(2024, 6, 13),
            d(2024, 6, 14),
            None,
        );

        assert!(!outcome.valid);
    }

    #[test]
    fn weekend_birthday_is_accepted_with_a_warning() {
        // 2024-06-15 is a Saturday.
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx(),
            LeaveType::Birthday,
            d(2024, 6, 15),
            d(2024, 6, 15),
            None,
        );

        assert!(outcome.valid);
        assert!(outcome.warning.unwrap().contains("weekend"));
    }

    #[test]
    fn weekday_birthday_is_accepted_without_warning() {
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx(),
            LeaveType::Birthday,
            d(2024, 6, 14),
            d(2024, 6, 14),
            None,
        );

        assert!(outcome.valid);
        assert_eq!(outcome.warning, None);
    }

    #[test]
    fn anniversary_leave_is_one_shot_and_single_day() {
        let policy = LeavePolicy::default();

        let mut balance = fresh_balance();
        balance.anniversary_leave_used = true;
        let flag_set = validate_leave_request(
            &policy,
            &ctx_with_balance(balance),
            LeaveType::Anniversary,
            d(2024, 5, 6),
            d(2024, 5, 6),
            None,
        );
        assert!(!flag_set.valid);

        let too_long = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Anniversary,
            d(2024, 5, 6),
            d(2024, 5, 7),
            None,
        );
        assert!(!too_long.valid);

        let ok = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Anniversary,
            d(2024, 5, 6),
            d(2024, 5, 6),
            None,
        );
        assert!(ok.valid);
    }

    #[test]
    fn maternity_requires_female_gender_case_insensitive() {
        let policy = LeavePolicy::default();

        let mut male_ctx = ctx();
        male_ctx.gender = Some("male".to_string());
        let rejected = validate_leave_request(
            &policy,
            &male_ctx,
            LeaveType::Maternity,
            d(2024, 4, 1),
            d(2024, 4, 30),
            None,
        );
        assert!(!rejected.valid);

        let mut capitalised_ctx = ctx();
        capitalised_ctx.gender = Some("Female".to_string());
        let accepted = validate_leave_request(
            &policy,
            &capitalised_ctx,
            LeaveType::Maternity,
            d(2024, 4, 1),
            d(2024, 4, 30),
            None,
        );
        assert!(accepted.valid);
    }

    #[test]
    fn maternity_service_boundary_is_36_days_to_today() {
        let policy = LeavePolicy::default();

        // Joined exactly 36 days before today.
        let mut ctx_36 = ctx();
        ctx_36.join_date = Some(today() - chrono::Days::new(36));
        let accepted = validate_leave_request(
            &policy,
            &ctx_36,
            LeaveType::Maternity,
            d(2024, 4, 1),
            d(2024, 4, 30),
            None,
        );
        assert!(accepted.valid);

        // 35 days of service falls short; the message reports the actual count.
        let mut ctx_35 = ctx();
        ctx_35.join_date = Some(today() - chrono::Days::new(35));
        let rejected = validate_leave_request(
            &policy,
            &ctx_35,
            LeaveType::Maternity,
            d(2024, 4, 1),
            d(2024, 4, 30),
            None,
        );
        assert!(!rejected.valid);
        assert!(rejected.error.unwrap().contains("35 days"));
    }

    #[test]
    fn maternity_duration_boundary_is_90_days() {
        let policy = LeavePolicy::default();

        let start = d(2024, 4, 1);
        let accepted = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Maternity,
            start,
            start + chrono::Days::new(89),
            None,
        );
        assert!(accepted.valid);

        let rejected = validate_leave_request(
            &policy,
            &ctx(),
            LeaveType::Maternity,
            start,
            start + chrono::Days::new(90),
            None,
        );
        assert!(!rejected.valid);
        assert!(rejected.error.unwrap().contains("90"));
    }

    #[test]
    fn paternity_duration_boundary_is_15_days() {
        let policy = LeavePolicy::default();
        let mut ctx = ctx();
        ctx.gender = Some("male".to_string());

        let start = d(2024, 4, 1);
        let accepted = validate_leave_request(
            &policy,
            &ctx,
            LeaveType::Paternity,
            start,
            start + chrono::Days::new(14),
            None,
        );
        assert!(accepted.valid);

        let rejected = validate_leave_request(
            &policy,
            &ctx,
            LeaveType::Paternity,
            start,
            start + chrono::Days::new(15),
            None,
        );
        assert!(!rejected.valid);
    }

    #[test]
    fn overseas_requires_three_years_of_service_at_request_start() {
        let policy = LeavePolicy::default();

        let mut senior_ctx = ctx();
        senior_ctx.join_date = Some(d(2021, 3, 4));
        let accepted = validate_leave_request(
            &policy,
            &senior_ctx,
            LeaveType::Overseas,
            d(2024, 3, 20),
            d(2024, 3, 25),
            None,
        );
        assert!(accepted.valid);

        let mut junior_ctx = ctx();
        junior_ctx.join_date = Some(d(2022, 6, 1));
        let rejected = validate_leave_request(
            &policy,
            &junior_ctx,
            LeaveType::Overseas,
            d(2024, 3, 20),
            d(2024, 3, 25),
            None,
        );
        assert!(!rejected.valid);

        let mut no_join_ctx = ctx();
        no_join_ctx.join_date = None;
        let missing = validate_leave_request(
            &policy,
            &no_join_ctx,
            LeaveType::Overseas,
            d(2024, 3, 20),
            d(2024, 3, 25),
            None,
        );
        assert!(!missing.valid);
    }

    #[test]
    fn comp_off_is_always_valid_with_a_warning() {
        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx(),
            LeaveType::CompOff,
            d(2024, 3, 5),
            d(2024, 3, 5),
            None,
        );

        assert!(outcome.valid);
        assert!(outcome.warning.is_some());
    }

    #[test]
    fn unpaid_leave_has_no_gate() {
        // No notice, exhausted balance: still accepted, nothing consumed.
        let mut balance = fresh_balance();
        balance.paid_leave_used = 15.0;

        let outcome = validate_leave_request(
            &LeavePolicy::default(),
            &ctx_with_balance(balance),
            LeaveType::Unpaid,
            today(),
            today() + chrono::Days::new(20),
            None,
        );

        assert!(outcome.valid);
    }
}
