//! Pure computations over a single account's movements.

use crate::account::{Account, Movement};
use crate::locale::Locale;
use crate::transaction::MovementKind;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Fixed rate applied to every deposit, regardless of the account's own rate.
pub const INTEREST_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 3);

/// Interest entries below this are dropped, not floored.
pub const INTEREST_THRESHOLD: Decimal = Decimal::ONE;

const MILLIS_PER_DAY: i64 = 86_400_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub income: Decimal,
    /// Sum of withdrawals, sign preserved.
    pub outgo: Decimal,
    pub interest: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the chosen ordering.
    pub index: usize,
    pub kind: MovementKind,
    pub date: String,
    pub amount: String,
}

pub fn balance(account: &Account) -> Decimal {
    account.amounts().sum()
}

/// Whether `amount` can be appended without the running balance, income or
/// outgo leaving the range of `Decimal`. Every movement goes through this, so
/// [`balance`] and [`summary`] never overflow.
pub fn can_record(account: &Account, amount: Decimal) -> bool {
    account
        .amounts()
        .chain(std::iter::once(amount))
        .try_fold(
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            |(balance, income, outgo), amount| {
                let balance = balance.checked_add(amount)?;
                if amount > Decimal::ZERO {
                    Some((balance, income.checked_add(amount)?, outgo))
                } else {
                    Some((balance, income, outgo.checked_add(amount)?))
                }
            },
        )
        .is_some()
}

pub fn summary(account: &Account) -> Summary {
    let income: Decimal = account
        .amounts()
        .filter(|amount| *amount > Decimal::ZERO)
        .sum();

    let outgo: Decimal = account
        .amounts()
        .filter(|amount| *amount < Decimal::ZERO)
        .sum();

    let interest: Decimal = account
        .amounts()
        .filter(|amount| *amount > Decimal::ZERO)
        .map(|deposit| deposit * INTEREST_RATE)
        .filter(|interest| *interest >= INTEREST_THRESHOLD)
        .sum();

    Summary {
        income,
        outgo,
        interest,
    }
}

/// Rows ready for rendering, most recent first. When `sorted`, movements are
/// ordered ascending by amount first (stable); each row keeps its own date.
pub fn display_rows(account: &Account, sorted: bool, now: DateTime<Utc>) -> Vec<Row> {
    let mut movements: Vec<&Movement> = account.movements().iter().collect();
    if sorted {
        movements.sort_by(|a, b| a.amount.cmp(&b.amount));
    }

    movements
        .into_iter()
        .enumerate()
        .rev()
        .map(|(i, movement)| Row {
            index: i + 1,
            kind: MovementKind::of(movement.amount),
            date: date_label(movement.date, now, account.locale),
            amount: account
                .locale
                .format_currency(movement.amount, account.currency),
        })
        .collect()
}

/// Whole days between two instants, rounded to the nearest day.
pub fn days_passed(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = now.signed_duration_since(date).num_milliseconds().abs();
    (millis + MILLIS_PER_DAY / 2) / MILLIS_PER_DAY
}

pub fn date_label(date: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    match days_passed(date, now) {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=7 => format!("{days} days ago"),
        _ => locale.format_date(date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Currency;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 4, 1, 12, 0, 0).unwrap()
    }

    fn account_with(amounts: &[Decimal]) -> Account {
        let start = now() - Duration::days(amounts.len() as i64);
        Account::new("Jonas Schmedtmann", 1111, dec!(1.2), Currency::Usd, Locale::EnUs)
            .with_movements(amounts.iter().enumerate().map(|(i, amount)| {
                Movement::new(*amount, start + Duration::days(i as i64))
            }))
    }

    fn demo_amounts() -> Vec<Decimal> {
        vec![
            dec!(200),
            dec!(450),
            dec!(-400),
            dec!(3000),
            dec!(-650),
            dec!(-130),
            dec!(70),
            dec!(1300),
        ]
    }

    #[test]
    fn test_balance_is_sum_of_movements() {
        let account = account_with(&demo_amounts());
        assert_eq!(balance(&account), dec!(3840));
    }

    #[test]
    fn test_balance_of_empty_account() {
        let account = account_with(&[]);
        assert_eq!(balance(&account), Decimal::ZERO);
    }

    #[test]
    fn test_summary_demo_account() {
        let account = account_with(&demo_amounts());
        let summary = summary(&account);

        assert_eq!(summary.income, dec!(5020));
        assert_eq!(summary.outgo, dec!(-1180));
        // 200, 450, 3000, 1300 qualify; 70 * 0.012 = 0.84 is dropped
        assert_eq!(summary.interest, dec!(59.4));
    }

    #[test]
    fn test_can_record_within_range() {
        let account = account_with(&demo_amounts());

        assert!(can_record(&account, dec!(1000)));
        // Income (5020) reaches the ceiling before the balance (3840) does
        assert!(can_record(&account, Decimal::MAX - dec!(5020)));
        assert!(!can_record(&account, Decimal::MAX - dec!(5019)));
        assert!(!can_record(&account_with(&[Decimal::MIN]), dec!(-1)));
    }

    #[test]
    fn test_can_record_guards_summary_totals() {
        // Balance is back at zero while income and outgo sit at their limits
        let account = account_with(&[Decimal::MAX, Decimal::MIN]);

        assert_eq!(balance(&account), Decimal::ZERO);
        assert!(!can_record(&account, dec!(1)));
        assert!(!can_record(&account, dec!(-1)));
    }

    #[test_case(dec!(50) => Decimal::ZERO; "below threshold excluded")]
    #[test_case(dec!(100) => dec!(1.2); "above threshold included")]
    #[test_case(dec!(83.34) => dec!(1.00008); "just over threshold")]
    fn test_interest_threshold(deposit: Decimal) -> Decimal {
        summary(&account_with(&[deposit])).interest
    }

    #[test]
    fn test_interest_ignores_withdrawals() {
        let account = account_with(&[dec!(-5000), dec!(100)]);
        assert_eq!(summary(&account).interest, dec!(1.2));
    }

    #[test]
    fn test_display_rows_most_recent_first() {
        let account = account_with(&[dec!(200), dec!(-400), dec!(70)]);
        let rows = display_rows(&account, false, now());

        let indices: Vec<_> = rows.iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![3, 2, 1]);
        assert_eq!(rows[0].amount, "$70.00");
        assert_eq!(rows[0].kind, MovementKind::Deposit);
        assert_eq!(rows[1].amount, "-$400.00");
        assert_eq!(rows[1].kind, MovementKind::Withdrawal);
    }

    #[test]
    fn test_display_rows_sorted_ascending_then_reversed() {
        let account = account_with(&[dec!(200), dec!(-400), dec!(70)]);
        let rows = display_rows(&account, true, now());

        let amounts: Vec<_> = rows.iter().map(|row| row.amount.as_str()).collect();
        assert_eq!(amounts, vec!["$200.00", "$70.00", "-$400.00"]);
        assert_eq!(rows[0].index, 3);
        assert_eq!(rows[2].index, 1);
    }

    #[test]
    fn test_display_rows_sorted_dates_follow_movements() {
        // -400 is two days old; it stays two days old after sorting
        let account = account_with(&[dec!(200), dec!(-400), dec!(70)]);
        let rows = display_rows(&account, true, now());

        let withdrawal = rows.iter().find(|row| row.amount == "-$400.00").unwrap();
        assert_eq!(withdrawal.date, "2 days ago");
    }

    #[test]
    fn test_display_rows_sort_is_stable() {
        let start = now() - Duration::days(20);
        let account =
            Account::new("Jonas Schmedtmann", 1111, dec!(1.2), Currency::Usd, Locale::EnUs)
                .with_movements(vec![
                    Movement::new(dec!(100), start),
                    Movement::new(dec!(100), start + Duration::days(10)),
                ]);

        let rows = display_rows(&account, true, now());

        // Later-dated tie stays last in ascending order, so first when reversed
        assert_eq!(rows[0].date, Locale::EnUs.format_date(start + Duration::days(10)));
        assert_eq!(rows[1].date, Locale::EnUs.format_date(start));
    }

    #[test_case(Duration::zero() => "Today"; "now")]
    #[test_case(Duration::hours(11) => "Today"; "under half a day")]
    #[test_case(Duration::hours(13) => "Yesterday"; "over half a day rounds up")]
    #[test_case(Duration::days(1) => "Yesterday"; "one day")]
    #[test_case(Duration::days(5) => "5 days ago"; "five days")]
    #[test_case(Duration::days(7) => "7 days ago"; "seven days")]
    #[test_case(Duration::days(30) => "03/02/2022"; "calendar date")]
    fn test_date_label(ago: Duration) -> String {
        date_label(now() - ago, now(), Locale::EnUs)
    }

    #[test]
    fn test_date_label_future_dates_use_absolute_difference() {
        assert_eq!(date_label(now() + Duration::days(1), now(), Locale::EnUs), "Yesterday");
    }

    #[test]
    fn test_date_label_locale_calendar_date() {
        let date = now() - Duration::days(30);
        assert_eq!(date_label(date, now(), Locale::PtPt), "02/03/2022");
    }
}
