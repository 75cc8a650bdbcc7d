//! Statistics row/header formatting and the terminal run summary.
//!
//! We keep formatting code in one place so:
//! - the aggregation engine stays clean and testable
//! - output changes are localized (the delimited layout is consumed by
//!   downstream spreadsheets/scripts and must stay stable)

use crate::domain::Statistics;

/// Header line for a statistics row, columns joined by `,`.
///
/// The extremum columns come from [`Statistics::EXTREME_LABELS`] so the
/// header cannot drift out of step with the row formatter.
pub fn statistics_header() -> String {
    let mut columns = vec![
        "avgLuckyDrawRate".to_string(),
        "countUp".to_string(),
        "countDown".to_string(),
        "countFlat".to_string(),
        "countDown/total".to_string(),
        "grayMarketMoneyTotal".to_string(),
        "firstDayMoneyTotal".to_string(),
    ];
    for label in Statistics::EXTREME_LABELS {
        columns.push(format!("{label}.name"));
        columns.push(format!("{label}.value"));
    }
    columns.join(",")
}

/// One statistics data row, fields joined by `, `, numerics to 2 decimals.
pub fn format_statistics(stats: &Statistics) -> String {
    let down_share = stats.count_down as f64
        / (stats.count_down + stats.count_up + stats.count_flat) as f64;

    let mut fields = vec![
        format!("{:.2}", stats.avg_lucky_draw_rate),
        stats.count_up.to_string(),
        stats.count_down.to_string(),
        stats.count_flat.to_string(),
        format!("{down_share:.2}"),
        format!("{:.2}", stats.gray_market_money_total),
        format!("{:.2}", stats.first_day_money_total),
    ];
    for (_, point) in stats.extremes() {
        fields.push(point.name.clone());
        fields.push(format!("{:.2}", point.value));
    }
    fields.join(", ")
}

/// `month,count` lines, one per month in first-seen order.
pub fn counts_table(monthly_counts: &[(String, usize)]) -> Vec<String> {
    monthly_counts
        .iter()
        .map(|(month, count)| format!("{month},{count}"))
        .collect()
}

/// Per-month statistics table: shared header, then one row per month.
pub fn months_table(monthly: &[(String, Statistics)]) -> Vec<String> {
    let mut lines = Vec::with_capacity(monthly.len() + 1);
    lines.push(format!("month, {}", statistics_header()));
    for (month, stats) in monthly {
        lines.push(format!("{month},{}", format_statistics(stats)));
    }
    lines
}

/// Overall statistics table: header plus the single row.
pub fn total_table(overall: &Statistics) -> Vec<String> {
    vec![statistics_header(), format_statistics(overall)]
}

/// Human-readable run summary printed after a fetch.
pub fn format_run_summary(
    record_count: usize,
    monthly_counts: &[(String, usize)],
    overall: &Statistics,
) -> String {
    let mut out = String::new();

    out.push_str("=== hkipo - HK IPO subscription statistics ===\n");
    out.push_str(&format!("Records: {record_count}\n"));
    out.push_str(&format!("Months: {}\n", monthly_counts.len()));
    for (month, count) in monthly_counts {
        out.push_str(&format!("  {month}: {count}\n"));
    }
    out.push_str(&format!(
        "Avg lucky-draw rate: {:.2}\n",
        overall.avg_lucky_draw_rate
    ));
    out.push_str(&format!(
        "Avg single-draw amount: {:.2}\n",
        overall.avg_single_draw_amount
    ));
    out.push_str(&format!(
        "Up/down/flat: {}/{}/{}\n",
        overall.count_up, overall.count_down, overall.count_flat
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IpoRecord;
    use crate::stats::run_statistical;

    fn sample_stats() -> Statistics {
        let records = vec![
            IpoRecord::new("1", "Alpha", "2021-02-01", 10.0, 5_000.0, 4.0, 5.0).unwrap(),
            IpoRecord::new("2", "Beta", "2021-02-15", 20.0, 10_000.0, -6.0, -3.0).unwrap(),
        ];
        run_statistical(&records).unwrap()
    }

    #[test]
    fn header_has_fixed_columns_then_name_value_pairs() {
        let header = statistics_header();
        let columns: Vec<&str> = header.split(',').collect();
        assert_eq!(columns.len(), 7 + 8 * 2);
        assert_eq!(
            &columns[..7],
            [
                "avgLuckyDrawRate",
                "countUp",
                "countDown",
                "countFlat",
                "countDown/total",
                "grayMarketMoneyTotal",
                "firstDayMoneyTotal",
            ]
        );
        assert_eq!(columns[7], "minGrayRate.name");
        assert_eq!(columns[8], "minGrayRate.value");
        assert_eq!(columns[21], "maxFirstMoney.name");
        assert_eq!(columns[22], "maxFirstMoney.value");
    }

    #[test]
    fn row_matches_header_width_and_two_decimal_format() {
        let stats = sample_stats();
        let row = format_statistics(&stats);
        let fields: Vec<&str> = row.split(", ").collect();
        assert_eq!(fields.len(), 7 + 8 * 2);

        // avg lucky-draw rate of 10 and 20 is 15.00
        assert_eq!(fields[0], "15.00");
        assert_eq!(fields[1], "1");
        assert_eq!(fields[2], "1");
        assert_eq!(fields[3], "0");
        // countDown / (countDown + countUp + countFlat) = 1/2
        assert_eq!(fields[4], "0.50");
        // gray: (4*5000 - 6*10000) * 0.01 = -400.00
        assert_eq!(fields[5], "-400.00");
        // first: (5*5000 - 3*10000) * 0.01 = -50.00
        assert_eq!(fields[6], "-50.00");
        // first extremum slot: min gray rate.
        assert_eq!(fields[7], "Beta");
        assert_eq!(fields[8], "-6.00");
    }

    #[test]
    fn months_table_prefixes_shared_header() {
        let stats = sample_stats();
        let monthly = vec![("2021-02".to_string(), stats)];
        let lines = months_table(&monthly);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("month, avgLuckyDrawRate,"));
        assert!(lines[1].starts_with("2021-02,"));
    }

    #[test]
    fn counts_table_is_month_comma_count() {
        let counts = vec![("2021-02".to_string(), 2), ("2021-03".to_string(), 1)];
        assert_eq!(counts_table(&counts), ["2021-02,2", "2021-03,1"]);
    }

    #[test]
    fn total_table_is_header_then_single_row() {
        let stats = sample_stats();
        let lines = total_table(&stats);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], statistics_header());
        assert_eq!(lines[1], format_statistics(&stats));
    }

    #[test]
    fn run_summary_mentions_counts_and_averages() {
        let stats = sample_stats();
        let counts = vec![("2021-02".to_string(), 2)];
        let summary = format_run_summary(2, &counts, &stats);
        assert!(summary.contains("Records: 2"));
        assert!(summary.contains("2021-02: 2"));
        assert!(summary.contains("Avg single-draw amount: 7500.00"));
    }
}
