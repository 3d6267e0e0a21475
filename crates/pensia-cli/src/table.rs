//! Flattened account table used by the CSV and text output formats.
//!
//! One row per account, fixed Hebrew column order: identity columns,
//! the five severance categories, the six contribution buckets, then
//! reconciliation totals.

use pensia_core::{
    AccountRecord, ContributionPeriod, ContributionTotal, FileResult, PayerRole,
    SeveranceCategory,
};

/// Identity column headers, in order.
const BASE_COLUMNS: [&str; 6] = [
    "מספר חשבון",
    "שם תכנית",
    "חברה מנהלת",
    "יתרה",
    "תאריך התחלה",
    "סוג מוצר",
];

/// Trailing reconciliation column headers, in order.
const TAIL_COLUMNS: [&str; 6] = [
    "סך תגמולים",
    "סך פיצויים",
    "סך רכיבים",
    "פער יתרה מול רכיבים",
    "תאריך נכונות יתרה",
    "מעסיקים היסטוריים",
];

/// All column headers in report order.
pub fn column_headers() -> Vec<String> {
    let mut headers: Vec<String> = BASE_COLUMNS.iter().map(|s| s.to_string()).collect();
    for category in SeveranceCategory::ALL {
        headers.push(category.label().to_string());
    }
    for role in PayerRole::ALL {
        for period in ContributionPeriod::ALL {
            headers.push(ContributionTotal::column_label(role, period));
        }
    }
    headers.extend(TAIL_COLUMNS.iter().map(|s| s.to_string()));
    headers
}

/// Flatten one account into the fixed column order. Absent severance
/// and contribution cells stay empty rather than zero.
fn account_row(record: &AccountRecord) -> Vec<String> {
    let mut row = vec![
        record.account_number.clone(),
        record.plan_name.clone(),
        record.company_name.clone(),
        format_plain(record.balance),
        record.start_date.clone(),
        record.product_type.clone(),
    ];
    for category in SeveranceCategory::ALL {
        row.push(
            record
                .severance_amount(category)
                .map(format_plain)
                .unwrap_or_default(),
        );
    }
    for role in PayerRole::ALL {
        for period in ContributionPeriod::ALL {
            row.push(
                record
                    .contribution_amount(role, period)
                    .map(format_plain)
                    .unwrap_or_default(),
            );
        }
    }
    row.push(format_plain(record.contribution_total));
    row.push(format_plain(record.severance_total));
    row.push(format_plain(record.component_total));
    row.push(format_plain(record.balance_discrepancy));
    row.push(record.balance_date.clone());
    row.push(record.employers.join("."));
    row
}

/// Render results as a flattened CSV table.
pub fn to_csv(results: &[FileResult]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(column_headers())?;
    for result in results {
        for account in &result.accounts {
            writer.write_record(account_row(account))?;
        }
    }
    let data = String::from_utf8(writer.into_inner()?)?;
    Ok(data)
}

/// Render one result as a plain text summary.
pub fn to_text(result: &FileResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("File: {}\n", result.file));
    output.push_str(&format!("Accounts: {}\n", result.accounts.len()));

    if let Some(person) = &result.person_details {
        if let Some(name) = &person.full_name {
            output.push_str(&format!("Client: {}\n", name));
        }
        if let Some(id) = &person.id_number {
            output.push_str(&format!("ID: {}\n", id));
        }
    }

    for account in &result.accounts {
        output.push_str("\n");
        output.push_str(&format!("Account: {}\n", account.account_number));
        output.push_str(&format!("  Plan:    {}\n", account.plan_name));
        output.push_str(&format!("  Company: {}\n", account.company_name));
        output.push_str(&format!(
            "  Balance: {} ({})\n",
            format_amount(account.balance),
            account.balance_date
        ));
        if !account.product_type.is_empty() {
            output.push_str(&format!("  Product: {}\n", account.product_type));
        }
        for severance in &account.severance {
            output.push_str(&format!(
                "  {}: {}\n",
                severance.category.label(),
                format_amount(severance.amount)
            ));
        }
        for contribution in &account.contributions {
            output.push_str(&format!(
                "  {}: {}\n",
                contribution.label(),
                format_amount(contribution.amount)
            ));
        }
        if account.component_total != 0.0 {
            output.push_str(&format!(
                "  Components: {}\n",
                format_amount(account.component_total)
            ));
        }
        if account.balance_discrepancy != 0.0 {
            output.push_str(&format!(
                "  Discrepancy: {}\n",
                format_amount(account.balance_discrepancy)
            ));
        }
        if !account.employers.is_empty() {
            output.push_str(&format!("  Employers: {}\n", account.employers.join(", ")));
        }
    }

    output
}

/// Plain two-decimal amount used in CSV cells.
fn format_plain(value: f64) -> String {
    format!("{:.2}", value)
}

/// Grouped-thousands amount used in text output, e.g. `12,500.00`.
pub fn format_amount(value: f64) -> String {
    let plain = format!("{:.2}", value.abs());
    let (int_part, dec_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, dec_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pensia_core::SeveranceTotal;

    fn sample_result() -> FileResult {
        let account = AccountRecord {
            account_number: "12-345".to_string(),
            plan_name: "קרן פנסיה מקיפה".to_string(),
            company_name: "מנורה".to_string(),
            balance: 12500.0,
            balance_date: "2024-03-31".to_string(),
            severance: vec![SeveranceTotal {
                category: SeveranceCategory::CurrentEmployer,
                amount: 1200.0,
            }],
            severance_total: 1200.0,
            component_total: 1200.0,
            balance_discrepancy: 11300.0,
            employers: vec!["אלביט".to_string(), "רפאל".to_string()],
            ..Default::default()
        };

        FileResult {
            file: "sample.xml".to_string(),
            accounts: vec![account],
            person_details: None,
            processed_at: Utc::now(),
        }
    }

    #[test]
    fn header_covers_all_fixed_columns() {
        let headers = column_headers();
        assert_eq!(headers.len(), 6 + 5 + 6 + 6);
        assert_eq!(headers[0], "מספר חשבון");
        assert_eq!(headers[6], "פיצויים מעסקי נוכחי");
        assert_eq!(headers[11], "תגמולי עובד עד 2000");
        assert_eq!(headers[17], "סך תגמולים");
        assert_eq!(headers[22], "מעסיקים היסטוריים");
    }

    #[test]
    fn rows_follow_the_header_order() {
        let result = sample_result();
        let row = account_row(&result.accounts[0]);
        assert_eq!(row.len(), column_headers().len());
        assert_eq!(row[0], "12-345");
        assert_eq!(row[3], "12500.00");
        assert_eq!(row[6], "1200.00");
        // Absent buckets render as empty cells, not zeros.
        assert_eq!(row[7], "");
        assert_eq!(row[11], "");
        assert_eq!(row[22], "אלביט.רפאל");
    }

    #[test]
    fn csv_includes_header_and_account_rows() {
        let csv = to_csv(std::slice::from_ref(&sample_result())).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("מספר חשבון"));
        assert!(lines[1].contains("12-345"));
    }

    #[test]
    fn text_summary_lists_components() {
        let text = to_text(&sample_result());
        assert!(text.contains("Account: 12-345"));
        assert!(text.contains("Balance: 12,500.00 (2024-03-31)"));
        assert!(text.contains("פיצויים מעסקי נוכחי: 1,200.00"));
        assert!(text.contains("Employers: אלביט, רפאל"));
    }

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(12500.0), "12,500.00");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(-4200.5), "-4,200.50");
    }
}
