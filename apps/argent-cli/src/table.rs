//! Two-column table rendering for the terminal.
//!
//! Columns are padded to the widest cell. The record id is structurally
//! absent: only the open field mapping is rendered.

use argent_storage::UserRecord;

pub fn render(record: &UserRecord, headers: (&str, &str)) -> String {
    let name_width = record
        .fields
        .keys()
        .map(|k| k.chars().count())
        .chain([headers.0.chars().count()])
        .max()
        .unwrap_or(0);
    let value_width = record
        .fields
        .values()
        .map(|v| v.chars().count())
        .chain([headers.1.chars().count()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$} | {}\n", headers.0, headers.1));
    out.push_str(&format!(
        "{}-+-{}\n",
        "-".repeat(name_width),
        "-".repeat(value_width)
    ));
    for (name, value) in &record.fields {
        out.push_str(&format!("{name:<name_width$} | {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use argent_storage::{UserId, UserRecord};

    fn record() -> UserRecord {
        let mut record = UserRecord::new(UserId::new("alice"));
        record.set("groceries", "milk, eggs");
        record.set("errands", "post office");
        record
    }

    #[test]
    fn renders_each_field_as_a_row() {
        let rendered = render(&record(), ("Name", "Task"));

        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Task"));
        assert!(rendered.contains("groceries | milk, eggs"));
        assert!(rendered.contains("errands"));
        assert!(rendered.contains("post office"));
    }

    #[test]
    fn id_is_never_rendered() {
        let rendered = render(&record(), ("Name", "Task"));
        assert!(!rendered.contains("alice"));
    }

    #[test]
    fn columns_align_on_the_widest_cell() {
        let rendered = render(&record(), ("Name", "Task"));
        let separators: Vec<usize> = rendered
            .lines()
            .filter(|l| !l.starts_with('-'))
            .map(|l| l.find(" | ").expect("every row has a separator"))
            .collect();

        assert!(separators.len() >= 3);
        assert!(separators.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn rows_follow_stored_field_order() {
        let rendered = render(&record(), ("Name", "Task"));
        let groceries = rendered.find("groceries").unwrap();
        let errands = rendered.find("errands").unwrap();
        assert!(groceries < errands);
    }
}
