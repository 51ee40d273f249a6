//! Registry listing as an org-mode table.
use crate::registry::Registry;
use crate::MISSING_URL_NOTICE;

const HEADERS: [&str; 5] = ["Name", "Type", "License", "Year", "Directory"];

/// Index of the numeric column, right aligned.
const YEAR: usize = 3;

/// Render the datasets of `registry` in definition order.
///
/// Closed license datasets are left out unless `include_restricted` is set, in which case they
/// are marked `Close*` and the missing URL notice is appended once after the table.
pub fn render(registry: &Registry, include_restricted: bool) -> String {
    let rows: Vec<[String; 5]> = registry
        .iter()
        .filter(|entry| include_restricted || !entry.license.is_restricted())
        .map(|entry| {
            let license = if entry.license.is_restricted() {
                format!("{}*", entry.license)
            } else {
                entry.license.to_string()
            };
            [
                entry.name.to_string(),
                entry.category.to_string(),
                license,
                entry.year.to_string(),
                entry.cache_dir.to_string(),
            ]
        })
        .collect();

    let mut out = table(&rows);
    if include_restricted {
        out.push_str("\n\n");
        out.push_str(MISSING_URL_NOTICE);
    }
    out
}

fn table(rows: &[[String; 5]]) -> String {
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 5]| {
        let cells: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                let width = widths[column];
                if column == YEAR {
                    format!(" {cell:>width$} ")
                } else {
                    format!(" {cell:<width$} ")
                }
            })
            .collect();
        format!("|{}|", cells.join("|"))
    };

    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
    let mut lines = vec![line(HEADERS), format!("|{}|", separator.join("+"))];
    for row in rows {
        lines.push(line([&row[0], &row[1], &row[2], &row[3], &row[4]]));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Archive, Entry, License, Source};

    fn registry() -> Registry {
        let entry = |name, license, source| Entry {
            name,
            category: "NER",
            license,
            year: 2016,
            cache_dir: "datasets/x",
            filename: "train.txt",
            source,
            archive: Archive::Zip,
        };
        Registry::new(vec![
            entry("OPEN", License::Open, Source::Public("https://example.com/a.zip")),
            entry("CLOSED", License::Closed, Source::CallerSupplied),
        ])
    }

    #[test]
    fn open_only() {
        let out = render(&registry(), false);
        assert_eq!(
            out,
            "| Name | Type | License | Year | Directory  |\n\
             |------+------+---------+------+------------|\n\
             | OPEN | NER  | Open    | 2016 | datasets/x |"
        );
    }

    #[test]
    fn restricted_marked_with_single_notice() {
        let out = render(&registry(), true);
        assert!(out.contains("| CLOSED | NER  | Close*  | 2016 | datasets/x |"), "{out}");
        assert_eq!(out.matches(MISSING_URL_NOTICE).count(), 1);
        assert!(out.ends_with(MISSING_URL_NOTICE));
    }

    #[test]
    fn builtin_filtering() {
        let registry = Registry::builtin();
        let open = render(&registry, false);
        assert!(open.contains("VNTC"));
        assert!(!open.contains("VLSP2018-NER"));
        assert!(!open.contains("Close"));
        assert!(!open.contains("Caution"));

        let all = render(&registry, true);
        for entry in registry.iter() {
            assert!(all.contains(entry.name), "{} missing", entry.name);
        }
        // Header, separator, one row per entry, then the notice.
        let table_lines = all.lines().take_while(|line| line.starts_with('|')).count();
        assert_eq!(table_lines, 2 + registry.iter().count());
    }

    #[test]
    fn year_right_aligned() {
        let rows = vec![[
            "A".to_string(),
            "T".to_string(),
            "Open".to_string(),
            "99".to_string(),
            "d".to_string(),
        ]];
        let out = table(&rows);
        assert!(out.ends_with("| A    | T    | Open    |   99 | d         |"), "{out}");
    }
}
