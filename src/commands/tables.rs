//! Helpers for building tables using the tabled crate.
use crate::utils::Styling;
use std::io::{self, Write};
use tabled::{
    builder::Builder,
    settings::{Alignment, Padding, Style, object::Columns},
};

struct TableCol {
    header: String,
    align: Alignment,
    help: String,
    fields: Vec<String>,
}

/// General table. They look like this:
/// index  name           type      offset  size                  if titles
/// -----  ----           ----      ------  ----
///     0                 Null           0     0
///     1  .debug_abbrev  ProgBits      40    1a
///
/// index: index into the section table                            if explain
/// name: the section name
/// ...
pub struct TableBuilder {
    cols: Vec<TableCol>,
}

impl TableBuilder {
    pub fn new() -> TableBuilder {
        TableBuilder { cols: Vec::new() }
    }

    /// Left aligned column
    pub fn add_col_l(&mut self, header: &str, help: &str) {
        self.add_col(header, help, Alignment::left());
    }

    /// Right aligned column
    pub fn add_col_r(&mut self, header: &str, help: &str) {
        self.add_col(header, help, Alignment::right());
    }

    /// Typically add_field! is used instead.
    pub fn add_str_field(&mut self, header: &str, value: String) {
        // Missing columns are a programmer error.
        debug_assert!(self.has_col(header), "no {header} column");
        if let Some(col) = self.cols.iter_mut().find(|c| c.header == header) {
            if value.is_empty() {
                // For some reason empty fields screw up tabled formatting.
                col.fields.push(" ".table_field());
            } else {
                col.fields.push(value);
            }
        }
    }

    pub fn writeln(&self, mut out: impl Write, titles: bool, explain: bool) -> io::Result<()> {
        writeln!(out, "{}", self.table_str(titles))?;

        if explain {
            writeln!(out)?;
            for col in self.cols.iter() {
                crate::utils::explain(&mut out, &col.header, &col.help)?;
            }
        }
        Ok(())
    }

    fn add_col(&mut self, header: &str, help: &str, align: Alignment) {
        debug_assert!(!self.has_col(header));
        let col = TableCol {
            header: header.to_string(),
            align,
            help: help.to_string(),
            fields: Vec::new(),
        };
        self.cols.push(col);
    }

    // We need to preserve add_col ordering so we can't use a HashMap
    // but O(n) should be fine for tables.
    fn has_col(&self, header: &str) -> bool {
        self.cols.iter().any(|c| c.header == header)
    }

    fn table_str(&self, titles: bool) -> String {
        let height = self.cols.iter().map(|c| c.fields.len()).max().unwrap_or(0);
        let mut builder = Builder::with_capacity(height + 2, self.cols.len());
        if titles {
            let header: Vec<String> = self
                .cols
                .iter()
                .map(|c| c.header.as_str().table_header())
                .collect();
            let dashes: Vec<String> = self
                .cols
                .iter()
                .map(|c| "-".repeat(c.header.len()).table_sep())
                .collect();
            builder.push_record(header);
            builder.push_record(dashes);
        }
        for i in 0..height {
            let row: Vec<String> = self
                .cols
                .iter()
                .map(|c| c.fields.get(i).cloned().unwrap_or_default())
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        for (i, col) in self.cols.iter().enumerate() {
            table.modify(Columns::one(i), col.align);
        }
        table.modify(Columns::first(), Padding::new(0, 1, 0, 0));
        table.with(Style::empty());

        table.to_string()
    }
}

macro_rules! add_field {
    ($builder:ident, $header:literal, $value:expr) => {
        let s = format!("{}", $value);
        let s = s.table_field();
        $builder.add_str_field($header, s);
    };
    ($builder:ident, $header:literal, $format:literal, $value:expr) => {
        let s = format!($format, $value);
        let s = s.table_field();
        $builder.add_str_field($header, s);
    };
}
pub(crate) use add_field;
