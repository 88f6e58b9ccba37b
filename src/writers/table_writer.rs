use crate::error::Result;
use crate::models::{month_label, AnnualTable, Column, MonthlyPivot, ObservationTable};
use clap::ValueEnum;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Missing,
}

impl Cell {
    /// Shortest representation that reads back to the same value
    fn exact(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => v.to_string(),
            Cell::Missing => String::new(),
        }
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::Float)
    }
}

/// A result that can be laid out as header plus rows of cells.
pub trait TabularData {
    fn headers(&self) -> Vec<String>;

    fn records(&self) -> Vec<Vec<Cell>>;
}

impl TabularData for ObservationTable {
    fn headers(&self) -> Vec<String> {
        Column::ALL.iter().map(|c| c.name().to_string()).collect()
    }

    fn records(&self) -> Vec<Vec<Cell>> {
        self.iter()
            .map(|row| {
                let mut cells = vec![Cell::Int(i64::from(row.year)), Cell::Int(i64::from(row.month))];
                cells.extend(Column::MEASUREMENTS.iter().map(|c| Cell::from(row.value(*c))));
                cells
            })
            .collect()
    }
}

impl TabularData for AnnualTable {
    fn headers(&self) -> Vec<String> {
        ["yyyy", "tmax", "tmin", "af", "rain", "sun", "tmean", "tmean_trend"]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    fn records(&self) -> Vec<Vec<Cell>> {
        self.rows()
            .iter()
            .map(|row| {
                vec![
                    Cell::Int(i64::from(row.year)),
                    row.tmax.into(),
                    row.tmin.into(),
                    row.af.into(),
                    row.rain.into(),
                    row.sun.into(),
                    row.tmean.into(),
                    row.tmean_trend.into(),
                ]
            })
            .collect()
    }
}

impl TabularData for MonthlyPivot {
    fn headers(&self) -> Vec<String> {
        std::iter::once("yyyy".to_string())
            .chain(self.months.iter().map(|m| month_label(*m)))
            .collect()
    }

    fn records(&self) -> Vec<Vec<Cell>> {
        self.rows
            .iter()
            .map(|row| {
                std::iter::once(Cell::Int(i64::from(row.year)))
                    .chain(row.values.iter().map(|v| Cell::from(*v)))
                    .collect()
            })
            .collect()
    }
}

/// Renders result tables for the terminal or for export.
pub struct TableWriter {
    format: OutputFormat,
    precision: usize,
}

impl TableWriter {
    pub fn new() -> Self {
        Self {
            format: OutputFormat::Table,
            precision: 2,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Decimal places used by the plain-text format
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Write to `path`, or stdout when no path is given
    pub fn write_output<T>(&self, data: &T, path: Option<&Path>) -> Result<()>
    where
        T: TabularData + Serialize,
    {
        match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let mut file = BufWriter::new(File::create(path)?);
                self.write(data, &mut file)?;
                file.flush()?;
            }
            None => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.write(data, &mut handle)?;
            }
        }
        Ok(())
    }

    pub fn write<T, W>(&self, data: &T, mut out: W) -> Result<()>
    where
        T: TabularData + Serialize,
        W: Write,
    {
        match self.format {
            OutputFormat::Table => self.write_text(data, &mut out)?,
            OutputFormat::Csv => self.write_csv(data, &mut out)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, data)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_csv<T: TabularData, W: Write>(&self, data: &T, out: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(out);
        csv_writer.write_record(data.headers())?;
        for record in data.records() {
            csv_writer.write_record(record.iter().map(Cell::exact))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn write_text<T: TabularData, W: Write>(&self, data: &T, out: &mut W) -> Result<()> {
        let headers = data.headers();
        let rows: Vec<Vec<String>> = data
            .records()
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|cell| self.format_cell(cell))
                    .collect()
            })
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:>width$}", h, width = *w))
            .collect();
        writeln!(out, "{}", header_line.join("  "))?;

        for row in &rows {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:>width$}", cell, width = *w))
                .collect();
            writeln!(out, "{}", line.join("  "))?;
        }

        Ok(())
    }

    fn format_cell(&self, cell: Cell) -> String {
        match cell {
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => format!("{:.*}", self.precision, v),
            Cell::Missing => "-".to_string(),
        }
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnualAverage, Observation, PivotRow};

    fn render<T: TabularData + Serialize>(writer: &TableWriter, data: &T) -> String {
        let mut buffer = Vec::new();
        writer.write(data, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_csv_output_for_observations() {
        let table = ObservationTable::new(vec![Observation::new(2000, 7)
            .with_temperatures(Some(22.5), Some(12.25))
            .with_rain(Some(30.0))]);
        let text = render(&TableWriter::new().with_format(OutputFormat::Csv), &table);

        assert_eq!(
            text,
            "yyyy,mm,tmax,tmin,af,rain,sun\n2000,7,22.5,12.25,,30,\n"
        );
    }

    #[test]
    fn test_text_output_aligns_and_marks_missing() {
        let mut row = AnnualAverage::new(2000);
        row.tmean = Some(10.456);
        let table = AnnualTable::new(vec![row]);
        let text = render(&TableWriter::new().with_precision(1), &table);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("yyyy"));
        assert!(lines[1].contains("10.5"));
        assert!(lines[1].contains('-'));
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_json_output_uses_null() {
        let table = ObservationTable::new(vec![Observation::new(1999, 1).with_rain(Some(1.5))]);
        let text = render(&TableWriter::new().with_format(OutputFormat::Json), &table);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["yyyy"], 1999);
        assert_eq!(value[0]["rain"], 1.5);
        assert!(value[0]["tmax"].is_null());
    }

    #[test]
    fn test_pivot_headers_use_month_names() {
        let pivot = MonthlyPivot::new(
            Column::Tmax,
            vec![1, 7],
            vec![PivotRow {
                year: 2000,
                values: vec![Some(7.0), None],
            }],
        );
        let text = render(&TableWriter::new().with_format(OutputFormat::Csv), &pivot);
        assert_eq!(text, "yyyy,Jan,Jul\n2000,7,\n");
    }
}
