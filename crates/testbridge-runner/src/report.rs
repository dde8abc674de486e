//! Rendering of the resolved options for the invoking harness.

use serde::Serialize;
use std::io::Write;

use testbridge_common::{Result, TestBridgeError};
use testbridge_options::{CategoryPredicate, Options};

use crate::cli::OutputFormat;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub options: &'a Options,
    pub categories: String,
    pub targets: &'a [String],
}

impl<'a> Report<'a> {
    pub fn new(options: &'a Options, targets: &'a [String]) -> Self {
        Self {
            options,
            categories: options.category_filter().describe(),
            targets,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .map(|json| json + "\n")
                .map_err(|e| TestBridgeError::Other(format!("failed to serialize report: {e}"))),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W, format: OutputFormat) -> Result<()> {
        out.write_all(self.render(format)?.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn render_text(&self) -> String {
        let opts = self.options;
        format!(
            "fail_fast: {}\n\
             test_filter: {}\n\
             test_exclude_filter: {}\n\
             categories: {}\n\
             targets: {}\n",
            opts.fail_fast(),
            opts.include_filter().unwrap_or("<none>"),
            opts.exclude_filter().unwrap_or("<none>"),
            self.categories,
            self.targets.join(" "),
        )
    }
}
