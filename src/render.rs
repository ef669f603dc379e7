//! Display sinks: human-readable text and JSON.

use mnxq_core::{CompoundResult, DisplaySink, MatchRecord, SearchReport};
use mnxq_sparql::pubchem_image_url;
use std::io::{self, Write};

/// `(heading, attribute key)` for each record line after the label.
const RECORD_FIELDS: &[(&str, &str)] = &[
    ("MNX ID", "label"),
    ("URI", "metabolite"),
    ("Reference", "reference"),
    ("Formula", "formula"),
    ("Charge", "charge"),
    ("InChI", "inchi"),
    ("InChIKey", "inchikey"),
    ("SMILES", "smiles"),
];

const NOT_AVAILABLE: &str = "N/A";
const RULE: &str = "---";

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Plain-text report writer.
pub struct TextSink<W> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn compound(&mut self, result: &CompoundResult, report: &SearchReport) -> io::Result<()> {
        let multi = report.is_expression();
        let label = &result.query;

        let bundle = match &result.outcome {
            Ok(bundle) => bundle,
            Err(err) => return writeln!(self.out, "Lookup failed for '{label}': {err}"),
        };

        if !bundle.exact.is_empty() {
            if multi {
                writeln!(self.out, "Exact Match for '{label}'")?;
            } else {
                writeln!(self.out, "Exact Match")?;
            }
            for record in &bundle.exact {
                self.record(record, None)?;
            }
        } else if multi && report.match_type.includes_exact() {
            writeln!(self.out, "No exact match found for '{label}'")?;
        }

        if !bundle.partial.is_empty() {
            if multi {
                writeln!(self.out, "Top Partial Matches for '{label}'")?;
            } else {
                writeln!(self.out, "Top Partial Matches")?;
            }
            for (i, candidate) in bundle.partial.iter().enumerate() {
                self.record(&candidate.record, Some((i + 1, candidate.score)))?;
            }
        }

        if !multi && bundle.is_no_match() {
            writeln!(
                self.out,
                "No matches found. Try using partial matching or check your compound name."
            )?;
        }
        Ok(())
    }

    fn record(&mut self, record: &MatchRecord, rank: Option<(usize, f64)>) -> io::Result<()> {
        writeln!(self.out, "{RULE}")?;
        if let Some((position, score)) = rank {
            writeln!(self.out, "#{position} Similarity: {score:.1}%")?;
        }
        writeln!(self.out, "  Label: {}", record.name)?;
        for (heading, key) in RECORD_FIELDS {
            let value = record.attribute(key).unwrap_or(NOT_AVAILABLE);
            writeln!(self.out, "  {heading}: {value}")?;
        }
        writeln!(self.out, "  Image: {}", pubchem_image_url(&record.name))?;
        writeln!(self.out, "  External References: mnxq refs '{}'", record.name)
    }
}

impl<W: Write> DisplaySink for TextSink<W> {
    type Error = io::Error;

    fn render(&mut self, report: &SearchReport) -> io::Result<()> {
        if report.is_expression() {
            writeln!(
                self.out,
                "Detected chemical equation/expression. Searching for individual compounds..."
            )?;
            writeln!(self.out, "Extracted compounds: {}", report.labels().join(", "))?;
        }

        for result in &report.compounds {
            if report.is_expression() {
                writeln!(self.out, "{RULE}")?;
            }
            self.compound(result, report)?;
        }
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Pretty-printed JSON report writer.
pub struct JsonSink<W> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for JsonSink<W> {
    type Error = io::Error;

    fn render(&mut self, report: &SearchReport) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
