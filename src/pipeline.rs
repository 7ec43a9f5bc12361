// src/pipeline.rs
use std::path::PathBuf;

use crate::config::ImportConfig;
use crate::documents::{self, StatementDocument, TextExtractor};
use crate::extractors::{
    RecordNormalizer, SectionHeader, SectionSplitter, SummaryRowParser, TransactionRecord,
};
use crate::utils::error::{AppError, NormalizeError};

/// The statement section that holds one row per monthly round trip.
pub const SUMMARY_SECTION: SectionHeader = SectionHeader::PurchaseAndSaleSummary;

/// Rows matched in one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub file_name: String,
    pub rows: usize,
}

/// Result of a whole import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub documents: Vec<DocumentOutcome>,
    /// Every record, in document order then row order.
    pub records: Vec<TransactionRecord>,
}

impl ImportSummary {
    /// Records ordered by trade date, then ticker.
    pub fn sorted_records(&self) -> Vec<&TransactionRecord> {
        let mut sorted: Vec<&TransactionRecord> = self.records.iter().collect();
        sorted.sort_by(|a, b| {
            a.trade_date
                .cmp(&b.trade_date)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        sorted
    }
}

pub struct ImportPipeline<E: TextExtractor> {
    source_dir: PathBuf,
    extractor: E,
    splitter: SectionSplitter,
    parser: SummaryRowParser,
    normalizer: RecordNormalizer,
}

impl<E: TextExtractor> ImportPipeline<E> {
    pub fn new(config: &ImportConfig, extractor: E) -> Self {
        Self {
            source_dir: config.source_dir.clone(),
            extractor,
            splitter: SectionSplitter::new(),
            parser: SummaryRowParser::new(),
            normalizer: RecordNormalizer::new(),
        }
    }

    /// Extracts records from one statement's full text.
    ///
    /// A statement without a summary section yields no records. The first
    /// row that fails to normalize fails the whole statement.
    pub fn extract_records(&self, text: &str) -> Result<Vec<TransactionRecord>, NormalizeError> {
        let sections = self.splitter.split(text);
        if sections.is_empty() {
            tracing::debug!("No recognized section headers in statement text");
        } else {
            tracing::debug!("Located {} sections", sections.len());
        }
        for section in sections.iter() {
            tracing::debug!("Located '{}' at byte {}", section.header.literal(), section.start);
        }

        let summary = match sections.get(SUMMARY_SECTION) {
            Some(body) => body,
            None => {
                tracing::warn!("No '{}' section found", SUMMARY_SECTION.literal());
                ""
            }
        };

        self.parser
            .parse(summary)
            .map(|row| self.normalizer.normalize(&row))
            .collect()
    }

    /// Discovers statements in the configured directory and imports them all.
    pub fn run(&self) -> Result<ImportSummary, AppError> {
        let documents = documents::discover(&self.source_dir)?;
        self.run_documents(&documents)
    }

    /// Imports `documents` in the given order.
    ///
    /// Fails fast: any extraction or normalization error discards the
    /// records gathered from earlier documents.
    pub fn run_documents(&self, documents: &[StatementDocument]) -> Result<ImportSummary, AppError> {
        let mut summary = ImportSummary::default();

        for document in documents {
            tracing::info!("Parsing {}", document.file_name);
            let text = self.extractor.extract_text(document)?;

            let records = self.extract_records(&text).map_err(|source| {
                tracing::error!("Aborting import at {}: {}", document.file_name, source);
                AppError::Normalize {
                    file: document.file_name.clone(),
                    source,
                }
            })?;

            tracing::info!("{} summary rows found in {}", records.len(), document.file_name);
            summary.documents.push(DocumentOutcome {
                file_name: document.file_name.clone(),
                rows: records.len(),
            });
            summary.records.extend(records);
        }

        Ok(summary)
    }
}
