// src/extractors/section.rs

// --- Section Headers ---
/// Section headers recognized in a monthly statement's text layer.
///
/// Order here is irrelevant to splitting: boundaries come from where each
/// header occurs in the document, not from its position in this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionHeader {
    MonthlyTradeConfirmations,
    TradeConfirmationSummary,
    PurchaseAndSaleSummary,
    PurchaseAndSale,
    OpenPositions,
    JournalEntries,
}

impl SectionHeader {
    pub const ALL: [SectionHeader; 6] = [
        SectionHeader::MonthlyTradeConfirmations,
        SectionHeader::TradeConfirmationSummary,
        SectionHeader::PurchaseAndSaleSummary,
        SectionHeader::PurchaseAndSale,
        SectionHeader::OpenPositions,
        SectionHeader::JournalEntries,
    ];

    /// The literal text that marks the start of this section.
    pub fn literal(self) -> &'static str {
        match self {
            SectionHeader::MonthlyTradeConfirmations => "Monthly Trade Confirmations",
            SectionHeader::TradeConfirmationSummary => "Trade Confirmation Summary",
            SectionHeader::PurchaseAndSaleSummary => "Purchase and Sale Summary",
            SectionHeader::PurchaseAndSale => "Purchase and Sale",
            SectionHeader::OpenPositions => "Open Positions",
            SectionHeader::JournalEntries => "Journal Entries",
        }
    }
}

// --- Data Structures ---
/// One located section: the header, the byte offset of its first occurrence,
/// and the text between the header and the next located header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub header: SectionHeader,
    pub start: usize,
    pub body: &'a str,
}

/// Sections of one document, ordered by where their headers occur.
#[derive(Debug, Clone, Default)]
pub struct SectionMap<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> SectionMap<'a> {
    /// Body text for `header`, or `None` if the header never occurs.
    pub fn get(&self, header: SectionHeader) -> Option<&'a str> {
        self.sections
            .iter()
            .find(|s| s.header == header)
            .map(|s| s.body)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section<'a>> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

// --- Splitter ---
pub struct SectionSplitter {
    headers: Vec<SectionHeader>,
}

impl Default for SectionSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSplitter {
    /// Splitter over every recognized statement header.
    pub fn new() -> Self {
        Self::with_headers(&SectionHeader::ALL)
    }

    pub fn with_headers(headers: &[SectionHeader]) -> Self {
        Self { headers: headers.to_vec() }
    }

    /// Splits `text` into sections.
    ///
    /// Each header is located by its first occurrence. Located headers are
    /// sorted by offset, and a section runs from the end of its header to the
    /// start of the next located header (or to end of text). Headers absent
    /// from the text produce no section. Later repeats of a header are not
    /// boundaries; they stay inside whichever span contains them.
    pub fn split<'a>(&self, text: &'a str) -> SectionMap<'a> {
        let mut located: Vec<(SectionHeader, usize)> = self
            .headers
            .iter()
            .filter_map(|&header| self.locate(text, header).map(|start| (header, start)))
            .collect();
        located.sort_by_key(|&(_, start)| start);

        let sections = located
            .iter()
            .enumerate()
            .map(|(i, &(header, start))| {
                let end = located.get(i + 1).map_or(text.len(), |&(_, next)| next);
                let body_start = (start + header.literal().len()).min(end);
                tracing::debug!("Section '{}' spans bytes {}..{}", header.literal(), body_start, end);
                Section { header, start, body: &text[body_start..end] }
            })
            .collect();

        SectionMap { sections }
    }

    /// Byte offset of the first occurrence of `header` that is not part of a
    /// longer recognized header (e.g. "Purchase and Sale" inside
    /// "Purchase and Sale Summary").
    fn locate(&self, text: &str, header: SectionHeader) -> Option<usize> {
        text.match_indices(header.literal())
            .map(|(idx, _)| idx)
            .find(|&idx| !self.covered_by_longer(text, header, idx))
    }

    fn covered_by_longer(&self, text: &str, header: SectionHeader, idx: usize) -> bool {
        let literal = header.literal();
        self.headers
            .iter()
            .map(|other| other.literal())
            .filter(|outer| outer.len() > literal.len())
            .any(|outer| {
                outer.match_indices(literal).any(|(offset, _)| {
                    idx >= offset
                        && text
                            .get(idx - offset..)
                            .is_some_and(|rest| rest.starts_with(outer))
                })
            })
    }
}
