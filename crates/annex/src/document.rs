use crate::schema::TABLE_HEADER;
use serde::Deserialize;

/// Page size and margins, in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_mm: f64,
    pub header_distance_mm: f64,
    pub footer_distance_mm: f64,
    pub landscape: bool,
}

impl PageSetup {
    /// A4 turned sideways with one-inch margins
    #[must_use]
    pub fn landscape_a4() -> Self {
        PageSetup {
            width_mm: 297.0,
            height_mm: 210.0,
            margin_mm: 25.4,
            header_distance_mm: 12.7,
            footer_distance_mm: 12.7,
            landscape: true,
        }
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::landscape_a4()
    }
}

/// Fonts and sizes, in points
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub font_name: String,
    pub body_size_pt: f64,
    pub title_size_pt: f64,
    pub table_size_pt: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Typography {
            font_name: "Times New Roman".to_string(),
            body_size_pt: 13.0,
            title_size_pt: 16.0,
            table_size_pt: 10.0,
        }
    }
}

/// One office table with its title
#[derive(Debug, Clone, PartialEq)]
pub struct AnnexTable {
    pub title: String,
    pub rows: Vec<[String; 9]>,
}

impl AnnexTable {
    #[must_use]
    pub fn new(title: String) -> Self {
        AnnexTable {
            title,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn header() -> [&'static str; 9] {
        TABLE_HEADER
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Table(AnnexTable),
    PageBreak,
}

/// The output document: blocks in order plus page geometry and typography
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSetup,
    pub typography: Typography,
    blocks: Vec<Block>,
}

impl Document {
    #[must_use]
    pub fn new(page: PageSetup, typography: Typography) -> Self {
        Document {
            page,
            typography,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.blocks.extend(blocks);
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// All tables in document order
    pub fn tables(&self) -> impl Iterator<Item = &AnnexTable> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            Block::PageBreak => None,
        })
    }

    /// Tables grouped by page, skipping pages without tables
    #[must_use]
    pub fn pages(&self) -> Vec<Vec<&AnnexTable>> {
        let mut pages = vec![Vec::new()];
        for block in &self.blocks {
            match block {
                Block::Table(table) => {
                    if let Some(page) = pages.last_mut() {
                        page.push(table);
                    }
                }
                Block::PageBreak => pages.push(Vec::new()),
            }
        }
        pages.retain(|page| !page.is_empty());
        pages
    }
}
