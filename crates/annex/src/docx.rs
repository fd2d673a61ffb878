//! WordprocessingML serialization of a [`Document`].
//!
//! The package holds the minimum parts Word needs: content types, the
//! package relationships, the main document, its relationships and a style
//! sheet with the default font and the "Table Grid" table style.

use crate::document::{AnnexTable, Block, Document, PageSetup, Typography};
use crate::error::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const TWIPS_PER_MM: f64 = 1440.0 / 25.4;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const DOCUMENT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

fn twips(mm: f64) -> String {
    ((mm * TWIPS_PER_MM).round() as i64).to_string()
}

fn half_points(pt: f64) -> String {
    ((pt * 2.0).round() as i64).to_string()
}

/// Thin event writer for one XML part
struct Part {
    writer: Writer<Vec<u8>>,
}

impl Part {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Part { writer })
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn fonts(&mut self, font_name: &str) -> Result<()> {
        self.empty(
            "w:rFonts",
            &[
                ("w:ascii", font_name),
                ("w:hAnsi", font_name),
                ("w:eastAsia", font_name),
                ("w:cs", font_name),
            ],
        )
    }

    fn size(&mut self, size: &str) -> Result<()> {
        self.empty("w:sz", &[("w:val", size)])?;
        self.empty("w:szCs", &[("w:val", size)])
    }

    /// A text run; `emphasis` makes it bold and underlined
    fn run(&mut self, text: &str, size: &str, emphasis: bool) -> Result<()> {
        self.open("w:r", &[])?;
        self.open("w:rPr", &[])?;
        if emphasis {
            self.empty("w:b", &[])?;
        }
        self.size(size)?;
        if emphasis {
            self.empty("w:u", &[("w:val", "single")])?;
        }
        self.close("w:rPr")?;
        self.open("w:t", &[("xml:space", "preserve")])?;
        self.text(text)?;
        self.close("w:t")?;
        self.close("w:r")
    }
}

fn write_title(part: &mut Part, title: &str, typography: &Typography) -> Result<()> {
    part.open("w:p", &[])?;
    part.open("w:pPr", &[])?;
    part.empty("w:jc", &[("w:val", "center")])?;
    part.close("w:pPr")?;
    part.run(title, &half_points(typography.title_size_pt), true)?;
    part.close("w:p")
}

fn write_cell(part: &mut Part, text: &str, width: &str, size: &str) -> Result<()> {
    part.open("w:tc", &[])?;
    part.open("w:tcPr", &[])?;
    part.empty("w:tcW", &[("w:w", width), ("w:type", "dxa")])?;
    part.close("w:tcPr")?;
    part.open("w:p", &[])?;
    if !text.is_empty() {
        part.run(text, size, false)?;
    }
    part.close("w:p")?;
    part.close("w:tc")
}

fn write_table(part: &mut Part, table: &AnnexTable, page: &PageSetup, typography: &Typography) -> Result<()> {
    let columns = AnnexTable::header().len();
    let usable_mm = page.width_mm - 2.0 * page.margin_mm;
    let width = twips(usable_mm / columns as f64);
    let size = half_points(typography.table_size_pt);

    part.open("w:tbl", &[])?;
    part.open("w:tblPr", &[])?;
    part.empty("w:tblStyle", &[("w:val", "TableGrid")])?;
    part.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    part.close("w:tblPr")?;

    part.open("w:tblGrid", &[])?;
    for _ in 0..columns {
        part.empty("w:gridCol", &[("w:w", width.as_str())])?;
    }
    part.close("w:tblGrid")?;

    part.open("w:tr", &[])?;
    for heading in AnnexTable::header() {
        write_cell(part, heading, &width, &size)?;
    }
    part.close("w:tr")?;

    for row in &table.rows {
        part.open("w:tr", &[])?;
        for cell in row {
            write_cell(part, cell, &width, &size)?;
        }
        part.close("w:tr")?;
    }

    part.close("w:tbl")
}

fn write_page_break(part: &mut Part) -> Result<()> {
    part.open("w:p", &[])?;
    part.open("w:r", &[])?;
    part.empty("w:br", &[("w:type", "page")])?;
    part.close("w:r")?;
    part.close("w:p")
}

fn write_section(part: &mut Part, page: &PageSetup) -> Result<()> {
    let width = twips(page.width_mm);
    let height = twips(page.height_mm);
    let margin = twips(page.margin_mm);
    let header = twips(page.header_distance_mm);
    let footer = twips(page.footer_distance_mm);
    let orient = if page.landscape { "landscape" } else { "portrait" };

    part.open("w:sectPr", &[])?;
    part.empty(
        "w:pgSz",
        &[("w:w", width.as_str()), ("w:h", height.as_str()), ("w:orient", orient)],
    )?;
    part.empty(
        "w:pgMar",
        &[
            ("w:top", margin.as_str()),
            ("w:right", margin.as_str()),
            ("w:bottom", margin.as_str()),
            ("w:left", margin.as_str()),
            ("w:header", header.as_str()),
            ("w:footer", footer.as_str()),
            ("w:gutter", "0"),
        ],
    )?;
    part.close("w:sectPr")
}

fn document_xml(document: &Document) -> Result<Vec<u8>> {
    let mut part = Part::new()?;
    part.open("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)])?;
    part.open("w:body", &[])?;

    for block in document.blocks() {
        match block {
            Block::Table(table) => {
                write_title(&mut part, &table.title, &document.typography)?;
                write_table(&mut part, table, &document.page, &document.typography)?;
            }
            Block::PageBreak => write_page_break(&mut part)?,
        }
    }

    write_section(&mut part, &document.page)?;
    part.close("w:body")?;
    part.close("w:document")?;
    Ok(part.finish())
}

fn styles_xml(typography: &Typography) -> Result<Vec<u8>> {
    let body_size = half_points(typography.body_size_pt);
    let mut part = Part::new()?;
    part.open("w:styles", &[("xmlns:w", W_NS)])?;

    part.open("w:docDefaults", &[])?;
    part.open("w:rPrDefault", &[])?;
    part.open("w:rPr", &[])?;
    part.fonts(&typography.font_name)?;
    part.size(&body_size)?;
    part.close("w:rPr")?;
    part.close("w:rPrDefault")?;
    part.empty("w:pPrDefault", &[])?;
    part.close("w:docDefaults")?;

    part.open(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    part.empty("w:name", &[("w:val", "Normal")])?;
    part.empty("w:qFormat", &[])?;
    part.open("w:rPr", &[])?;
    part.fonts(&typography.font_name)?;
    part.size(&body_size)?;
    part.close("w:rPr")?;
    part.close("w:style")?;

    part.open(
        "w:style",
        &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")],
    )?;
    part.empty("w:name", &[("w:val", "Normal Table")])?;
    part.open("w:tblPr", &[])?;
    part.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    part.open("w:tblCellMar", &[])?;
    for (side, width) in [("w:top", "0"), ("w:left", "108"), ("w:bottom", "0"), ("w:right", "108")] {
        part.empty(side, &[("w:w", width), ("w:type", "dxa")])?;
    }
    part.close("w:tblCellMar")?;
    part.close("w:tblPr")?;
    part.close("w:style")?;

    part.open("w:style", &[("w:type", "table"), ("w:styleId", "TableGrid")])?;
    part.empty("w:name", &[("w:val", "Table Grid")])?;
    part.empty("w:basedOn", &[("w:val", "TableNormal")])?;
    part.open("w:tblPr", &[])?;
    part.open("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        part.empty(
            side,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    part.close("w:tblBorders")?;
    part.close("w:tblPr")?;
    part.close("w:style")?;

    part.close("w:styles")?;
    Ok(part.finish())
}

impl Document {
    /// Serialize into a `.docx` package
    ///
    /// # Errors
    ///
    /// Returns error if an XML part or the zip container cannot be written.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>> {
        let parts: [(&str, Vec<u8>); 5] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
            ("word/document.xml", document_xml(self)?),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS.as_bytes().to_vec()),
            ("word/styles.xml", styles_xml(&self.typography)?),
        ];

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    /// Serialize and write to a file
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails or the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_docx_bytes()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    fn sample() -> Document {
        let mut table = AnnexTable::new("3 - Compras & Suministros".to_string());
        let mut row: [String; 9] = Default::default();
        row[2] = "GOMEZ, <ANA>".to_string();
        table.rows.push(row);

        let mut document = Document::new(PageSetup::landscape_a4(), Typography::default());
        document.push(Block::Table(table));
        document.push(Block::PageBreak);
        document
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(twips(25.4), "1440");
        assert_eq!(twips(297.0), "16838");
        assert_eq!(twips(210.0), "11906");
        assert_eq!(half_points(13.0), "26");
        assert_eq!(half_points(10.5), "21");
    }

    #[test]
    fn test_package_parts() {
        let bytes = sample().to_docx_bytes().unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut names: Vec<&str> = archive.file_names().collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/styles.xml",
            ]
        );
    }

    #[test]
    fn test_document_xml_content() {
        let bytes = sample().to_docx_bytes().unwrap();
        let xml = read_part(&bytes, "word/document.xml");

        assert!(xml.contains("3 - Compras &amp; Suministros"));
        assert!(xml.contains("GOMEZ, &lt;ANA&gt;"));
        assert!(xml.contains(r#"<w:jc w:val="center"/>"#));
        assert!(xml.contains(r#"<w:u w:val="single"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="32"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="20"/>"#));
        assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        assert!(xml.contains(r#"<w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/>"#));
        assert_eq!(xml.matches(r#"<w:br w:type="page"/>"#).count(), 1);
        // Header row plus one data row
        assert_eq!(xml.matches("<w:tr>").count(), 2);
        assert!(xml.contains("NOTIFICACION FIRMA Y FECHA"));
    }

    #[test]
    fn test_styles_xml_base_font() {
        let bytes = sample().to_docx_bytes().unwrap();
        let xml = read_part(&bytes, "word/styles.xml");

        assert!(xml.contains(r#"w:ascii="Times New Roman""#));
        assert!(xml.contains(r#"<w:sz w:val="26"/>"#));
        assert!(xml.contains(r#"w:styleId="TableGrid""#));
    }

    #[test]
    fn test_save_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anexo.docx");
        sample().save(&path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
