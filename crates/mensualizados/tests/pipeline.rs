use chrono::NaiveDate;
use planilla_mensualizados::{
    process, Area, MensualizadosError, MensualizadosOptions, MensualizadosRequest,
};
use planilla_sheet::{CellValue, Sheet, SheetError, XlsxReadOptions};
use std::io::{Cursor, Read};

const HEADER: [&str; 12] = [
    "Oficina",
    "Nombre Oficina",
    "Legajo",
    "Apellido y Nombre",
    "Categoría",
    "Función",
    "Bonificación",
    "Fecha Ingreso Cargo",
    "Fecha Egreso Cargo",
    "Observaciones",
    "Usuario",
    "Fecha Carga",
];

fn date(y: i32, m: u32, d: u32) -> CellValue {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().into()
}

fn employee(office: i64, legajo: i64, category: &str, exit: CellValue) -> Vec<CellValue> {
    vec![
        CellValue::Int(office),
        CellValue::from(format!("Oficina {office}")),
        CellValue::Int(legajo),
        CellValue::from(format!("Empleado {legajo}")),
        CellValue::from(category),
        CellValue::from("Administrativo"),
        CellValue::Float(1500.5),
        date(2024, 1, 1),
        exit,
        CellValue::from("obs"),
        CellValue::from("usr"),
        date(2024, 7, 1),
    ]
}

fn mensualizados() -> Vec<u8> {
    let mut data = vec![HEADER.iter().map(|h| CellValue::from(*h)).collect::<Vec<_>>()];
    data.push(employee(7, 100, "NO CATEGORIZADO", date(2024, 6, 30)));
    data.push(employee(8, 101, "CAT 5", date(2024, 6, 30)));
    data.push(employee(7, 102, "CAT 3", CellValue::Null));
    data.push(employee(7, 103, "CAT 2", date(2024, 5, 31)));
    Sheet::from_data(data).to_xlsx_bytes().unwrap()
}

fn read(bytes: &[u8]) -> Sheet {
    Sheet::from_xlsx_bytes(bytes, &XlsxReadOptions::default().with_headers(true)).unwrap()
}

#[test]
fn test_single_file_area() {
    let request = MensualizadosRequest::from_xlsx_bytes("GOBIERNO", &mensualizados()).unwrap();
    let files = process(&request, &MensualizadosOptions::default()).unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, "GOBIERNO.xlsx");

    let output = read(&files[0].bytes);
    assert_eq!(output.col_count(), 9);
    // The row without exit date is gone
    assert_eq!(output.data_row_count(), 3);
    assert_eq!(
        output.get_by_name(1, "Categoría").unwrap().as_float(),
        Some(999.0)
    );
    assert_eq!(output.get_by_name(2, "Categoría").unwrap(), &CellValue::from("CAT 5"));
    assert_eq!(output.get_by_name(1, "Fecha Egreso Cargo").unwrap(), &date(2024, 6, 30));
    assert_eq!(output.get_by_name(1, "Fecha Ingreso Cargo").unwrap(), &date(2024, 1, 1));
}

#[test]
fn test_whitespace_exit_date_is_kept() {
    let mut data = vec![HEADER.iter().map(|h| CellValue::from(*h)).collect::<Vec<_>>()];
    data.push(employee(7, 100, "CAT 1", CellValue::from(" ")));
    data.push(employee(7, 101, "CAT 1", date(2024, 6, 30)));
    let bytes = Sheet::from_data(data).to_xlsx_bytes().unwrap();

    let request = MensualizadosRequest::from_xlsx_bytes("GOBIERNO", &bytes).unwrap();
    let files = process(&request, &MensualizadosOptions::default()).unwrap();

    let output = read(&files[0].bytes);
    assert_eq!(output.data_row_count(), 2);
    assert_eq!(output.get_by_name(1, "Fecha Egreso Cargo").unwrap(), &CellValue::from(" "));
}

fn zip_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
    content
}

/// Opening tags `<tag ...>` in document order
fn elements<'a>(xml: &'a str, tag: &str) -> Vec<&'a str> {
    let open = format!("<{tag} ");
    xml.match_indices(&open)
        .map(|(start, _)| {
            let end = xml[start..].find('>').unwrap();
            &xml[start..start + end]
        })
        .collect()
}

fn attr<'a>(element: &'a str, name: &str) -> &'a str {
    let key = format!(" {name}=\"");
    let start = element.find(&key).unwrap() + key.len();
    let end = element[start..].find('"').unwrap();
    &element[start..start + end]
}

#[test]
fn test_written_date_columns_use_display_format() {
    let request = MensualizadosRequest::from_xlsx_bytes("GOBIERNO", &mensualizados()).unwrap();
    let files = process(&request, &MensualizadosOptions::default()).unwrap();
    let bytes = &files[0].bytes;

    let styles = zip_part(bytes, "xl/styles.xml");
    let num_fmt = elements(&styles, "numFmt")
        .into_iter()
        .find(|e| attr(e, "formatCode") == "DD/MM/YYYY")
        .expect("DD/MM/YYYY number format");
    let fmt_id = attr(num_fmt, "numFmtId");

    let cell_xfs_start = styles.find("<cellXfs").unwrap();
    let xfs = elements(&styles[cell_xfs_start..], "xf");

    let worksheet = zip_part(bytes, "xl/worksheets/sheet1.xml");
    let cells = elements(&worksheet, "c");
    for cell_ref in ["H2", "I2", "H3", "I3"] {
        let cell = cells
            .iter()
            .find(|c| attr(c, "r") == cell_ref)
            .unwrap_or_else(|| panic!("cell {cell_ref} written"));
        let style: usize = attr(cell, "s").parse().unwrap();
        assert_eq!(attr(xfs[style], "numFmtId"), fmt_id, "style of {cell_ref}");
    }
}

#[test]
fn test_split_area_one_file_per_office() {
    let request =
        MensualizadosRequest::from_xlsx_bytes("SALUD PUBLICA", &mensualizados()).unwrap();
    let files = process(&request, &MensualizadosOptions::default()).unwrap();

    let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["SALUD PUBLICA_oficina_7.xlsx", "SALUD PUBLICA_oficina_8.xlsx"]
    );
    assert_eq!(files[0].label, "Descargar planilla de la oficina: 7");

    let office_7 = read(&files[0].bytes);
    assert_eq!(office_7.col_count(), 9);
    assert_eq!(office_7.data_row_count(), 2);
    assert!(office_7
        .data_rows()
        .all(|row| row[0].as_float() == Some(7.0)));

    let office_8 = read(&files[1].bytes);
    assert_eq!(office_8.data_row_count(), 1);
}

#[test]
fn test_no_area_selected_blocks_processing() {
    // The bytes are never read, so garbage does not matter
    let result = MensualizadosRequest::from_xlsx_bytes("  ", b"garbage");
    assert!(matches!(result, Err(MensualizadosError::NoAreaSelected)));
}

#[test]
fn test_missing_exit_date_column() {
    let sheet = {
        let mut sheet = Sheet::from_data(vec![vec!["Oficina", "Categoría"], vec!["1", "x"]]);
        sheet.name_columns_by_row(0).unwrap();
        sheet
    };
    let request = MensualizadosRequest::new(Area::Gobierno, sheet);

    let result = process(&request, &MensualizadosOptions::default());
    assert!(matches!(
        result,
        Err(MensualizadosError::Sheet(SheetError::MissingColumn { name })) if name == "Fecha Egreso Cargo"
    ));
}

#[test]
fn test_options_from_partial_json() {
    let options: MensualizadosOptions =
        serde_json::from_str(r#"{ "trailing_columns": 2, "date_columns": ["G"] }"#).unwrap();

    assert_eq!(options.trailing_columns, 2);
    assert_eq!(options.date_columns, vec!["G".to_string()]);
    assert_eq!(options.office_column, "Oficina");
    assert_eq!(options.uncategorized_code, 999);
}
