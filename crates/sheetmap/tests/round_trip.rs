//! End-to-end facade tests over the JSON codec, with derived bindings.

use chrono::{NaiveDate, NaiveDateTime};

use sheetmap::{
    map_rows, CellValue, Column, Decimal, Document, MapError, Mapper, Record, RowModel,
    SchemaError, SheetWriter,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

#[derive(Debug, Default, Clone, PartialEq, RowModel)]
struct Employee {
    #[read_column(header = "Employee ID")]
    #[write_column(header = "Employee ID", order = 1)]
    id: Option<i64>,

    #[read_column(header = "Name")]
    #[write_column(header = "Name", order = 2)]
    name: String,

    #[read_column(header = "Department")]
    #[write_column(header = "Department", order = 3)]
    department: String,

    #[read_column(header = "Salary")]
    #[write_column(header = "Salary", order = 4)]
    salary: Decimal,

    #[read_column(header = "Hire Date")]
    #[write_column(header = "Hire Date", order = 5, width = 96)]
    hire_date: NaiveDate,

    #[read_column(header = "Last Updated")]
    #[write_column(header = "Last Updated", order = 6)]
    last_updated: NaiveDateTime,
}

fn staff() -> Vec<Employee> {
    vec![
        Employee {
            id: Some(1),
            name: "현수".into(),
            department: "Card".into(),
            salary: "85000.00".parse().unwrap(),
            hire_date: date(2020, 3, 2),
            last_updated: datetime(2024, 1, 9, 18, 45),
        },
        Employee {
            id: Some(2),
            name: "Miriam".into(),
            department: "Loans".into(),
            salary: "72000.50".parse().unwrap(),
            hire_date: date(2021, 7, 19),
            last_updated: datetime(2024, 2, 1, 8, 0),
        },
        Employee {
            id: None,
            name: "Contractor".into(),
            department: "Card".into(),
            salary: "40000".parse().unwrap(),
            hire_date: date(2024, 5, 6),
            last_updated: datetime(2024, 5, 6, 12, 0),
        },
    ]
}

#[test]
fn round_trip_preserves_length_order_and_values() {
    let mapper = Mapper::json();
    let rows = staff();

    let bytes = mapper
        .to_bytes(SheetWriter::new(&rows).sheet_name("Employee List"))
        .unwrap();
    let back: Vec<Employee> = mapper.from_bytes(&bytes).unwrap();

    assert_eq!(back, rows);
}

#[test]
fn decimal_salary_does_not_drift() {
    let mapper = Mapper::json();
    let rows = staff();

    let bytes = mapper.to_bytes(SheetWriter::new(&rows)).unwrap();
    let back: Vec<Employee> = mapper.from_bytes(&bytes).unwrap();

    assert_eq!(back[1].salary.to_string(), "72000.50");
    assert_eq!(back[1].salary, "72000.5".parse().unwrap());
    assert_ne!(back[1].salary, "72000".parse().unwrap());
}

#[test]
fn optional_id_round_trips_through_blank() {
    let mapper = Mapper::json();
    let rows = staff();

    let bytes = mapper.to_bytes(SheetWriter::new(&rows)).unwrap();
    let back: Vec<Employee> = mapper.from_bytes(&bytes).unwrap();

    assert_eq!(back[0].id, Some(1));
    assert_eq!(back[2].id, None);
}

#[test]
fn empty_collection_writes_header_only() {
    let mapper = Mapper::json();
    let rows: Vec<Employee> = Vec::new();

    let bytes = mapper.to_bytes(SheetWriter::new(&rows)).unwrap();
    let back: Vec<Employee> = mapper.from_bytes(&bytes).unwrap();
    assert!(back.is_empty());
}

#[test]
fn save_and_load_files() {
    let mapper = Mapper::json();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employees.json");

    let rows = staff();
    mapper
        .save(
            SheetWriter::new(&rows)
                .sheet_name("Employee List")
                .column_width(1, 100)
                .column_width(3, 100),
            &path,
        )
        .unwrap();

    let back: Vec<Employee> = mapper.load(&path).unwrap();
    assert_eq!(back, rows);
}

#[derive(Debug, Default, Clone, PartialEq, RowModel)]
struct Student {
    #[read_column(header = "Student ID")]
    #[write_column(header = "Student ID", order = 1)]
    student_id: String,

    #[read_column(header = "Grade", default = 1)]
    #[write_column(header = "Grade", order = 2)]
    grade: i32,

    #[read_column(header = "GPA")]
    #[write_column(header = "GPA", order = 3)]
    gpa: f64,

    #[read_column(header = "Has Scholarship")]
    #[write_column(header = "Has Scholarship", order = 4)]
    has_scholarship: bool,
}

#[test]
fn booleans_and_floats_round_trip() {
    let mapper = Mapper::json();
    let rows = vec![
        Student {
            student_id: "S-001".into(),
            grade: 3,
            gpa: 3.75,
            has_scholarship: true,
        },
        Student {
            student_id: "S-002".into(),
            grade: 1,
            gpa: 2.5,
            has_scholarship: false,
        },
    ];

    let bytes = mapper.to_bytes(SheetWriter::new(&rows)).unwrap();
    let back: Vec<Student> = mapper.from_bytes(&bytes).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn missing_header_applies_declared_default() {
    // No "Grade" column anywhere in the document.
    let doc = Document::new(
        "Sheet1",
        vec![Column::new("Student ID", None)],
        vec![Record::new(vec![CellValue::Text("S-009".into())])],
    )
    .unwrap();

    let mapper = Mapper::json();
    let back: Vec<Student> = map_rows(&doc, mapper.registry()).unwrap();
    assert_eq!(back[0].student_id, "S-009");
    assert_eq!(back[0].grade, 1, "declared default, not i32::default()");
    assert_eq!(back[0].gpa, 0.0);
}

#[test]
fn unmatched_headers_fall_back_to_zero_values() {
    let doc = Document::new(
        "Sheet1",
        vec![Column::new("Name", None)],
        vec![Record::new(vec![CellValue::Text("솔로".into())])],
    )
    .unwrap();

    let mapper = Mapper::json();
    let back: Vec<Employee> = map_rows(&doc, mapper.registry()).unwrap();
    assert_eq!(back[0].name, "솔로");
    assert_eq!(back[0].salary, Decimal::ZERO);
    assert_eq!(back[0].id, None);
}

#[test]
fn coercion_mismatch_fails_fast_with_context() {
    let doc = Document::new(
        "Sheet1",
        vec![Column::new("Name", None), Column::new("Salary", None)],
        vec![
            Record::new(vec![
                CellValue::Text("ok".into()),
                CellValue::Decimal("10.00".parse().unwrap()),
            ]),
            Record::new(vec![
                CellValue::Text("bad".into()),
                CellValue::Text("seventy-two thousand".into()),
            ]),
        ],
    )
    .unwrap();

    let mapper = Mapper::json();
    let err = map_rows::<Employee>(&doc, mapper.registry()).unwrap_err();
    match err {
        MapError::Coercion { row, header, .. } => {
            assert_eq!(row, 1);
            assert_eq!(header, "Salary");
        }
        other => panic!("expected coercion failure, got {other:?}"),
    }
}

#[derive(Debug, Default, RowModel)]
struct Jumbled {
    #[write_column(header = "Third", order = 3)]
    c: i64,

    #[write_column(header = "First", order = 1)]
    a: i64,

    #[write_column(header = "Second", order = 2)]
    b: i64,
}

#[test]
fn derived_columns_order_by_write_order() {
    let mapper = Mapper::json();
    let rows = vec![Jumbled { c: 3, a: 1, b: 2 }];
    let doc = SheetWriter::new(&rows).create(mapper.registry()).unwrap();

    let headers: Vec<&str> = doc.columns().iter().map(|c| c.header.as_str()).collect();
    assert_eq!(headers, ["First", "Second", "Third"]);
    assert_eq!(doc.cell(0, "First"), Some(&CellValue::Int(1)));
    assert_eq!(doc.cell(0, "Third"), Some(&CellValue::Int(3)));
}

#[derive(Debug, Default, RowModel)]
struct TiedOrders {
    #[write_column(header = "Alpha", order = 5)]
    alpha: i64,

    #[write_column(header = "Beta", order = 5)]
    beta: i64,
}

#[test]
fn derived_tie_break_keeps_declaration_order() {
    let mapper = Mapper::json();
    let doc = SheetWriter::<TiedOrders>::new(&[])
        .create(mapper.registry())
        .unwrap();
    let headers: Vec<&str> = doc.columns().iter().map(|c| c.header.as_str()).collect();
    assert_eq!(headers, ["Alpha", "Beta"]);
}

#[derive(Debug, Default, RowModel)]
struct Clashing {
    #[write_column(header = "Amount", order = 1)]
    gross: i64,

    #[write_column(header = "Amount", order = 2)]
    net: i64,
}

#[test]
fn derived_duplicate_headers_are_rejected() {
    let mapper = Mapper::json();
    let err = SheetWriter::<Clashing>::new(&[])
        .create(mapper.registry())
        .unwrap_err();
    assert!(matches!(
        err,
        MapError::Schema(SchemaError::DuplicateHeader { header: "Amount", .. })
    ));
}
