use pretty_assertions::assert_eq;
use ssis_import::{BulkImporter, ImportError};
use ssis_store::{EntityKind, RecordStore, Rejection};
use ssis_test_utils::{
    college, init_tracing, open_in, program, seeded_store, temp_store, write_csv,
};

#[test]
fn test_duplicate_student_skipped() {
    init_tracing();
    let mut store = seeded_store();
    let data = "id,firstname,lastname,program_code,year,gender\n\
                2023-0001,Juan,Cruz,BSCS,1,Male\n\
                2023-0002,Ana,Reyes,BSCS,2,Female\n";

    let (added, reasons) = BulkImporter::new(&mut store)
        .import_reader(EntityKind::Student, data.as_bytes())
        .unwrap()
        .into_parts();

    assert_eq!(added, 1);
    assert_eq!(reasons.len(), 1);
    assert!(reasons[0].contains("already exists"));
    assert_eq!(store.counts().students, 2);
}

#[test]
fn test_repeated_student_in_one_file_skipped() {
    let mut store = RecordStore::in_memory().unwrap();
    store.insert(college("CCS")).unwrap();
    store.insert(program("BSCS", "CCS")).unwrap();
    let data = "id,firstname,lastname,program_code,year,gender\n\
                2023-0001,Juan,Cruz,BSCS,1,Male\n\
                2023-0001,Juan,Cruz,BSCS,1,Male\n";

    let report = BulkImporter::new(&mut store)
        .import_reader(EntityKind::Student, data.as_bytes())
        .unwrap();

    assert_eq!(report.added, 1);
    assert_eq!(report.reasons().len(), 1);
    assert!(report.reasons()[0].contains("already exists"));
    assert_eq!(report.skipped[0].row, 2);
    assert_eq!(store.counts().students, 1);
}

#[test]
fn test_program_before_college_skipped() {
    let mut store = RecordStore::in_memory().unwrap();
    let report = BulkImporter::new(&mut store)
        .import_reader(
            EntityKind::Program,
            "code,name,college_code\nBSCS,Computer Science,CCS\n".as_bytes(),
        )
        .unwrap();

    assert_eq!(report.added, 0);
    assert!(matches!(
        report.skipped[0].rejection,
        Rejection::MissingParent { parent: EntityKind::College, .. }
    ));
    assert!(report.reasons()[0].contains("college 'CCS' does not exist"));
}

#[test]
fn test_full_import_from_files() {
    init_tracing();
    let (dir, mut store) = temp_store();
    let sources = tempfile::tempdir().unwrap();
    let colleges = write_csv(
        sources.path(),
        "in_colleges.csv",
        "code,name\nCCS,Computer Studies\nCOE,Engineering\n",
    );
    let programs = write_csv(
        sources.path(),
        "in_programs.csv",
        "name,code,college_code\nComputer Science,BSCS,ccs\nCivil,BSCE,COE\nOrphan,BSXX,NONE\n",
    );
    let students = write_csv(
        sources.path(),
        "in_students.csv",
        "id,firstname,lastname,program_code,year,gender\n\
         2023-0001,Juan,Cruz,BSCS,1,Male\n\
         2023-1,Bad,Id,BSCS,1,Male\n\
         2023-0002,,Reyes,BSCE,2,Female\n",
    );

    let mut importer = BulkImporter::new(&mut store);
    assert_eq!(importer.import_colleges(&colleges).unwrap().added, 2);
    assert_eq!(importer.import_programs(&programs).unwrap().added, 2);

    let report = importer.import_students(&students).unwrap();
    assert_eq!(report.added, 1);
    assert_eq!(
        report.reasons(),
        vec![
            "'2023-1': invalid ID format, must be YYYY-NNNN".to_string(),
            "row with id '2023-0002': missing required fields (firstname)".to_string(),
        ]
    );

    let reopened = open_in(dir.path());
    assert_eq!(reopened.counts(), store.counts());
    assert_eq!(reopened.programs().get("BSCS").unwrap().college_code, "ccs");
}

#[test]
fn test_missing_file_is_io_error() {
    let mut store = seeded_store();
    let result = BulkImporter::new(&mut store).import_students("/no/such/students.csv");
    assert!(matches!(result, Err(ImportError::Io { .. })));
    assert_eq!(store.counts().students, 1);
}
