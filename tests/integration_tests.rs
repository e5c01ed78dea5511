use plate_setup::{
    ExportConfig, FileConfig, GridLayout, ImportOptions, LocalStorage, PlateEngine, PlateError,
    PlateExporter, PlateImporter, TabularPlate, WellId, WELL_COUNT,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "* Block Type = 96-Well Block (0.2mL)\n\n[Sample Setup]";

/// Writes a layout CSV with a 1..12 title row; `cells` maps well to content.
fn write_layout_csv(dir: &Path, name: &str, cells: &[(&str, &str)]) -> PathBuf {
    let mut grid = vec![vec![String::new(); 12]; 8];
    for (well, content) in cells {
        let well: WellId = well.parse().unwrap();
        grid[well.index() / 12][well.column() - 1] = content.to_string();
    }

    let path = dir.join(name);
    let mut wtr = csv::Writer::from_path(&path).unwrap();
    wtr.write_record((1..=12).map(|c| c.to_string())).unwrap();
    for row in &grid {
        wtr.write_record(row).unwrap();
    }
    wtr.flush().unwrap();
    path
}

fn files_in(dir: &Path) -> FileConfig {
    let header_file = dir.join("plate_header.txt");
    std::fs::write(&header_file, HEADER).unwrap();
    FileConfig {
        header_file,
        output_file: dir.join("out").join("plate_layout.txt"),
    }
}

#[test]
fn test_end_to_end_single_sample() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_layout_csv(temp_dir.path(), "plate.csv", &[("A1", "SampleA\nRep1")]);
    let files = files_in(temp_dir.path());

    let engine = PlateEngine::new(
        PlateImporter::default(),
        PlateExporter::default(),
        files.clone(),
        LocalStorage::new(),
    );
    let report = engine.run(&input).unwrap();

    assert_eq!(report.occupied_wells, 1);
    assert_eq!(report.output_path, files.output_file);

    // Tabular side file never replaces a CSV input.
    let tabular_path = report.tabular_path.unwrap();
    assert_eq!(tabular_path, temp_dir.path().join("plate.tabular.csv"));
    let tabular = std::fs::read_to_string(&tabular_path).unwrap();
    assert!(tabular.starts_with("Well,Sample,Replicate\nA1,SampleA,Rep1\nA2,,\n"));
    assert_eq!(tabular.lines().count(), WELL_COUNT + 1);

    let output = std::fs::read_to_string(&files.output_file).unwrap();
    assert!(output.starts_with(&format!("{}\n", HEADER)));

    let body: Vec<&str> = output[HEADER.len() + 1..].lines().collect();
    assert_eq!(body.len(), WELL_COUNT + 1);
    assert!(body[0].starts_with("Well\tWell Position\tSample Name\tSample Color"));

    let first: Vec<&str> = body[1].split('\t').collect();
    assert_eq!(first[0], "1");
    assert_eq!(first[1], "A1");
    assert_eq!(first[2], "SampleA");
    assert_eq!(first[3], "\"RGB(0,139,69)\"");
    assert_eq!(first[6], "Rep1");
    assert_eq!(first[7], "\"RGB(0,139,69)\"");
    assert_eq!(&first[8..11], &["UNKNOWN", "FAM", "NFQ-MGB"]);

    for (i, line) in body[2..].iter().enumerate() {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[0], (i + 2).to_string());
        assert!(fields[2..].iter().all(|f| f.is_empty()), "row {} not empty", i + 2);
    }
}

#[test]
fn test_tabular_file_feeds_exporter() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_layout_csv(
        temp_dir.path(),
        "layout.csv",
        &[("B3", "Liver\nR1"), ("H12", "NTC")],
    );
    let storage = LocalStorage::new();

    let outcome = PlateImporter::default().import_file(&input, &storage).unwrap();
    let tabular = std::fs::File::open(outcome.tabular_path.unwrap()).unwrap();
    let reloaded = TabularPlate::read_csv(tabular).unwrap();
    assert_eq!(reloaded, outcome.plate);

    let exporter = PlateExporter::new(ExportConfig {
        task: "NTC".to_string(),
        ..ExportConfig::default()
    });
    let first = exporter.create_plate(&reloaded, HEADER).unwrap();
    let second = exporter.create_plate(&outcome.plate, HEADER).unwrap();
    assert_eq!(first, second);

    let h12 = first.lines().last().unwrap();
    assert_eq!(
        h12,
        "96\tH12\tNTC\t\"RGB(0,139,69)\"\t\t\t\t\"RGB(0,139,69)\"\tNTC\tFAM\tNFQ-MGB\t\t"
    );
}

#[test]
fn test_import_without_saving_leaves_directory_alone() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_layout_csv(temp_dir.path(), "plate.csv", &[]);

    let importer = PlateImporter::new(ImportOptions {
        save_tabular: false,
        ..ImportOptions::default()
    });
    let outcome = importer.import_file(&input, &LocalStorage::new()).unwrap();

    assert!(outcome.tabular_path.is_none());
    assert_eq!(outcome.plate.occupied_count(), 0);
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_csv_with_row_labels() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("labelled.csv");
    let mut text = String::from(",1,2,3,4,5,6,7,8,9,10,11,12\n");
    for letter in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        text.push_str(letter);
        text.push_str(&",".repeat(12));
        text.push('\n');
    }
    text = text.replacen("C,", "C,\"Kidney\nR3\"", 1);
    std::fs::write(&path, text).unwrap();

    let importer = PlateImporter::new(ImportOptions {
        layout: GridLayout {
            header_row: true,
            row_labels: true,
        },
        save_tabular: false,
    });
    let plate = importer.import_file(&path, &LocalStorage::new()).unwrap().plate;

    let c1 = plate.get("C1".parse().unwrap());
    assert_eq!(c1.sample, "Kidney");
    assert_eq!(c1.replicate, "R3");
    assert_eq!(plate.occupied_count(), 1);
}

#[test]
fn test_three_line_cell_is_format_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_layout_csv(temp_dir.path(), "plate.csv", &[("D4", "a\nb\nc")]);
    let files = files_in(temp_dir.path());

    let engine = PlateEngine::new(
        PlateImporter::default(),
        PlateExporter::default(),
        files.clone(),
        LocalStorage::new(),
    );
    let err = engine.run(&input).unwrap_err();

    assert!(matches!(err, PlateError::FormatError { .. }));
    assert!(err.to_string().contains("D4"));
    assert!(!files.output_file.exists());
}

#[test]
fn test_missing_header_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_layout_csv(temp_dir.path(), "plate.csv", &[("A1", "S")]);
    let files = FileConfig {
        header_file: temp_dir.path().join("nope.txt"),
        output_file: temp_dir.path().join("plate_layout.txt"),
    };

    let engine = PlateEngine::new(
        PlateImporter::default(),
        PlateExporter::default(),
        files.clone(),
        LocalStorage::new(),
    );
    let err = engine.run(&input).unwrap_err();

    assert!(matches!(err, PlateError::IoError(_)));
    assert!(!files.output_file.exists());
}

#[test]
fn test_unwritable_output_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let header_file = temp_dir.path().join("plate_header.txt");
    std::fs::write(&header_file, HEADER).unwrap();
    let out_dir = temp_dir.path().join("out");
    // The output path is taken by a directory, so it cannot become a file.
    let output_file = out_dir.join("plate_layout.txt");
    std::fs::create_dir_all(&output_file).unwrap();

    let plate = TabularPlate::from_pairs((0..WELL_COUNT).map(|_| (String::new(), String::new())))
        .unwrap();
    let err = PlateExporter::default()
        .write_plate(&plate, &header_file, &output_file, &LocalStorage::new())
        .unwrap_err();

    assert!(matches!(err, PlateError::IoError(_)));
    assert!(output_file.is_dir());
    let stray: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .filter(|name| name != "plate_layout.txt")
        .collect();
    assert!(stray.is_empty(), "left behind: {:?}", stray);
}

#[test]
fn test_example_data_layout_imports() {
    let input = Path::new(env!("CARGO_MANIFEST_DIR")).join("example_data/plate.csv");
    let importer = PlateImporter::new(ImportOptions {
        save_tabular: false,
        ..ImportOptions::default()
    });
    let plate = importer.import_file(&input, &LocalStorage::new()).unwrap().plate;

    assert_eq!(plate.occupied_count(), 13);
    let b6 = plate.get("B6".parse().unwrap());
    assert_eq!((b6.sample.as_str(), b6.replicate.as_str()), ("S6", "Rep2"));
    let c1 = plate.get("C1".parse().unwrap());
    assert_eq!((c1.sample.as_str(), c1.replicate.as_str()), ("NTC", ""));
}
