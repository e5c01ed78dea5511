use anyhow::Context;
use clap::Parser;
use plate_setup::config::cli::Command;
use plate_setup::config::toml_config::TomlConfig;
use plate_setup::utils::error::ErrorSeverity;
use plate_setup::utils::{logger, validation::Validate};
use plate_setup::{
    CliConfig, LocalStorage, PlateEngine, PlateError, PlateExporter, PlateImporter, Storage,
    TabularPlate,
};

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        let exit_code = match e.downcast_ref::<PlateError>() {
            Some(err) => {
                tracing::error!(
                    "{} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {:#}", e);
                eprintln!("💡 {}", err.recovery_suggestion());
                match err.severity() {
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                eprintln!("❌ {:#}", e);
                1
            }
        };

        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = cli.resolve().context("failed to load configuration")?;
    config.validate()?;

    let storage = LocalStorage::new();

    match &cli.command {
        Command::Import { input, .. } => {
            let importer = PlateImporter::new(config.import);
            let outcome = importer
                .import_file(input, &storage)
                .with_context(|| format!("failed to import {}", input.display()))?;

            tracing::info!(
                "Imported {} ({} occupied wells)",
                input.display(),
                outcome.plate.occupied_count()
            );
            match outcome.tabular_path {
                Some(path) => println!("📁 Tabular plate saved to: {}", path.display()),
                // Nothing saved: the table goes to stdout instead.
                None => print!("{}", outcome.plate.to_csv_string()?),
            }
        }
        Command::Export { tabular, .. } => {
            let data = storage
                .read_file(tabular)
                .with_context(|| format!("failed to read {}", tabular.display()))?;
            let plate = TabularPlate::read_csv(data.as_slice())
                .with_context(|| format!("failed to parse {}", tabular.display()))?;

            export(&config, &plate, &storage)?;
        }
        Command::Convert { input, .. } => {
            let engine = PlateEngine::from_config(config, storage);
            let report = engine
                .run(input)
                .with_context(|| format!("failed to convert {}", input.display()))?;

            println!(
                "✅ Converted {} ({} occupied wells)",
                input.display(),
                report.occupied_wells
            );
            if let Some(path) = report.tabular_path {
                println!("📁 Tabular plate saved to: {}", path.display());
            }
            println!("📁 Output saved to: {}", report.output_path.display());
        }
    }

    Ok(())
}

fn export(config: &TomlConfig, plate: &TabularPlate, storage: &LocalStorage) -> anyhow::Result<()> {
    let exporter = PlateExporter::new(config.export.clone());
    exporter
        .write_plate(
            plate,
            &config.files.header_file,
            &config.files.output_file,
            storage,
        )
        .with_context(|| format!("failed to write {}", config.files.output_file.display()))?;

    println!("📁 Output saved to: {}", config.files.output_file.display());
    Ok(())
}
