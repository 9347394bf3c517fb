use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use oxnano::{convert, export, ConversionOptions, ExportType, Lattice};

const USAGE: &str = "usage: oxnano <design.json> <sq|he> [scaffold_sequence] [box_side]";

fn options_from_args(args: &[String]) -> Result<ConversionOptions, String> {
    let grid = args[2]
        .parse::<Lattice>()
        .map_err(|e| format!("{}\n{}", e, USAGE))?;
    let scaffold_sequence = args.get(3).filter(|s| !s.is_empty()).cloned();
    let box_side = match args.get(4) {
        Some(side) => Some(
            side.parse::<f64>()
                .map_err(|_| format!("Invalid box side: {}", side))?,
        ),
        None => None,
    };
    Ok(ConversionOptions {
        grid,
        scaffold_sequence,
        box_side,
        ..Default::default()
    })
}

fn run(args: &[String]) -> Result<(), String> {
    if args.len() < 3 {
        return Err(USAGE.to_string());
    }
    let path = PathBuf::from(&args[1]);
    let options = options_from_args(args)?;
    let json = fs::read_to_string(&path)
        .map_err(|e| format!("Could not read {}: {}", path.to_string_lossy(), e))?;

    let conversion = convert(&json, &options).map_err(|e| e.to_string())?;
    if !conversion.warnings.is_empty() {
        log::warn!(
            "{} warnings were emitted, the model may need to be relaxed",
            conversion.warnings.len()
        );
    }

    let exports = [(ExportType::Oxdna, "oxdna"), (ExportType::Oxview, "oxview")];
    for (export_type, extension) in exports.iter() {
        let mut export_path = path.clone();
        export_path.set_extension(extension);
        match export(&conversion.system, *export_type, &export_path) {
            Ok(success) => println!("{}", success.message()),
            Err(e) => return Err(format!("{} export failed: {:?}", export_type, e)),
        }
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}
