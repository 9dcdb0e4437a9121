use carta::{FilesystemAssetSource, MenuStudio, PipelineError, PriceAdjustment};
use carta::{ExportRequest, ExportScope, PageSizePreset};
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A simple CLI to export a menu document from catalog and branding
/// snapshot files.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 || args.len() > 5 {
        eprintln!("Export a print-ready menu document from catalog snapshots.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/catalog.json> <path/to/branding.json> <out-dir> [promo-percent]",
            args[0]
        );
        eprintln!();
        eprintln!("Assets referenced by the snapshots are resolved relative");
        eprintln!("to the catalog file's directory.");
        std::process::exit(1);
    }

    let catalog_path = Path::new(&args[1]);
    let branding_path = Path::new(&args[2]);
    let out_dir = Path::new(&args[3]);
    let promo_percent: Option<f64> = args.get(4).and_then(|raw| raw.parse().ok());

    println!("Loading catalog from {}", catalog_path.display());
    let catalog_json = fs::read_to_string(catalog_path)?;
    println!("Loading branding from {}", branding_path.display());
    let branding_json = fs::read_to_string(branding_path)?;

    let asset_base = catalog_path.parent().unwrap_or(Path::new("."));
    let source = Arc::new(FilesystemAssetSource::new(asset_base));
    let studio = MenuStudio::from_json(&catalog_json, &branding_json, source)?;

    let mut request = ExportRequest {
        scope: ExportScope::AllPages,
        preset: PageSizePreset::FullMenu,
        scale: 2.0,
        adjustment: None,
    };
    if let Some(percent) = promo_percent {
        println!("Applying promotional adjustment of {}%", percent);
        request.adjustment = Some(PriceAdjustment::new(percent));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (summary, path) = runtime.block_on(studio.export_into(&request, out_dir))?;

    println!(
        "Exported {}/{} pages ({:?}) to {}",
        summary.embedded_pages,
        summary.total_pages,
        summary.outcome,
        path.display()
    );
    for failure in &summary.failures {
        eprintln!("  page {} skipped: {}", failure.page_index + 1, failure.error);
    }
    Ok(())
}
