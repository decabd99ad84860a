use umbra::{transform, ChromaMode, OutputFormat};

/// Darken a handful of sample colors in every output format.
///
/// Run with `RUST_LOG=umbra=trace` to see the pipeline's diagnostics.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let samples = [
        "#ffca00",
        "#3178ea",
        "#808080",
        "rgb(255, 228, 223)",
        "oklch(0.9 0.15 150)",
        "not-a-color",
    ];

    for sample in samples {
        let hex = transform(sample, OutputFormat::Hex, ChromaMode::Relative);
        let rgb = transform(sample, OutputFormat::Rgb, ChromaMode::Relative);
        let oklch = transform(sample, OutputFormat::Oklch, ChromaMode::Relative);
        let absolute = transform(sample, OutputFormat::Oklch, ChromaMode::Absolute);

        println!("{sample:>20}  =>  {hex:<9} {rgb:<18} {oklch:<24} (absolute: {absolute})");
    }
}
