//! Generate Swift/Kotlin/Python bindings from the compiled gpay-mobile library.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use uniffi_bindgen::bindings::{
    KotlinBindingGenerator, PythonBindingGenerator, SwiftBindingGenerator,
};
use uniffi_bindgen::library_mode::generate_bindings;
use uniffi_bindgen::{BindingGenerator, EmptyCrateConfigSupplier};

#[derive(Parser)]
#[command(name = "generate-bindings")]
#[command(about = "Generate UniFFI bindings for gpay-mobile")]
struct Cli {
    /// Compiled library (.dylib, .so or .a)
    #[arg(long, default_value = "../target/release/libgpay_mobile.dylib")]
    library: Utf8PathBuf,

    /// Output language
    #[arg(short = 'l', long = "language", default_value = "swift")]
    language: Language,

    /// Output directory, defaults to `<language>/generated`
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<Utf8PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Language {
    Swift,
    Kotlin,
    Python,
}

impl Language {
    fn name(self) -> &'static str {
        match self {
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Python => "python",
        }
    }
}

fn run<G: BindingGenerator>(
    generator: &G,
    library: &Utf8PathBuf,
    out_dir: &Utf8PathBuf,
) -> anyhow::Result<()> {
    generate_bindings(
        library,
        None,
        generator,
        &EmptyCrateConfigSupplier,
        None,
        out_dir,
        false,
    )?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let out_dir = cli
        .out_dir
        .unwrap_or_else(|| Utf8PathBuf::from(format!("{}/generated", cli.language.name())));

    if !cli.library.exists() {
        anyhow::bail!("Library not found: {}", cli.library);
    }
    std::fs::create_dir_all(&out_dir)?;

    println!("Generating {} bindings...", cli.language.name());
    println!("Library: {}", cli.library);
    println!("Output: {}", out_dir);

    match cli.language {
        Language::Swift => run(&SwiftBindingGenerator, &cli.library, &out_dir)?,
        Language::Kotlin => run(&KotlinBindingGenerator, &cli.library, &out_dir)?,
        Language::Python => run(&PythonBindingGenerator, &cli.library, &out_dir)?,
    }

    println!("✅ Bindings generated successfully!");
    Ok(())
}
