use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use invoicepress::error::{Error, Result};
use invoicepress::export::{ExportPipeline, ExportRequest};
use invoicepress::model::{InvoiceDocument, Theme};
use invoicepress::render::PreviewHost;
use invoicepress::PREVIEW_ELEMENT_ID;

#[derive(Parser)]
#[command(name = "invoicepress", about = "Render invoice documents to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default placeholder document as JSON
    Sample {
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a JSON invoice document as a PDF
    Export {
        /// Path to the invoice JSON
        input: PathBuf,
        /// Directory the PDF is written into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Override the document theme
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        /// Capture oversampling factor
        #[arg(long, default_value_t = 2)]
        scale: u32,
        /// Also write a PNG of the capture next to the PDF
        #[arg(long)]
        png: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sample { output } => {
            let doc = InvoiceDocument::default();
            let json = serde_json::to_string_pretty(&doc)
                .map_err(|e| Error::ConfigError(e.to_string()))?;
            match output {
                Some(path) => fs::write(path, json)?,
                None => println!("{}", json),
            }
            Ok(())
        }
        Commands::Export {
            input,
            out_dir,
            theme,
            scale,
            png,
        } => {
            let raw = fs::read_to_string(&input)?;
            let doc: InvoiceDocument = serde_json::from_str(&raw)
                .map_err(|e| Error::ConfigError(format!("{}: {}", input.display(), e)))?;
            let theme = theme.map(Theme::from).unwrap_or(doc.theme);

            let mut host = PreviewHost::new();
            host.mount(PREVIEW_ELEMENT_ID, &doc, theme);

            let mut pipeline = ExportPipeline::with_defaults().with_scale(scale);
            let request = ExportRequest {
                element_id: PREVIEW_ELEMENT_ID.to_string(),
                invoice_number: doc.invoice_number.clone(),
                theme,
                out_dir: out_dir.clone(),
            };

            if png {
                let bytes = pipeline.capture_png(&host, PREVIEW_ELEMENT_ID, theme)?;
                let png_path = out_dir.join(format!("{}.png", doc.invoice_number));
                fs::write(&png_path, bytes)?;
                println!("wrote {}", png_path.display());
            }

            let path = pipeline.export(&host, &request)?;
            println!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Failed to generate PDF: {}", e);
        std::process::exit(1);
    }
}
