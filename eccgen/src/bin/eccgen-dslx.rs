//! Renders the DSLX SECDED encoder and decoder libraries from persisted
//! G/H matrices.

use {
    clap::{ArgAction, Parser},
    eccgen::{
        generate,
        logging::{init_logging, LogLevel},
        GenerateConfig, TemplateJob, DEFAULT_WIDTHS,
    },
    std::{path::PathBuf, process::ExitCode},
};

#[derive(Parser, Debug)]
#[command(name = "eccgen-dslx", version, about = "DSLX ECC codegen")]
struct Args {
    /// Directory containing hsiao_G_k<k>.txt and hsiao_H_k<k>.txt matrices.
    #[arg(long)]
    matrix_dir: PathBuf,

    /// Jinja2 DSLX template for the encoder (*.x.jinja2).
    #[arg(long)]
    encoder_template: PathBuf,

    /// Output file for the encoder of every supported code.
    #[arg(long)]
    encoder_output: PathBuf,

    /// Jinja2 DSLX template for the decoder (*.x.jinja2).
    #[arg(long)]
    decoder_template: PathBuf,

    /// Output file for the decoder of every supported code.
    #[arg(long)]
    decoder_output: PathBuf,

    /// Message widths to generate, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_WIDTHS)]
    widths: Vec<usize>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> GenerateConfig {
        GenerateConfig {
            matrix_dir: self.matrix_dir,
            widths: self.widths,
            encoder: TemplateJob {
                template: self.encoder_template,
                output: self.encoder_output,
            },
            decoder: TemplateJob {
                template: self.decoder_template,
                output: self.decoder_output,
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(LogLevel::from_flags(args.verbose, args.quiet));

    match generate(&args.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
