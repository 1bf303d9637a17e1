use {
    crate::{
        compiler::{decoder_fragments, encoder_fragments},
        EccError, MatrixStore, Result, Template,
    },
    std::{fs, path::PathBuf},
    tracing::info,
};

/// Message widths the DSLX library ships codes for.
pub const DEFAULT_WIDTHS: [usize; 16] = [
    4, 8, 11, 16, 26, 32, 57, 64, 120, 128, 247, 256, 502, 512, 1013, 1024,
];

/// Required suffix of template file names.
pub const TEMPLATE_EXTENSION: &str = ".x.jinja2";

/// A template and the document rendered from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateJob {
    pub template: PathBuf,
    pub output: PathBuf,
}

/// Everything one generator run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub matrix_dir: PathBuf,
    pub widths: Vec<usize>,
    pub encoder: TemplateJob,
    pub decoder: TemplateJob,
}

impl GenerateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.widths.is_empty() {
            return Err(EccError::InvalidArgument(
                "at least one message width is required".to_string(),
            ));
        }
        if let Some(width) = self.widths.iter().find(|&&width| width == 0) {
            return Err(EccError::InvalidArgument(format!(
                "k must be positive, got {width}"
            )));
        }
        for job in [&self.encoder, &self.decoder] {
            let name = job.template.to_string_lossy();
            if !name.ends_with(TEMPLATE_EXTENSION) {
                return Err(EccError::InvalidArgument(format!(
                    "File '{name}' must have the extension {TEMPLATE_EXTENSION}"
                )));
            }
        }
        Ok(())
    }
}

/// Load every code, render both documents in memory, then write them.
///
/// Nothing is written unless every width loaded and both documents rendered.
pub fn generate(config: &GenerateConfig) -> Result<()> {
    config.validate()?;

    let codes = MatrixStore::new(&config.matrix_dir).load(&config.widths)?;

    let encoder = Template::read(&config.encoder.template)?
        .render(&encoder_fragments(&codes, &config.widths)?);
    let decoder = Template::read(&config.decoder.template)?
        .render(&decoder_fragments(&codes, &config.widths)?);

    for (job, document) in [(&config.encoder, encoder), (&config.decoder, decoder)] {
        fs::write(&job.output, document).map_err(|e| EccError::io(&job.output, e))?;
        info!(output = %job.output.display(), "wrote document");
    }
    Ok(())
}
