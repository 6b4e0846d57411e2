//! Generation orchestrator - main workflow coordinator.
//!
//! A run has three phases: load the columns of every entity (one at a time,
//! over the source's single prepared statement), render the artifact, then
//! write it. Nothing is written unless every entity loaded.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codegen::{self, Artifact};
use crate::config::{ArtifactKind, DialectKind, GenConfig};
use crate::core::identifier::validate_column_name;
use crate::core::schema::EntityColumns;
use crate::core::traits::MetadataSource;
use crate::error::{GenError, Result};

/// Generation orchestrator.
pub struct Generator {
    config: GenConfig,
}

/// Per-entity line of the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct EntitySummary {
    pub name: String,
    pub column_count: usize,
}

/// Result of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    /// Database engine the metadata came from.
    pub dialect: DialectKind,

    /// Artifact kind rendered.
    pub artifact: ArtifactKind,

    /// File written, or `None` when printed to stdout.
    pub output: Option<PathBuf>,

    /// Entities in list order.
    pub entities: Vec<EntitySummary>,

    /// Size of the artifact in bytes.
    pub bytes_written: usize,

    /// Whether `scalar Time` was declared.
    pub time_scalar: bool,

    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl GenerationResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Generator {
    /// Create a generator for a validated configuration.
    pub fn new(config: &GenConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Load every configured entity, in order.
    ///
    /// Column names are checked against the identifier rules of the
    /// configured artifact before anything is rendered.
    pub async fn load_entities<S>(&self, source: &mut S) -> Result<Vec<EntityColumns>>
    where
        S: MetadataSource + ?Sized,
    {
        let target = self.config.artifact.identifier_target();
        let mut loaded = Vec::with_capacity(self.config.entities.len());

        for entity in &self.config.entities {
            let columns = source.fetch_columns(entity).await?;
            for column in &columns {
                validate_column_name(&column.name, entity.as_str(), target)?;
                debug!(
                    "{}.{}: {} nullable={} scale={:?}",
                    entity, column.name, column.native_type, column.nullable, column.scale
                );
            }

            if columns.is_empty() {
                warn!(
                    "Entity {} has no columns in schema {}; it may not exist",
                    entity,
                    source.schema()
                );
            } else {
                info!("Loaded {} columns for {}", columns.len(), entity);
            }

            loaded.push(EntityColumns::new(entity.clone(), columns));
        }

        Ok(loaded)
    }

    /// Run the generation.
    pub async fn run<S>(&self, source: &mut S) -> Result<GenerationResult>
    where
        S: MetadataSource + ?Sized,
    {
        let started = Instant::now();
        debug!("Generation config: {:?}", self.config);
        info!(
            "Generating {} artifact for {} entities from {} (schema {})",
            self.config.artifact,
            self.config.entities.len(),
            source.db_type(),
            source.schema()
        );

        let entities = self.load_entities(source).await?;
        let Artifact {
            text,
            uses_time_scalar,
        } = codegen::render(self.config.artifact, &entities);

        let output = if self.config.stdout {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
            None
        } else {
            let path = self.config.output_path();
            write_artifact(path, &text)?;
            info!("Wrote {} bytes to {}", text.len(), path.display());
            Some(path.to_path_buf())
        };

        let result = GenerationResult {
            dialect: self.config.dialect,
            artifact: self.config.artifact,
            output,
            entities: entities
                .iter()
                .map(|e| EntitySummary {
                    name: e.entity.to_string(),
                    column_count: e.columns.len(),
                })
                .collect(),
            bytes_written: text.len(),
            time_scalar: uses_time_scalar,
            duration_seconds: started.elapsed().as_secs_f64(),
        };

        info!(
            "Generation complete: {} entities in {:.3}s",
            result.entities.len(),
            result.duration_seconds
        );

        Ok(result)
    }
}

/// Replace `path` with `text` atomically.
///
/// The text goes to a sibling temp file first, which is then renamed over
/// the target, so readers never see a partial artifact. On Unix the file is
/// created owner read/write only. The temp file is removed on any failure.
pub fn write_artifact(path: &Path, text: &str) -> Result<()> {
    let temp_path = temp_path(path);

    let written = write_private(&temp_path, text.as_bytes())
        .and_then(|()| std::fs::rename(&temp_path, path));
    if let Err(source) = written {
        let _ = std::fs::remove_file(&temp_path);
        return Err(GenError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    // A stale temp file would keep its old permissions
    if path.is_file() {
        std::fs::remove_file(path)?;
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
