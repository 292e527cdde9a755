//! Pipeline orchestration
//!
//! Runs the health, income and education stages (compute, then persist), then
//! the composite stage, which reads the three persisted artifacts back.

use std::fmt;
use std::time::Instant;

use log::info;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::algorithm::{
    compute_composite_index, compute_education_index, compute_health_index, compute_income_index,
};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::models::{COMPOSITE_ARTIFACT, CompositeArtifact, IndexDomain, SubIndexArtifact, SurveyDomain};
use crate::source::DataSource;
use crate::store::{ArtifactStore, read_composite, read_sub_index, write_composite, write_sub_index};
use crate::utils::logging::{
    create_stage_progress_bar, finish_progress_bar, log_stage_complete, log_stage_reused,
    log_stage_start,
};

/// A step of the pipeline, producing one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Health,
    Income,
    Education,
    Composite,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Self; 4] = [Self::Health, Self::Income, Self::Education, Self::Composite];

    /// Name of the artifact the stage writes
    #[must_use]
    pub const fn artifact_name(self) -> &'static str {
        match self {
            Self::Health => IndexDomain::Health.artifact_name(),
            Self::Income => IndexDomain::Income.artifact_name(),
            Self::Education => IndexDomain::Education.artifact_name(),
            Self::Composite => COMPOSITE_ARTIFACT,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => write!(f, "health"),
            Self::Income => write!(f, "income"),
            Self::Education => write!(f, "education"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

/// Index pipeline over a data source and an artifact store
pub struct Pipeline {
    config: PipelineConfig,
    source: Box<dyn DataSource>,
    store: Box<dyn ArtifactStore>,
    pool: ThreadPool,
}

impl Pipeline {
    /// Create a pipeline
    ///
    /// # Errors
    /// `Configuration` when the configuration does not validate or the worker
    /// pool cannot be built.
    pub fn new(
        config: PipelineConfig,
        source: Box<dyn DataSource>,
        store: Box<dyn ArtifactStore>,
    ) -> Result<Self> {
        config.validate()?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("hdi-worker-{i}"))
            .build()
            .map_err(|e| Error::Configuration(format!("Cannot start worker pool: {e}")))?;

        info!(
            "Pipeline for {} over {} with {} workers",
            config.country,
            source.describe(),
            config.workers
        );
        Ok(Self {
            config,
            source,
            store,
            pool,
        })
    }

    /// Artifact store used by the pipeline
    #[must_use]
    pub fn store(&self) -> &dyn ArtifactStore {
        self.store.as_ref()
    }

    /// Run every stage and return the composite index
    pub fn run(&self) -> Result<CompositeArtifact> {
        let start = Instant::now();
        let pb = create_stage_progress_bar(Stage::ALL.len() as u64, self.config.show_progress);

        for stage in Stage::ALL {
            pb.set_message(format!("{stage} index"));
            self.run_stage(stage)?;
            pb.inc(1);
        }
        finish_progress_bar(&pb, Some("Index computed"));

        let composite = read_composite(self.store())?;
        info!(
            "Pipeline finished with {} composite years in {:?}",
            composite.len(),
            start.elapsed()
        );
        Ok(composite)
    }

    /// Run a single stage and persist its artifact
    ///
    /// With `reuse_artifacts` set, a sub-index stage whose artifact is already
    /// in the store is skipped. The composite is always rebuilt from the stored
    /// sub-indices, so it never lags behind a sub-index written after it.
    ///
    /// # Errors
    /// `MissingPrerequisite` when the composite stage runs before its inputs
    /// exist; otherwise any error raised while reading inputs or writing the
    /// artifact.
    pub fn run_stage(&self, stage: Stage) -> Result<()> {
        if self.config.reuse_artifacts
            && stage != Stage::Composite
            && self.store.contains(stage.artifact_name())?
        {
            log_stage_reused(stage.artifact_name());
            return Ok(());
        }

        let start = Instant::now();
        log_stage_start(&stage.to_string(), stage.artifact_name());
        let rows = match stage {
            Stage::Health => self.persist(&self.health()?)?,
            Stage::Income => self.persist(&self.income()?)?,
            Stage::Education => self.persist(&self.education()?)?,
            Stage::Composite => {
                let composite = self.composite()?;
                write_composite(self.store(), &composite)?;
                composite.len()
            }
        };
        log_stage_complete(stage.artifact_name(), rows, start.elapsed());
        Ok(())
    }

    fn persist(&self, artifact: &SubIndexArtifact) -> Result<usize> {
        write_sub_index(self.store(), artifact)?;
        Ok(artifact.len())
    }

    fn health(&self) -> Result<SubIndexArtifact> {
        let life_expectancy = self
            .source
            .indicator_series(&self.config.life_expectancy_code, &self.config.country)?;
        compute_health_index(&life_expectancy)
    }

    fn income(&self) -> Result<SubIndexArtifact> {
        let country = &self.config.country;
        let capita = self
            .source
            .indicator_series(&self.config.gni_capita_code, country)?;
        let constant = self
            .source
            .indicator_series(&self.config.gni_constant_code, country)?;
        let reference = self.source.reference_series(&self.config.reference_series)?;
        let households = self
            .source
            .microdata_batches(SurveyDomain::Household, &|year| self.config.includes_year(year))?;

        self.pool
            .install(|| compute_income_index(&capita, &constant, &reference, &households))
    }

    fn education(&self) -> Result<SubIndexArtifact> {
        let persons = self
            .source
            .microdata_batches(SurveyDomain::Person, &|year| self.config.includes_year(year))?;
        self.pool.install(|| compute_education_index(&persons))
    }

    fn composite(&self) -> Result<CompositeArtifact> {
        let health = read_sub_index(self.store(), IndexDomain::Health)?;
        let income = read_sub_index(self.store(), IndexDomain::Income)?;
        let education = read_sub_index(self.store(), IndexDomain::Education)?;
        compute_composite_index(&health, &income, &education)
    }
}
