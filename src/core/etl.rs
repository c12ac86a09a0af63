use crate::core::Pipeline;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub leads_exported: usize,
    /// 沒有任何符合條件的商家時為 None
    pub output_path: Option<String>,
}

impl RunSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        tracing::info!("Starting lead collection at {}", started_at.to_rfc3339());

        // Extract
        let leads = self.pipeline.extract().await?;
        tracing::info!("Collected {} unique leads", leads.len());

        // Transform
        let transformed = self.pipeline.transform(leads).await?;
        let leads_exported = transformed.rows.len();

        // Load
        let output_path = self.pipeline.load(transformed).await?;

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            leads_exported,
            output_path,
        };
        tracing::info!(
            "Finished in {}s, {} leads exported",
            summary.elapsed().num_seconds(),
            summary.leads_exported
        );

        Ok(summary)
    }
}
