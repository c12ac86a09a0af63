use crate::core::export::render_csv;
use crate::core::places::PlacesClient;
use crate::core::search::{pause, LeadSearcher};
use crate::core::{ConfigProvider, LeadBook, Pipeline, PlacesApi, Storage, TransformResult};
use crate::domain::model::{LeadRow, SearchFilter};
use crate::utils::error::Result;
use std::path::Path;

pub struct LeadPipeline<S: Storage, C: ConfigProvider, A: PlacesApi = PlacesClient> {
    storage: S,
    config: C,
    searcher: LeadSearcher<A>,
}

impl<S: Storage, C: ConfigProvider> LeadPipeline<S, C, PlacesClient> {
    pub fn new(storage: S, config: C) -> Self {
        let api = PlacesClient::new(
            config.api_key().to_string(),
            config.search_endpoint().to_string(),
            config.details_endpoint().to_string(),
        );
        Self::with_api(storage, config, api)
    }
}

impl<S: Storage, C: ConfigProvider, A: PlacesApi> LeadPipeline<S, C, A> {
    pub fn with_api(storage: S, config: C, api: A) -> Self {
        let searcher = LeadSearcher::new(
            api,
            config.location(),
            config.radius_meters(),
            config.reputation_filter(),
            config.delays(),
        );
        Self {
            storage,
            config,
            searcher,
        }
    }

    /// 類別在前、關鍵字在後，依清單順序
    fn search_plan(&self) -> Vec<SearchFilter> {
        self.config
            .categories()
            .iter()
            .cloned()
            .map(SearchFilter::Category)
            .chain(self.config.keywords().iter().cloned().map(SearchFilter::Keyword))
            .collect()
    }

    fn output_location(&self) -> String {
        Path::new(self.config.output_path())
            .join(self.config.output_file())
            .to_string_lossy()
            .into_owned()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, A: PlacesApi> Pipeline for LeadPipeline<S, C, A> {
    async fn extract(&self) -> Result<LeadBook> {
        let mut all_leads = LeadBook::new();

        for filter in self.search_plan() {
            tracing::info!("🔍 Searching for {}", filter);
            let leads = self.searcher.search(&filter).await?;

            // 跨搜尋合併時，後出現的紀錄覆蓋先前的
            all_leads.merge(leads);
            tracing::info!("Total unique places so far: {}", all_leads.len());

            pause(self.config.delays().between_searches).await;
        }

        Ok(all_leads)
    }

    async fn transform(&self, leads: LeadBook) -> Result<TransformResult> {
        let rows: Vec<LeadRow> = leads.iter().map(|lead| lead.to_row()).collect();
        let csv_output = render_csv(&rows)?;

        tracing::debug!("Rendered {} rows ({} bytes)", rows.len(), csv_output.len());
        Ok(TransformResult { rows, csv_output })
    }

    async fn load(&self, result: TransformResult) -> Result<Option<String>> {
        if result.rows.is_empty() {
            tracing::warn!(
                "No places qualified; {} was not written",
                self.config.output_file()
            );
            return Ok(None);
        }

        self.storage
            .write_file(self.config.output_file(), &result.csv_output)
            .await?;

        let output_path = self.output_location();
        tracing::info!("Saved {} leads to {}", result.rows.len(), output_path);
        Ok(Some(output_path))
    }
}
