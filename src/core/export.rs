use crate::domain::model::LeadRow;
use crate::utils::error::{EtlError, Result};

/// 沒有資料列時不輸出標頭
pub fn render_csv(rows: &[LeadRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("failed to flush CSV buffer: {}", e.error()),
    })
}
