//! Spreadsheet-backed configuration: cases, options, forms, fixed fields,
//! agents and the history layout.

pub mod records;
pub mod search;
pub mod source;

pub use records::*;
pub use search::search_cases;
pub use source::{DirTableSource, HttpTableSource, Sheet, TableSource, Workbook};

use crate::history::HistorySchema;
use crate::template::FieldSpec;

/// Everything loaded from the workbooks. Rebuilt as a whole on reload.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub cases: Vec<CaseItem>,
    pub options: Vec<OptionRecord>,
    pub option_fields: Vec<OptionFieldRecord>,
    pub forms: FormsMapping,
    /// Forms submitted in the background when copying
    pub hidden_forms: FormsMapping,
    pub fixed_fields: Vec<FixedFieldDef>,
    pub agents: AgentDirectory,
    pub history_schema: HistorySchema,
}

impl Catalog {
    /// Load every workbook. Missing or broken workbooks leave their part empty.
    pub async fn load(source: &dyn TableSource) -> Self {
        let mut catalog = Catalog::default();

        if let Some(wb) = fetch(source, "data").await {
            catalog.cases = first_sheet_records(&wb)
                .into_iter()
                .filter_map(CaseItem::from_record)
                .collect();
        }

        if let Some(wb) = fetch(source, "options").await {
            catalog.options = sheet_at(&wb, 0)
                .iter()
                .filter_map(OptionRecord::from_record)
                .collect();
            catalog.option_fields = sheet_at(&wb, 1)
                .iter()
                .filter_map(OptionFieldRecord::from_record)
                .collect();
        }

        if let Some(wb) = fetch(source, "forms_mapping").await {
            catalog.forms = FormsMapping {
                forms: sheet_at(&wb, 0).iter().filter_map(FormTarget::from_record).collect(),
                mapping: sheet_at(&wb, 1)
                    .iter()
                    .filter_map(FormMappingRecord::from_record)
                    .collect(),
            };
        }

        if let Some(wb) = fetch(source, "oculto").await {
            catalog.hidden_forms = FormsMapping {
                forms: sheet_at(&wb, 0).iter().filter_map(FormTarget::from_record).collect(),
                mapping: sheet_at(&wb, 1)
                    .iter()
                    .filter_map(FormMappingRecord::from_record_silent)
                    .collect(),
            };
        }

        if let Some(wb) = fetch(source, "fijos").await {
            catalog.fixed_fields = first_sheet_records(&wb)
                .iter()
                .filter_map(FixedFieldDef::from_record)
                .collect();
        }

        if let Some(wb) = fetch(source, "agent").await {
            if let Some(sheet) = wb.sheet(0) {
                catalog.agents = AgentDirectory::from_sheet(sheet);
            }
        }

        if let Some(wb) = fetch(source, "historico").await {
            catalog.history_schema = HistorySchema::from_records(&first_sheet_records(&wb));
        }

        tracing::info!(
            "Catalog loaded: {} cases, {} options, {} forms, {} fixed fields, {} agents",
            catalog.cases.len(),
            catalog.options.len(),
            catalog.forms.forms.len(),
            catalog.fixed_fields.len(),
            catalog.agents.len()
        );
        catalog
    }

    pub fn case(&self, id: &str) -> Option<&CaseItem> {
        self.cases.iter().find(|c| c.id == id)
    }

    pub fn option(&self, option_key: &str) -> Option<&OptionRecord> {
        self.options.iter().find(|o| o.option_key == option_key)
    }

    /// Fields of one option, in sheet order.
    pub fn option_field_specs(&self, option_key: &str) -> Vec<FieldSpec> {
        self.option_fields
            .iter()
            .filter(|f| f.option_key == option_key)
            .map(OptionFieldRecord::to_field_spec)
            .collect()
    }

    pub fn fixed_field_specs(&self) -> Vec<FieldSpec> {
        self.fixed_fields
            .iter()
            .map(FixedFieldDef::to_field_spec)
            .collect()
    }
}

async fn fetch(source: &dyn TableSource, name: &str) -> Option<Workbook> {
    match source.fetch_workbook(name).await {
        Ok(Some(wb)) => Some(wb),
        Ok(None) => {
            tracing::debug!("Workbook '{}' not present", name);
            None
        }
        Err(e) => {
            tracing::warn!("Failed to load workbook '{}': {}", name, e);
            None
        }
    }
}

fn sheet_at(wb: &Workbook, idx: usize) -> Vec<Record> {
    wb.sheet(idx).map(sheet_records).unwrap_or_default()
}

fn first_sheet_records(wb: &Workbook) -> Vec<Record> {
    sheet_at(wb, 0)
}
