//! Decision board read model.
//!
//! # Responsibility
//! - Join indicators with their asset and category names.
//! - Apply the asset/category selection used to compare assets.
//! - Group filtered indicators into one chart per indicator name.
//!
//! # Invariants
//! - Dangling `asset_id`/`category_id` references never fail the build; the
//!   joined names are simply `None`.
//! - The asset selection is applied before the category selection, and an
//!   indicator whose asset is missing never matches a category selection.
//! - Charts keep first-seen indicator name order.

use super::crud_service::CrudService;
use crate::model::asset::Asset;
use crate::model::category::Category;
use crate::model::indicator::Indicator;
use crate::model::RecordId;
use crate::repo::crud::Repository;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Asset/category selection. Empty lists select everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionFilter {
    pub asset_ids: Vec<RecordId>,
    pub category_ids: Vec<RecordId>,
}

/// Asset enriched with its category name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRow {
    #[serde(flatten)]
    pub asset: Asset,
    pub category_name: Option<String>,
}

/// Indicator enriched with its asset and category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    #[serde(flatten)]
    pub indicator: Indicator,
    pub asset_name: Option<String>,
    pub category_id: Option<RecordId>,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
}

/// One bar chart comparing a single indicator across assets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorChart {
    pub indicator: String,
    pub bars: Vec<ChartBar>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecisionBoard {
    pub assets: Vec<AssetRow>,
    pub indicators: Vec<IndicatorRow>,
    pub charts: Vec<IndicatorChart>,
}

/// Builds the board from already-fetched records.
pub fn build_decision_board(
    assets: &[Asset],
    categories: &[Category],
    indicators: &[Indicator],
    filter: &DecisionFilter,
) -> DecisionBoard {
    let category_names: HashMap<RecordId, &str> = categories
        .iter()
        .map(|category| (category.id, category.name.as_str()))
        .collect();
    let assets_by_id: HashMap<RecordId, &Asset> =
        assets.iter().map(|asset| (asset.id, asset)).collect();
    let selected_assets: HashSet<RecordId> = filter.asset_ids.iter().copied().collect();
    let selected_categories: HashSet<RecordId> = filter.category_ids.iter().copied().collect();

    let asset_rows = assets
        .iter()
        .map(|asset| AssetRow {
            asset: asset.clone(),
            category_name: category_names
                .get(&asset.category_id)
                .map(|name| name.to_string()),
        })
        .collect();

    let indicator_rows: Vec<IndicatorRow> = indicators
        .iter()
        .filter(|indicator| {
            selected_assets.is_empty() || selected_assets.contains(&indicator.asset_id)
        })
        .filter(|indicator| {
            selected_categories.is_empty()
                || assets_by_id
                    .get(&indicator.asset_id)
                    .is_some_and(|asset| selected_categories.contains(&asset.category_id))
        })
        .map(|indicator| {
            let asset = assets_by_id.get(&indicator.asset_id);
            let category_id = asset.map(|asset| asset.category_id);
            IndicatorRow {
                indicator: indicator.clone(),
                asset_name: asset.map(|asset| asset.name.clone()),
                category_id,
                category_name: category_id
                    .and_then(|id| category_names.get(&id))
                    .map(|name| name.to_string()),
            }
        })
        .collect();

    let charts = group_charts(&indicator_rows);
    DecisionBoard {
        assets: asset_rows,
        indicators: indicator_rows,
        charts,
    }
}

/// Fetches all three record kinds through their services and builds the board.
///
/// Fetch failures degrade to empty lists, like every other service read.
pub fn load_decision_board<RA, RC, RI>(
    assets: &CrudService<Asset, RA>,
    categories: &CrudService<Category, RC>,
    indicators: &CrudService<Indicator, RI>,
    filter: &DecisionFilter,
) -> DecisionBoard
where
    RA: Repository<Asset>,
    RC: Repository<Category>,
    RI: Repository<Indicator>,
{
    build_decision_board(
        &assets.list(),
        &categories.list(),
        &indicators.list(),
        filter,
    )
}

fn group_charts(rows: &[IndicatorRow]) -> Vec<IndicatorChart> {
    let mut charts: Vec<IndicatorChart> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let bar = ChartBar {
            label: row
                .asset_name
                .clone()
                .unwrap_or_else(|| format!("asset #{}", row.indicator.asset_id)),
            value: row.indicator.value,
        };
        match positions.get(row.indicator.name.as_str()) {
            Some(&index) => charts[index].bars.push(bar),
            None => {
                positions.insert(row.indicator.name.as_str(), charts.len());
                charts.push(IndicatorChart {
                    indicator: row.indicator.name.clone(),
                    bars: vec![bar],
                });
            }
        }
    }

    charts
}

#[cfg(test)]
mod tests {
    use super::{build_decision_board, DecisionFilter};
    use crate::model::asset::Asset;
    use crate::model::category::Category;
    use crate::model::indicator::Indicator;

    fn fixtures() -> (Vec<Asset>, Vec<Category>, Vec<Indicator>) {
        let categories = vec![
            Category {
                id: 1,
                name: "Tech".to_string(),
                description: Some("Technology sector".to_string()),
            },
            Category {
                id: 2,
                name: "Energy".to_string(),
                description: None,
            },
        ];
        let assets = vec![
            Asset {
                id: 1,
                name: "Acme".to_string(),
                kind: "stock".to_string(),
                category_id: 1,
            },
            Asset {
                id: 2,
                name: "Petro".to_string(),
                kind: "stock".to_string(),
                category_id: 2,
            },
            Asset {
                id: 3,
                name: "Orphan".to_string(),
                kind: "bond".to_string(),
                category_id: 99,
            },
        ];
        let indicators = vec![
            Indicator {
                id: 1,
                name: "P/E".to_string(),
                value: 15.2,
                asset_id: 1,
            },
            Indicator {
                id: 2,
                name: "P/E".to_string(),
                value: 8.0,
                asset_id: 2,
            },
            Indicator {
                id: 3,
                name: "ROE".to_string(),
                value: 0.12,
                asset_id: 1,
            },
            Indicator {
                id: 4,
                name: "P/E".to_string(),
                value: 3.0,
                asset_id: 42,
            },
        ];
        (assets, categories, indicators)
    }

    #[test]
    fn empty_filter_keeps_everything_and_tolerates_dangling_references() {
        let (assets, categories, indicators) = fixtures();
        let board =
            build_decision_board(&assets, &categories, &indicators, &DecisionFilter::default());

        assert_eq!(board.assets.len(), 3);
        assert_eq!(board.assets[0].category_name.as_deref(), Some("Tech"));
        assert_eq!(board.assets[2].category_name, None);

        assert_eq!(board.indicators.len(), 4);
        let dangling = &board.indicators[3];
        assert_eq!(dangling.asset_name, None);
        assert_eq!(dangling.category_name, None);

        assert_eq!(board.charts.len(), 2);
        assert_eq!(board.charts[0].indicator, "P/E");
        assert_eq!(board.charts[0].bars.len(), 3);
        assert_eq!(board.charts[0].bars[2].label, "asset #42");
        assert_eq!(board.charts[1].indicator, "ROE");
    }

    #[test]
    fn asset_then_category_selection_narrows_indicators() {
        let (assets, categories, indicators) = fixtures();

        let by_asset = build_decision_board(
            &assets,
            &categories,
            &indicators,
            &DecisionFilter {
                asset_ids: vec![1, 42],
                category_ids: Vec::new(),
            },
        );
        let ids: Vec<_> = by_asset.indicators.iter().map(|row| row.indicator.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);

        let by_both = build_decision_board(
            &assets,
            &categories,
            &indicators,
            &DecisionFilter {
                asset_ids: vec![1, 42],
                category_ids: vec![1],
            },
        );
        let ids: Vec<_> = by_both.indicators.iter().map(|row| row.indicator.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(by_both
            .indicators
            .iter()
            .all(|row| row.category_name.as_deref() == Some("Tech")));
    }

    #[test]
    fn rows_serialize_flat() {
        let (assets, categories, indicators) = fixtures();
        let board =
            build_decision_board(&assets, &categories, &indicators, &DecisionFilter::default());
        let json = serde_json::to_value(&board.indicators[0]).unwrap();
        assert_eq!(json["name"], "P/E");
        assert_eq!(json["asset_name"], "Acme");
        assert_eq!(json["category_name"], "Tech");
    }
}
