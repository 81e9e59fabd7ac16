//! Binds parsed commands to core services and prints JSON responses.

use crate::cli::{AssetCommand, CategoryCommand, Command, DecisionArgs, IndicatorCommand};
use anyhow::{Context, Result};
use invest_core::{
    core_version, load_decision_board, AssetPatch, AssetService, CategoryPatch, CategoryService,
    ConnectionPool, DecisionFilter, Entity, EventLog, IndicatorPatch, IndicatorService, Lookup,
    NewAsset, NewCategory, NewIndicator, RecordId, SqliteAssetRepository,
    SqliteCategoryRepository, SqliteIndicatorRepository,
};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// Services for all three record kinds over one pool.
pub struct App<'pool> {
    assets: AssetService<'pool>,
    categories: CategoryService<'pool>,
    indicators: IndicatorService<'pool>,
}

impl<'pool> App<'pool> {
    /// Builds every repository and service; fails if any table is missing.
    pub fn try_new(pool: &'pool ConnectionPool, log: &EventLog) -> Result<Self> {
        Ok(Self {
            assets: AssetService::new(
                SqliteAssetRepository::try_new(pool, log).context("asset repository")?,
                log,
            ),
            categories: CategoryService::new(
                SqliteCategoryRepository::try_new(pool, log).context("category repository")?,
                log,
            ),
            indicators: IndicatorService::new(
                SqliteIndicatorRepository::try_new(pool, log).context("indicator repository")?,
                log,
            ),
        })
    }

    /// Executes one command and writes its JSON response to `out`.
    pub fn execute(&self, command: Command, out: &mut impl Write) -> Result<()> {
        let response = match command {
            Command::Assets(command) => self.assets_command(command),
            Command::Categories(command) => self.categories_command(command),
            Command::Indicators(command) => self.indicators_command(command),
            Command::Decision(args) => self.decision(args),
            Command::Version => json!({ "version": core_version() }),
        };
        serde_json::to_writer_pretty(&mut *out, &response).context("failed to write response")?;
        writeln!(out).context("failed to write response")?;
        Ok(())
    }

    fn assets_command(&self, command: AssetCommand) -> serde_json::Value {
        let assets = &self.assets;
        match command {
            AssetCommand::List => to_json(assets.list()),
            AssetCommand::Get { id } => lookup_json(assets.lookup(id), id),
            AssetCommand::Create {
                name,
                kind,
                category_id,
            } => {
                assets.create(&NewAsset::new(name.as_str(), kind, category_id));
                message(format!("Asset '{name}' created successfully"))
            }
            AssetCommand::Update {
                id,
                name,
                kind,
                category_id,
            } => {
                assets.update(
                    id,
                    &AssetPatch {
                        name,
                        kind,
                        category_id,
                    },
                );
                message(format!("Asset ID {id} updated successfully"))
            }
            AssetCommand::Delete { id } => {
                assets.delete(id);
                message(format!("Asset ID {id} deleted successfully"))
            }
            AssetCommand::ByCategory { category_id } => {
                to_json(assets.list_by_category(category_id))
            }
            AssetCommand::ByType { kind } => to_json(assets.list_by_type(&kind)),
            AssetCommand::Search { name } => to_json(assets.search_by_name(&name)),
        }
    }

    fn categories_command(&self, command: CategoryCommand) -> serde_json::Value {
        let categories = &self.categories;
        match command {
            CategoryCommand::List => to_json(categories.list()),
            CategoryCommand::Get { id } => lookup_json(categories.lookup(id), id),
            CategoryCommand::Create { name, description } => {
                categories.create(&NewCategory::new(name.as_str(), description));
                message(format!("Category '{name}' created successfully"))
            }
            CategoryCommand::Update {
                id,
                name,
                description,
            } => {
                categories.update(id, &CategoryPatch { name, description });
                message(format!("Category ID {id} updated successfully"))
            }
            CategoryCommand::Delete { id } => {
                categories.delete(id);
                message(format!("Category ID {id} deleted successfully"))
            }
            CategoryCommand::ByName { name } => to_json(categories.find_by_name(&name)),
            CategoryCommand::Search { name } => to_json(categories.search_by_name(&name)),
        }
    }

    fn indicators_command(&self, command: IndicatorCommand) -> serde_json::Value {
        let indicators = &self.indicators;
        match command {
            IndicatorCommand::List => to_json(indicators.list()),
            IndicatorCommand::Get { id } => lookup_json(indicators.lookup(id), id),
            IndicatorCommand::Create {
                name,
                value,
                asset_id,
            } => {
                indicators.create(&NewIndicator::new(name.as_str(), value, asset_id));
                message(format!("Indicator '{name}' created successfully"))
            }
            IndicatorCommand::Update {
                id,
                name,
                value,
                asset_id,
            } => {
                indicators.update(
                    id,
                    &IndicatorPatch {
                        name,
                        value,
                        asset_id,
                    },
                );
                message(format!("Indicator ID {id} updated successfully"))
            }
            IndicatorCommand::Delete { id } => {
                indicators.delete(id);
                message(format!("Indicator ID {id} deleted successfully"))
            }
            IndicatorCommand::ByAsset { asset_id } => to_json(indicators.list_by_asset(asset_id)),
            IndicatorCommand::Search { name } => to_json(indicators.search_by_name(&name)),
            IndicatorCommand::ByValue { min, max } => {
                to_json(indicators.list_by_value_range(min, max))
            }
        }
    }

    fn decision(&self, args: DecisionArgs) -> serde_json::Value {
        let filter = DecisionFilter {
            asset_ids: args.asset_ids,
            category_ids: args.category_ids,
        };
        to_json(load_decision_board(
            &self.assets,
            &self.categories,
            &self.indicators,
            &filter,
        ))
    }
}

fn message(text: String) -> serde_json::Value {
    json!({ "message": text })
}

fn lookup_json<E: Entity + Serialize>(lookup: Lookup<E>, id: RecordId) -> serde_json::Value {
    match lookup {
        Lookup::Found(record) => to_json(record),
        Lookup::NotFound => json!({
            "error": format!("{} with ID {id} not found", capitalize(E::LABEL))
        }),
        Lookup::StoreError(err) => json!({
            "error": format!("failed to load {} {id}: {err}", E::LABEL)
        }),
    }
}

fn to_json(value: impl Serialize) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|err| json!({ "error": err.to_string() }))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
