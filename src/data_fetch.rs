use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Number;

use crate::config::{AppConfig, DataSource};
use crate::http_cache::HttpCache;
use crate::http_client::http_client;
use crate::state::{DatasetKey, League, ManagerRecord, PlayerRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDataset {
    pub players: Vec<PlayerRecord>,
    pub current_gameweek: u32,
}

pub fn manager_dataset_name(template: &str, key: DatasetKey) -> String {
    template
        .replace("{league_id}", &key.league_id.to_string())
        .replace("{gameweek}", &key.gameweek.to_string())
}

#[derive(Debug)]
pub struct ArtifactSource {
    source: DataSource,
    player_file: String,
    leagues_file: String,
    manager_file_template: String,
    timeout: Duration,
    cache: HttpCache,
}

impl ArtifactSource {
    pub fn from_config(config: &AppConfig, cache: HttpCache) -> Self {
        Self {
            source: config.source.clone(),
            player_file: config.player_file.clone(),
            leagues_file: config.leagues_file.clone(),
            manager_file_template: config.manager_file_template.clone(),
            timeout: config.http_timeout,
            cache,
        }
    }

    pub fn read(&mut self, name: &str) -> Result<String> {
        match &self.source {
            DataSource::Http { base_url } => {
                let client = http_client(self.timeout)?;
                let url = format!("{base_url}/{name}");
                self.cache.fetch_text(client, &url)
            }
            DataSource::Dir { root } => {
                let path: PathBuf = root.join(name);
                fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
            }
        }
    }

    pub fn load_players(&mut self) -> Result<PlayerDataset> {
        let name = self.player_file.clone();
        let body = self.read(&name)?;
        parse_player_data_json(&body)
    }

    pub fn load_leagues(&mut self) -> Result<Vec<League>> {
        let name = self.leagues_file.clone();
        let body = self.read(&name)?;
        parse_leagues_json(&body)
    }

    pub fn load_managers(&mut self, key: DatasetKey) -> Result<Vec<ManagerRecord>> {
        let name = manager_dataset_name(&self.manager_file_template, key);
        let body = self.read(&name)?;
        parse_manager_data_json(&body).with_context(|| format!("in {name}"))
    }
}

#[derive(Debug, Deserialize)]
struct PlayerDataResponse {
    #[serde(default)]
    player_data: HashMap<String, RawPlayer>,
    #[serde(default)]
    current_gameweek: u32,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    web_name: String,
    #[serde(default)]
    now_cost: f64,
}

pub fn parse_player_data_json(raw: &str) -> Result<PlayerDataset> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(PlayerDataset {
            players: Vec::new(),
            current_gameweek: 0,
        });
    }
    let data: PlayerDataResponse =
        serde_json::from_str(trimmed).context("invalid player data json")?;
    let mut players = data
        .player_data
        .into_iter()
        .filter_map(|(id, player)| {
            let id = id.trim().parse::<u32>().ok()?;
            Some(PlayerRecord {
                id,
                web_name: player.web_name,
                now_cost: player.now_cost,
            })
        })
        .collect::<Vec<_>>();
    players.sort_by_key(|player| player.id);
    Ok(PlayerDataset {
        players,
        current_gameweek: data.current_gameweek,
    })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LeagueList {
    Wrapped { leagues: Vec<League> },
    Bare(Vec<League>),
}

pub fn parse_leagues_json(raw: &str) -> Result<Vec<League>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let list: LeagueList = serde_json::from_str(trimmed).context("invalid league list json")?;
    Ok(match list {
        LeagueList::Wrapped { leagues } => leagues,
        LeagueList::Bare(leagues) => leagues,
    })
}

/// Wire form of a projection record. Grouped artifacts use the plural
/// fields; older single-manager artifacts use the singular ones. Numeric
/// stats may arrive as floats when the exporter saw missing values.
#[derive(Debug, Deserialize)]
struct RawManagerRecord {
    #[serde(default)]
    manager_names: Vec<String>,
    #[serde(default)]
    manager_name: Option<String>,
    #[serde(default)]
    team_names: Vec<String>,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    team_ids: Vec<u32>,
    #[serde(default)]
    team_id: Option<u32>,
    #[serde(default)]
    manager_count: Option<u32>,
    #[serde(default)]
    captain: Option<Number>,
    #[serde(default)]
    vice_captain: Option<Number>,
    #[serde(default)]
    total_points: Option<Number>,
    #[serde(default)]
    rank: Option<Number>,
    #[serde(default)]
    gw_points: Option<Number>,
    #[serde(default)]
    gw_rank: Option<Number>,
    #[serde(default)]
    active_chip: Option<String>,
    #[serde(default)]
    players_owned: Vec<u32>,
    #[serde(default)]
    tsne_x: Option<f64>,
    #[serde(default)]
    tsne_y: Option<f64>,
    #[serde(default)]
    pca_x: Option<f64>,
    #[serde(default)]
    pca_y: Option<f64>,
}

impl From<RawManagerRecord> for ManagerRecord {
    fn from(raw: RawManagerRecord) -> Self {
        let mut manager_names = raw.manager_names;
        if manager_names.is_empty() {
            manager_names.extend(raw.manager_name);
        }
        let mut team_names = raw.team_names;
        if team_names.is_empty() {
            team_names.extend(raw.team_name);
        }
        let mut team_ids = raw.team_ids;
        if team_ids.is_empty() {
            team_ids.extend(raw.team_id);
        }
        let manager_count = raw
            .manager_count
            .unwrap_or_else(|| team_ids.len().max(manager_names.len()) as u32)
            .max(1);

        ManagerRecord {
            manager_names,
            team_names,
            team_ids,
            manager_count,
            captain: number_to_u32(raw.captain),
            vice_captain: number_to_u32(raw.vice_captain),
            rank: number_to_i64(raw.rank),
            total_points: number_to_i64(raw.total_points),
            gw_points: number_to_i64(raw.gw_points).unwrap_or(0),
            gw_rank: number_to_i64(raw.gw_rank),
            active_chip: raw.active_chip.filter(|chip| !chip.is_empty()),
            players_owned: raw.players_owned,
            tsne: (raw.tsne_x.unwrap_or(0.0), raw.tsne_y.unwrap_or(0.0)),
            pca: (raw.pca_x.unwrap_or(0.0), raw.pca_y.unwrap_or(0.0)),
        }
    }
}

pub fn parse_manager_data_json(raw: &str) -> Result<Vec<ManagerRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let records: Vec<RawManagerRecord> =
        serde_json::from_str(trimmed).context("invalid manager data json")?;
    Ok(records.into_iter().map(ManagerRecord::from).collect())
}

fn number_to_i64(value: Option<Number>) -> Option<i64> {
    let value = value?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|v| v.is_finite()).map(|v| v.round() as i64))
}

fn number_to_u32(value: Option<Number>) -> Option<u32> {
    number_to_i64(value).and_then(|v| u32::try_from(v).ok())
}
