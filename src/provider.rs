use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::data_fetch::ArtifactSource;
use crate::state::{Delta, ProviderCommand};

/// Runs fetches on a background thread until the command sender is dropped.
/// Every command produces exactly one result delta so the UI can balance its
/// loading counter.
pub fn spawn_provider(
    mut source: ArtifactSource,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        for cmd in cmd_rx {
            let delta = handle_command(&mut source, cmd);
            if tx.send(delta).is_err() {
                break;
            }
        }
    })
}

pub fn handle_command(source: &mut ArtifactSource, cmd: ProviderCommand) -> Delta {
    match cmd {
        ProviderCommand::LoadPlayers => match source.load_players() {
            Ok(data) => Delta::SetPlayerData {
                players: data.players,
                current_gameweek: data.current_gameweek,
            },
            Err(err) => Delta::PlayerDataFailed(format!("{err:#}")),
        },
        ProviderCommand::LoadLeagues => match source.load_leagues() {
            Ok(leagues) => Delta::SetLeagues(leagues),
            Err(err) => Delta::LeaguesFailed(format!("{err:#}")),
        },
        ProviderCommand::FetchManagers { key, generation } => match source.load_managers(key) {
            Ok(managers) => Delta::SetManagerData {
                key,
                generation,
                managers,
            },
            Err(err) => Delta::ManagerDataFailed {
                key,
                generation,
                error: format!("{err:#}"),
            },
        },
    }
}
