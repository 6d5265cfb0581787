//! Integration tests for tournament setup: bounds checks and the built rosters.

use elimination_scorekeeper::{
    create_tournament, default_team_configs, TeamConfig, TournamentError, TournamentState,
};

#[test]
fn builds_requested_teams_and_players() {
    for num_teams in 2..=4 {
        for players_per_team in [1, 2, 5] {
            let t = create_tournament(num_teams, players_per_team, 3, default_team_configs(num_teams))
                .unwrap();
            assert_eq!(t.teams.len(), num_teams);
            for team in &t.teams {
                assert_eq!(team.players.len(), players_per_team);
                assert!(team.players.iter().all(|p| !p.eliminated && p.active));
                assert_eq!(t.wins_of(team.id), 0);
            }
            assert_eq!(t.current_round, 0);
            assert!(!t.started);
            assert_eq!(t.state, TournamentState::Configured);
        }
    }
}

#[test]
fn rounds_to_win_is_half_the_format_rounded_up() {
    for (format, expected) in [(1, 1), (3, 2), (5, 3), (7, 4)] {
        let t = create_tournament(2, 1, format, default_team_configs(2)).unwrap();
        assert_eq!(t.rounds_to_win, expected);
        assert_eq!(t.name(), format!("Best of {format}"));
    }
}

#[test]
fn players_are_named_after_their_team() {
    let configs = vec![TeamConfig::new("Wolves", "#123456"), TeamConfig::new("Owls", "#654321")];
    let t = create_tournament(2, 2, 3, configs).unwrap();
    assert_eq!(t.teams[0].players[1].name, "Wolves-Player-2");
    assert_eq!(t.teams[1].players[0].name, "Owls-Player-1");
    assert_eq!(t.teams[1].color, "#654321");
}

#[test]
fn rejects_out_of_bounds_configuration() {
    let cases = [
        (1, 2, 3, 1),
        (5, 2, 3, 5),
        (2, 0, 3, 2),
        (2, 65, 3, 2),
        (2, 2, 0, 2),
        (2, 2, 4, 2),
        (3, 2, 3, 2),
    ];
    for (num_teams, players, format, configs) in cases {
        let result = create_tournament(num_teams, players, format, default_team_configs(configs));
        assert!(
            matches!(result, Err(TournamentError::InvalidConfiguration(_))),
            "expected rejection for teams={num_teams} players={players} format={format}"
        );
    }
}
