mod utils;

use coupe::tournament::{
    final_rankings, propagate, ranked_table, resolve, standings_of, BracketRound, LoserRound,
    Slot,
};
use utils::{play, play_pool, TournamentBuilder};

#[test]
fn pool_of_three_ranks_lions_tigers_bears() {
    let mut tournament = TournamentBuilder::new()
        .with_pool("A", &["Lions", "Tigers", "Bears"])
        .build();
    assert_eq!(tournament.pools[0].matches.len(), 3);

    play_pool(&mut tournament, "Lions", "Tigers", 3, 1);
    play_pool(&mut tournament, "Lions", "Bears", 2, 2);
    play_pool(&mut tournament, "Tigers", "Bears", 1, 0);

    let table = standings_of(&tournament.pools[0]);
    let summary: Vec<(String, u32, i64)> = table
        .iter()
        .map(|row| (row.team.to_string(), row.points, row.score_diff))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Lions".to_string(), 4, 2),
            ("Tigers".to_string(), 3, -1),
            ("Bears".to_string(), 1, -1),
        ]
    );
    assert_eq!(resolve("A-1", &tournament), "Lions");
    assert_eq!(resolve("A-3", &tournament), "Bears");
}

#[test]
fn qualification_winner_moves_into_quarterfinal() {
    let mut tournament = TournamentBuilder::new()
        .with_qualification("Eagles", "Hawks")
        .with_bracket("Main", vec![BracketRound::Quarterfinal], &["WQ1", "Owls"])
        .build();

    assert_eq!(resolve("WQ1", &tournament), "WQ1");

    let uuid = tournament.qualification_matches[0].uuid;
    let completed = tournament.record_result(uuid, 2, 0).unwrap().clone();
    assert_eq!(resolve("WQ1", &tournament), "Eagles");

    let propagation = propagate(&completed, &tournament);
    tournament.apply(propagation);

    let quarterfinal = &tournament.brackets[0].matches[0];
    assert_eq!(quarterfinal.team_a, Slot::team("Eagles"));
    assert_eq!(quarterfinal.team_b, Slot::team("Owls"));
}

#[test]
fn tie_in_qualification_leaves_bracket_untouched() {
    let mut tournament = TournamentBuilder::new()
        .with_qualification("Eagles", "Hawks")
        .with_bracket("Main", vec![BracketRound::Quarterfinal], &["WQ1", "Owls"])
        .build();
    let before = tournament.brackets.clone();

    play(&mut tournament, "WQ1", 1, 1);

    assert_eq!(tournament.brackets, before);
    assert_eq!(resolve("WQ1", &tournament), "WQ1");
}

#[test]
fn pools_feed_bracket_and_loser_bracket_through_to_rankings() {
    let mut tournament = TournamentBuilder::new()
        .with_pool("A", &["Lions", "Tigers", "Bears"])
        .with_pool("B", &["Eagles", "Hawks", "Owls"])
        .with_qualifiers("A", 2, 1)
        .with_qualifiers("B", 2, 1)
        .with_bracket(
            "Main",
            vec![
                BracketRound::Semifinal,
                BracketRound::ThirdPlace,
                BracketRound::Final,
            ],
            &["A-1", "B-2", "B-1", "A-2"],
        )
        .with_loser_bracket("Plate", vec![LoserRound::Final], &["A-3", "B-3"])
        .with_points("WF1", 10, 6)
        .with_points("WTP1", 4, 2)
        .with_points("WLBF_1", 1, 0)
        .build();

    let seeds: Vec<Slot> = tournament
        .pools
        .iter()
        .flat_map(|pool| pool.finals_qualifiers())
        .collect();
    assert_eq!(seeds.len(), 4);

    play_pool(&mut tournament, "Lions", "Tigers", 3, 1);
    play_pool(&mut tournament, "Lions", "Bears", 2, 2);
    play_pool(&mut tournament, "Tigers", "Bears", 1, 0);
    play_pool(&mut tournament, "Eagles", "Hawks", 2, 0);
    play_pool(&mut tournament, "Eagles", "Owls", 1, 0);
    play_pool(&mut tournament, "Hawks", "Owls", 3, 1);

    assert_eq!(resolve("B-2", &tournament), "Hawks");
    assert_eq!(resolve("WSF1", &tournament), "WSF1");

    play(&mut tournament, "WSF1", 2, 1);
    play(&mut tournament, "WSF2", 0, 1);

    let last = tournament.brackets[0]
        .matches
        .iter()
        .find(|m| m.winner_code.as_deref() == Some("WF1"))
        .unwrap();
    assert_eq!(last.team_a, Slot::team("Lions"));
    assert_eq!(last.team_b, Slot::team("Tigers"));

    // Semifinal losers are not routed, so the third-place slots keep their
    // codes and are only resolved on demand.
    assert_eq!(resolve("LSF1", &tournament), "Hawks");
    assert_eq!(resolve("LSF2", &tournament), "Eagles");

    play(&mut tournament, "WF1", 1, 3);
    play(&mut tournament, "WTP1", 2, 0);
    play(&mut tournament, "WLBF_1", 1, 0);

    let table = ranked_table(&final_rankings(&tournament));
    let order: Vec<(&str, u32)> = table
        .iter()
        .map(|entry| (entry.team.as_str(), entry.points))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Tigers", 10),
            ("Lions", 6),
            ("Hawks", 4),
            ("Eagles", 2),
            ("Bears", 1),
            ("Owls", 0),
        ]
    );
}

#[test]
fn routed_bracket_losers_fill_the_loser_bracket() {
    let mut tournament = TournamentBuilder::new()
        .with_bracket(
            "Main",
            vec![BracketRound::Semifinal, BracketRound::Final],
            &["Lions", "Tigers", "Bears", "Wolves"],
        )
        .routing_losers("Main")
        .with_loser_bracket("Plate", vec![LoserRound::Final], &["LSF1", "LSF2"])
        .build();

    play(&mut tournament, "WSF1", 0, 2);
    play(&mut tournament, "WSF2", 5, 4);

    let plate = &tournament.loser_brackets[0].matches[0];
    assert_eq!(plate.team_a, Slot::team("Lions"));
    assert_eq!(plate.team_b, Slot::team("Wolves"));

    let last = &tournament.brackets[0].matches[2];
    assert_eq!(last.team_a, Slot::team("Tigers"));
    assert_eq!(last.team_b, Slot::team("Bears"));
}

#[test]
fn each_completion_advances_the_chain_by_one_hop() {
    let mut tournament = TournamentBuilder::new()
        .with_qualification("Eagles", "Hawks")
        .with_qualification("Lions", "Bears")
        .with_bracket(
            "Main",
            vec![BracketRound::Semifinal, BracketRound::Final],
            &["WQ1", "Owls", "WQ2", "Crows"],
        )
        .build();

    play(&mut tournament, "WQ1", 3, 0);
    let semifinal = &tournament.brackets[0].matches[0];
    assert_eq!(semifinal.team_a, Slot::team("Eagles"));

    play(&mut tournament, "WSF1", 2, 0);
    let last = &tournament.brackets[0].matches[2];
    assert_eq!(last.team_a, Slot::team("Eagles"));
    // WQ2 has not been played, so the second semifinal is still open.
    assert_eq!(last.team_b, Slot::parse("WSF2"));
    assert_eq!(resolve("WSF2", &tournament), "WSF2");
}

#[test]
fn reseeding_after_propagation_drops_the_old_seed() {
    let mut tournament = TournamentBuilder::new()
        .with_qualification("Eagles", "Hawks")
        .with_qualification("Lions", "Bears")
        .with_bracket("Main", vec![BracketRound::Quarterfinal], &["WQ1", "Owls"])
        .build();

    play(&mut tournament, "WQ1", 2, 0);
    assert_eq!(tournament.brackets[0].matches[0].team_a, Slot::team("Eagles"));

    tournament.brackets[0].teams = vec![Slot::parse("WQ2"), Slot::team("Owls")];
    tournament.regenerate_bracket("Main").unwrap();
    assert_eq!(tournament.brackets[0].matches[0].team_a, Slot::parse("WQ2"));

    play(&mut tournament, "WQ2", 0, 1);
    assert_eq!(tournament.brackets[0].matches[0].team_a, Slot::team("Bears"));
}
