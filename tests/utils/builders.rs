use coupe::tournament::{BracketRound, EliminationBracket, LoserBracket, LoserRound, Pool, Slot, Tournament};

// ============================================================================
// Tournament Setup Utilities
// ============================================================================

fn slots(names: &[&str]) -> Vec<Slot> {
    names.iter().map(|name| Slot::parse(name)).collect()
}

pub struct TournamentBuilder {
    tournament: Tournament,
}

impl TournamentBuilder {
    pub fn new() -> Self {
        Self {
            tournament: Tournament::new("Coupe"),
        }
    }

    /// Adds a pool and generates its round-robin.
    pub fn with_pool(mut self, name: &str, teams: &[&str]) -> Self {
        let mut pool = Pool::new(name, slots(teams));
        pool.generate_matches();
        self.tournament.pools.push(pool);
        self
    }

    pub fn with_qualifiers(mut self, pool: &str, to_finals: usize, to_loser_bracket: usize) -> Self {
        if let Some(pool) = self.tournament.pool_mut(pool) {
            pool.qualified_to_finals = to_finals;
            pool.qualified_to_loser_bracket = to_loser_bracket;
        }
        self
    }

    pub fn with_qualification(mut self, team_a: &str, team_b: &str) -> Self {
        self.tournament
            .add_qualification_match(Slot::parse(team_a), Slot::parse(team_b));
        self
    }

    /// Adds a bracket and generates its rounds.
    pub fn with_bracket(mut self, name: &str, rounds: Vec<BracketRound>, teams: &[&str]) -> Self {
        let mut bracket = EliminationBracket::new(name, rounds, slots(teams));
        bracket.generate_matches();
        self.tournament.brackets.push(bracket);
        self
    }

    /// Routes the losers of `bracket` to the loser bracket and regenerates it.
    pub fn routing_losers(mut self, bracket: &str) -> Self {
        if let Some(found) = self
            .tournament
            .brackets
            .iter_mut()
            .find(|candidate| candidate.name == bracket)
        {
            found.loser_to_loser_bracket = true;
        }
        self.tournament
            .regenerate_bracket(bracket)
            .expect("bracket should exist");
        self
    }

    pub fn with_loser_bracket(mut self, name: &str, rounds: Vec<LoserRound>, teams: &[&str]) -> Self {
        let mut loser_bracket = LoserBracket::new(name, rounds, slots(teams));
        loser_bracket.generate_matches();
        self.tournament.loser_brackets.push(loser_bracket);
        self
    }

    /// Sets the points awarded by the bracket match emitting `winner_code`.
    pub fn with_points(mut self, winner_code: &str, winner_points: u32, loser_points: u32) -> Self {
        if let Some(m) = self
            .tournament
            .all_matches_mut()
            .find(|m| m.winner_code.as_deref() == Some(winner_code))
        {
            m.winner_points = Some(winner_points);
            m.loser_points = Some(loser_points);
        }
        self
    }

    pub fn build(self) -> Tournament {
        self.tournament
    }
}
