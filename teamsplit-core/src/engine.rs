//! Team assignment engine
//!
//! A four-phase greedy allocator. Each phase only seats players that no
//! earlier phase touched, and a seated player is never moved again.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: assign() - orchestration
//! - Level 2: seat_required(), seat_preferred_backline(),
//!   seat_remaining_preferred(), seat_flexible()
//! - Level 3: seat_balanced(), select()
//! - Level 4: Team, SeatLedger, sorting utilities
//!
//! Priority and position are enums, so the engine trusts its input; rows
//! with bad codes are filtered out by the roster loader.

use rustc_hash::FxHashSet;

use crate::config::AssignConfig;
use crate::error::AssignError;
use crate::player::{Player, Position, Priority};

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// One team under construction, or a finished team once the engine returns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Team {
    members: Vec<Player>,
    score: u64,
}

impl Team {
    /// Members in the order they were seated
    pub fn members(&self) -> &[Player] {
        &self.members
    }

    /// Sum of member power
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Mean member power, 0.0 for an empty team
    pub fn average(&self) -> f64 {
        if self.members.is_empty() {
            0.0
        } else {
            self.score as f64 / self.members.len() as f64
        }
    }

    pub fn has_backline(&self) -> bool {
        self.members.iter().any(Player::is_backline)
    }

    fn fits(&self, player: &Player, power_cap: u64) -> bool {
        self.score + u64::from(player.power) <= power_cap
    }

    fn seat(&mut self, player: &Player) {
        self.score += u64::from(player.power);
        self.members.push(player.clone());
    }
}

/// Result of a run: the partition plus everyone who could not be seated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub teams: Vec<Team>,
    pub unassigned: Vec<Player>,
    pub power_cap: u64,
}

impl Assignment {
    /// Per-team scores in team order
    pub fn scores(&self) -> Vec<u64> {
        self.teams.iter().map(Team::score).collect()
    }

    /// Number of players placed on a team
    pub fn seated_count(&self) -> usize {
        self.teams.iter().map(Team::len).sum()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Partition `players` into `config.team_count` teams.
///
/// Runs four phases in order:
/// 1. Required players, round-robin, no cap
/// 2. One preferred backliner for each team lacking a backliner
/// 3. Remaining preferred players onto the lowest-scoring team that fits
/// 4. Flexible players, same rule as phase 3
///
/// Players that fit nowhere are returned in `Assignment::unassigned`
/// rather than treated as an error.
///
/// # Errors
/// `InvalidTeamCount` if `team_count` is zero, `EmptyRoster` if there are
/// no players.
pub fn assign(players: &[Player], config: &AssignConfig) -> Result<Assignment, AssignError> {
    config.validate()?;
    if players.is_empty() {
        return Err(AssignError::EmptyRoster);
    }

    let mut teams = vec![Team::default(); config.team_count];
    let mut ledger = SeatLedger::default();
    let mut unassigned = Vec::new();

    seat_required(players, &mut teams, &mut unassigned);
    seat_preferred_backline(players, &mut teams, &mut ledger);
    seat_remaining_preferred(players, &mut teams, &mut ledger, config.power_cap, &mut unassigned);
    seat_flexible(players, &mut teams, config.power_cap, &mut unassigned);

    Ok(Assignment {
        teams,
        unassigned,
        power_cap: config.power_cap,
    })
}

/// Partition with the default power cap
pub fn assign_teams(players: &[Player], team_count: usize) -> Result<Assignment, AssignError> {
    assign(players, &AssignConfig::new(team_count))
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Phase 1: seat every required frontliner round-robin, strongest first,
/// then fill the teams the frontliners left open with required
/// backliners, weakest first.
///
/// Frontliners wrap onto low-index teams when there are more of them than
/// teams. Backliners only get the slots after the last frontliner; any
/// left over are reported unassigned.
fn seat_required(players: &[Player], teams: &mut [Team], unassigned: &mut Vec<Player>) {
    let team_count = teams.len();

    let mut front = select(players, Priority::Required, Some(Position::Frontline));
    let mut back = select(players, Priority::Required, Some(Position::Backline));
    sort_by_power_desc(&mut front);
    sort_by_power_asc(&mut back);

    for (i, player) in front.iter().enumerate() {
        teams[i % team_count].seat(player);
    }

    let open_slots = team_count.saturating_sub(front.len());
    for (j, player) in back.iter().enumerate() {
        if j < open_slots {
            teams[front.len() + j].seat(player);
        } else {
            unassigned.push((*player).clone());
        }
    }

    tracing::debug!(
        "Phase 1: seated {} required frontline, {} required backline",
        front.len(),
        back.len().min(open_slots)
    );
}

/// Phase 2: give each team without a backliner the weakest unused
/// preferred backliner.
fn seat_preferred_backline<'a>(
    players: &'a [Player],
    teams: &mut [Team],
    ledger: &mut SeatLedger<'a>,
) {
    let mut backline = select(players, Priority::Preferred, Some(Position::Backline));
    sort_by_power_asc(&mut backline);

    let mut seated = 0;
    for team in teams.iter_mut() {
        if team.has_backline() {
            continue;
        }
        if let Some(player) = backline.iter().copied().find(|p| !ledger.contains(p)) {
            team.seat(player);
            ledger.record(player);
            seated += 1;
        }
    }

    tracing::debug!("Phase 2: seated {} preferred backline", seated);
}

/// Phase 3: strongest-first placement of the preferred players phase 2
/// did not seat.
fn seat_remaining_preferred<'a>(
    players: &'a [Player],
    teams: &mut [Team],
    ledger: &mut SeatLedger<'a>,
    power_cap: u64,
    unassigned: &mut Vec<Player>,
) {
    let mut preferred = select(players, Priority::Preferred, None);
    sort_by_power_desc(&mut preferred);

    let mut seated = 0;
    for player in preferred {
        if ledger.contains(player) {
            continue;
        }
        if seat_balanced(teams, player, power_cap).is_some() {
            ledger.record(player);
            seated += 1;
        } else {
            unassigned.push(player.clone());
        }
    }

    tracing::debug!("Phase 3: seated {} remaining preferred", seated);
}

/// Phase 4: strongest-first placement of every flexible player.
fn seat_flexible(players: &[Player], teams: &mut [Team], power_cap: u64, unassigned: &mut Vec<Player>) {
    let mut flexible = select(players, Priority::Flexible, None);
    sort_by_power_desc(&mut flexible);

    let mut seated = 0;
    for player in flexible {
        if seat_balanced(teams, player, power_cap).is_some() {
            seated += 1;
        } else {
            unassigned.push(player.clone());
        }
    }

    tracing::debug!("Phase 4: seated {} flexible", seated);
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Seat `player` on the lowest-scoring team that stays within the cap.
///
/// Teams are visited in ascending score order, lower index first on ties.
/// Returns the chosen team index, or `None` if no team has room.
fn seat_balanced(teams: &mut [Team], player: &Player, power_cap: u64) -> Option<usize> {
    let target = teams_by_score(teams)
        .into_iter()
        .find(|&i| teams[i].fits(player, power_cap))?;
    teams[target].seat(player);
    Some(target)
}

/// Players of the given tier, optionally restricted to one position, in
/// roster order.
fn select(players: &[Player], priority: Priority, position: Option<Position>) -> Vec<&Player> {
    players
        .iter()
        .filter(|p| p.priority == priority)
        .filter(|p| position.map_or(true, |pos| p.position == pos))
        .collect()
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Names of players seated by the preferred phases.
#[derive(Debug, Default)]
struct SeatLedger<'a> {
    names: FxHashSet<&'a str>,
}

impl<'a> SeatLedger<'a> {
    fn record(&mut self, player: &'a Player) {
        self.names.insert(player.name.as_str());
    }

    fn contains(&self, player: &Player) -> bool {
        self.names.contains(player.name.as_str())
    }
}

/// Team indices ordered by current score. The sort is stable, so equal
/// scores keep index order.
fn teams_by_score(teams: &[Team]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..teams.len()).collect();
    order.sort_by_key(|&i| teams[i].score);
    order
}

// Both sorts are stable: equal power keeps roster order.
fn sort_by_power_desc(players: &mut [&Player]) {
    players.sort_by(|a, b| b.power.cmp(&a.power));
}

fn sort_by_power_asc(players: &mut [&Player]) {
    players.sort_by_key(|p| p.power);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, power: u32, priority: Priority, position: Position) -> Player {
        Player::new(name, power, priority, position)
    }

    fn required_front(name: &str, power: u32) -> Player {
        player(name, power, Priority::Required, Position::Frontline)
    }

    fn names(team: &Team) -> Vec<&str> {
        team.members().iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_required_frontline_one_per_team() {
        let players = vec![
            required_front("d", 70),
            required_front("a", 100),
            required_front("c", 80),
            required_front("b", 90),
        ];

        let result = assign_teams(&players, 4).unwrap();

        assert_eq!(result.team_count(), 4);
        assert_eq!(result.scores(), vec![100, 90, 80, 70]);
        for team in &result.teams {
            assert_eq!(team.len(), 1);
        }
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_required_frontline_wraps_round_robin() {
        let players: Vec<Player> = [100, 90, 80, 70, 60]
            .iter()
            .enumerate()
            .map(|(i, &power)| required_front(&format!("p{}", i), power))
            .collect();

        let result = assign_teams(&players, 4).unwrap();

        assert_eq!(names(&result.teams[0]), vec!["p0", "p4"]);
        assert_eq!(result.scores(), vec![160, 90, 80, 70]);
    }

    #[test]
    fn test_required_frontline_ignores_cap() {
        let players = vec![required_front("a", 9000), required_front("b", 5000)];
        let config = AssignConfig::new(1);

        let result = assign(&players, &config).unwrap();

        assert_eq!(result.scores(), vec![14_000]);
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_required_backline_fills_open_slots_weakest_first() {
        let players = vec![
            required_front("f1", 500),
            player("b_strong", 400, Priority::Required, Position::Backline),
            player("b_weak", 100, Priority::Required, Position::Backline),
            player("b_mid", 250, Priority::Required, Position::Backline),
        ];

        let result = assign_teams(&players, 3).unwrap();

        assert_eq!(names(&result.teams[0]), vec!["f1"]);
        assert_eq!(names(&result.teams[1]), vec!["b_weak"]);
        assert_eq!(names(&result.teams[2]), vec!["b_mid"]);
        assert_eq!(result.unassigned.len(), 1);
        assert_eq!(result.unassigned[0].name, "b_strong");
    }

    #[test]
    fn test_required_backline_dropped_when_frontline_fills_all_teams() {
        let players = vec![
            required_front("f1", 500),
            required_front("f2", 400),
            player("b1", 100, Priority::Required, Position::Backline),
        ];

        let result = assign_teams(&players, 2).unwrap();

        assert_eq!(result.seated_count(), 2);
        assert_eq!(result.unassigned, vec![players[2].clone()]);
    }

    #[test]
    fn test_oversized_player_left_unassigned() {
        for priority in [Priority::Preferred, Priority::Flexible] {
            let players = vec![player("big", 11_000, priority, Position::Frontline)];

            let result = assign_teams(&players, 2).unwrap();

            assert!(result.teams.iter().all(Team::is_empty));
            assert_eq!(result.scores(), vec![0, 0]);
            assert_eq!(result.unassigned.len(), 1);
        }
    }

    #[test]
    fn test_preferred_backline_one_per_team_ascending() {
        let players = vec![
            player("strong", 80, Priority::Preferred, Position::Backline),
            player("weak", 50, Priority::Preferred, Position::Backline),
        ];

        let result = assign_teams(&players, 2).unwrap();

        assert_eq!(names(&result.teams[0]), vec!["weak"]);
        assert_eq!(names(&result.teams[1]), vec!["strong"]);
    }

    #[test]
    fn test_preferred_backline_skips_team_with_backliner() {
        let players = vec![
            required_front("f1", 3000),
            player("rb", 1000, Priority::Required, Position::Backline),
            player("pb1", 200, Priority::Preferred, Position::Backline),
            player("pb2", 300, Priority::Preferred, Position::Backline),
        ];

        let result = assign_teams(&players, 2).unwrap();

        // Team 1 already holds the required backliner, so only team 0
        // takes a phase 2 seat. pb2 is then load-balanced onto team 1.
        assert_eq!(names(&result.teams[0]), vec!["f1", "pb1"]);
        assert_eq!(names(&result.teams[1]), vec!["rb", "pb2"]);
    }

    #[test]
    fn test_remaining_preferred_goes_to_lowest_score() {
        let players: Vec<Player> = [5000, 4000, 3000, 2000]
            .iter()
            .enumerate()
            .map(|(i, &power)| player(&format!("p{}", i), power, Priority::Preferred, Position::Frontline))
            .collect();

        let result = assign_teams(&players, 2).unwrap();

        assert_eq!(names(&result.teams[0]), vec!["p0", "p3"]);
        assert_eq!(names(&result.teams[1]), vec!["p1", "p2"]);
        assert_eq!(result.scores(), vec![7000, 7000]);
    }

    #[test]
    fn test_balanced_placement_respects_cap() {
        let players: Vec<Player> = (0..3)
            .map(|i| player(&format!("p{}", i), 6000, Priority::Preferred, Position::Frontline))
            .collect();

        let result = assign_teams(&players, 2).unwrap();

        assert_eq!(result.scores(), vec![6000, 6000]);
        assert_eq!(result.unassigned.len(), 1);
        assert_eq!(result.unassigned[0].name, "p2");
    }

    #[test]
    fn test_flexible_unassigned_when_no_team_has_room() {
        let players = vec![
            required_front("heavy", 10_300),
            required_front("light", 10_000),
            player("f", 700, Priority::Flexible, Position::Frontline),
            player("g", 300, Priority::Flexible, Position::Frontline),
        ];

        let result = assign_teams(&players, 2).unwrap();

        // f would push even the lighter team to 10700; g still fits it.
        assert_eq!(names(&result.teams[0]), vec!["heavy"]);
        assert_eq!(names(&result.teams[1]), vec!["light", "g"]);
        assert_eq!(result.unassigned.len(), 1);
        assert_eq!(result.unassigned[0].name, "f");
    }

    #[test]
    fn test_cap_is_inclusive() {
        let players = vec![
            required_front("base", 10_000),
            player("edge", 600, Priority::Flexible, Position::Frontline),
        ];

        let result = assign_teams(&players, 1).unwrap();

        assert_eq!(result.scores(), vec![10_600]);
        assert!(result.unassigned.is_empty());
    }

    #[test]
    fn test_tied_scores_prefer_lower_index() {
        let players = vec![player("f", 100, Priority::Flexible, Position::Backline)];

        let result = assign_teams(&players, 3).unwrap();

        assert_eq!(names(&result.teams[0]), vec!["f"]);
    }

    #[test]
    fn test_flexible_placed_after_preferred() {
        let players = vec![
            player("flex", 9000, Priority::Flexible, Position::Frontline),
            player("pref", 1000, Priority::Preferred, Position::Frontline),
        ];
        let config = AssignConfig::new(1);

        let result = assign(&players, &config).unwrap();

        assert_eq!(names(&result.teams[0]), vec!["pref", "flex"]);
        assert_eq!(result.scores(), vec![10_000]);
    }

    #[test]
    fn test_custom_power_cap() {
        let players = vec![
            player("a", 600, Priority::Flexible, Position::Frontline),
            player("b", 500, Priority::Flexible, Position::Frontline),
        ];
        let config = AssignConfig::new(1).with_power_cap(1000);

        let result = assign(&players, &config).unwrap();

        assert_eq!(result.scores(), vec![600]);
        assert_eq!(result.unassigned[0].name, "b");
        assert_eq!(result.power_cap, 1000);
    }

    #[test]
    fn test_zero_teams_rejected() {
        let players = vec![required_front("a", 1)];
        assert_eq!(assign_teams(&players, 0), Err(AssignError::InvalidTeamCount(0)));
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert_eq!(assign_teams(&[], 4), Err(AssignError::EmptyRoster));
    }

    #[test]
    fn test_team_average() {
        let mut team = Team::default();
        assert_eq!(team.average(), 0.0);

        team.seat(&required_front("a", 100));
        team.seat(&required_front("b", 51));
        assert_eq!(team.score(), 151);
        assert!((team.average() - 75.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_assignment_is_deterministic() {
        let players = vec![
            required_front("a", 3000),
            player("b", 2000, Priority::Required, Position::Backline),
            player("c", 2500, Priority::Preferred, Position::Backline),
            player("d", 2500, Priority::Preferred, Position::Frontline),
            player("e", 2500, Priority::Flexible, Position::Frontline),
            player("f", 2500, Priority::Flexible, Position::Backline),
        ];

        let first = assign_teams(&players, 3).unwrap();
        let second = assign_teams(&players, 3).unwrap();

        assert_eq!(first, second);
    }
}
