use crate::play::coverage::CoverageResponsibility;
use crate::play::route::Route;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Offense,
    Defense,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Fullback,
    Cornerback,
    Safety,
    Linebacker,
    NickelBack,
}

impl PlayerRole {
    pub fn is_offense(&self) -> bool {
        matches!(
            self,
            PlayerRole::Quarterback
                | PlayerRole::RunningBack
                | PlayerRole::WideReceiver
                | PlayerRole::TightEnd
                | PlayerRole::Fullback
        )
    }

    pub fn is_defense(&self) -> bool {
        !self.is_offense()
    }
}

impl Display for PlayerRole {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            PlayerRole::Quarterback => write!(f, "QB"),
            PlayerRole::RunningBack => write!(f, "RB"),
            PlayerRole::WideReceiver => write!(f, "WR"),
            PlayerRole::TightEnd => write!(f, "TE"),
            PlayerRole::Fullback => write!(f, "FB"),
            PlayerRole::Cornerback => write!(f, "CB"),
            PlayerRole::Safety => write!(f, "S"),
            PlayerRole::Linebacker => write!(f, "LB"),
            PlayerRole::NickelBack => write!(f, "NB"),
        }
    }
}

/// One participant in the play. The consuming engine owns the list; this
/// core reads snapshots of it and proposes position/assignment deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayPlayer {
    pub id: u32,
    pub team: Team,
    pub role: PlayerRole,
    pub position: Vector2<f32>,
    pub start_position: Vector2<f32>,
    pub is_eligible: bool,
    pub max_speed: f32, // yards per second
    pub route: Option<Route>,
    pub responsibility: Option<CoverageResponsibility>,
    pub in_motion: bool,
    pub is_blocking: bool,
}

impl PlayPlayer {
    pub fn new(id: u32, team: Team, role: PlayerRole, position: Vector2<f32>) -> Self {
        PlayPlayer {
            id,
            team,
            role,
            position,
            start_position: position,
            is_eligible: team == Team::Offense
                && !matches!(role, PlayerRole::Quarterback)
                && role.is_offense(),
            max_speed: default_max_speed(role),
            route: None,
            responsibility: None,
            in_motion: false,
            is_blocking: false,
        }
    }

    /// Yards gained past the line of scrimmage, positive on the defensive side.
    pub fn depth_beyond_los(&self, los: f32) -> f32 {
        self.position.y - los
    }

    pub fn distance_to(&self, point: Vector2<f32>) -> f32 {
        (self.position - point).norm()
    }

    pub fn is_route_runner(&self) -> bool {
        self.team == Team::Offense && self.is_eligible && self.route.is_some() && !self.is_blocking
    }
}

fn default_max_speed(role: PlayerRole) -> f32 {
    match role {
        PlayerRole::WideReceiver | PlayerRole::Cornerback => 9.5,
        PlayerRole::RunningBack | PlayerRole::Safety | PlayerRole::NickelBack => 9.0,
        PlayerRole::TightEnd | PlayerRole::Linebacker => 8.2,
        PlayerRole::Fullback => 7.8,
        PlayerRole::Quarterback => 8.0,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayPlayerCollection {
    pub players: Vec<PlayPlayer>,
}

impl PlayPlayerCollection {
    pub fn new(players: Vec<PlayPlayer>) -> Self {
        PlayPlayerCollection { players }
    }

    pub fn by_id(&self, player_id: u32) -> Option<&PlayPlayer> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn by_id_mut(&mut self, player_id: u32) -> Option<&mut PlayPlayer> {
        self.players.iter_mut().find(|p| p.id == player_id)
    }

    pub fn offense(&self) -> impl Iterator<Item = &PlayPlayer> {
        self.players.iter().filter(|p| p.team == Team::Offense)
    }

    pub fn defense(&self) -> impl Iterator<Item = &PlayPlayer> {
        self.players.iter().filter(|p| p.team == Team::Defense)
    }

    pub fn offense_vec(&self) -> Vec<PlayPlayer> {
        self.offense().cloned().collect()
    }

    pub fn defense_vec(&self) -> Vec<PlayPlayer> {
        self.defense().cloned().collect()
    }

    pub fn eligible_receivers(&self) -> impl Iterator<Item = &PlayPlayer> {
        self.offense()
            .filter(|p| p.is_eligible && !matches!(p.role, PlayerRole::Quarterback))
    }

    pub fn nearest_defender(&self, point: Vector2<f32>) -> Option<&PlayPlayer> {
        self.defense().min_by(|a, b| {
            a.distance_to(point)
                .partial_cmp(&b.distance_to(point))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
