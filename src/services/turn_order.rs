//! Closed lookup tables mapping the turn counter to (phase, acting side).
//! The orderings encode competitive-draft convention and are not derivable,
//! so both tables are spelled out counter by counter. A counter outside
//! 1..=21 means the state machine already broke its own contract, which is
//! fatal rather than recoverable.

use crate::dto::draft_dto::{DraftPhase, DraftTurn};

pub fn phase_for(tournament_ban: bool, turn_counter: u32) -> DraftPhase {
    if tournament_ban {
        tournament_phase(turn_counter)
    } else {
        standard_phase(turn_counter)
    }
}

pub fn turn_for(tournament_ban: bool, turn_counter: u32) -> DraftTurn {
    if tournament_ban {
        tournament_turn(turn_counter)
    } else {
        standard_turn(turn_counter)
    }
}

fn standard_phase(turn_counter: u32) -> DraftPhase {
    match turn_counter {
        1..=10 => DraftPhase::Ban,
        11..=20 => DraftPhase::Pick,
        21 => DraftPhase::End,
        _ => panic!("turn counter {turn_counter} outside the standard draft table"),
    }
}

fn standard_turn(turn_counter: u32) -> DraftTurn {
    match turn_counter {
        // bans, alternating
        1 | 3 | 5 | 7 | 9 => DraftTurn::Blue,
        2 | 4 | 6 | 8 | 10 => DraftTurn::Red,
        // picks, snake order
        11 | 14 | 15 | 18 | 19 => DraftTurn::Blue,
        12 | 13 | 16 | 17 | 20 => DraftTurn::Red,
        21 => DraftTurn::End,
        _ => panic!("turn counter {turn_counter} outside the standard draft table"),
    }
}

fn tournament_phase(turn_counter: u32) -> DraftPhase {
    match turn_counter {
        1..=6 => DraftPhase::Ban,
        7..=12 => DraftPhase::Pick,
        13..=16 => DraftPhase::Ban,
        17..=20 => DraftPhase::Pick,
        21 => DraftPhase::End,
        _ => panic!("turn counter {turn_counter} outside the tournament draft table"),
    }
}

fn tournament_turn(turn_counter: u32) -> DraftTurn {
    match turn_counter {
        // first ban round
        1 | 3 | 5 => DraftTurn::Blue,
        2 | 4 | 6 => DraftTurn::Red,
        // first pick round
        7 | 10 | 11 => DraftTurn::Blue,
        8 | 9 | 12 => DraftTurn::Red,
        // second ban round
        13 | 15 => DraftTurn::Red,
        14 | 16 => DraftTurn::Blue,
        // second pick round
        17 | 20 => DraftTurn::Red,
        18 | 19 => DraftTurn::Blue,
        21 => DraftTurn::End,
        _ => panic!("turn counter {turn_counter} outside the tournament draft table"),
    }
}
