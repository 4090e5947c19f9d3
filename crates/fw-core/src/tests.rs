//! Unit tests for fw-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(AgentId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(3).to_string(), "AgentId(3)");
    }
}

#[cfg(test)]
mod direction {
    use crate::{CoreError, Direction};

    #[test]
    fn symbols_roundtrip() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_symbol(d.symbol()).unwrap(), d);
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
        }
    }

    #[test]
    fn letters_accepted() {
        assert_eq!("n".parse::<Direction>().unwrap(), Direction::North);
        assert_eq!("S".parse::<Direction>().unwrap(), Direction::South);
        assert_eq!(" e ".parse::<Direction>().unwrap(), Direction::East);
        assert_eq!("W".parse::<Direction>().unwrap(), Direction::West);
    }

    #[test]
    fn unknown_symbol_is_config_error() {
        assert_eq!(
            "x".parse::<Direction>(),
            Err(CoreError::InvalidDirection("x".into()))
        );
        assert!("^^".parse::<Direction>().is_err());
        assert!("".parse::<Direction>().is_err());
    }

    #[test]
    fn indices_are_distinct() {
        let mut seen = [false; 4];
        for d in Direction::ALL {
            assert!(!seen[d.index()]);
            seen[d.index()] = true;
        }
    }
}

#[cfg(test)]
mod turns {
    use crate::{Direction::*, TurnKind};

    #[test]
    fn same_heading_is_straight() {
        assert_eq!(TurnKind::between(North, North), TurnKind::Straight);
        assert_eq!(TurnKind::between(West, West), TurnKind::Straight);
    }

    #[test]
    fn left_table() {
        assert_eq!(TurnKind::between(North, West), TurnKind::Left);
        assert_eq!(TurnKind::between(South, East), TurnKind::Left);
        assert_eq!(TurnKind::between(East, North), TurnKind::Left);
        assert_eq!(TurnKind::between(West, South), TurnKind::Left);
    }

    #[test]
    fn everything_else_is_right() {
        assert_eq!(TurnKind::between(North, East), TurnKind::Right);
        assert_eq!(TurnKind::between(East, South), TurnKind::Right);
        // A reversal is not a left turn.
        assert_eq!(TurnKind::between(North, South), TurnKind::Right);
    }
}

#[cfg(test)]
mod regions {
    use crate::{Direction, Quadrant::*, RegionSet, TurnKind};

    #[test]
    fn sizes_follow_turn_kind() {
        for d in Direction::ALL {
            assert_eq!(RegionSet::for_path(d, TurnKind::Right).len(), 1);
            assert_eq!(RegionSet::for_path(d, TurnKind::Straight).len(), 2);
            assert_eq!(RegionSet::for_path(d, TurnKind::Left).len(), 3);
        }
    }

    #[test]
    fn full_path_table() {
        use Direction::*;
        use TurnKind::*;
        #[rustfmt::skip]
        let table: [(Direction, TurnKind, &[crate::Quadrant]); 12] = [
            (North, Right,    &[SW]),
            (North, Straight, &[SW, NW]),
            (North, Left,     &[SW, NW, NE]),
            (South, Right,    &[NE]),
            (South, Straight, &[NE, SE]),
            (South, Left,     &[NE, SE, SW]),
            (East,  Right,    &[NW]),
            (East,  Straight, &[NW, NE]),
            (East,  Left,     &[NW, NE, SE]),
            (West,  Right,    &[SE]),
            (West,  Straight, &[SE, SW]),
            (West,  Left,     &[SE, SW, NW]),
        ];
        for (origin, turn, quadrants) in table {
            assert_eq!(
                RegionSet::for_path(origin, turn),
                RegionSet::of(quadrants),
                "{origin} {turn}"
            );
        }
    }

    #[test]
    fn movement_matches_turn_table() {
        use Direction::*;
        assert_eq!(RegionSet::for_movement(South, West), RegionSet::of(&[NE]));
        assert_eq!(RegionSet::for_movement(East, South), RegionSet::of(&[NW]));
        assert_eq!(RegionSet::for_movement(West, North), RegionSet::of(&[SE]));
        assert_eq!(RegionSet::for_movement(West, South), RegionSet::of(&[SE, SW, NW]));
    }

    #[test]
    fn iteration_is_ascending() {
        let set = RegionSet::of(&[SE, NW, SW]);
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec![NW, SW, SE]);
        let reverse: Vec<_> = set.iter().rev().collect();
        assert_eq!(reverse, vec![SE, SW, NW]);
    }

    #[test]
    fn southbound_left_meets_eastbound_left() {
        let a = RegionSet::for_movement(Direction::South, Direction::East);
        let b = RegionSet::for_movement(Direction::East, Direction::North);
        assert!(a.intersects(b));
        assert_eq!(a.to_string(), "NE+SW+SE");
    }

    #[test]
    fn opposing_right_turns_are_disjoint() {
        let a = RegionSet::for_path(Direction::North, TurnKind::Right);
        let b = RegionSet::for_path(Direction::South, TurnKind::Right);
        assert!(!a.intersects(b));
    }
}

#[cfg(test)]
mod time {
    use crate::{CrossingConfig, SimClock, TurnKind};

    #[test]
    fn defaults_match_reference_run() {
        let c = CrossingConfig::default();
        assert_eq!(c.stop_secs, 2.0);
        assert_eq!(c.crossing_secs(TurnKind::Left), 5.0);
        assert_eq!(c.crossing_secs(TurnKind::Straight), 4.0);
        assert_eq!(c.crossing_secs(TurnKind::Right), 3.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn turn_duration_ordering() {
        let c = CrossingConfig::default();
        assert!(c.crossing_secs(TurnKind::Left) > c.crossing_secs(TurnKind::Straight));
        assert!(c.crossing_secs(TurnKind::Straight) > c.crossing_secs(TurnKind::Right));
    }

    #[test]
    fn misordered_durations_rejected() {
        let c = CrossingConfig { right_secs: 4.5, ..CrossingConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn non_positive_values_rejected() {
        let c = CrossingConfig::default().with_time_scale(0.0);
        assert!(c.validate().is_err());
        let c = CrossingConfig { stop_secs: f64::NAN, ..CrossingConfig::default() };
        assert!(c.validate().is_err());
    }

    #[test]
    fn scaled_clock_advances_faster() {
        let clock = SimClock::start(0.001);
        clock.sleep_for(5.0); // 5 ms of wall time
        assert!(clock.now() >= 5.0);
    }

    #[test]
    fn sleep_until_past_returns_immediately() {
        let clock = SimClock::start(1.0);
        clock.sleep_until(-1.0);
        assert!(clock.now() < 1.0);
    }
}
